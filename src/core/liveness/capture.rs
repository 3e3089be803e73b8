// src/core/liveness/capture.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::utils::error::{KycError, Result};

/// One track of an acquired media stream. Stopping is idempotent.
pub trait MediaTrack: Send {
    fn is_live(&self) -> bool;
    fn capture_frame(&mut self) -> Result<Vec<u8>>;
    fn stop(&mut self);
}

/// Something that can hand out camera streams (a device, or a stub).
pub trait MediaSource: Send + Sync {
    fn open(&self) -> Result<CameraStream>;
}

/// An acquired camera stream. Owns its tracks and stops every one of them on
/// [`CameraStream::stop`] and on drop, so the device is released on every
/// exit path, including abrupt teardown.
pub struct CameraStream {
    tracks: Vec<Box<dyn MediaTrack>>,
}

impl CameraStream {
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self { tracks }
    }

    pub fn capture_frame(&mut self) -> Result<Vec<u8>> {
        let track = self
            .tracks
            .iter_mut()
            .find(|track| track.is_live())
            .ok_or_else(|| KycError::Verification("no live video track".into()))?;
        track.capture_frame()
    }

    pub fn stop(&mut self) {
        for track in &mut self.tracks {
            track.stop();
        }
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        debug!("Releasing camera stream");
        self.stop();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    Idle,
    Streaming,
    Captured,
}

/// The selfie-capture flow of the liveness step: start the camera, take one
/// frame, keep the frame. Cancel and retake both release the stream; so does
/// taking the frame itself, and so does dropping the whole capture mid-flow.
pub struct LivenessCapture {
    stream: Option<CameraStream>,
    frame: Option<Vec<u8>>,
}

impl LivenessCapture {
    pub fn new() -> Self {
        Self { stream: None, frame: None }
    }

    pub fn phase(&self) -> CapturePhase {
        match (&self.stream, &self.frame) {
            (Some(_), _) => CapturePhase::Streaming,
            (None, Some(_)) => CapturePhase::Captured,
            (None, None) => CapturePhase::Idle,
        }
    }

    pub fn start(&mut self, source: &dyn MediaSource) -> Result<()> {
        if self.stream.is_some() {
            return Err(KycError::Verification("camera is already active".into()));
        }
        self.stream = Some(source.open()?);
        Ok(())
    }

    /// Take one frame and release the camera. The stream is released even
    /// when the frame capture itself fails.
    pub fn capture(&mut self) -> Result<Vec<u8>> {
        let mut stream = self
            .stream
            .take()
            .ok_or_else(|| KycError::Verification("camera is not active".into()))?;
        let frame = stream.capture_frame()?;
        self.frame = Some(frame.clone());
        Ok(frame)
    }

    /// Discard any frame and go back to streaming.
    pub fn retake(&mut self, source: &dyn MediaSource) -> Result<()> {
        self.release();
        self.frame = None;
        self.start(source)
    }

    /// Abandon the capture entirely.
    pub fn cancel(&mut self) {
        self.release();
        self.frame = None;
    }

    pub fn frame(&self) -> Option<&[u8]> {
        self.frame.as_deref()
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }
}

impl Default for LivenessCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// A canned camera for tests and stubbed verification: serves a fixed frame
/// and records how many of its tracks were stopped.
pub struct StubCamera {
    frame: Vec<u8>,
    stops: Arc<AtomicUsize>,
}

impl StubCamera {
    pub fn new(frame: Vec<u8>) -> Self {
        Self {
            frame,
            stops: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many tracks handed out by this camera have been stopped.
    pub fn stopped_tracks(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl MediaSource for StubCamera {
    fn open(&self) -> Result<CameraStream> {
        Ok(CameraStream::new(vec![Box::new(StubTrack {
            frame: self.frame.clone(),
            live: true,
            stops: self.stops.clone(),
        })]))
    }
}

struct StubTrack {
    frame: Vec<u8>,
    live: bool,
    stops: Arc<AtomicUsize>,
}

impl MediaTrack for StubTrack {
    fn is_live(&self) -> bool {
        self.live
    }

    fn capture_frame(&mut self) -> Result<Vec<u8>> {
        if !self.live {
            return Err(KycError::Verification("video track has been stopped".into()));
        }
        Ok(self.frame.clone())
    }

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_releases_the_stream() {
        let camera = StubCamera::new(vec![1, 2, 3]);
        let mut capture = LivenessCapture::new();

        capture.start(&camera).unwrap();
        assert_eq!(capture.phase(), CapturePhase::Streaming);
        assert_eq!(camera.stopped_tracks(), 0);

        let frame = capture.capture().unwrap();
        assert_eq!(frame, vec![1, 2, 3]);
        assert_eq!(capture.phase(), CapturePhase::Captured);
        assert_eq!(camera.stopped_tracks(), 1);
    }

    #[test]
    fn test_cancel_releases_the_stream() {
        let camera = StubCamera::new(vec![1]);
        let mut capture = LivenessCapture::new();

        capture.start(&camera).unwrap();
        capture.cancel();

        assert_eq!(capture.phase(), CapturePhase::Idle);
        assert!(capture.frame().is_none());
        assert_eq!(camera.stopped_tracks(), 1);
    }

    #[test]
    fn test_retake_releases_the_old_stream() {
        let camera = StubCamera::new(vec![1]);
        let mut capture = LivenessCapture::new();

        capture.start(&camera).unwrap();
        capture.capture().unwrap();
        capture.retake(&camera).unwrap();

        assert_eq!(capture.phase(), CapturePhase::Streaming);
        assert!(capture.frame().is_none());
        assert_eq!(camera.stopped_tracks(), 1);

        capture.cancel();
        assert_eq!(camera.stopped_tracks(), 2);
    }

    #[test]
    fn test_drop_releases_the_stream() {
        let camera = StubCamera::new(vec![1]);
        {
            let mut capture = LivenessCapture::new();
            capture.start(&camera).unwrap();
            // Dropped while streaming, as on an abrupt navigation away.
        }
        assert_eq!(camera.stopped_tracks(), 1);
    }

    #[test]
    fn test_double_start_is_refused() {
        let camera = StubCamera::new(vec![1]);
        let mut capture = LivenessCapture::new();
        capture.start(&camera).unwrap();
        assert!(capture.start(&camera).is_err());
    }

    #[test]
    fn test_capture_without_stream_is_refused() {
        let mut capture = LivenessCapture::new();
        assert!(capture.capture().is_err());
    }
}
