// src/core/services/wizard.rs
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::liveness::capture::{LivenessCapture, MediaSource};
use crate::core::scoring::{self, RiskBreakdown};
use crate::core::services::health::HealthService;
use crate::core::wizard::reducer::Action;
use crate::core::wizard::state::{KycState, UserInfo};
use crate::core::wizard::steps::WizardStep;
use crate::core::wizard::validate;
use crate::session::SessionStore;
use crate::utils::error::{KycError, Result};
use crate::verification::{AadhaarUpload, PanRequest, VerificationBackend};

/// Drives one KYC journey per session: every step operation validates its
/// input, consults the verification backend, dispatches the matching reducer
/// action and advances the step pointer. Operations are tied to the step
/// they belong to, so a session can never run a verification out of order.
pub struct WizardService {
    sessions: Arc<SessionStore>,
    backend: Arc<dyn VerificationBackend>,
    health: Arc<HealthService>,
}

impl WizardService {
    pub fn new(
        sessions: Arc<SessionStore>,
        backend: Arc<dyn VerificationBackend>,
        health: Arc<HealthService>,
    ) -> Self {
        Self { sessions, backend, health }
    }

    pub async fn start_session(&self) -> Uuid {
        let id = self.sessions.create().await;
        self.health.record_session();
        info!("Started wizard session {}", id);
        id
    }

    pub async fn session(&self, id: &Uuid) -> Result<KycState> {
        self.sessions.get(id).await
    }

    pub async fn discard(&self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).await;
        if removed {
            info!("Discarded wizard session {}", id);
        }
        removed
    }

    /// Leave the welcome screen.
    pub async fn begin(&self, id: &Uuid) -> Result<KycState> {
        let state = self.sessions.get(id).await?;
        require_step(&state, WizardStep::Welcome)?;
        self.sessions.apply(id, Action::Advance).await
    }

    pub async fn submit_user_info(&self, id: &Uuid, info: UserInfo) -> Result<KycState> {
        let state = self.sessions.get(id).await?;
        require_step(&state, WizardStep::UserInfo)?;
        validate::validate_user_info(&info)?;

        // Re-saving an edited form keeps the id assigned on the first save.
        let kyc_id = match state.kyc_id {
            Some(kyc_id) => kyc_id,
            None => self.backend.start_kyc(&info).await?,
        };

        self.sessions.apply(id, Action::SetUserInfo { kyc_id, info }).await?;
        self.sessions.apply(id, Action::Advance).await
    }

    pub async fn send_otp(&self, id: &Uuid) -> Result<()> {
        let state = self.sessions.get(id).await?;
        require_step(&state, WizardStep::MobileOtp)?;
        let (kyc_id, info) = require_registration(&state)?;
        self.backend.send_otp(kyc_id, &info.mobile).await?;
        info!("OTP dispatched for session {}", id);
        Ok(())
    }

    pub async fn verify_otp(&self, id: &Uuid, code: &str) -> Result<KycState> {
        validate::validate_otp(code)?;

        let state = self.sessions.get(id).await?;
        require_step(&state, WizardStep::MobileOtp)?;
        let (kyc_id, _) = require_registration(&state)?;

        let outcome = self.backend.verify_otp(kyc_id, code).await?;
        if !outcome.verified {
            warn!("OTP rejected for session {}", id);
            return Err(KycError::Verification("Invalid OTP".into()));
        }

        self.sessions
            .apply(id, Action::SetMobileVerified { verified: true })
            .await?;
        self.sessions.apply(id, Action::Advance).await
    }

    pub async fn verify_pan(&self, id: &Uuid, name_on_pan: &str) -> Result<KycState> {
        let name_on_pan = name_on_pan.trim();
        if name_on_pan.is_empty() {
            return Err(KycError::Validation("name on PAN is required".into()));
        }

        let state = self.sessions.get(id).await?;
        require_step(&state, WizardStep::Pan)?;
        let (kyc_id, info) = require_registration(&state)?;

        let request = PanRequest {
            pan: info.pan.clone(),
            name_on_pan: name_on_pan.to_string(),
            registered_name: info.full_name.clone(),
        };
        let outcome = self.backend.verify_pan(kyc_id, &request).await?;
        if !outcome.verified {
            return Err(KycError::Verification("PAN could not be verified".into()));
        }

        info!(
            "PAN verified for session {} with name match {}",
            id, outcome.name_match
        );
        self.sessions
            .apply(
                id,
                Action::SetPanVerified { verified: true, name_match: Some(outcome.name_match) },
            )
            .await?;
        self.sessions.apply(id, Action::Advance).await
    }

    pub async fn verify_aadhaar(&self, id: &Uuid, upload: AadhaarUpload) -> Result<KycState> {
        validate::validate_share_code(&upload.share_code)?;
        validate::validate_aadhaar_file(&upload.file)?;

        let state = self.sessions.get(id).await?;
        require_step(&state, WizardStep::Aadhaar)?;
        let (kyc_id, _) = require_registration(&state)?;

        let outcome = self.backend.verify_aadhaar(kyc_id, &upload).await?;
        if !outcome.verified {
            return Err(KycError::Verification(
                "Aadhaar document could not be verified".into(),
            ));
        }

        self.sessions
            .apply(
                id,
                Action::SetAadhaarVerified { verified: true, data: Some(outcome.data) },
            )
            .await?;
        self.sessions.apply(id, Action::Advance).await
    }

    pub async fn verify_liveness(&self, id: &Uuid, image: &str) -> Result<KycState> {
        validate::validate_liveness_image(image)?;

        let state = self.sessions.get(id).await?;
        require_step(&state, WizardStep::Liveness)?;
        let (kyc_id, _) = require_registration(&state)?;

        let outcome = self.backend.verify_liveness(kyc_id, image).await?;
        if !outcome.live {
            return Err(KycError::Verification("liveness check failed".into()));
        }

        info!(
            "Liveness verified for session {} with face match {}",
            id, outcome.face_match_score
        );
        self.sessions
            .apply(
                id,
                Action::SetLivenessVerified {
                    verified: true,
                    face_match_score: Some(outcome.face_match_score),
                },
            )
            .await?;
        self.sessions.apply(id, Action::Advance).await
    }

    /// Run the whole selfie flow against a camera: acquire the stream, take
    /// one frame, upload it. The stream is released on every path out.
    pub async fn capture_liveness(
        &self,
        id: &Uuid,
        source: &dyn MediaSource,
    ) -> Result<KycState> {
        let mut capture = LivenessCapture::new();
        capture.start(source)?;
        let frame = capture.capture()?;
        let image = format!("data:image/jpeg;base64,{}", BASE64.encode(frame));
        self.verify_liveness(id, &image).await
    }

    /// Move on to review without a selfie, forfeiting the liveness points.
    pub async fn skip_liveness(&self, id: &Uuid) -> Result<KycState> {
        let state = self.sessions.get(id).await?;
        require_step(&state, WizardStep::Liveness)?;
        info!("Liveness skipped for session {}", id);
        self.sessions.apply(id, Action::Advance).await
    }

    pub async fn set_occupation(
        &self,
        id: &Uuid,
        occupation: Option<String>,
        profession: Option<String>,
    ) -> Result<KycState> {
        let state = self.sessions.get(id).await?;
        if state.final_status.is_terminal() {
            return Err(KycError::Submission(
                "occupation cannot change after submission".into(),
            ));
        }
        self.sessions
            .apply(id, Action::SetOccupation { occupation, profession })
            .await
    }

    pub async fn review(&self, id: &Uuid) -> Result<RiskBreakdown> {
        let state = self.sessions.get(id).await?;
        require_step(&state, WizardStep::Review)?;
        Ok(scoring::assess(&state))
    }

    /// Score the journey, fix the terminal status and report it upstream.
    /// Blocked until the applicant has accepted the terms.
    pub async fn submit(&self, id: &Uuid, terms_accepted: bool) -> Result<RiskBreakdown> {
        if !terms_accepted {
            return Err(KycError::Validation(
                "terms and conditions must be accepted".into(),
            ));
        }

        let state = self.sessions.get(id).await?;
        require_step(&state, WizardStep::Review)?;
        if state.final_status.is_terminal() {
            return Err(KycError::Submission("final status has already been set".into()));
        }
        let (kyc_id, _) = require_registration(&state)?;

        let breakdown = scoring::assess(&state);
        self.backend.submit(kyc_id, breakdown.outcome).await?;
        self.sessions
            .apply(id, Action::SetFinalStatus { status: breakdown.outcome })
            .await?;
        self.health.record_submission();

        info!(
            "Session {} submitted: score {} -> {:?}",
            id, breakdown.risk_score, breakdown.outcome
        );
        Ok(breakdown)
    }

    pub async fn back(&self, id: &Uuid) -> Result<KycState> {
        self.sessions.apply(id, Action::Back).await
    }
}

fn require_step(state: &KycState, step: WizardStep) -> Result<()> {
    if state.current_step == step {
        Ok(())
    } else {
        Err(KycError::Transition(format!(
            "operation belongs to the {} step but the session is at {}",
            step.screen(),
            state.current_step.screen()
        )))
    }
}

fn require_registration(state: &KycState) -> Result<(Uuid, &UserInfo)> {
    match (state.kyc_id, state.user_info.as_ref()) {
        (Some(kyc_id), Some(info)) => Ok((kyc_id, info)),
        _ => Err(KycError::Transition("user info has not been saved".into())),
    }
}
