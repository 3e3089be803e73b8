// src/verification/stub.rs
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use super::{
    AadhaarOutcome, AadhaarUpload, LivenessOutcome, OtpOutcome, PanOutcome, PanRequest,
    VerificationBackend,
};
use crate::core::scoring::name_match::name_match;
use crate::core::wizard::state::{AadhaarData, FinalStatus, UserInfo};
use crate::utils::error::Result;

/// The one OTP the stub accepts.
pub const DEMO_OTP: &str = "123456";

/// Deterministic demo verification: no network, no external state. PAN name
/// matching runs the same heuristic the review scoring expects, liveness
/// answers a strong face match from a fixed range.
pub struct StubBackend {
    sent_otps: Mutex<Vec<(Uuid, String)>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self { sent_otps: Mutex::new(Vec::new()) }
    }

    /// OTP dispatches recorded so far, oldest first.
    pub fn sent_otps(&self) -> Vec<(Uuid, String)> {
        self.sent_otps.lock().clone()
    }
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationBackend for StubBackend {
    async fn start_kyc(&self, info: &UserInfo) -> Result<Uuid> {
        let kyc_id = Uuid::new_v4();
        info!("Stub KYC {} registered for {}", kyc_id, info.full_name);
        Ok(kyc_id)
    }

    async fn send_otp(&self, kyc_id: Uuid, mobile: &str) -> Result<()> {
        self.sent_otps.lock().push((kyc_id, mobile.to_string()));
        info!("Stub OTP dispatched to {}", mobile);
        Ok(())
    }

    async fn verify_otp(&self, _kyc_id: Uuid, code: &str) -> Result<OtpOutcome> {
        Ok(OtpOutcome { verified: code == DEMO_OTP })
    }

    async fn verify_pan(&self, _kyc_id: Uuid, request: &PanRequest) -> Result<PanOutcome> {
        let name_match = name_match(&request.registered_name, &request.name_on_pan);
        Ok(PanOutcome { verified: true, name_match })
    }

    async fn verify_aadhaar(
        &self,
        _kyc_id: Uuid,
        _upload: &AadhaarUpload,
    ) -> Result<AadhaarOutcome> {
        Ok(AadhaarOutcome {
            verified: true,
            data: AadhaarData {
                signature_valid: true,
                name: None,
                date_of_birth: None,
                address: None,
                photo: None,
            },
        })
    }

    async fn verify_liveness(&self, _kyc_id: Uuid, _image: &str) -> Result<LivenessOutcome> {
        let face_match_score = rand::thread_rng().gen_range(80..=95);
        Ok(LivenessOutcome { live: true, face_match_score })
    }

    async fn submit(&self, kyc_id: Uuid, status: FinalStatus) -> Result<()> {
        info!("Stub KYC {} submitted as {:?}", kyc_id, status);
        Ok(())
    }
}
