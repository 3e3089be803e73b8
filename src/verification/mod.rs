// src/verification/mod.rs
pub mod http;
pub mod masked;
pub mod stub;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::wizard::state::{AadhaarData, FinalStatus, UserInfo};
use crate::utils::config::{BackendConfig, VerificationMode};
use crate::utils::error::Result;

use self::http::HttpBackend;
use self::masked::MaskedBackend;
use self::stub::StubBackend;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpOutcome {
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanOutcome {
    pub verified: bool,
    pub name_match: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AadhaarOutcome {
    pub verified: bool,
    pub data: AadhaarData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessOutcome {
    pub live: bool,
    pub face_match_score: u8,
}

/// What the PAN step sends for verification: the number, the name printed on
/// the card, and the name the applicant registered with.
#[derive(Debug, Clone)]
pub struct PanRequest {
    pub pan: String,
    pub name_on_pan: String,
    pub registered_name: String,
}

#[derive(Debug, Clone)]
pub struct AadhaarUpload {
    pub file_name: String,
    pub file: Vec<u8>,
    pub share_code: String,
}

/// The verification capability behind the wizard. One call per step;
/// implementations either reach the verification API or answer locally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationBackend: Send + Sync {
    /// Register the applicant and obtain the KYC id the remaining calls key on.
    async fn start_kyc(&self, info: &UserInfo) -> Result<Uuid>;

    async fn send_otp(&self, kyc_id: Uuid, mobile: &str) -> Result<()>;

    async fn verify_otp(&self, kyc_id: Uuid, code: &str) -> Result<OtpOutcome>;

    async fn verify_pan(&self, kyc_id: Uuid, request: &PanRequest) -> Result<PanOutcome>;

    async fn verify_aadhaar(&self, kyc_id: Uuid, upload: &AadhaarUpload)
        -> Result<AadhaarOutcome>;

    /// `image` is the captured selfie as a `data:image/...` URL.
    async fn verify_liveness(&self, kyc_id: Uuid, image: &str) -> Result<LivenessOutcome>;

    async fn submit(&self, kyc_id: Uuid, status: FinalStatus) -> Result<()>;
}

/// Build the backend the configuration asks for. Masking is a composition
/// decided here, never a catch block inside a step.
pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn VerificationBackend>> {
    match config.verification {
        VerificationMode::Real => Ok(Arc::new(HttpBackend::new(config)?)),
        VerificationMode::Stub => Ok(Arc::new(StubBackend::new())),
        VerificationMode::Masked => Ok(Arc::new(MaskedBackend::new(
            HttpBackend::new(config)?,
            StubBackend::new(),
        ))),
    }
}
