// src/verification/masked.rs
use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use super::{
    AadhaarOutcome, AadhaarUpload, LivenessOutcome, OtpOutcome, PanOutcome, PanRequest,
    VerificationBackend,
};
use crate::core::wizard::state::{FinalStatus, UserInfo};
use crate::utils::error::Result;

/// Answers from the primary backend, and from the fallback whenever the
/// primary errors. A primary answer of "not verified" is NOT masked: the
/// fallback only covers unavailability, not rejection.
pub struct MaskedBackend<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> MaskedBackend<P, F>
where
    P: VerificationBackend,
    F: VerificationBackend,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> VerificationBackend for MaskedBackend<P, F>
where
    P: VerificationBackend,
    F: VerificationBackend,
{
    async fn start_kyc(&self, info: &UserInfo) -> Result<Uuid> {
        match self.primary.start_kyc(info).await {
            Ok(kyc_id) => Ok(kyc_id),
            Err(err) => {
                warn!("KYC registration unavailable, answering locally: {}", err);
                self.fallback.start_kyc(info).await
            }
        }
    }

    async fn send_otp(&self, kyc_id: Uuid, mobile: &str) -> Result<()> {
        match self.primary.send_otp(kyc_id, mobile).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!("OTP dispatch unavailable, answering locally: {}", err);
                self.fallback.send_otp(kyc_id, mobile).await
            }
        }
    }

    async fn verify_otp(&self, kyc_id: Uuid, code: &str) -> Result<OtpOutcome> {
        match self.primary.verify_otp(kyc_id, code).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!("OTP verification unavailable, answering locally: {}", err);
                self.fallback.verify_otp(kyc_id, code).await
            }
        }
    }

    async fn verify_pan(&self, kyc_id: Uuid, request: &PanRequest) -> Result<PanOutcome> {
        match self.primary.verify_pan(kyc_id, request).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!("PAN verification unavailable, answering locally: {}", err);
                self.fallback.verify_pan(kyc_id, request).await
            }
        }
    }

    async fn verify_aadhaar(
        &self,
        kyc_id: Uuid,
        upload: &AadhaarUpload,
    ) -> Result<AadhaarOutcome> {
        match self.primary.verify_aadhaar(kyc_id, upload).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!("Aadhaar verification unavailable, answering locally: {}", err);
                self.fallback.verify_aadhaar(kyc_id, upload).await
            }
        }
    }

    async fn verify_liveness(&self, kyc_id: Uuid, image: &str) -> Result<LivenessOutcome> {
        match self.primary.verify_liveness(kyc_id, image).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!("Liveness verification unavailable, answering locally: {}", err);
                self.fallback.verify_liveness(kyc_id, image).await
            }
        }
    }

    async fn submit(&self, kyc_id: Uuid, status: FinalStatus) -> Result<()> {
        match self.primary.submit(kyc_id, status).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!("KYC submission unavailable, answering locally: {}", err);
                self.fallback.submit(kyc_id, status).await
            }
        }
    }
}
