// src/verification/http.rs
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    AadhaarOutcome, AadhaarUpload, LivenessOutcome, OtpOutcome, PanOutcome, PanRequest,
    VerificationBackend,
};
use crate::core::wizard::state::{AadhaarData, FinalStatus, UserInfo};
use crate::utils::config::BackendConfig;
use crate::utils::error::{KycError, Result};

/// JSON-over-HTTPS client for the external verification API.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KycError::Backend(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartKycResponse {
    kyc_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtpSendRequest<'a> {
    mobile: &'a str,
    kyc_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtpVerifyRequest<'a> {
    kyc_id: Uuid,
    code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PanVerifyRequest<'a> {
    kyc_id: Uuid,
    pan: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PanVerifyResponse {
    verified: bool,
    name_match: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AadhaarVerifyResponse {
    verified: bool,
    #[serde(flatten)]
    data: AadhaarData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LivenessRequest<'a> {
    image: &'a str,
    kyc_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LivenessResponse {
    face_match_score: u8,
    live: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitRequest {
    kyc_id: Uuid,
    status: FinalStatus,
}

#[async_trait]
impl VerificationBackend for HttpBackend {
    async fn start_kyc(&self, info: &UserInfo) -> Result<Uuid> {
        let response = self.client.post(self.url("/kyc")).json(info).send().await?;
        if !response.status().is_success() {
            return Err(KycError::Backend(format!(
                "KYC registration returned {}",
                response.status()
            )));
        }
        let body: StartKycResponse = response.json().await?;
        Ok(body.kyc_id)
    }

    async fn send_otp(&self, kyc_id: Uuid, mobile: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/otp/send"))
            .json(&OtpSendRequest { mobile, kyc_id })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(KycError::Backend(format!(
                "OTP dispatch returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn verify_otp(&self, kyc_id: Uuid, code: &str) -> Result<OtpOutcome> {
        let response = self
            .client
            .post(self.url("/otp/verify"))
            .json(&OtpVerifyRequest { kyc_id, code })
            .send()
            .await?;
        // 2xx means the code matched; a client error means it did not. Only
        // transport problems and server errors bubble up as failures.
        if response.status().is_success() {
            Ok(OtpOutcome { verified: true })
        } else if response.status().is_client_error() {
            Ok(OtpOutcome { verified: false })
        } else {
            Err(KycError::Backend(format!(
                "OTP verification returned {}",
                response.status()
            )))
        }
    }

    async fn verify_pan(&self, kyc_id: Uuid, request: &PanRequest) -> Result<PanOutcome> {
        let response = self
            .client
            .post(self.url("/pan/verify"))
            .json(&PanVerifyRequest {
                kyc_id,
                pan: &request.pan,
                name: &request.name_on_pan,
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(KycError::Backend(format!(
                "PAN verification returned {}",
                response.status()
            )));
        }
        let body: PanVerifyResponse = response.json().await?;
        Ok(PanOutcome { verified: body.verified, name_match: body.name_match })
    }

    async fn verify_aadhaar(
        &self,
        kyc_id: Uuid,
        upload: &AadhaarUpload,
    ) -> Result<AadhaarOutcome> {
        let file = multipart::Part::bytes(upload.file.clone())
            .file_name(upload.file_name.clone());
        let form = multipart::Form::new()
            .part("file", file)
            .text("shareCode", upload.share_code.clone())
            .text("kycId", kyc_id.to_string());

        let response = self
            .client
            .post(self.url("/aadhaar/upload"))
            .multipart(form)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(KycError::Backend(format!(
                "Aadhaar verification returned {}",
                response.status()
            )));
        }
        let body: AadhaarVerifyResponse = response.json().await?;
        Ok(AadhaarOutcome { verified: body.verified, data: body.data })
    }

    async fn verify_liveness(&self, kyc_id: Uuid, image: &str) -> Result<LivenessOutcome> {
        let response = self
            .client
            .post(self.url("/liveness/upload"))
            .json(&LivenessRequest { image, kyc_id })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(KycError::Backend(format!(
                "liveness verification returned {}",
                response.status()
            )));
        }
        let body: LivenessResponse = response.json().await?;
        Ok(LivenessOutcome { live: body.live, face_match_score: body.face_match_score })
    }

    async fn submit(&self, kyc_id: Uuid, status: FinalStatus) -> Result<()> {
        let response = self
            .client
            .post(self.url("/kyc/submit"))
            .json(&SubmitRequest { kyc_id, status })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(KycError::Backend(format!(
                "KYC submission returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
