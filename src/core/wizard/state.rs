// src/core/wizard/state.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::steps::WizardStep;

/// Applicant details collected by the first wizard step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub address_line: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
    pub pan: String,
    pub mobile: String,
}

/// Payload extracted from a verified Aadhaar document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AadhaarData {
    pub signature_valid: bool,
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    /// Base64-encoded photograph, when the document carries one.
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalStatus {
    NotStarted,
    InProgress,
    PendingReview,
    Verified,
    Rejected,
}

impl FinalStatus {
    /// Terminal statuses may be set once and never changed afterwards.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FinalStatus::PendingReview | FinalStatus::Verified | FinalStatus::Rejected
        )
    }
}

/// The whole KYC journey for one session. Held in memory only and discarded
/// with the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycState {
    pub kyc_id: Option<Uuid>,
    pub user_info: Option<UserInfo>,
    pub mobile_verified: bool,
    pub pan_verified: bool,
    /// 0-100, meaningful only while `pan_verified` is true.
    pub pan_name_match: Option<u8>,
    pub aadhaar_verified: bool,
    pub aadhaar_data: Option<AadhaarData>,
    pub liveness_verified: bool,
    /// 0-100, meaningful only while `liveness_verified` is true.
    pub face_match_score: Option<u8>,
    pub occupation: Option<String>,
    pub profession: Option<String>,
    pub final_status: FinalStatus,
    pub current_step: WizardStep,
    pub created_at: DateTime<Utc>,
}

impl KycState {
    pub fn new() -> Self {
        Self {
            kyc_id: None,
            user_info: None,
            mobile_verified: false,
            pan_verified: false,
            pan_name_match: None,
            aadhaar_verified: false,
            aadhaar_data: None,
            liveness_verified: false,
            face_match_score: None,
            occupation: None,
            profession: None,
            final_status: FinalStatus::NotStarted,
            current_step: WizardStep::Welcome,
            created_at: Utc::now(),
        }
    }
}

impl Default for KycState {
    fn default() -> Self {
        Self::new()
    }
}
