// src/api/types.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::wizard::state::{FinalStatus, KycState};

/// What the browser sees of a session after every wizard operation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub kyc_id: Option<Uuid>,
    pub current_step: u8,
    pub screen: &'static str,
    pub final_status: FinalStatus,
    pub mobile_verified: bool,
    pub pan_verified: bool,
    pub pan_name_match: Option<u8>,
    pub aadhaar_verified: bool,
    pub liveness_verified: bool,
    pub face_match_score: Option<u8>,
    pub occupation: Option<String>,
    pub profession: Option<String>,
}

impl SessionView {
    pub fn new(session_id: Uuid, state: &KycState) -> Self {
        Self {
            session_id,
            kyc_id: state.kyc_id,
            current_step: state.current_step.index(),
            screen: state.current_step.screen(),
            final_status: state.final_status,
            mobile_verified: state.mobile_verified,
            pan_verified: state.pan_verified,
            pan_name_match: state.pan_name_match,
            aadhaar_verified: state.aadhaar_verified,
            liveness_verified: state.liveness_verified,
            face_match_score: state.face_match_score,
            occupation: state.occupation.clone(),
            profession: state.profession.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyBody {
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanVerifyBody {
    pub name_on_pan: String,
}

/// Aadhaar upload as the browser sends it: the file content base64-encoded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AadhaarBody {
    pub file_name: String,
    pub file: String,
    pub share_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivenessBody {
    pub image: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationBody {
    pub occupation: Option<String>,
    pub profession: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBody {
    pub terms_accepted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    pub screen: &'static str,
}
