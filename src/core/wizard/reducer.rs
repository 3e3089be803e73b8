// src/core/wizard/reducer.rs
use uuid::Uuid;

use super::state::{AadhaarData, FinalStatus, KycState, UserInfo};
use crate::utils::error::{KycError, Result};

/// State transitions for one KYC session. Every mutation of a [`KycState`]
/// goes through [`reduce`]; each action replaces only the fields it names.
#[derive(Debug, Clone)]
pub enum Action {
    SetUserInfo {
        kyc_id: Uuid,
        info: UserInfo,
    },
    SetMobileVerified {
        verified: bool,
    },
    SetPanVerified {
        verified: bool,
        name_match: Option<u8>,
    },
    SetAadhaarVerified {
        verified: bool,
        data: Option<AadhaarData>,
    },
    SetLivenessVerified {
        verified: bool,
        face_match_score: Option<u8>,
    },
    SetOccupation {
        occupation: Option<String>,
        profession: Option<String>,
    },
    SetFinalStatus {
        status: FinalStatus,
    },
    Advance,
    Back,
}

/// Pure transition function. Returns the successor state without touching the
/// input; callers persist the result.
pub fn reduce(state: &KycState, action: Action) -> Result<KycState> {
    let mut next = state.clone();

    match action {
        Action::SetUserInfo { kyc_id, info } => {
            next.kyc_id = Some(kyc_id);
            next.user_info = Some(info);
            if next.final_status == FinalStatus::NotStarted {
                next.final_status = FinalStatus::InProgress;
            }
        }
        Action::SetMobileVerified { verified } => {
            next.mobile_verified = verified;
        }
        Action::SetPanVerified { verified, name_match } => {
            next.pan_verified = verified;
            // A score without its verification flag is meaningless.
            next.pan_name_match = if verified { name_match } else { None };
        }
        Action::SetAadhaarVerified { verified, data } => {
            next.aadhaar_verified = verified;
            next.aadhaar_data = if verified { data } else { None };
        }
        Action::SetLivenessVerified { verified, face_match_score } => {
            next.liveness_verified = verified;
            next.face_match_score = if verified { face_match_score } else { None };
        }
        Action::SetOccupation { occupation, profession } => {
            next.occupation = occupation;
            next.profession = profession;
        }
        Action::SetFinalStatus { status } => {
            if !status.is_terminal() {
                return Err(KycError::Transition(format!(
                    "{status:?} is not a submission outcome"
                )));
            }
            if state.final_status.is_terminal() {
                return Err(KycError::Submission(
                    "final status has already been set".into(),
                ));
            }
            if state.final_status == FinalStatus::NotStarted {
                return Err(KycError::Submission("KYC has not been started".into()));
            }
            next.final_status = status;
        }
        Action::Advance => {
            next.current_step = state.current_step.next(state)?;
        }
        Action::Back => {
            next.current_step = state.current_step.back();
        }
    }

    Ok(next)
}
