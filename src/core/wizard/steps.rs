// src/core/wizard/steps.rs
use serde::{Deserialize, Serialize};

use super::state::KycState;
use crate::utils::error::{KycError, Result};

/// The wizard screens in order. Transitions run through [`WizardStep::next`],
/// which checks the verification gate for the step being left, so a session
/// cannot jump ahead of its verifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    Welcome,
    UserInfo,
    MobileOtp,
    Pan,
    Aadhaar,
    Liveness,
    Review,
}

impl WizardStep {
    pub fn index(&self) -> u8 {
        match self {
            WizardStep::Welcome => 0,
            WizardStep::UserInfo => 1,
            WizardStep::MobileOtp => 2,
            WizardStep::Pan => 3,
            WizardStep::Aadhaar => 4,
            WizardStep::Liveness => 5,
            WizardStep::Review => 6,
        }
    }

    /// Resolve a client-reported step index. Anything outside 0..=6 falls
    /// back to the welcome screen rather than erroring.
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => WizardStep::UserInfo,
            2 => WizardStep::MobileOtp,
            3 => WizardStep::Pan,
            4 => WizardStep::Aadhaar,
            5 => WizardStep::Liveness,
            6 => WizardStep::Review,
            _ => WizardStep::Welcome,
        }
    }

    pub fn screen(&self) -> &'static str {
        match self {
            WizardStep::Welcome => "welcome",
            WizardStep::UserInfo => "user-info",
            WizardStep::MobileOtp => "mobile-otp",
            WizardStep::Pan => "pan",
            WizardStep::Aadhaar => "aadhaar",
            WizardStep::Liveness => "liveness",
            WizardStep::Review => "review",
        }
    }

    /// The guarded forward transition. Liveness is the one optional step:
    /// leaving it requires no verification.
    pub fn next(self, state: &KycState) -> Result<Self> {
        match self {
            WizardStep::Welcome => Ok(WizardStep::UserInfo),
            WizardStep::UserInfo => {
                if state.user_info.is_some() {
                    Ok(WizardStep::MobileOtp)
                } else {
                    Err(KycError::Transition("user info has not been saved".into()))
                }
            }
            WizardStep::MobileOtp => {
                if state.mobile_verified {
                    Ok(WizardStep::Pan)
                } else {
                    Err(KycError::Transition("mobile number has not been verified".into()))
                }
            }
            WizardStep::Pan => {
                if state.pan_verified {
                    Ok(WizardStep::Aadhaar)
                } else {
                    Err(KycError::Transition("PAN has not been verified".into()))
                }
            }
            WizardStep::Aadhaar => {
                if state.aadhaar_verified {
                    Ok(WizardStep::Liveness)
                } else {
                    Err(KycError::Transition("Aadhaar has not been verified".into()))
                }
            }
            WizardStep::Liveness => Ok(WizardStep::Review),
            WizardStep::Review => {
                Err(KycError::Transition("review is the last step".into()))
            }
        }
    }

    /// Stepping back is always allowed and floors at the welcome screen.
    pub fn back(self) -> Self {
        Self::from_index(i64::from(self.index()) - 1)
    }
}
