// src/core/scoring/mod.rs
pub mod name_match;

use serde::Serialize;

use crate::core::wizard::state::{FinalStatus, KycState};

pub const MOBILE_POINTS: u32 = 20;
pub const PAN_POINTS: u32 = 20;
pub const PAN_NAME_BONUS: u32 = 10;
pub const AADHAAR_POINTS: u32 = 40;
pub const LIVENESS_POINTS: u32 = 10;
pub const MAX_POINTS: u32 = 100;

/// Minimum PAN name-match percentage for the bonus points.
pub const NAME_MATCH_BONUS_THRESHOLD: u8 = 80;
/// Minimum face-match percentage for the liveness points.
pub const FACE_MATCH_THRESHOLD: u8 = 80;

pub const VERIFIED_THRESHOLD: u8 = 90;
pub const PENDING_REVIEW_THRESHOLD: u8 = 70;

/// Per-step point allocation behind a risk score, surfaced to the review
/// screen so the applicant can see where points were lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBreakdown {
    pub mobile_points: u32,
    pub pan_points: u32,
    pub aadhaar_points: u32,
    pub liveness_points: u32,
    pub earned_points: u32,
    pub max_points: u32,
    pub risk_score: u8,
    pub outcome: FinalStatus,
}

/// Combine the four verification outcomes into a score and an outcome.
///
/// The denominator stays at the full 100 points even when liveness was
/// skipped: skipping forfeits those 10 points instead of shrinking the
/// scale, which caps a liveness-skipping applicant at 90.
pub fn assess(state: &KycState) -> RiskBreakdown {
    let mobile_points = if state.mobile_verified { MOBILE_POINTS } else { 0 };

    let pan_points = if state.pan_verified {
        let bonus = match state.pan_name_match {
            Some(score) if score >= NAME_MATCH_BONUS_THRESHOLD => PAN_NAME_BONUS,
            _ => 0,
        };
        PAN_POINTS + bonus
    } else {
        0
    };

    let aadhaar_points = if state.aadhaar_verified { AADHAAR_POINTS } else { 0 };

    let liveness_points = match (state.liveness_verified, state.face_match_score) {
        (true, Some(score)) if score >= FACE_MATCH_THRESHOLD => LIVENESS_POINTS,
        _ => 0,
    };

    let earned_points = mobile_points + pan_points + aadhaar_points + liveness_points;
    let risk_score = ((earned_points as f64 / MAX_POINTS as f64) * 100.0).round() as u8;

    RiskBreakdown {
        mobile_points,
        pan_points,
        aadhaar_points,
        liveness_points,
        earned_points,
        max_points: MAX_POINTS,
        risk_score,
        outcome: outcome_for(risk_score),
    }
}

/// Thresholds are inclusive at the lower bound of each band.
pub fn outcome_for(score: u8) -> FinalStatus {
    if score >= VERIFIED_THRESHOLD {
        FinalStatus::Verified
    } else if score >= PENDING_REVIEW_THRESHOLD {
        FinalStatus::PendingReview
    } else {
        FinalStatus::Rejected
    }
}
