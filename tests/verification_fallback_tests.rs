// tests/verification_fallback_tests.rs
mod common;

use std::sync::Arc;

use common::{aadhaar_upload, user_info};

use kycflow::core::services::health::HealthService;
use kycflow::core::services::wizard::WizardService;
use kycflow::core::wizard::state::FinalStatus;
use kycflow::core::wizard::steps::WizardStep;
use kycflow::session::SessionStore;
use kycflow::utils::config::{BackendConfig, VerificationMode};
use kycflow::verification::stub::DEMO_OTP;
use kycflow::verification::create_backend;

/// A wizard whose masked backend points at a dead port, so every primary
/// call fails with a connection error and the fallback answers.
fn wizard_with_dead_primary() -> Arc<WizardService> {
    let backend = create_backend(&BackendConfig {
        // Nothing listens here; connections are refused immediately.
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        verification: VerificationMode::Masked,
    })
    .expect("backend");

    Arc::new(WizardService::new(
        Arc::new(SessionStore::new()),
        backend,
        Arc::new(HealthService::new()),
    ))
}

#[tokio::test]
async fn test_demo_otp_advances_when_the_api_is_unreachable() {
    let wizard = wizard_with_dead_primary();

    let id = wizard.start_session().await;
    wizard.begin(&id).await.unwrap();
    wizard.submit_user_info(&id, user_info("Asha Rao")).await.unwrap();

    wizard.send_otp(&id).await.expect("send falls back");
    let state = wizard.verify_otp(&id, DEMO_OTP).await.expect("demo OTP verifies");
    assert!(state.mobile_verified);
    assert_eq!(state.current_step, WizardStep::Pan);
}

#[tokio::test]
async fn test_other_codes_fail_when_the_api_is_unreachable() {
    let wizard = wizard_with_dead_primary();

    let id = wizard.start_session().await;
    wizard.begin(&id).await.unwrap();
    wizard.submit_user_info(&id, user_info("Asha Rao")).await.unwrap();

    let err = wizard.verify_otp(&id, "999999").await.unwrap_err();
    assert!(err.to_string().contains("Invalid OTP"));

    let state = wizard.session(&id).await.unwrap();
    assert!(!state.mobile_verified);
    assert_eq!(state.current_step, WizardStep::MobileOtp);
}

#[tokio::test]
async fn test_whole_journey_survives_a_dead_api() {
    let wizard = wizard_with_dead_primary();

    let id = wizard.start_session().await;
    wizard.begin(&id).await.unwrap();
    wizard.submit_user_info(&id, user_info("Asha Rao")).await.unwrap();
    wizard.verify_otp(&id, DEMO_OTP).await.unwrap();

    let state = wizard.verify_pan(&id, "Asha Rao").await.unwrap();
    assert_eq!(state.pan_name_match, Some(100));

    wizard.verify_aadhaar(&id, aadhaar_upload()).await.unwrap();
    wizard.skip_liveness(&id).await.unwrap();

    let breakdown = wizard.submit(&id, true).await.unwrap();
    assert_eq!(breakdown.risk_score, 90);
    assert_eq!(breakdown.outcome, FinalStatus::Verified);
}
