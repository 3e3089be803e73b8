// tests/common/mod.rs
use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use kycflow::core::services::health::HealthService;
use kycflow::core::services::wizard::WizardService;
use kycflow::core::wizard::state::UserInfo;
use kycflow::session::SessionStore;
use kycflow::verification::stub::StubBackend;
use kycflow::verification::AadhaarUpload;

/// A wizard wired to the deterministic stub backend.
pub struct TestContext {
    pub wizard: Arc<WizardService>,
}

impl TestContext {
    pub fn new() -> Self {
        let wizard = Arc::new(WizardService::new(
            Arc::new(SessionStore::new()),
            Arc::new(StubBackend::new()),
            Arc::new(HealthService::new()),
        ));
        Self { wizard }
    }

    /// Drive a fresh session up to the mobile-OTP step.
    pub async fn session_at_otp(&self) -> Uuid {
        let id = self.wizard.start_session().await;
        self.wizard.begin(&id).await.expect("begin");
        self.wizard
            .submit_user_info(&id, user_info("Asha Rao"))
            .await
            .expect("user info");
        id
    }
}

pub fn user_info(full_name: &str) -> UserInfo {
    UserInfo {
        full_name: full_name.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
        address_line: "12 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        province: "Karnataka".to_string(),
        country: "IN".to_string(),
        postal_code: "560001".to_string(),
        pan: "ABCDE1234F".to_string(),
        mobile: "9876543210".to_string(),
    }
}

pub fn aadhaar_upload() -> AadhaarUpload {
    AadhaarUpload {
        file_name: "aadhaar.xml".to_string(),
        file: b"<offline-paperless-kyc/>".to_vec(),
        share_code: "4321".to_string(),
    }
}
