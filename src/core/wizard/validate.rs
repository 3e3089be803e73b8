// src/core/wizard/validate.rs
use chrono::Utc;
use regex::Regex;
use std::sync::LazyLock;

use super::state::UserInfo;
use crate::utils::error::{KycError, Result};

static PAN_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").expect("valid regex"));
static MOBILE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid regex"));
static OTP_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("valid regex"));
static SHARE_CODE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("valid regex"));

/// Field-level checks for the user-info form. The first failing field wins;
/// the message names it so the UI can show the error inline.
pub fn validate_user_info(info: &UserInfo) -> Result<()> {
    if info.full_name.trim().is_empty() {
        return Err(KycError::Validation("full name is required".into()));
    }
    if info.date_of_birth >= Utc::now().date_naive() {
        return Err(KycError::Validation("date of birth must be in the past".into()));
    }
    if info.address_line.trim().is_empty() {
        return Err(KycError::Validation("address is required".into()));
    }
    if info.city.trim().is_empty() {
        return Err(KycError::Validation("city is required".into()));
    }
    if info.country.trim().is_empty() {
        return Err(KycError::Validation("country is required".into()));
    }
    if !PAN_FORMAT.is_match(&info.pan) {
        return Err(KycError::Validation(
            "PAN must match the format AAAAA9999A".into(),
        ));
    }
    if !MOBILE_FORMAT.is_match(&info.mobile) {
        return Err(KycError::Validation("mobile number must be 10 digits".into()));
    }
    Ok(())
}

pub fn validate_otp(code: &str) -> Result<()> {
    if OTP_FORMAT.is_match(code) {
        Ok(())
    } else {
        Err(KycError::Validation("Invalid OTP".into()))
    }
}

pub fn validate_share_code(code: &str) -> Result<()> {
    if SHARE_CODE_FORMAT.is_match(code) {
        Ok(())
    } else {
        Err(KycError::Validation("share code must be 4 digits".into()))
    }
}

pub fn validate_aadhaar_file(file: &[u8]) -> Result<()> {
    if file.is_empty() {
        Err(KycError::Validation("Aadhaar file is required".into()))
    } else {
        Ok(())
    }
}

pub fn validate_liveness_image(image: &str) -> Result<()> {
    if image.starts_with("data:image/") {
        Ok(())
    } else {
        Err(KycError::Validation("a captured selfie image is required".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_info() -> UserInfo {
        UserInfo {
            full_name: "Asha Rao".to_string(),
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

    #[test]
    fn test_valid_user_info_passes() {
        assert!(validate_user_info(&valid_info()).is_ok());
    }

    #[test]
    fn test_malformed_pan_is_rejected() {
        let mut info = valid_info();
        info.pan = "abcde1234f".to_string();
        assert!(validate_user_info(&info).is_err());
        info.pan = "ABCD1234F".to_string();
        assert!(validate_user_info(&info).is_err());
    }

    #[test]
    fn test_short_mobile_is_rejected() {
        let mut info = valid_info();
        info.mobile = "98765".to_string();
        assert!(validate_user_info(&info).is_err());
    }

    #[test]
    fn test_future_date_of_birth_is_rejected() {
        let mut info = valid_info();
        info.date_of_birth = Utc::now().date_naive() + chrono::Duration::days(1);
        assert!(validate_user_info(&info).is_err());
    }

    #[test]
    fn test_otp_must_be_six_digits() {
        assert!(validate_otp("123456").is_ok());
        assert!(validate_otp("000000").is_ok());
        assert!(validate_otp("12345").is_err());
        assert!(validate_otp("1234567").is_err());
        assert!(validate_otp("12345a").is_err());
    }

    #[test]
    fn test_share_code_must_be_four_digits() {
        assert!(validate_share_code("1234").is_ok());
        assert!(validate_share_code("123").is_err());
        assert!(validate_share_code("12345").is_err());
        assert!(validate_share_code("12a4").is_err());
    }

    #[test]
    fn test_liveness_image_must_be_a_data_url() {
        assert!(validate_liveness_image("data:image/jpeg;base64,AAAA").is_ok());
        assert!(validate_liveness_image("https://example.com/selfie.jpg").is_err());
        assert!(validate_liveness_image("").is_err());
    }
}
