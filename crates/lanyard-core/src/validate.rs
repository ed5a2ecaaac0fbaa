//! Pre-flight form validation.
//!
//! Violations surface as [`ApiError::Validation`] and never reach the
//! network.

use crate::api::errors::ApiError;
use crate::api::types::UserProfile;

const MIN_PASSWORD_LEN: usize = 6;

/// Validates the login form.
pub fn login_form(email: &str, password: &str) -> Result<(), ApiError> {
    check_email(email)?;
    if password.is_empty() {
        return Err(ApiError::Validation("Password is required".to_string()));
    }
    Ok(())
}

/// Validates the registration form.
pub fn register_form(email: &str, password: &str, profile: &UserProfile) -> Result<(), ApiError> {
    check_email(email)?;
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    for (value, label) in [
        (&profile.name, "Name"),
        (&profile.company, "Company"),
        (&profile.position, "Position"),
        (&profile.phone, "Phone"),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!("{label} is required")));
        }
    }

    check_cpf(&profile.cpf)?;
    Ok(())
}

fn check_email(email: &str) -> Result<(), ApiError> {
    let email = email.trim();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if valid {
        Ok(())
    } else {
        Err(ApiError::Validation("Invalid email address".to_string()))
    }
}

/// CPF must carry exactly 11 digits; punctuation (dots, dash) is ignored.
fn check_cpf(cpf: &str) -> Result<(), ApiError> {
    let digits = cpf.chars().filter(char::is_ascii_digit).count();
    if digits == 11 {
        Ok(())
    } else {
        Err(ApiError::Validation("CPF must have 11 digits".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Ana".to_string(),
            company: "Acme".to_string(),
            position: "Dev".to_string(),
            phone: "+55 11 99999-0000".to_string(),
            cpf: "123.456.789-09".to_string(),
        }
    }

    #[test]
    fn test_login_form_accepts_valid_input() {
        assert!(login_form("a@b.com", "secret").is_ok());
    }

    #[test]
    fn test_login_form_rejects_bad_email_and_empty_password() {
        assert!(matches!(
            login_form("not-an-email", "secret"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            login_form("a@b.com", ""),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_register_form_checks_profile_fields() {
        assert!(register_form("a@b.com", "secret", &profile()).is_ok());

        let mut missing_company = profile();
        missing_company.company = "  ".to_string();
        assert!(matches!(
            register_form("a@b.com", "secret", &missing_company),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_cpf_digit_count_ignores_punctuation() {
        let mut p = profile();
        p.cpf = "12345678909".to_string();
        assert!(register_form("a@b.com", "secret", &p).is_ok());

        p.cpf = "123.456.789".to_string();
        assert!(matches!(
            register_form("a@b.com", "secret", &p),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_short_password_rejected_on_register() {
        assert!(matches!(
            register_form("a@b.com", "abc", &profile()),
            Err(ApiError::Validation(_))
        ));
    }
}
