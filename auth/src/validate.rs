//! Registration input checks.
//!
//! Mirrors the HTTP layer's registration contract: alphanumeric usernames,
//! RFC-5322-ish emails, and a password policy of at least 8 characters with
//! upper case, lower case, a digit and a special character. Each function
//! returns the list of human-readable violations, empty when valid.

/// Validate a username: non-empty and strictly alphanumeric.
#[must_use]
pub fn validate_username(username: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if username.is_empty() {
        errors.push("Username is required".to_string());
    } else if !username.chars().all(char::is_alphanumeric) {
        errors.push("Username must be alphanumeric (letters and numbers only)".to_string());
    }
    errors
}

/// Validate an email address format.
///
/// Basic structural validation: exactly one `@`, non-empty local and domain
/// parts, a dot in the domain, and a sane overall length.
#[must_use]
pub fn validate_email(email: &str) -> Vec<String> {
    if is_valid_email(email) {
        Vec::new()
    } else {
        vec!["Invalid email format".to_string()]
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.len() < 3 || email.len() > 255 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    domain.contains('.')
}

/// Validate a password against the registration policy.
#[must_use]
pub fn validate_password(password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_punctuation()) {
        errors.push("Password must contain at least one special character".to_string());
    }

    errors
}

/// Run all registration checks, collecting every violation.
#[must_use]
pub fn validate_registration(username: &str, email: &str, password: &str) -> Vec<String> {
    let mut errors = validate_username(username);
    errors.extend(validate_email(email));
    errors.extend(validate_password(password));
    errors
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_registration() {
        assert!(validate_registration("alice42", "alice@example.com", "Str0ng!pass").is_empty());
    }

    #[test]
    fn rejects_bad_usernames() {
        assert!(!validate_username("").is_empty());
        assert!(!validate_username("al ice").is_empty());
        assert!(!validate_username("alice!").is_empty());
        assert!(validate_username("alice42").is_empty());
    }

    #[test]
    fn rejects_bad_emails() {
        for email in ["invalid", "@example.com", "user@", "user@nodot", "a@b@c.com"] {
            assert!(!validate_email(email).is_empty(), "{email} should be rejected");
        }
        assert!(validate_email("user+tag@subdomain.example.com").is_empty());
    }

    #[test]
    fn password_policy_collects_all_violations() {
        let errors = validate_password("short");
        assert_eq!(errors.len(), 4); // length, uppercase, digit, special

        assert!(validate_password("Str0ng!pass").is_empty());
    }
}
