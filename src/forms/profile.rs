//! Profile update form checks.

use crate::client::{Attachment, UploadKind};
use crate::config::UploadPolicy;
use crate::models::ProfileUpdate;

use super::errors::ValidationErrors;

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Loose `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Digits with optional leading `+` and `-`/space separators, 7 to 15 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let body = phone.strip_prefix('+').unwrap_or(phone);
    if !body.chars().all(|c| c.is_ascii_digit() || c == '-' || c == ' ') {
        return false;
    }
    let digits = body.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Checks a profile update and an optional new signature image.
pub fn validate_profile_update(
    update: &ProfileUpdate,
    signature: Option<&Attachment>,
    uploads: &UploadPolicy,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(email) = &update.email {
        errors.require(
            is_valid_email(email),
            "email",
            "Please enter a valid email address",
        );
    }
    if let Some(phone) = &update.phone {
        errors.require(
            is_valid_phone(phone),
            "phone",
            "Phone number may only contain digits",
        );
    }
    if let Some(file) = signature {
        if let Err(err) = file.validate(uploads, UploadKind::ProfileImage) {
            errors.add("signature", err.user_message());
        }
    }

    errors.into_result()
}
