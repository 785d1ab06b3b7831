//! Field rules shared by the request schemas.

// self
use crate::{
	_prelude::*,
	auth::{Email, EmailError, RedirectUri, Secret},
	validate::ValidationError,
};

/// Minimum length for sign-up and reset passwords.
pub const PASSWORD_MIN_LEN: usize = 6;
/// Minimum length for login passwords.
pub const LOGIN_PASSWORD_MIN_LEN: usize = 8;
/// Minimum length for confirmation codes.
pub const CODE_MIN_LEN: usize = 6;
/// Minimum length for refresh tokens.
pub const REFRESH_TOKEN_MIN_LEN: usize = 6;
/// Maximum length for free-text fields (names, provider hints).
pub const TEXT_MAX_LEN: usize = 256;
/// Minimum PKCE verifier length (RFC 7636 section 4.1).
pub const PKCE_VERIFIER_MIN_LEN: usize = 43;
/// Maximum PKCE verifier length (RFC 7636 section 4.1).
pub const PKCE_VERIFIER_MAX_LEN: usize = 128;

/// Unwraps a required field.
pub fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
	value.ok_or(ValidationError::Missing { field })
}

/// Enforces a minimum character count.
pub fn min_len(field: &'static str, value: String, min: usize) -> Result<String, ValidationError> {
	if value.chars().count() < min {
		Err(ValidationError::TooShort { field, min })
	} else {
		Ok(value)
	}
}

/// Enforces a maximum character count.
pub fn max_len(field: &'static str, value: String, max: usize) -> Result<String, ValidationError> {
	if value.chars().count() > max {
		Err(ValidationError::TooLong { field, max })
	} else {
		Ok(value)
	}
}

/// Required secret with a minimum length.
pub fn secret(
	field: &'static str,
	value: Option<String>,
	min: usize,
) -> Result<Secret, ValidationError> {
	min_len(field, required(field, value)?, min).map(Secret::from)
}

/// Required email address.
pub fn email(field: &'static str, value: Option<String>) -> Result<Email, ValidationError> {
	Email::new(required(field, value)?).map_err(|err| match err {
		EmailError::TooShort { min } => ValidationError::TooShort { field, min },
		EmailError::TooLong { max } => ValidationError::TooLong { field, max },
		other => ValidationError::Invalid { field, reason: other.to_string() },
	})
}

/// Optional free-text field; present values must be non-blank and bounded.
pub fn optional_text(
	field: &'static str,
	value: Option<String>,
) -> Result<Option<String>, ValidationError> {
	value
		.map(|value| {
			let trimmed = value.trim().to_owned();

			max_len(field, min_len(field, trimmed, 1)?, TEXT_MAX_LEN)
		})
		.transpose()
}

/// Required absolute HTTP(S) redirect target, kept exactly as sent.
pub fn redirect_uri(
	field: &'static str,
	value: Option<String>,
) -> Result<RedirectUri, ValidationError> {
	RedirectUri::new(required(field, value)?)
		.map_err(|err| ValidationError::Invalid { field, reason: err.to_string() })
}

/// Optional PKCE verifier restricted to the RFC 7636 alphabet and length.
pub fn optional_pkce_verifier(
	field: &'static str,
	value: Option<String>,
) -> Result<Option<Secret>, ValidationError> {
	value
		.map(|value| {
			let value = max_len(
				field,
				min_len(field, value, PKCE_VERIFIER_MIN_LEN)?,
				PKCE_VERIFIER_MAX_LEN,
			)?;

			if value.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_' | '~'))
			{
				Ok(Secret::from(value))
			} else {
				Err(ValidationError::Invalid {
					field,
					reason: "must only contain unreserved URL characters".into(),
				})
			}
		})
		.transpose()
}
