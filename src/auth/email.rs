//! Validated email address used as the identity provider username.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

/// Minimum accepted email length, counted in characters.
pub const EMAIL_MIN_LEN: usize = 6;
/// Maximum accepted email length (RFC 5321 path limit).
pub const EMAIL_MAX_LEN: usize = 254;

/// Error returned when an email address fails validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum EmailError {
	/// Shorter than [`EMAIL_MIN_LEN`].
	#[error("must be at least {min} characters long")]
	TooShort {
		/// Minimum permitted character count.
		min: usize,
	},
	/// Longer than [`EMAIL_MAX_LEN`].
	#[error("must be at most {max} characters long")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
	/// Contains whitespace.
	#[error("must not contain whitespace")]
	ContainsWhitespace,
	/// Not shaped like `local@domain`.
	#[error("must be a valid email address")]
	Malformed,
}

/// Email address that passed length and shape checks.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);
impl Email {
	/// Validates and wraps an email address. Surrounding whitespace is trimmed.
	pub fn new(value: impl AsRef<str>) -> Result<Self, EmailError> {
		let view = value.as_ref().trim();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Returns the address as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for Email {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for Email {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<Email> for String {
	fn from(value: Email) -> Self {
		value.0
	}
}
impl TryFrom<String> for Email {
	type Error = EmailError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for Email {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Email({})", self.0)
	}
}
impl Display for Email {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for Email {
	type Err = EmailError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), EmailError> {
	let len = view.chars().count();

	if len < EMAIL_MIN_LEN {
		return Err(EmailError::TooShort { min: EMAIL_MIN_LEN });
	}
	if len > EMAIL_MAX_LEN {
		return Err(EmailError::TooLong { max: EMAIL_MAX_LEN });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(EmailError::ContainsWhitespace);
	}

	match view.split_once('@') {
		Some((local, domain))
			if !local.is_empty()
				&& !domain.is_empty()
				&& !domain.contains('@')
				&& !domain.starts_with('.')
				&& !domain.ends_with('.') =>
			Ok(()),
		_ => Err(EmailError::Malformed),
	}
}
