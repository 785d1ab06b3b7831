//! Caller-supplied redirect target, kept byte for byte.

// self
use crate::_prelude::*;

/// Error returned when a redirect target is not an absolute HTTP(S) URL.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum RedirectUriError {
	/// Not parseable as a URL.
	#[error("must be a valid URL")]
	Invalid,
	/// Parsed, but relative, hostless, or not HTTP(S).
	#[error("must be an absolute HTTP or HTTPS URL")]
	NotHttp,
}

/// Absolute HTTP(S) redirect target.
///
/// The hosted gateway compares `redirect_uri` and `logout_uri` exactly against the registered
/// values, so the trimmed input is validated with [`Url`] but never re-serialized: host case
/// and the presence of a trailing `/` survive untouched.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RedirectUri(String);
impl RedirectUri {
	/// Validates `raw` and keeps its trimmed text.
	pub fn new(raw: impl AsRef<str>) -> Result<Self, RedirectUriError> {
		let raw = raw.as_ref().trim();
		let parsed = Url::parse(raw).map_err(|_| RedirectUriError::Invalid)?;

		if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
			return Err(RedirectUriError::NotHttp);
		}

		Ok(Self(raw.to_owned()))
	}

	/// Returns the redirect target exactly as supplied.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for RedirectUri {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for RedirectUri {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "RedirectUri({})", self.0)
	}
}
impl Display for RedirectUri {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for RedirectUri {
	type Err = RedirectUriError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
