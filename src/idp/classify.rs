//! Classification of Cognito error codes into coarse failure categories.
//!
//! Every category still surfaces to the caller as a bad request with the provider's message;
//! the classification only labels logs and metrics.

// self
use crate::_prelude::*;

/// Canonical identity provider failure categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
	/// Wrong password, unconfirmed user, or rejected refresh token.
	InvalidCredentials,
	/// Username does not exist.
	UnknownUser,
	/// Confirmation or reset code is wrong or expired.
	InvalidCode,
	/// Username already registered or already confirmed.
	Conflict,
	/// Parameters or password policy rejected.
	InvalidRequest,
	/// Request or delivery rate limit hit.
	Throttled,
	/// Provider-side failure.
	Unavailable,
}
impl ProviderErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::InvalidCredentials => "invalid_credentials",
			Self::UnknownUser => "unknown_user",
			Self::InvalidCode => "invalid_code",
			Self::Conflict => "conflict",
			Self::InvalidRequest => "invalid_request",
			Self::Throttled => "throttled",
			Self::Unavailable => "unavailable",
		}
	}
}
impl Display for ProviderErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Classifies a provider error by code, falling back to the HTTP status.
pub fn classify(code: &str, status: Option<u16>) -> ProviderErrorKind {
	classify_code(code).unwrap_or_else(|| classify_status(status))
}

/// Strips the `namespace#` prefix some responses put in front of the error code.
pub fn normalize_code(raw: &str) -> &str {
	let raw = raw.rsplit_once('#').map_or(raw, |(_, code)| code);

	raw.split_once(':').map_or(raw, |(code, _)| code).trim()
}

fn classify_code(code: &str) -> Option<ProviderErrorKind> {
	let kind = match code {
		"NotAuthorizedException" | "UserNotConfirmedException" | "PasswordResetRequiredException" =>
			ProviderErrorKind::InvalidCredentials,
		"UserNotFoundException" => ProviderErrorKind::UnknownUser,
		"CodeMismatchException" | "ExpiredCodeException" => ProviderErrorKind::InvalidCode,
		"UsernameExistsException" | "AliasExistsException" => ProviderErrorKind::Conflict,
		"InvalidParameterException"
		| "InvalidPasswordException"
		| "ResourceNotFoundException"
		| "UnexpectedLambdaException"
		| "UserLambdaValidationException"
		| "InvalidLambdaResponseException" => ProviderErrorKind::InvalidRequest,
		"TooManyRequestsException"
		| "LimitExceededException"
		| "TooManyFailedAttemptsException"
		| "CodeDeliveryFailureException" => ProviderErrorKind::Throttled,
		"InternalErrorException" | "ServiceUnavailableException" => ProviderErrorKind::Unavailable,
		_ => return None,
	};

	Some(kind)
}

fn classify_status(status: Option<u16>) -> ProviderErrorKind {
	match status {
		Some(401 | 403) => ProviderErrorKind::InvalidCredentials,
		Some(404) => ProviderErrorKind::UnknownUser,
		Some(409) => ProviderErrorKind::Conflict,
		Some(429) => ProviderErrorKind::Throttled,
		Some(code) if (400..500).contains(&code) => ProviderErrorKind::InvalidRequest,
		_ => ProviderErrorKind::Unavailable,
	}
}
