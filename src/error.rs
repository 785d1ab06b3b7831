//! Error taxonomy shared by the validator, the remote collaborators, and the flows.

// self
use crate::{_prelude::*, idp::ProviderError, validate::ValidationError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error surfaced by every operation.
///
/// All variants are client-facing: the HTTP layer renders each one as a bad request carrying
/// the [`Display`] text in an [`ErrorBody`].
#[derive(Debug, ThisError)]
pub enum Error {
	/// Input was rejected before any remote call was attempted.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Identity provider rejected the call; the provider's message passes through verbatim.
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Upstream answered with something unusable (malformed, throttled, or failing).
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Hosted gateway rejected the grant (bad code or refresh token); the gateway's
	/// `error_description` passes through verbatim.
	#[error("{reason}")]
	InvalidGrant {
		/// Gateway-supplied reason string.
		reason: String,
	},
	/// Hosted gateway rejected the client identifier.
	#[error("{reason}")]
	InvalidClient {
		/// Gateway-supplied reason string.
		reason: String,
	},
	/// A successful upstream response lacked required fields.
	#[error("{reason}")]
	UnexpectedResponse {
		/// Human-readable summary of what was missing.
		reason: String,
	},
	/// Both the native refresh and the hosted-gateway fallback failed.
	///
	/// Displays the fallback failure; the native failure is kept for logging only.
	#[error("{fallback}")]
	RefreshExhausted {
		/// Failure returned by the identity provider's refresh call.
		native: Box<Error>,
		/// Failure returned by the hosted gateway's refresh grant.
		#[source]
		fallback: Box<Error>,
	},
}
impl Error {
	/// Builds an [`Error::UnexpectedResponse`] from any message.
	pub fn unexpected(reason: impl Into<String>) -> Self {
		Self::UnexpectedResponse { reason: reason.into() }
	}

	/// Stable label for logs and metrics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Validation(_) => "validation",
			Self::Provider(err) => err.kind.as_str(),
			Self::Config(_) => "config",
			Self::Transient(_) => "transient",
			Self::Transport(_) => "transport",
			Self::InvalidGrant { .. } => "invalid_grant",
			Self::InvalidClient { .. } => "invalid_client",
			Self::UnexpectedResponse { .. } => "unexpected_response",
			Self::RefreshExhausted { .. } => "refresh_exhausted",
		}
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Request payload could not be encoded.
	#[error("Request payload could not be encoded.")]
	Encode(#[from] serde_json::Error),
	/// A configured URL is invalid.
	#[error("The {field} URL is invalid.")]
	InvalidUrl {
		/// Configuration field holding the URL.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A configured URL uses a scheme other than HTTP(S).
	#[error("The {field} URL must use HTTP or HTTPS: {url}.")]
	UnsupportedScheme {
		/// Configuration field holding the URL.
		field: &'static str,
		/// Offending URL.
		url: String,
	},
	/// A required configuration value is missing or blank.
	#[error("Configuration value `{field}` is required.")]
	Missing {
		/// Missing configuration field.
		field: &'static str,
	},
	/// A configuration value contains characters that are not allowed.
	#[error("Configuration value `{field}` is malformed: {value}.")]
	Malformed {
		/// Offending configuration field.
		field: &'static str,
		/// Offending value.
		value: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Upstream answered, but not with something the caller can use.
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Upstream returned an unexpected or throttled response.
	#[error("{message}")]
	Upstream {
		/// Summary of the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Upstream responded with JSON that did not match the expected shape.
	#[error("Upstream returned a malformed response at `{}`.", .source.path())]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {target}.")]
	Network {
		/// Remote collaborator being called.
		target: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the upstream service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(target: &'static str, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { target, source: Box::new(src) }
	}
}

/// Client-facing error record: `{ "message": "..." }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Human-readable error message.
	pub message: String,
}
impl ErrorBody {
	/// Coerces any error value into the canonical record using its [`Display`] text.
	pub fn coerce(err: &(dyn StdError + 'static)) -> Self {
		let message = err.to_string();

		if message.trim().is_empty() {
			Self { message: "Unknown error.".into() }
		} else {
			Self { message }
		}
	}
}
impl From<&Error> for ErrorBody {
	fn from(err: &Error) -> Self {
		Self::coerce(err)
	}
}
