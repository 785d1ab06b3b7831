//! Request validation: raw payloads in, typed commands out.
//!
//! Each route owns a [`Schema`]: a `serde` shape for the raw JSON body or query string plus a
//! [`Schema::validate`] step that converts it into the typed command a flow consumes. Flows
//! never see raw input, so nothing malformed reaches the remote-call stage.

pub mod rules;
pub mod schemas;

pub use schemas::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::_prelude::*;

/// Input rejected before any remote call.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// Payload could not be decoded into the expected shape.
	#[error("Request payload is malformed at `{path}`: {message}.")]
	Malformed {
		/// Path to the offending value (`.` for the root).
		path: String,
		/// Decoder message.
		message: String,
	},
	/// Required field is absent.
	#[error("Field `{field}` is required.")]
	Missing {
		/// Field name as it appears on the wire.
		field: &'static str,
	},
	/// Field is shorter than allowed.
	#[error("Field `{field}` must be at least {min} characters long.")]
	TooShort {
		/// Field name as it appears on the wire.
		field: &'static str,
		/// Minimum permitted character count.
		min: usize,
	},
	/// Field is longer than allowed.
	#[error("Field `{field}` must be at most {max} characters long.")]
	TooLong {
		/// Field name as it appears on the wire.
		field: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
	/// Field violates a format rule.
	#[error("Field `{field}` {reason}.")]
	Invalid {
		/// Field name as it appears on the wire.
		field: &'static str,
		/// Constraint that was violated.
		reason: String,
	},
}

/// Raw request shape paired with its validation step.
pub trait Schema: DeserializeOwned {
	/// Typed command produced by a successful validation.
	type Output;

	/// Checks every field rule and builds the typed command.
	fn validate(self) -> Result<Self::Output, ValidationError>;
}

/// Decodes a JSON body into `S` and validates it.
pub fn parse_json<S>(body: &[u8]) -> Result<S::Output, ValidationError>
where
	S: Schema,
{
	let body = if body.iter().all(u8::is_ascii_whitespace) { b"{}".as_slice() } else { body };
	let de = &mut serde_json::Deserializer::from_slice(body);
	let raw: S = serde_path_to_error::deserialize(de).map_err(malformed)?;

	raw.validate()
}

/// Decodes a URL query string into `S` and validates it.
///
/// Every query value is a string; repeated keys keep the last occurrence.
pub fn parse_query<S>(query: Option<&str>) -> Result<S::Output, ValidationError>
where
	S: Schema,
{
	let object = url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
		.map(|(key, value)| (key.into_owned(), serde_json::Value::String(value.into_owned())))
		.collect::<serde_json::Map<_, _>>();
	let raw: S =
		serde_path_to_error::deserialize(serde_json::Value::Object(object)).map_err(malformed)?;

	raw.validate()
}

fn malformed(err: serde_path_to_error::Error<serde_json::Error>) -> ValidationError {
	let path = err.path().to_string();
	let message = err.into_inner().to_string();

	ValidationError::Malformed { path, message }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn malformed_json_reports_path() {
		let err = parse_json::<LoginBody>(br#"{"email": 42, "password": "longenough"}"#)
			.expect_err("Numeric email must be rejected.");

		assert!(matches!(&err, ValidationError::Malformed { path, .. } if path == "email"));
	}

	#[test]
	fn empty_body_reports_first_missing_field() {
		let err = parse_json::<LoginBody>(b"").expect_err("Empty body must be rejected.");

		assert_eq!(err, ValidationError::Missing { field: "email" });
	}

	#[test]
	fn query_values_decode_percent_escapes() {
		let redirect = parse_query::<LogoutQuery>(Some(
			"redirectUri=https%3A%2F%2Fexample.com%2Fdone&ignored=1",
		))
		.expect("Encoded redirect should validate.");

		assert_eq!(redirect.as_str(), "https://example.com/done");
	}
}
