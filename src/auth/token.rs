//! Token bundles returned by the identity provider and the hosted gateway.

// self
use crate::{_prelude::*, auth::Secret};

/// Tokens issued after a successful authentication, refresh, or code exchange.
///
/// Bundles are produced per request and returned to the caller; nothing is persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBundle {
	/// Access token. Empty when the upstream omitted it on a refresh.
	pub access_token: Secret,
	/// OpenID Connect identity token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id_token: Option<Secret>,
	/// Refresh token, when the upstream issued one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<Secret>,
	/// Access token lifetime in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<u64>,
	/// Token type reported by the upstream (typically `Bearer`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_type: Option<String>,
}
impl TokenBundle {
	/// Drops the refresh token; refresh responses never echo one back to the caller.
	pub fn without_refresh_token(mut self) -> Self {
		self.refresh_token = None;

		self
	}

	/// Requires access, identity, and refresh tokens to all be present and non-empty.
	pub fn into_session(self) -> Result<SessionTokens> {
		let TokenBundle { access_token, id_token, refresh_token, .. } = self;

		match (access_token, id_token, refresh_token) {
			(access_token, Some(id_token), Some(refresh_token))
				if !access_token.is_empty() && !id_token.is_empty() && !refresh_token.is_empty() =>
				Ok(SessionTokens { access_token, id_token, refresh_token }),
			_ => Err(Error::unexpected("Invalid authentication result.")),
		}
	}
}

/// Complete token set returned by a password login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokens {
	/// Access token.
	pub access_token: Secret,
	/// OpenID Connect identity token.
	pub id_token: Secret,
	/// Refresh token for later `POST /api/refresh-token` calls.
	pub refresh_token: Secret,
}
