//! Password login and hosted-gateway logout.

// self
use crate::{
	_prelude::*,
	auth::{RedirectUri, SessionTokens},
	flows::{Authenticator, observe},
	idp::PasswordLogin,
	obs::{self, Operation, Outcome},
};

/// Logout payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
	/// Hosted gateway logout URL the browser should visit.
	pub logout_url: String,
}

impl Authenticator {
	/// Authenticates with email and password.
	///
	/// Succeeds only when the provider issues access, identity, and refresh tokens. A pending
	/// challenge (e.g. `NEW_PASSWORD_REQUIRED`) is reported as an error.
	pub async fn login(&self, request: PasswordLogin) -> Result<SessionTokens> {
		observe(Operation::Login, "login", async move {
			self.idp.password_login(&request).await?.into_tokens()?.into_session()
		})
		.await
	}

	/// Builds the hosted gateway logout URL. No remote call is made.
	pub fn logout(&self, redirect_uri: &RedirectUri) -> LogoutResponse {
		let logout_url = self.endpoints.logout_url(&self.client_id, redirect_uri);

		obs::record_operation_outcome(Operation::Logout, Outcome::Success);

		LogoutResponse { logout_url: logout_url.into() }
	}
}
