//! Hosted-login round trip: authorize URL generation and the authorization-code callback.

// self
use crate::{
	_prelude::*,
	auth::TokenBundle,
	flows::{Authenticator, observe},
	gateway::{self, AuthorizationUrl, AuthorizeRequest, CodeExchange},
	obs::{self, Operation, Outcome},
};

impl Authenticator {
	/// Builds a hosted-login URL with a fresh state and S256 PKCE pair. No remote call is made.
	pub fn generate_url(&self, request: &AuthorizeRequest) -> AuthorizationUrl {
		let authorization =
			gateway::build_authorization_url(&self.endpoints, &self.client_id, request);

		obs::record_operation_outcome(Operation::GenerateUrl, Outcome::Success);

		authorization
	}

	/// Exchanges the authorization code delivered to the callback for tokens.
	pub async fn callback(&self, exchange: CodeExchange) -> Result<TokenBundle> {
		observe(Operation::Callback, "callback", async move {
			#[cfg(feature = "tracing")]
			tracing::debug!(
				state = exchange.state.as_deref(),
				pkce = exchange.code_verifier.is_some(),
				"Exchanging authorization code."
			);

			self.gateway.exchange_code(&exchange).await
		})
		.await
	}
}
