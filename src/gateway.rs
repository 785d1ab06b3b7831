//! Hosted-login gateway: OAuth 2.0 token grants plus authorize and logout URLs.
//!
//! URL building is local and never touches the network. Token grants go through
//! [`TokenGateway`], whose production implementation is [`OAuthGateway`].

pub mod endpoints;
pub mod oauth;
pub mod pkce;

pub use endpoints::*;
pub use oauth::*;
pub use pkce::*;

// self
use crate::{
	_prelude::*,
	auth::{RedirectUri, ScopeSet, Secret, TokenBundle},
};

/// Boxed future returned by [`TokenGateway`] operations.
pub type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Token endpoint of the hosted gateway.
pub trait TokenGateway: Send + Sync {
	/// Runs the `refresh_token` grant.
	fn refresh<'a>(&'a self, refresh_token: &'a Secret) -> GatewayFuture<'a, TokenBundle>;

	/// Runs the `authorization_code` grant.
	fn exchange_code<'a>(&'a self, exchange: &'a CodeExchange) -> GatewayFuture<'a, TokenBundle>;
}

/// Validated request for a hosted-login URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizeRequest {
	/// Where the gateway sends the browser with the authorization code.
	pub redirect_uri: RedirectUri,
	/// Requested scopes.
	pub scopes: ScopeSet,
	/// Optional federated identity provider hint (e.g. `Google`).
	pub identity_provider: Option<String>,
}

/// Validated authorization-code callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeExchange {
	/// Authorization code.
	pub code: Secret,
	/// Redirect URI used when the code was issued.
	pub redirect_uri: RedirectUri,
	/// PKCE verifier returned by `generate-url`, when PKCE was used.
	pub code_verifier: Option<Secret>,
	/// Round-tripped state, echoed into logs only.
	pub state: Option<String>,
}

/// Hosted-login URL plus the values the caller must keep for the callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationUrl {
	/// Authorize URL to send the browser to.
	pub url: String,
	/// Opaque state to compare on callback.
	pub state: String,
	/// PKCE verifier to pass back to the callback.
	pub code_verifier: Secret,
}

/// Builds the authorize URL with a fresh state and S256 PKCE pair.
pub fn build_authorization_url(
	endpoints: &GatewayEndpoints,
	client_id: &str,
	request: &AuthorizeRequest,
) -> AuthorizationUrl {
	let state = generate_state();
	let pkce = PkcePair::generate();
	let mut url = endpoints.authorize.clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("response_type", "code");
	pairs.append_pair("client_id", client_id);
	pairs.append_pair("redirect_uri", request.redirect_uri.as_str());

	if !request.scopes.is_empty() {
		pairs.append_pair("scope", &request.scopes.normalized());
	}

	pairs.append_pair("state", &state);
	pairs.append_pair("code_challenge", &pkce.challenge);
	pairs.append_pair("code_challenge_method", pkce.method.as_str());

	if let Some(identity_provider) = &request.identity_provider {
		pairs.append_pair("identity_provider", identity_provider);
	}

	drop(pairs);

	AuthorizationUrl { url: url.into(), state, code_verifier: pkce.verifier }
}
