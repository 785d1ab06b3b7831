//! `oauth2`-backed client for the hosted gateway token endpoint.

// std
use std::borrow::Cow;
// crates.io
use oauth2::{
	AccessToken, AuthType, AuthorizationCode, ClientId, EndpointNotSet, EndpointSet,
	HttpClientError, PkceCodeVerifier, RedirectUrl, RefreshToken, RequestTokenError, Scope,
	StandardRevocableToken, TokenResponse, TokenUrl,
	basic::{
		BasicErrorResponse, BasicErrorResponseType, BasicRequestTokenError,
		BasicRevocationErrorResponse, BasicTokenIntrospectionResponse, BasicTokenType,
	},
};
// self
use crate::{
	_prelude::*,
	auth::{Secret, TokenBundle},
	error::{ConfigError, TransientError},
	gateway::{CodeExchange, GatewayEndpoints, GatewayFuture, TokenGateway},
	http::{HttpTransport, ReqwestTransport, ResponseMetadata, ResponseMetadataSlot, map_transport_error},
};

const TARGET: &str = "the hosted gateway";

static BEARER: BasicTokenType = BasicTokenType::Bearer;

/// Token endpoint response.
///
/// Unlike `oauth2`'s standard response, `token_type` may be absent; only `access_token` is
/// required. Cognito also adds an OpenID Connect `id_token`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GatewayTokenResponse {
	access_token: AccessToken,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	token_type: Option<BasicTokenType>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	id_token: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	refresh_token: Option<RefreshToken>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	expires_in: Option<u64>,
	#[serde(skip)]
	scopes: Option<Vec<Scope>>,
}
impl TokenResponse for GatewayTokenResponse {
	type TokenType = BasicTokenType;

	fn access_token(&self) -> &AccessToken {
		&self.access_token
	}

	/// Falls back to `Bearer` when the gateway omitted the field.
	fn token_type(&self) -> &BasicTokenType {
		self.token_type.as_ref().unwrap_or(&BEARER)
	}

	fn expires_in(&self) -> Option<std::time::Duration> {
		self.expires_in.map(std::time::Duration::from_secs)
	}

	fn refresh_token(&self) -> Option<&RefreshToken> {
		self.refresh_token.as_ref()
	}

	fn scopes(&self) -> Option<&Vec<Scope>> {
		self.scopes.as_ref()
	}
}
type GatewayClient = oauth2::Client<
	BasicErrorResponse,
	GatewayTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	BasicRevocationErrorResponse,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointSet,
>;

/// Public-client token grants against the hosted gateway.
///
/// The app client has no secret, so `client_id` travels in the form body.
pub struct OAuthGateway<C = ReqwestTransport>
where
	C: HttpTransport,
{
	oauth_client: GatewayClient,
	transport: Arc<C>,
}
impl<C> OAuthGateway<C>
where
	C: HttpTransport,
{
	/// Creates a gateway client that posts grants to `endpoints.token`.
	pub fn new(
		endpoints: &GatewayEndpoints,
		client_id: impl Into<String>,
		transport: impl Into<Arc<C>>,
	) -> Self {
		let oauth_client: GatewayClient = oauth2::Client::new(ClientId::new(client_id.into()))
			.set_token_uri(TokenUrl::from_url(endpoints.token.clone()))
			.set_auth_type(AuthType::RequestBody);

		Self { oauth_client, transport: transport.into() }
	}
}
impl<C> Debug for OAuthGateway<C>
where
	C: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthGateway")
			.field("client_id", self.oauth_client.client_id())
			.field("token_url", &self.oauth_client.token_uri().as_str())
			.finish_non_exhaustive()
	}
}
impl<C> TokenGateway for OAuthGateway<C>
where
	C: HttpTransport,
{
	fn refresh<'a>(&'a self, refresh_token: &'a Secret) -> GatewayFuture<'a, TokenBundle> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let handle = self.transport.with_metadata(meta.clone());
			let refresh_token = RefreshToken::new(refresh_token.expose().to_owned());
			let response = self
				.oauth_client
				.exchange_refresh_token(&refresh_token)
				.request_async(&handle)
				.await
				.map_err(|err| map_request_error(meta.take(), err))?;

			Ok(into_bundle(response))
		})
	}

	fn exchange_code<'a>(&'a self, exchange: &'a CodeExchange) -> GatewayFuture<'a, TokenBundle> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let handle = self.transport.with_metadata(meta.clone());
			let redirect_url = RedirectUrl::new(exchange.redirect_uri.as_str().to_owned())
				.map_err(|source| ConfigError::InvalidUrl { field: "redirect_uri", source })?;
			let mut request = self
				.oauth_client
				.exchange_code(AuthorizationCode::new(exchange.code.expose().to_owned()))
				.set_redirect_uri(Cow::Owned(redirect_url));

			if let Some(verifier) = &exchange.code_verifier {
				request =
					request.set_pkce_verifier(PkceCodeVerifier::new(verifier.expose().to_owned()));
			}

			let response = request
				.request_async(&handle)
				.await
				.map_err(|err| map_request_error(meta.take(), err))?;

			Ok(into_bundle(response))
		})
	}
}

fn into_bundle(response: GatewayTokenResponse) -> TokenBundle {
	let token_type = response.token_type.map(|token_type| match token_type {
		BasicTokenType::Bearer => "Bearer".to_owned(),
		BasicTokenType::Mac => "MAC".to_owned(),
		BasicTokenType::Extension(value) => value,
	});

	TokenBundle {
		access_token: Secret::new(response.access_token.into_secret()),
		id_token: response.id_token.map(Secret::new),
		refresh_token: response.refresh_token.map(|token| Secret::new(token.into_secret())),
		expires_in: response.expires_in,
		token_type,
	}
}

fn map_request_error<E>(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	let meta = meta.as_ref();
	let status = meta.and_then(|value| value.status);
	let retry_after = meta.and_then(|value| value.retry_after);

	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(response, meta),
		RequestTokenError::Request(error) => map_transport_error(TARGET, meta, error),
		RequestTokenError::Parse(source, _body) =>
			TransientError::ResponseParse { source, status }.into(),
		RequestTokenError::Other(message) => TransientError::Upstream {
			message: format!("Hosted gateway returned an unexpected response: {message}."),
			status,
			retry_after,
		}
		.into(),
	}
}

fn map_server_response_error(response: BasicErrorResponse, meta: Option<&ResponseMetadata>) -> Error {
	let code = response.error().as_ref().to_owned();
	let reason = response.error_description().cloned().unwrap_or_else(|| code.clone());

	match response.error() {
		BasicErrorResponseType::InvalidGrant => Error::InvalidGrant { reason },
		BasicErrorResponseType::InvalidClient | BasicErrorResponseType::UnauthorizedClient =>
			Error::InvalidClient { reason },
		_ => TransientError::Upstream {
			message: format!("Hosted gateway returned an OAuth error: {reason}."),
			status: meta.and_then(|value| value.status),
			retry_after: meta.and_then(|value| value.retry_after),
		}
		.into(),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::StandardErrorResponse;
	// self
	use super::*;

	#[test]
	fn invalid_grant_keeps_the_description() {
		let response = StandardErrorResponse::new(
			BasicErrorResponseType::InvalidGrant,
			Some("Refresh Token has expired".into()),
			None,
		);
		let err = map_server_response_error(response, None);

		assert_eq!(err.to_string(), "Refresh Token has expired");
	}

	#[test]
	fn unknown_oauth_errors_are_transient() {
		let response =
			StandardErrorResponse::new(BasicErrorResponseType::InvalidRequest, None, None);
		let meta = ResponseMetadata { status: Some(400), retry_after: None };
		let err = map_server_response_error(response, Some(&meta));

		assert!(matches!(err, Error::Transient(TransientError::Upstream { status: Some(400), .. })));
		assert_eq!(err.to_string(), "Hosted gateway returned an OAuth error: invalid_request.");
	}

	#[test]
	fn bundle_carries_id_token_and_bearer_type() {
		let response: GatewayTokenResponse = serde_json::from_str(
			r#"{"access_token":"a","id_token":"i","token_type":"Bearer","expires_in":3600}"#,
		)
		.expect("Token response fixture should parse.");
		let bundle = into_bundle(response);

		assert_eq!(bundle.access_token.expose(), "a");
		assert_eq!(bundle.id_token.as_ref().map(Secret::expose), Some("i"));
		assert_eq!(bundle.expires_in, Some(3600));
		assert_eq!(bundle.token_type.as_deref(), Some("Bearer"));
		assert!(bundle.refresh_token.is_none());
	}

	#[test]
	fn missing_token_type_is_passed_through_as_absent() {
		let response: GatewayTokenResponse =
			serde_json::from_str(r#"{"access_token":"a","id_token":"i","expires_in":3600}"#)
				.expect("Token response without a type should parse.");

		assert_eq!(response.token_type(), &BasicTokenType::Bearer);

		let bundle = into_bundle(response);

		assert_eq!(bundle.access_token.expose(), "a");
		assert_eq!(bundle.expires_in, Some(3600));
		assert!(bundle.token_type.is_none());
	}
}
