//! Cognito user pool client over the shared [`HttpTransport`].

// crates.io
use oauth2::{
	AsyncHttpClient,
	http::{Method, Request, header},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{Email, Secret},
	error::{ConfigError, TransientError},
	http::{HttpTransport, ReqwestTransport, ResponseMetadataSlot, map_transport_error},
	idp::{
		AuthOutcome, CodeDelivery, ConfirmForgotPassword, ConfirmSignUp, IdentityProvider,
		PasswordLogin, ProviderError, ProviderFuture, SignUp, SignUpOutcome, classify,
		wire::{
			self, AttributeType, AuthFlow, CognitoOperation, ConfirmForgotPasswordRequest,
			ConfirmSignUpRequest, EmptyResponse, ErrorResponse, InitiateAuthRequest,
			InitiateAuthResponse, SignUpRequest, SignUpResponse, UsernameRequest,
		},
	},
};

const TARGET: &str = "the identity provider";

/// Builds the regional Cognito endpoint `https://cognito-idp.{region}.amazonaws.com/`.
pub fn regional_endpoint(region: &str) -> Result<Url, ConfigError> {
	let region = region.trim();

	if region.is_empty() {
		return Err(ConfigError::Missing { field: "region" });
	}
	if !region.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-') {
		return Err(ConfigError::Malformed { field: "region", value: region.to_owned() });
	}

	Url::parse(&format!("https://cognito-idp.{region}.amazonaws.com/"))
		.map_err(|source| ConfigError::InvalidUrl { field: "idp endpoint", source })
}

/// Identity provider backed by the Cognito user pool JSON API.
///
/// Holds no per-request state; clone it or share it behind an [`Arc`].
#[derive(Clone)]
pub struct CognitoClient<C = ReqwestTransport>
where
	C: HttpTransport,
{
	endpoint: Url,
	client_id: String,
	transport: Arc<C>,
}
impl<C> CognitoClient<C>
where
	C: HttpTransport,
{
	/// Creates a client for `client_id` that posts to `endpoint`.
	pub fn new(endpoint: Url, client_id: impl Into<String>, transport: impl Into<Arc<C>>) -> Self {
		Self { endpoint, client_id: client_id.into(), transport: transport.into() }
	}

	/// Endpoint every operation is posted to.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	async fn call<Req, Resp>(&self, operation: CognitoOperation, body: &Req) -> Result<Resp>
	where
		Req: Serialize,
		Resp: DeserializeOwned,
	{
		let meta = ResponseMetadataSlot::default();
		let handle = self.transport.with_metadata(meta.clone());
		let payload = serde_json::to_vec(body).map_err(ConfigError::from)?;
		let request = Request::builder()
			.method(Method::POST)
			.uri(self.endpoint.as_str())
			.header(header::CONTENT_TYPE, wire::CONTENT_TYPE)
			.header(wire::TARGET_HEADER, operation.target())
			.body(payload)
			.map_err(ConfigError::from)?;
		let response = handle
			.call(request)
			.await
			.map_err(|err| map_transport_error(TARGET, meta.take().as_ref(), err))?;
		let status = response.status();
		let body = response.body().as_slice();

		if !status.is_success() {
			let error_type = response
				.headers()
				.get(wire::ERROR_TYPE_HEADER)
				.and_then(|value| value.to_str().ok());

			return Err(provider_error(status.as_u16(), error_type, body).into());
		}

		let body = if body.iter().all(u8::is_ascii_whitespace) { b"{}".as_slice() } else { body };
		let de = &mut serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(de).map_err(|source| {
			TransientError::ResponseParse { source, status: Some(status.as_u16()) }.into()
		})
	}

	async fn initiate_auth(
		&self,
		auth_flow: AuthFlow,
		auth_parameters: BTreeMap<&'static str, &str>,
	) -> Result<AuthOutcome> {
		let request = InitiateAuthRequest { auth_flow, client_id: &self.client_id, auth_parameters };
		let response: InitiateAuthResponse =
			self.call(CognitoOperation::InitiateAuth, &request).await?;

		match (response.authentication_result, response.challenge_name) {
			(Some(result), _) => Ok(AuthOutcome::Authenticated(result.into())),
			(None, Some(name)) => Ok(AuthOutcome::Challenge { name }),
			(None, None) => Err(Error::unexpected("Invalid authentication result.")),
		}
	}
}
impl<C> Debug for CognitoClient<C>
where
	C: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CognitoClient")
			.field("endpoint", &self.endpoint.as_str())
			.field("client_id", &self.client_id)
			.finish_non_exhaustive()
	}
}
impl<C> IdentityProvider for CognitoClient<C>
where
	C: HttpTransport,
{
	fn sign_up<'a>(&'a self, request: &'a SignUp) -> ProviderFuture<'a, SignUpOutcome> {
		Box::pin(async move {
			let mut user_attributes = vec![AttributeType { name: "email", value: &request.email }];

			if let Some(given_name) = &request.given_name {
				user_attributes.push(AttributeType { name: "given_name", value: given_name });
			}
			if let Some(family_name) = &request.family_name {
				user_attributes.push(AttributeType { name: "family_name", value: family_name });
			}

			let body = SignUpRequest {
				client_id: &self.client_id,
				username: &request.email,
				password: request.password.expose(),
				user_attributes,
			};
			let response: SignUpResponse = self.call(CognitoOperation::SignUp, &body).await?;
			let user_sub = response
				.user_sub
				.filter(|sub| !sub.is_empty())
				.ok_or_else(|| Error::unexpected("Identity provider omitted the user identifier."))?;

			Ok(SignUpOutcome { user_sub, confirmed: response.user_confirmed })
		})
	}

	fn confirm_sign_up<'a>(&'a self, request: &'a ConfirmSignUp) -> ProviderFuture<'a, ()> {
		Box::pin(async move {
			let body = ConfirmSignUpRequest {
				client_id: &self.client_id,
				username: &request.email,
				confirmation_code: request.code.expose(),
			};
			let _: EmptyResponse = self.call(CognitoOperation::ConfirmSignUp, &body).await?;

			Ok(())
		})
	}

	fn resend_confirmation_code<'a>(
		&'a self,
		email: &'a Email,
	) -> ProviderFuture<'a, CodeDelivery> {
		Box::pin(async move {
			let body = UsernameRequest { client_id: &self.client_id, username: email };
			let response: wire::CodeDeliveryResponse =
				self.call(CognitoOperation::ResendConfirmationCode, &body).await?;

			Ok(response.code_delivery_details.into())
		})
	}

	fn forgot_password<'a>(&'a self, email: &'a Email) -> ProviderFuture<'a, CodeDelivery> {
		Box::pin(async move {
			let body = UsernameRequest { client_id: &self.client_id, username: email };
			let response: wire::CodeDeliveryResponse =
				self.call(CognitoOperation::ForgotPassword, &body).await?;

			Ok(response.code_delivery_details.into())
		})
	}

	fn confirm_forgot_password<'a>(
		&'a self,
		request: &'a ConfirmForgotPassword,
	) -> ProviderFuture<'a, ()> {
		Box::pin(async move {
			let body = ConfirmForgotPasswordRequest {
				client_id: &self.client_id,
				username: &request.email,
				confirmation_code: request.code.expose(),
				password: request.new_password.expose(),
			};
			let _: EmptyResponse = self.call(CognitoOperation::ConfirmForgotPassword, &body).await?;

			Ok(())
		})
	}

	fn password_login<'a>(&'a self, request: &'a PasswordLogin) -> ProviderFuture<'a, AuthOutcome> {
		Box::pin(async move {
			let parameters = BTreeMap::from([
				("USERNAME", request.email.as_str()),
				("PASSWORD", request.password.expose()),
			]);

			self.initiate_auth(AuthFlow::UserPasswordAuth, parameters).await
		})
	}

	fn refresh<'a>(&'a self, refresh_token: &'a Secret) -> ProviderFuture<'a, AuthOutcome> {
		Box::pin(async move {
			let parameters = BTreeMap::from([("REFRESH_TOKEN", refresh_token.expose())]);

			self.initiate_auth(AuthFlow::RefreshTokenAuth, parameters).await
		})
	}
}

fn provider_error(status: u16, error_type: Option<&str>, body: &[u8]) -> ProviderError {
	let response = serde_json::from_slice::<ErrorResponse>(body).unwrap_or_default();
	let code = response.code(error_type);
	let kind = classify(&code, Some(status));
	let message = response
		.message
		.filter(|message| !message.trim().is_empty())
		.unwrap_or_else(|| format!("Identity provider rejected the request with HTTP {status}."));

	ProviderError::new(kind, code, message)
}
