//! In-process collaborators for flow tests.

// self
use crate::{
	_prelude::*,
	auth::{Email, Secret, TokenBundle},
	flows::Authenticator,
	gateway::{CodeExchange, GatewayEndpoints, GatewayFuture, TokenGateway},
	idp::{
		AuthOutcome, CodeDelivery, ConfirmForgotPassword, ConfirmSignUp, IdentityProvider,
		PasswordLogin, ProviderError, ProviderFuture, SignUp, SignUpOutcome,
	},
};

pub(crate) fn authenticator(idp: Arc<FakeIdp>, gateway: Arc<FakeGateway>) -> Authenticator {
	let endpoints =
		GatewayEndpoints::from_domain("auth.example.com").expect("Domain fixture should build.");

	Authenticator::new(idp, gateway, endpoints, "client-123")
}

fn bundle(prefix: &str, refresh: bool) -> TokenBundle {
	TokenBundle {
		access_token: Secret::new(format!("{prefix}-access")),
		id_token: Some(Secret::new(format!("{prefix}-id"))),
		refresh_token: refresh.then(|| Secret::new(format!("{prefix}-refresh"))),
		expires_in: Some(3600),
		token_type: Some("Bearer".into()),
	}
}

/// Identity provider that records every call and answers from fixtures.
#[derive(Debug, Default)]
pub(crate) struct FakeIdp {
	failure: Option<ProviderError>,
	auth: Option<AuthOutcome>,
	calls: Mutex<Vec<&'static str>>,
}
impl FakeIdp {
	pub(crate) fn failing(err: ProviderError) -> Self {
		Self { failure: Some(err), ..Default::default() }
	}

	pub(crate) fn with_auth(outcome: AuthOutcome) -> Self {
		Self { auth: Some(outcome), ..Default::default() }
	}

	pub(crate) fn calls(&self) -> Vec<&'static str> {
		self.calls.lock().clone()
	}

	fn record(&self, operation: &'static str) -> Result<()> {
		self.calls.lock().push(operation);

		match &self.failure {
			Some(err) => Err(err.clone().into()),
			None => Ok(()),
		}
	}

	fn auth_outcome(&self) -> AuthOutcome {
		self.auth.clone().unwrap_or_else(|| AuthOutcome::Authenticated(bundle("native", true)))
	}
}
impl IdentityProvider for FakeIdp {
	fn sign_up<'a>(&'a self, _: &'a SignUp) -> ProviderFuture<'a, SignUpOutcome> {
		Box::pin(async move {
			self.record("sign_up")?;

			Ok(SignUpOutcome { user_sub: "sub-123".into(), confirmed: false })
		})
	}

	fn confirm_sign_up<'a>(&'a self, _: &'a ConfirmSignUp) -> ProviderFuture<'a, ()> {
		Box::pin(async move { self.record("confirm_sign_up") })
	}

	fn resend_confirmation_code<'a>(&'a self, _: &'a Email) -> ProviderFuture<'a, CodeDelivery> {
		Box::pin(async move {
			self.record("resend_confirmation_code")?;

			Ok(CodeDelivery::default())
		})
	}

	fn forgot_password<'a>(&'a self, _: &'a Email) -> ProviderFuture<'a, CodeDelivery> {
		Box::pin(async move {
			self.record("forgot_password")?;

			Ok(CodeDelivery::default())
		})
	}

	fn confirm_forgot_password<'a>(
		&'a self,
		_: &'a ConfirmForgotPassword,
	) -> ProviderFuture<'a, ()> {
		Box::pin(async move { self.record("confirm_forgot_password") })
	}

	fn password_login<'a>(&'a self, _: &'a PasswordLogin) -> ProviderFuture<'a, AuthOutcome> {
		Box::pin(async move {
			self.record("password_login")?;

			Ok(self.auth_outcome())
		})
	}

	fn refresh<'a>(&'a self, _: &'a Secret) -> ProviderFuture<'a, AuthOutcome> {
		Box::pin(async move {
			self.record("refresh")?;

			Ok(self.auth_outcome())
		})
	}
}

/// Token gateway that records every grant and answers from fixtures.
#[derive(Debug, Default)]
pub(crate) struct FakeGateway {
	failure: Option<String>,
	calls: Mutex<Vec<String>>,
}
impl FakeGateway {
	pub(crate) fn failing(reason: impl Into<String>) -> Self {
		Self { failure: Some(reason.into()), ..Default::default() }
	}

	pub(crate) fn calls(&self) -> Vec<String> {
		self.calls.lock().clone()
	}

	fn record(&self, call: String) -> Result<()> {
		self.calls.lock().push(call);

		match &self.failure {
			Some(reason) => Err(Error::InvalidGrant { reason: reason.clone() }),
			None => Ok(()),
		}
	}
}
impl TokenGateway for FakeGateway {
	fn refresh<'a>(&'a self, refresh_token: &'a Secret) -> GatewayFuture<'a, TokenBundle> {
		Box::pin(async move {
			self.record(format!("refresh:{}", refresh_token.expose()))?;

			Ok(bundle("gateway", false))
		})
	}

	fn exchange_code<'a>(&'a self, exchange: &'a CodeExchange) -> GatewayFuture<'a, TokenBundle> {
		Box::pin(async move {
			self.record(format!("exchange_code:{}", exchange.code.expose()))?;

			Ok(bundle("gateway", true))
		})
	}
}
