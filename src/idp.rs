//! Identity provider seam and the Cognito user pool client behind it.
//!
//! [`IdentityProvider`] names the seven provider operations the flows depend on. The
//! production implementation is [`CognitoClient`], which speaks the user pool JSON protocol
//! (`X-Amz-Target` + `application/x-amz-json-1.1`). These operations are public-client calls
//! and need no request signing.

pub mod classify;
pub mod cognito;
pub mod wire;

pub use classify::*;
pub use cognito::*;

// self
use crate::{
	_prelude::*,
	auth::{Email, Secret, TokenBundle},
};

/// Boxed future returned by [`IdentityProvider`] operations.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Remote identity provider used by every credential flow.
///
/// Implementations are shared read-only across concurrent requests behind an [`Arc`], so
/// they must be `Send + Sync` and must not keep per-request state.
pub trait IdentityProvider: Send + Sync {
	/// Registers a new user; the provider emails a confirmation code.
	fn sign_up<'a>(&'a self, request: &'a SignUp) -> ProviderFuture<'a, SignUpOutcome>;

	/// Confirms a registration with the emailed code.
	fn confirm_sign_up<'a>(&'a self, request: &'a ConfirmSignUp) -> ProviderFuture<'a, ()>;

	/// Sends a fresh registration confirmation code.
	fn resend_confirmation_code<'a>(&'a self, email: &'a Email)
	-> ProviderFuture<'a, CodeDelivery>;

	/// Starts a password reset; the provider emails a reset code.
	fn forgot_password<'a>(&'a self, email: &'a Email) -> ProviderFuture<'a, CodeDelivery>;

	/// Completes a password reset with the emailed code.
	fn confirm_forgot_password<'a>(
		&'a self,
		request: &'a ConfirmForgotPassword,
	) -> ProviderFuture<'a, ()>;

	/// Authenticates with email and password.
	fn password_login<'a>(&'a self, request: &'a PasswordLogin) -> ProviderFuture<'a, AuthOutcome>;

	/// Exchanges a refresh token for new access and identity tokens.
	fn refresh<'a>(&'a self, refresh_token: &'a Secret) -> ProviderFuture<'a, AuthOutcome>;
}

/// Validated sign-up command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignUp {
	/// Email used as the username and the `email` attribute.
	pub email: Email,
	/// Initial password.
	pub password: Secret,
	/// Optional `given_name` attribute.
	pub given_name: Option<String>,
	/// Optional `family_name` attribute.
	pub family_name: Option<String>,
}

/// Validated registration confirmation command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmSignUp {
	/// Registered email.
	pub email: Email,
	/// Emailed confirmation code.
	pub code: Secret,
}

/// Validated password login command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordLogin {
	/// Registered email.
	pub email: Email,
	/// Account password.
	pub password: Secret,
}

/// Validated password reset confirmation command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmForgotPassword {
	/// Registered email.
	pub email: Email,
	/// Emailed reset code.
	pub code: Secret,
	/// Replacement password.
	pub new_password: Secret,
}

/// Result of a successful sign-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignUpOutcome {
	/// Provider-issued user identifier.
	pub user_sub: String,
	/// Whether the provider confirmed the account without a code.
	pub confirmed: bool,
}

/// Where the provider sent a confirmation or reset code, when it says.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeDelivery {
	/// Masked destination (e.g. `a***@e***`).
	pub destination: Option<String>,
	/// Delivery medium (`EMAIL`, `SMS`).
	pub medium: Option<String>,
}

/// Result of an authentication call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
	/// Tokens were issued.
	Authenticated(TokenBundle),
	/// The provider requires an additional challenge before issuing tokens.
	Challenge {
		/// Challenge name (e.g. `NEW_PASSWORD_REQUIRED`).
		name: String,
	},
}
impl AuthOutcome {
	/// Returns the token bundle or an error naming the pending challenge.
	pub fn into_tokens(self) -> Result<TokenBundle> {
		match self {
			Self::Authenticated(bundle) => Ok(bundle),
			Self::Challenge { name } => Err(Error::unexpected(format!(
				"Authentication requires the {name} challenge, which this API does not support."
			))),
		}
	}
}

/// Identity provider rejection, carrying the provider's own message.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{message}")]
pub struct ProviderError {
	/// Classified failure category.
	pub kind: ProviderErrorKind,
	/// Provider error code (e.g. `NotAuthorizedException`).
	pub code: String,
	/// Provider message, passed through verbatim.
	pub message: String,
}
impl ProviderError {
	/// Creates a new provider error.
	pub fn new(kind: ProviderErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { kind, code: code.into(), message: message.into() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn challenge_outcome_names_the_challenge() {
		let err = AuthOutcome::Challenge { name: "NEW_PASSWORD_REQUIRED".into() }
			.into_tokens()
			.expect_err("Challenges must not yield tokens.");

		assert!(err.to_string().contains("NEW_PASSWORD_REQUIRED"));
	}
}
