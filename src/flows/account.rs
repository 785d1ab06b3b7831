//! Registration: sign-up, confirmation, and confirmation code resend.

// self
use crate::{
	_prelude::*,
	auth::Email,
	flows::{Authenticator, MessageResponse, observe},
	idp::{ConfirmSignUp, SignUp},
	obs::Operation,
};

/// Sign-up success payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
	/// Provider-issued user identifier.
	pub user_sub: String,
	/// Confirmation for the caller.
	pub message: String,
}

impl Authenticator {
	/// Registers a user; the provider emails a confirmation code.
	pub async fn sign_up(&self, request: SignUp) -> Result<SignUpResponse> {
		observe(Operation::SignUp, "sign_up", async move {
			let outcome = self.idp.sign_up(&request).await?;

			#[cfg(feature = "tracing")]
			tracing::info!(confirmed = outcome.confirmed, "User registered.");

			Ok(SignUpResponse {
				user_sub: outcome.user_sub,
				message: "Verification code sent to email".into(),
			})
		})
		.await
	}

	/// Confirms a registration with the emailed code.
	pub async fn verify(&self, request: ConfirmSignUp) -> Result<MessageResponse> {
		observe(Operation::Verify, "verify", async move {
			self.idp.confirm_sign_up(&request).await?;

			Ok(MessageResponse::new("Account successfully verified"))
		})
		.await
	}

	/// Sends a fresh confirmation code to `email`.
	pub async fn resend_code(&self, email: Email) -> Result<MessageResponse> {
		observe(Operation::ResendCode, "resend_code", async move {
			let delivery = self.idp.resend_confirmation_code(&email).await?;

			#[cfg(feature = "tracing")]
			tracing::debug!(medium = delivery.medium.as_deref(), "Confirmation code resent.");
			#[cfg(not(feature = "tracing"))]
			let _ = delivery;

			Ok(MessageResponse::new(format!("Verification code resent to {email}")))
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		auth::Secret,
		flows::fakes::{FakeGateway, FakeIdp, authenticator},
		idp::{ProviderError, ProviderErrorKind},
	};

	fn email() -> Email {
		Email::new("ada@example.com").expect("Email fixture should be valid.")
	}

	#[tokio::test]
	async fn sign_up_returns_user_sub() {
		let idp = Arc::new(FakeIdp::default());
		let auth = authenticator(idp.clone(), Arc::new(FakeGateway::default()));
		let response = auth
			.sign_up(SignUp {
				email: email(),
				password: Secret::new("secret1"),
				given_name: Some("Ada".into()),
				family_name: None,
			})
			.await
			.expect("Sign-up should succeed.");

		assert_eq!(response.user_sub, "sub-123");
		assert_eq!(response.message, "Verification code sent to email");
		assert_eq!(idp.calls(), ["sign_up"]);
	}

	#[tokio::test]
	async fn resend_code_names_the_email() {
		let auth = authenticator(Arc::new(FakeIdp::default()), Arc::new(FakeGateway::default()));
		let response = auth.resend_code(email()).await.expect("Resend should succeed.");

		assert_eq!(response.message, "Verification code resent to ada@example.com");
	}

	#[tokio::test]
	async fn verify_passes_provider_message_through() {
		let idp = Arc::new(FakeIdp::failing(ProviderError::new(
			ProviderErrorKind::InvalidCode,
			"CodeMismatchException",
			"Invalid verification code provided, please try again.",
		)));
		let auth = authenticator(idp.clone(), Arc::new(FakeGateway::default()));
		let err = auth
			.verify(ConfirmSignUp { email: email(), code: Secret::new("123456") })
			.await
			.expect_err("Provider rejection should surface.");

		assert_eq!(err.to_string(), "Invalid verification code provided, please try again.");
		assert_eq!(idp.calls(), ["confirm_sign_up"]);
	}
}
