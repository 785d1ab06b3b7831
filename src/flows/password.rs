//! Password reset: request a code, then set the new password with it.

// self
use crate::{
	_prelude::*,
	auth::Email,
	flows::{Authenticator, MessageResponse, observe},
	idp::ConfirmForgotPassword,
	obs::Operation,
};

impl Authenticator {
	/// Emails a password reset code to `email`.
	pub async fn forgot_password(&self, email: Email) -> Result<MessageResponse> {
		observe(Operation::ForgotPassword, "forgot_password", async move {
			self.idp.forgot_password(&email).await?;

			Ok(MessageResponse::new("Verification code sent to email"))
		})
		.await
	}

	/// Sets a new password using the emailed reset code.
	pub async fn create_password(&self, request: ConfirmForgotPassword) -> Result<MessageResponse> {
		observe(Operation::CreatePassword, "create_password", async move {
			self.idp.confirm_forgot_password(&request).await?;

			Ok(MessageResponse::new("Password reset successful"))
		})
		.await
	}
}
