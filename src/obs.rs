//! Optional observability helpers for the auth operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `authgate.operation` with the `operation`
//!   and `stage` (call site) fields, plus a `warn` event when the native refresh falls back.
//! - Enable `metrics` to increment the `authgate_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations exposed by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// `POST /api/signup`.
	SignUp,
	/// `POST /api/login`.
	Login,
	/// `POST /api/verify`.
	Verify,
	/// `POST /api/resend-code`.
	ResendCode,
	/// `POST /api/forgot-password`.
	ForgotPassword,
	/// `POST /api/create-password`.
	CreatePassword,
	/// `POST /api/refresh-token`.
	RefreshToken,
	/// `GET /api/logout`.
	Logout,
	/// `POST /api/generate-url`.
	GenerateUrl,
	/// `GET /api/callback`.
	Callback,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::SignUp => "signup",
			Operation::Login => "login",
			Operation::Verify => "verify",
			Operation::ResendCode => "resend_code",
			Operation::ForgotPassword => "forgot_password",
			Operation::CreatePassword => "create_password",
			Operation::RefreshToken => "refresh_token",
			Operation::Logout => "logout",
			Operation::GenerateUrl => "generate_url",
			Operation::Callback => "callback",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
