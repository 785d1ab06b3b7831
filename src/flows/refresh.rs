//! Token refresh with a hosted-gateway fallback.
//!
//! The native provider refresh (`InitiateAuth` with `REFRESH_TOKEN_AUTH`) runs first. Only when
//! it fails is the hosted gateway's `refresh_token` grant attempted, and the native failure is
//! logged at `warn` rather than returned. When both fail the caller sees the fallback's error.
//! There are no retries and nothing is cached; every call is independent.

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::{Secret, TokenBundle},
	flows::{Authenticator, observe},
	idp::AuthOutcome,
	obs::{self, Operation},
};

impl Authenticator {
	/// Exchanges a refresh token for new access and identity tokens.
	///
	/// The returned bundle never carries a refresh token.
	pub async fn refresh_token(&self, refresh_token: Secret) -> Result<TokenBundle> {
		observe(Operation::RefreshToken, "refresh_token", async move {
			self.refresh_metrics.record_native_attempt();

			let native = match self.idp.refresh(&refresh_token).await.and_then(AuthOutcome::into_tokens)
			{
				Ok(bundle) => return Ok(bundle.without_refresh_token()),
				Err(err) => err,
			};

			obs::warn_native_refresh_failed(&native);
			self.refresh_metrics.record_fallback_attempt();

			match self.gateway.refresh(&refresh_token).await {
				Ok(bundle) => Ok(bundle.without_refresh_token()),
				Err(fallback) => {
					self.refresh_metrics.record_exhausted();

					Err(Error::RefreshExhausted { native: Box::new(native), fallback: Box::new(fallback) })
				},
			}
		})
		.await
	}
}
