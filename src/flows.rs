//! Operation handlers sitting between the HTTP surface and the remote collaborators.
//!
//! [`Authenticator`] owns the shared identity provider and gateway handles. Each handler takes
//! an already-validated command, issues at most one remote call (refresh may issue a second,
//! fallback call), and maps the outcome into a response payload or an [`Error`].

pub mod account;
pub mod hosted;
pub mod password;
pub mod refresh;
pub mod session;

#[cfg(test)] pub(crate) mod fakes;

pub use account::*;
pub use refresh::*;
pub use session::*;

// self
use crate::{
	_prelude::*,
	config::AuthConfig,
	gateway::{GatewayEndpoints, OAuthGateway, TokenGateway},
	http::ReqwestTransport,
	idp::{CognitoClient, IdentityProvider},
	obs::{self, Operation, OperationSpan, Outcome},
};

/// Shared handle used by every operation.
///
/// Immutable after construction; clone it freely or share it behind an [`Arc`].
#[derive(Clone)]
pub struct Authenticator {
	/// Identity provider used by the credential operations.
	pub idp: Arc<dyn IdentityProvider>,
	/// Hosted gateway token endpoint used by refresh fallback and callback.
	pub gateway: Arc<dyn TokenGateway>,
	/// Hosted gateway endpoints used to build authorize and logout URLs.
	pub endpoints: GatewayEndpoints,
	/// App client identifier.
	pub client_id: String,
	/// Counters describing which refresh path ran.
	pub refresh_metrics: Arc<RefreshMetrics>,
}
impl Authenticator {
	/// Creates an authenticator over caller-provided collaborators.
	pub fn new(
		idp: Arc<dyn IdentityProvider>,
		gateway: Arc<dyn TokenGateway>,
		endpoints: GatewayEndpoints,
		client_id: impl Into<String>,
	) -> Self {
		Self {
			idp,
			gateway,
			endpoints,
			client_id: client_id.into(),
			refresh_metrics: Default::default(),
		}
	}

	/// Builds the production stack: one pooled reqwest transport shared by Cognito and the
	/// hosted gateway.
	pub fn from_config(config: &AuthConfig) -> Result<Self> {
		let transport = Arc::new(ReqwestTransport::with_timeout(config.http_timeout)?);
		let idp = <CognitoClient<ReqwestTransport>>::new(
			config.idp_endpoint.clone(),
			config.client_id.clone(),
			transport.clone(),
		);
		let gateway = <OAuthGateway<ReqwestTransport>>::new(
			&config.gateway,
			config.client_id.clone(),
			transport,
		);

		Ok(Self::new(
			Arc::new(idp),
			Arc::new(gateway),
			config.gateway.clone(),
			config.client_id.clone(),
		))
	}

	/// Replaces the refresh counters, e.g. to share them with a caller.
	pub fn with_refresh_metrics(mut self, metrics: Arc<RefreshMetrics>) -> Self {
		self.refresh_metrics = metrics;

		self
	}
}
impl Debug for Authenticator {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator")
			.field("endpoints", &self.endpoints)
			.field("client_id", &self.client_id)
			.field("refresh_metrics", &self.refresh_metrics)
			.finish_non_exhaustive()
	}
}

/// `{ "message": "..." }` success payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
	/// Human-readable confirmation.
	pub message: String,
}
impl MessageResponse {
	/// Wraps a confirmation message.
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into() }
	}
}

async fn observe<T, Fut>(operation: Operation, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = OperationSpan::new(operation, stage);

	obs::record_operation_outcome(operation, Outcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => obs::record_operation_outcome(operation, Outcome::Success),
		Err(err) => {
			obs::record_operation_outcome(operation, Outcome::Failure);
			obs::debug_operation_failed(operation, err);
		},
	}

	result
}
