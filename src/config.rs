//! Resolved runtime configuration.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	gateway::GatewayEndpoints,
	idp::regional_endpoint,
};

/// Default outbound HTTP timeout.
pub const DEFAULT_HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Validated configuration shared by every request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
	/// User pool app client identifier.
	pub client_id: String,
	/// Cognito JSON API endpoint.
	pub idp_endpoint: Url,
	/// Hosted gateway endpoints.
	pub gateway: GatewayEndpoints,
	/// Timeout applied to every outbound request.
	pub http_timeout: std::time::Duration,
}
impl AuthConfig {
	/// Starts a new builder.
	pub fn builder() -> AuthConfigBuilder {
		AuthConfigBuilder::default()
	}
}

/// Builder for [`AuthConfig`] values.
#[derive(Clone, Debug, Default)]
pub struct AuthConfigBuilder {
	/// App client identifier.
	pub client_id: Option<String>,
	/// AWS region hosting the user pool.
	pub region: Option<String>,
	/// Hosted gateway domain (bare host name, or a full base URL for local gateways).
	pub auth_domain: Option<String>,
	/// Explicit Cognito endpoint overriding the regional default.
	pub idp_endpoint: Option<String>,
	/// Outbound HTTP timeout.
	pub http_timeout: Option<std::time::Duration>,
}
impl AuthConfigBuilder {
	/// Sets the app client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the AWS region.
	pub fn region(mut self, region: impl Into<String>) -> Self {
		self.region = Some(region.into());

		self
	}

	/// Sets the hosted gateway domain.
	pub fn auth_domain(mut self, auth_domain: impl Into<String>) -> Self {
		self.auth_domain = Some(auth_domain.into());

		self
	}

	/// Overrides the Cognito endpoint.
	pub fn idp_endpoint(mut self, endpoint: Option<impl Into<String>>) -> Self {
		self.idp_endpoint = endpoint.map(Into::into);

		self
	}

	/// Sets the outbound HTTP timeout.
	pub fn http_timeout(mut self, timeout: std::time::Duration) -> Self {
		self.http_timeout = Some(timeout);

		self
	}

	/// Validates every field and resolves endpoints.
	pub fn build(self) -> Result<AuthConfig, ConfigError> {
		let client_id = required("client_id", self.client_id)?;

		if client_id.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
			return Err(ConfigError::Malformed { field: "client_id", value: client_id });
		}

		let region = required("region", self.region)?;
		let auth_domain = required("auth_domain", self.auth_domain)?;
		let idp_endpoint = match self.idp_endpoint.filter(|value| !value.trim().is_empty()) {
			Some(raw) => http_url("idp_endpoint", &raw)?,
			None => regional_endpoint(&region)?,
		};
		let gateway = if auth_domain.contains("://") {
			GatewayEndpoints::from_base_url(&http_url("auth_domain", &auth_domain)?)?
		} else {
			GatewayEndpoints::from_domain(&auth_domain)?
		};
		let http_timeout = self.http_timeout.unwrap_or(DEFAULT_HTTP_TIMEOUT);

		if http_timeout.is_zero() {
			return Err(ConfigError::Malformed { field: "http_timeout", value: "0".into() });
		}

		Ok(AuthConfig { client_id, idp_endpoint, gateway, http_timeout })
	}
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ConfigError> {
	value
		.map(|value| value.trim().to_owned())
		.filter(|value| !value.is_empty())
		.ok_or(ConfigError::Missing { field })
}

fn http_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { field, source })?;

	if matches!(url.scheme(), "http" | "https") {
		Ok(url)
	} else {
		Err(ConfigError::UnsupportedScheme { field, url: url.into() })
	}
}
