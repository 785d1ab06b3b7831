//! Hosted gateway endpoint set derived from the configured domain.

// self
use crate::{_prelude::*, auth::RedirectUri, error::ConfigError};

/// Authorize, token, and logout endpoints of the hosted gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayEndpoints {
	/// `/oauth2/authorize`.
	pub authorize: Url,
	/// `/oauth2/token`.
	pub token: Url,
	/// `/logout`.
	pub logout: Url,
}
impl GatewayEndpoints {
	/// Builds HTTPS endpoints from a bare host name such as `auth.example.com`.
	pub fn from_domain(domain: &str) -> Result<Self, ConfigError> {
		let domain = domain.trim().trim_end_matches('/');

		if domain.is_empty() {
			return Err(ConfigError::Missing { field: "auth_domain" });
		}
		if domain.contains("://") || domain.contains(['/', '?', '#', ' ']) {
			return Err(ConfigError::Malformed { field: "auth_domain", value: domain.to_owned() });
		}

		let base = Url::parse(&format!("https://{domain}/"))
			.map_err(|source| ConfigError::InvalidUrl { field: "auth_domain", source })?;

		Self::from_base_url(&base)
	}

	/// Builds endpoints under an explicit HTTP(S) base URL.
	pub fn from_base_url(base: &Url) -> Result<Self, ConfigError> {
		if !matches!(base.scheme(), "http" | "https") || base.host_str().is_none() {
			return Err(ConfigError::UnsupportedScheme {
				field: "auth_domain",
				url: base.to_string(),
			});
		}

		let join = |path: &str| {
			base.join(path).map_err(|source| ConfigError::InvalidUrl { field: "auth_domain", source })
		};

		Ok(Self {
			authorize: join("/oauth2/authorize")?,
			token: join("/oauth2/token")?,
			logout: join("/logout")?,
		})
	}

	/// Logout URL that returns the browser to `redirect_uri` afterwards.
	///
	/// `logout_uri` carries the caller's text verbatim (percent-encoded), never a normalized form.
	pub fn logout_url(&self, client_id: &str, redirect_uri: &RedirectUri) -> Url {
		let mut url = self.logout.clone();

		url.query_pairs_mut()
			.append_pair("client_id", client_id)
			.append_pair("logout_uri", redirect_uri.as_str());

		url
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn domain_expands_to_https_endpoints() {
		let endpoints =
			GatewayEndpoints::from_domain("auth.example.com").expect("Domain should build.");

		assert_eq!(endpoints.authorize.as_str(), "https://auth.example.com/oauth2/authorize");
		assert_eq!(endpoints.token.as_str(), "https://auth.example.com/oauth2/token");
		assert_eq!(endpoints.logout.as_str(), "https://auth.example.com/logout");
	}

	#[test]
	fn domain_rejects_urls_and_blanks() {
		assert!(matches!(GatewayEndpoints::from_domain("  "), Err(ConfigError::Missing { .. })));
		assert!(matches!(
			GatewayEndpoints::from_domain("https://auth.example.com"),
			Err(ConfigError::Malformed { .. })
		));
	}

	#[test]
	fn logout_url_encodes_redirect() {
		let endpoints =
			GatewayEndpoints::from_domain("auth.example.com").expect("Domain should build.");
		let redirect = RedirectUri::new("https://app.example.com/bye?x=1")
			.expect("Redirect fixture should parse.");

		assert_eq!(
			endpoints.logout_url("client-123", &redirect).as_str(),
			"https://auth.example.com/logout?client_id=client-123&logout_uri=https%3A%2F%2Fapp.example.com%2Fbye%3Fx%3D1"
		);

		let origin =
			RedirectUri::new("https://App.example.com").expect("Bare origin should parse.");

		assert_eq!(
			endpoints.logout_url("client-123", &origin).as_str(),
			"https://auth.example.com/logout?client_id=client-123&logout_uri=https%3A%2F%2FApp.example.com"
		);
	}
}
