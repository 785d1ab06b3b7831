//! Helpers shared by the integration tests: an [`Authenticator`] wired to a single `httpmock`
//! server that plays both the Cognito JSON endpoint (`POST /`) and the hosted gateway.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use authgate::{
	flows::Authenticator,
	gateway::{GatewayEndpoints, OAuthGateway},
	http::ReqwestTransport,
	idp::CognitoClient,
	url::Url,
};

pub const CLIENT_ID: &str = "client-it";
pub const AMZ_JSON: &str = "application/x-amz-json-1.1";

/// Builds an authenticator whose identity provider and gateway both point at `server`.
pub fn authenticator(server: &MockServer) -> Authenticator {
	let transport = Arc::new(ReqwestTransport::default());
	let idp_endpoint = Url::parse(&server.url("/")).expect("Mock Cognito endpoint should parse.");
	let base = Url::parse(&server.base_url()).expect("Mock gateway base URL should parse.");
	let endpoints =
		GatewayEndpoints::from_base_url(&base).expect("Mock gateway endpoints should build.");
	let idp = <CognitoClient<ReqwestTransport>>::new(idp_endpoint, CLIENT_ID, transport.clone());
	let gateway = <OAuthGateway<ReqwestTransport>>::new(&endpoints, CLIENT_ID, transport);

	Authenticator::new(Arc::new(idp), Arc::new(gateway), endpoints, CLIENT_ID)
}

/// `x-amz-target` header value for a Cognito operation.
pub fn target(operation: &str) -> String {
	format!("AWSCognitoIdentityProviderService.{operation}")
}

/// Mocks a successful Cognito call for `operation`.
pub async fn mock_cognito_ok<'a>(
	server: &'a MockServer,
	operation: &str,
	body: &str,
) -> httpmock::Mock<'a> {
	let target = target(operation);
	let body = body.to_owned();

	server
		.mock_async(|when, then| {
			when.method(POST).path("/").header("x-amz-target", target).header("content-type", AMZ_JSON);
			then.status(200).header("content-type", AMZ_JSON).body(body);
		})
		.await
}

/// Mocks a Cognito error response for `operation`.
pub async fn mock_cognito_error<'a>(
	server: &'a MockServer,
	operation: &str,
	status: u16,
	error_type: &str,
	message: &str,
) -> httpmock::Mock<'a> {
	let target = target(operation);
	let body = serde_json::json!({
		"__type": format!("com.amazonaws.cognito.identity.idp.model#{error_type}"),
		"message": message,
	})
	.to_string();

	server
		.mock_async(|when, then| {
			when.method(POST).path("/").header("x-amz-target", target);
			then.status(status).header("content-type", AMZ_JSON).body(body);
		})
		.await
}

/// Mocks the hosted gateway token endpoint.
pub async fn mock_gateway_token<'a>(
	server: &'a MockServer,
	status: u16,
	body: &str,
) -> httpmock::Mock<'a> {
	let body = body.to_owned();

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth2/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(status).header("content-type", "application/json").body(body);
		})
		.await
}
