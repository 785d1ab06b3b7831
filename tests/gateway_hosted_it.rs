mod common;

// std
use std::collections::BTreeMap;
// crates.io
use httpmock::prelude::*;
// self
use authgate::{
	auth::{RedirectUri, ScopeSet, Secret},
	gateway::{AuthorizeRequest, CodeExchange, compute_pkce_challenge},
	url::Url,
};
use common::*;

fn redirect() -> RedirectUri {
	RedirectUri::new("https://app.example.com/callback").expect("Redirect fixture should parse.")
}

#[tokio::test]
async fn callback_exchanges_code_with_pkce_verifier() {
	let server = MockServer::start_async().await;
	let verifier = "v".repeat(64);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth2/token")
				.header("content-type", "application/x-www-form-urlencoded")
				.form_urlencoded_tuple("grant_type", "authorization_code")
				.form_urlencoded_tuple("code", "auth-code-1")
				.form_urlencoded_tuple("client_id", CLIENT_ID)
				.form_urlencoded_tuple("redirect_uri", "https://App.example.com")
				.form_urlencoded_tuple("code_verifier", verifier.clone());
			then.status(200).header("content-type", "application/json").body(
				r#"{"access_token":"cb-access","id_token":"cb-id","refresh_token":"cb-refresh","token_type":"Bearer","expires_in":3600}"#,
			);
		})
		.await;
	let auth = authenticator(&server);
	let bundle = auth
		.callback(CodeExchange {
			code: Secret::new("auth-code-1"),
			redirect_uri: RedirectUri::new("https://App.example.com")
				.expect("Bare origin should parse."),
			code_verifier: Some(Secret::new(verifier.clone())),
			state: Some("state-1".into()),
		})
		.await
		.expect("Code exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(bundle.access_token.expose(), "cb-access");
	assert_eq!(bundle.id_token.as_ref().map(Secret::expose), Some("cb-id"));
	assert_eq!(bundle.refresh_token.as_ref().map(Secret::expose), Some("cb-refresh"));
	assert_eq!(bundle.token_type.as_deref(), Some("Bearer"));
}

#[tokio::test]
async fn callback_surfaces_invalid_grant() {
	let server = MockServer::start_async().await;
	let mock = mock_gateway_token(
		&server,
		400,
		r#"{"error":"invalid_grant","error_description":"authorization code expired"}"#,
	)
	.await;
	let auth = authenticator(&server);
	let err = auth
		.callback(CodeExchange {
			code: Secret::new("stale-code"),
			redirect_uri: redirect(),
			code_verifier: None,
			state: None,
		})
		.await
		.expect_err("Expired code must be rejected.");

	mock.assert_async().await;

	assert_eq!(err.to_string(), "authorization code expired");
	assert_eq!(err.kind(), "invalid_grant");
}

#[tokio::test]
async fn generate_url_targets_gateway_without_network() {
	let server = MockServer::start_async().await;
	let mock = mock_gateway_token(&server, 200, "{}").await;
	let auth = authenticator(&server);
	let authorization = auth.generate_url(&AuthorizeRequest {
		redirect_uri: redirect(),
		scopes: ScopeSet::new(["openid", "email"]).expect("Scopes should be valid."),
		identity_provider: None,
	});
	let url = Url::parse(&authorization.url).expect("Authorize URL should parse.");
	let pairs = url.query_pairs().into_owned().collect::<BTreeMap<_, _>>();

	mock.assert_calls_async(0).await;

	assert!(authorization.url.starts_with(&server.url("/oauth2/authorize")));
	assert_eq!(pairs["client_id"], CLIENT_ID);
	assert_eq!(pairs["scope"], "email openid");
	assert_eq!(pairs["state"], authorization.state);
	assert_eq!(pairs["code_challenge_method"], "S256");
	assert_eq!(pairs["code_challenge"], compute_pkce_challenge(authorization.code_verifier.expose()));
	assert!(!pairs.contains_key("identity_provider"));
}

#[tokio::test]
async fn generate_url_is_fresh_each_call() {
	let server = MockServer::start_async().await;
	let auth = authenticator(&server);
	let request = AuthorizeRequest {
		redirect_uri: redirect(),
		scopes: ScopeSet::openid_default(),
		identity_provider: Some("Google".into()),
	};
	let first = auth.generate_url(&request);
	let second = auth.generate_url(&request);

	assert_ne!(first.state, second.state);
	assert_ne!(first.code_verifier, second.code_verifier);
}
