//! axum surface: routes, validating extractors, and the error response.
//!
//! Every failure renders as `400 Bad Request` with an [`ErrorBody`]. Validation runs inside the
//! extractors, so a handler body only ever sees typed commands.

// crates.io
use axum::{
	Json, Router,
	body::Bytes,
	extract::{FromRequest, FromRequestParts, Request, State},
	http::{StatusCode, request::Parts},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use tower_http::trace::TraceLayer;
// self
use crate::{
	_prelude::*,
	auth::{SessionTokens, TokenBundle},
	error::ErrorBody,
	flows::{Authenticator, LogoutResponse, MessageResponse, SignUpResponse},
	gateway::AuthorizationUrl,
	validate::{
		self, CallbackQuery, CreatePasswordBody, EmailBody, GenerateUrlBody, LoginBody,
		LogoutQuery, RefreshTokenBody, Schema, SignUpBody, ValidationError, VerifyBody,
	},
};

type AppState = State<Arc<Authenticator>>;

/// Builds the router with every route and the HTTP trace layer.
pub fn router(authenticator: Arc<Authenticator>) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/signup", post(sign_up))
		.route("/api/login", post(login))
		.route("/api/verify", post(verify))
		.route("/api/resend-code", post(resend_code))
		.route("/api/forgot-password", post(forgot_password))
		.route("/api/create-password", post(create_password))
		.route("/api/refresh-token", post(refresh_token))
		.route("/api/logout", get(logout))
		.route("/api/generate-url", post(generate_url))
		.route("/api/callback", get(callback))
		.layer(TraceLayer::new_for_http())
		.with_state(authenticator)
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		(StatusCode::BAD_REQUEST, Json(ErrorBody::from(&self))).into_response()
	}
}

/// JSON body decoded into `S` and validated into `S::Output`.
///
/// Any body is accepted regardless of `Content-Type`; an empty body is read as `{}`.
#[derive(Debug)]
pub struct ValidJson<S>(pub S::Output)
where
	S: Schema;
impl<S, St> FromRequest<St> for ValidJson<S>
where
	S: Schema,
	S::Output: Send,
	St: Send + Sync,
{
	type Rejection = Error;

	async fn from_request(req: Request, state: &St) -> Result<Self, Self::Rejection> {
		let body = Bytes::from_request(req, state).await.map_err(|rejection| {
			ValidationError::Malformed { path: ".".into(), message: rejection.body_text() }
		})?;

		Ok(Self(validate::parse_json::<S>(&body)?))
	}
}

/// Query string decoded into `S` and validated into `S::Output`.
#[derive(Debug)]
pub struct ValidQuery<S>(pub S::Output)
where
	S: Schema;
impl<S, St> FromRequestParts<St> for ValidQuery<S>
where
	S: Schema,
	S::Output: Send,
	St: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _: &St) -> Result<Self, Self::Rejection> {
		Ok(Self(validate::parse_query::<S>(parts.uri.query())?))
	}
}

#[derive(Debug, Serialize)]
struct Health {
	name: &'static str,
	version: &'static str,
}

async fn health() -> Json<Health> {
	Json(Health { name: env!("CARGO_PKG_NAME"), version: env!("CARGO_PKG_VERSION") })
}

async fn sign_up(
	State(auth): AppState,
	ValidJson(request): ValidJson<SignUpBody>,
) -> Result<Json<SignUpResponse>> {
	Ok(Json(auth.sign_up(request).await?))
}

async fn login(
	State(auth): AppState,
	ValidJson(request): ValidJson<LoginBody>,
) -> Result<Json<SessionTokens>> {
	Ok(Json(auth.login(request).await?))
}

async fn verify(
	State(auth): AppState,
	ValidJson(request): ValidJson<VerifyBody>,
) -> Result<Json<MessageResponse>> {
	Ok(Json(auth.verify(request).await?))
}

async fn resend_code(
	State(auth): AppState,
	ValidJson(email): ValidJson<EmailBody>,
) -> Result<Json<MessageResponse>> {
	Ok(Json(auth.resend_code(email).await?))
}

async fn forgot_password(
	State(auth): AppState,
	ValidJson(email): ValidJson<EmailBody>,
) -> Result<Json<MessageResponse>> {
	Ok(Json(auth.forgot_password(email).await?))
}

async fn create_password(
	State(auth): AppState,
	ValidJson(request): ValidJson<CreatePasswordBody>,
) -> Result<Json<MessageResponse>> {
	Ok(Json(auth.create_password(request).await?))
}

async fn refresh_token(
	State(auth): AppState,
	ValidJson(refresh_token): ValidJson<RefreshTokenBody>,
) -> Result<Json<TokenBundle>> {
	Ok(Json(auth.refresh_token(refresh_token).await?))
}

async fn logout(
	State(auth): AppState,
	ValidQuery(redirect_uri): ValidQuery<LogoutQuery>,
) -> Json<LogoutResponse> {
	Json(auth.logout(&redirect_uri))
}

async fn generate_url(
	State(auth): AppState,
	ValidJson(request): ValidJson<GenerateUrlBody>,
) -> Json<AuthorizationUrl> {
	Json(auth.generate_url(&request))
}

async fn callback(
	State(auth): AppState,
	ValidQuery(exchange): ValidQuery<CallbackQuery>,
) -> Result<Json<TokenBundle>> {
	Ok(Json(auth.callback(exchange).await?))
}

#[cfg(test)]
mod tests {
	// crates.io
	use axum::body::{Body, to_bytes};
	use tower::ServiceExt;
	// self
	use super::*;
	use crate::flows::fakes::{FakeGateway, FakeIdp, authenticator};

	async fn send(router: Router, request: axum::http::Request<Body>) -> (StatusCode, serde_json::Value) {
		let response = router.oneshot(request).await.expect("Router should answer.");
		let status = response.status();
		let body = to_bytes(response.into_body(), usize::MAX).await.expect("Body should read.");
		let json = serde_json::from_slice(&body).expect("Body should be JSON.");

		(status, json)
	}

	fn post_json(uri: &str, body: &str) -> axum::http::Request<Body> {
		axum::http::Request::post(uri)
			.header("content-type", "application/json")
			.body(Body::from(body.to_owned()))
			.expect("Request fixture should build.")
	}

	#[tokio::test]
	async fn short_login_password_never_reaches_the_provider() {
		let idp = Arc::new(FakeIdp::default());
		let router =
			router(Arc::new(authenticator(idp.clone(), Arc::new(FakeGateway::default()))));
		let (status, body) =
			send(router, post_json("/api/login", r#"{"email":"a@b.com","password":"short"}"#))
				.await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["message"], "Field `password` must be at least 8 characters long.");
		assert!(idp.calls().is_empty());
	}

	#[tokio::test]
	async fn missing_body_is_a_bad_request() {
		let router = router(Arc::new(authenticator(
			Arc::new(FakeIdp::default()),
			Arc::new(FakeGateway::default()),
		)));
		let (status, body) = send(router, post_json("/api/refresh-token", "")).await;

		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["message"], "Field `refreshToken` is required.");
	}

	#[tokio::test]
	async fn refresh_response_omits_refresh_token() {
		let router = router(Arc::new(authenticator(
			Arc::new(FakeIdp::default()),
			Arc::new(FakeGateway::default()),
		)));
		let (status, body) =
			send(router, post_json("/api/refresh-token", r#"{"refreshToken":"refresh-abc"}"#))
				.await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["accessToken"], "native-access");
		assert_eq!(body["idToken"], "native-id");
		assert!(body.get("refreshToken").is_none());
	}

	#[tokio::test]
	async fn logout_builds_url_from_query() {
		let router = router(Arc::new(authenticator(
			Arc::new(FakeIdp::default()),
			Arc::new(FakeGateway::default()),
		)));
		let request = axum::http::Request::get(
			"/api/logout?redirectUri=https%3A%2F%2Fapp.example.com%2Fbye",
		)
		.body(Body::empty())
		.expect("Request fixture should build.");
		let (status, body) = send(router, request).await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(
			body["logoutUrl"],
			"https://auth.example.com/logout?client_id=client-123&logout_uri=https%3A%2F%2Fapp.example.com%2Fbye"
		);
	}

	#[tokio::test]
	async fn logout_keeps_redirect_text_verbatim() {
		let router = router(Arc::new(authenticator(
			Arc::new(FakeIdp::default()),
			Arc::new(FakeGateway::default()),
		)));
		let request = axum::http::Request::get("/api/logout?redirectUri=https%3A%2F%2FApp.example.com")
			.body(Body::empty())
			.expect("Request fixture should build.");
		let (status, body) = send(router, request).await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(
			body["logoutUrl"],
			"https://auth.example.com/logout?client_id=client-123&logout_uri=https%3A%2F%2FApp.example.com"
		);
	}

	#[tokio::test]
	async fn health_reports_package() {
		let router = router(Arc::new(authenticator(
			Arc::new(FakeIdp::default()),
			Arc::new(FakeGateway::default()),
		)));
		let request =
			axum::http::Request::get("/health").body(Body::empty()).expect("Request should build.");
		let (status, body) = send(router, request).await;

		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["name"], "authgate");
	}
}
