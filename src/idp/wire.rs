//! Cognito user pool JSON wire shapes.

// self
use crate::{
	_prelude::*,
	auth::{Secret, TokenBundle},
	idp::{CodeDelivery, normalize_code},
};

/// Content type of every Cognito JSON API request.
pub const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
/// Header naming the target operation.
pub const TARGET_HEADER: &str = "x-amz-target";
/// Header some gateways use to report the error code instead of `__type`.
pub const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// Cognito operations issued by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CognitoOperation {
	/// `SignUp`.
	SignUp,
	/// `ConfirmSignUp`.
	ConfirmSignUp,
	/// `ResendConfirmationCode`.
	ResendConfirmationCode,
	/// `ForgotPassword`.
	ForgotPassword,
	/// `ConfirmForgotPassword`.
	ConfirmForgotPassword,
	/// `InitiateAuth`.
	InitiateAuth,
}
impl CognitoOperation {
	/// Operation name as used in the target header.
	pub const fn name(self) -> &'static str {
		match self {
			Self::SignUp => "SignUp",
			Self::ConfirmSignUp => "ConfirmSignUp",
			Self::ResendConfirmationCode => "ResendConfirmationCode",
			Self::ForgotPassword => "ForgotPassword",
			Self::ConfirmForgotPassword => "ConfirmForgotPassword",
			Self::InitiateAuth => "InitiateAuth",
		}
	}

	/// Full `X-Amz-Target` header value.
	pub fn target(self) -> String {
		format!("AWSCognitoIdentityProviderService.{}", self.name())
	}
}

/// `InitiateAuth` flows used by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthFlow {
	/// Username and password sent directly.
	UserPasswordAuth,
	/// Refresh token exchange.
	RefreshTokenAuth,
}

/// `{ Name, Value }` user attribute.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeType<'a> {
	/// Attribute name.
	pub name: &'a str,
	/// Attribute value.
	pub value: &'a str,
}

/// `SignUp` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignUpRequest<'a> {
	/// App client identifier.
	pub client_id: &'a str,
	/// Username.
	pub username: &'a str,
	/// Initial password.
	pub password: &'a str,
	/// User attributes.
	pub user_attributes: Vec<AttributeType<'a>>,
}

/// `ConfirmSignUp` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfirmSignUpRequest<'a> {
	/// App client identifier.
	pub client_id: &'a str,
	/// Username.
	pub username: &'a str,
	/// Emailed confirmation code.
	pub confirmation_code: &'a str,
}

/// `ResendConfirmationCode` and `ForgotPassword` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsernameRequest<'a> {
	/// App client identifier.
	pub client_id: &'a str,
	/// Username.
	pub username: &'a str,
}

/// `ConfirmForgotPassword` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfirmForgotPasswordRequest<'a> {
	/// App client identifier.
	pub client_id: &'a str,
	/// Username.
	pub username: &'a str,
	/// Emailed reset code.
	pub confirmation_code: &'a str,
	/// Replacement password.
	pub password: &'a str,
}

/// `InitiateAuth` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitiateAuthRequest<'a> {
	/// Authentication flow.
	pub auth_flow: AuthFlow,
	/// App client identifier.
	pub client_id: &'a str,
	/// Flow parameters (`USERNAME`, `PASSWORD`, `REFRESH_TOKEN`).
	pub auth_parameters: BTreeMap<&'static str, &'a str>,
}

/// `SignUp` response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignUpResponse {
	/// Provider user identifier.
	#[serde(default)]
	pub user_sub: Option<String>,
	/// Whether the user was confirmed immediately.
	#[serde(default)]
	pub user_confirmed: bool,
	/// Code delivery details.
	#[serde(default)]
	pub code_delivery_details: Option<CodeDeliveryDetails>,
}

/// Response body carrying only code delivery details.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeDeliveryResponse {
	/// Code delivery details.
	#[serde(default)]
	pub code_delivery_details: Option<CodeDeliveryDetails>,
}

/// Where a code was sent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeDeliveryDetails {
	/// Masked destination.
	#[serde(default)]
	pub destination: Option<String>,
	/// Delivery medium.
	#[serde(default)]
	pub delivery_medium: Option<String>,
}
impl From<Option<CodeDeliveryDetails>> for CodeDelivery {
	fn from(details: Option<CodeDeliveryDetails>) -> Self {
		let details = details.unwrap_or_default();

		Self { destination: details.destination, medium: details.delivery_medium }
	}
}

/// Empty success body (`{}`) returned by confirmation operations.
#[derive(Debug, Default, Deserialize)]
pub struct EmptyResponse {}

/// `InitiateAuth` response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitiateAuthResponse {
	/// Tokens, when authentication completed.
	#[serde(default)]
	pub authentication_result: Option<AuthenticationResult>,
	/// Pending challenge, when one is required.
	#[serde(default)]
	pub challenge_name: Option<String>,
}

/// `AuthenticationResult` block.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResult {
	/// Access token.
	#[serde(default)]
	pub access_token: Option<String>,
	/// Identity token.
	#[serde(default)]
	pub id_token: Option<String>,
	/// Refresh token (absent on refresh).
	#[serde(default)]
	pub refresh_token: Option<String>,
	/// Lifetime in seconds.
	#[serde(default)]
	pub expires_in: Option<u64>,
	/// Token type.
	#[serde(default)]
	pub token_type: Option<String>,
}
impl From<AuthenticationResult> for TokenBundle {
	fn from(result: AuthenticationResult) -> Self {
		Self {
			access_token: Secret::new(result.access_token.unwrap_or_default()),
			id_token: result.id_token.map(Secret::new),
			refresh_token: result.refresh_token.map(Secret::new),
			expires_in: result.expires_in,
			token_type: result.token_type,
		}
	}
}

/// Cognito error body. Both `message` and `Message` spellings occur.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
	/// Error code, possibly namespaced (`...#NotAuthorizedException`).
	#[serde(rename = "__type", default)]
	pub error_type: Option<String>,
	/// Human-readable message.
	#[serde(alias = "Message", default)]
	pub message: Option<String>,
}
impl ErrorResponse {
	/// Resolves the error code, preferring the body over the header.
	pub fn code(&self, header: Option<&str>) -> String {
		self.error_type
			.as_deref()
			.or(header)
			.map(normalize_code)
			.filter(|code| !code.is_empty())
			.unwrap_or("UnknownError")
			.to_owned()
	}
}
