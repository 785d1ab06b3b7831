//! Per-route request schemas.

// self
use crate::{
	_prelude::*,
	auth::{Email, RedirectUri, ScopeSet, Secret},
	gateway::{AuthorizeRequest, CodeExchange},
	idp::{ConfirmForgotPassword, ConfirmSignUp, PasswordLogin, SignUp},
	validate::{
		Schema, ValidationError,
		rules::{self, CODE_MIN_LEN, LOGIN_PASSWORD_MIN_LEN, PASSWORD_MIN_LEN, REFRESH_TOKEN_MIN_LEN},
	},
};

/// `POST /api/signup` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpBody {
	email: Option<String>,
	password: Option<String>,
	first_name: Option<String>,
	last_name: Option<String>,
}
impl Schema for SignUpBody {
	type Output = SignUp;

	fn validate(self) -> Result<Self::Output, ValidationError> {
		Ok(SignUp {
			email: rules::email("email", self.email)?,
			password: rules::secret("password", self.password, PASSWORD_MIN_LEN)?,
			given_name: rules::optional_text("firstName", self.first_name)?,
			family_name: rules::optional_text("lastName", self.last_name)?,
		})
	}
}

/// `POST /api/login` body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
	email: Option<String>,
	password: Option<String>,
}
impl Schema for LoginBody {
	type Output = PasswordLogin;

	fn validate(self) -> Result<Self::Output, ValidationError> {
		Ok(PasswordLogin {
			email: rules::email("email", self.email)?,
			password: rules::secret("password", self.password, LOGIN_PASSWORD_MIN_LEN)?,
		})
	}
}

/// `POST /api/verify` body.
#[derive(Debug, Deserialize)]
pub struct VerifyBody {
	email: Option<String>,
	code: Option<String>,
}
impl Schema for VerifyBody {
	type Output = ConfirmSignUp;

	fn validate(self) -> Result<Self::Output, ValidationError> {
		Ok(ConfirmSignUp {
			email: rules::email("email", self.email)?,
			code: rules::secret("code", self.code, CODE_MIN_LEN)?,
		})
	}
}

/// Body carrying only an email: `POST /api/resend-code` and `POST /api/forgot-password`.
#[derive(Debug, Deserialize)]
pub struct EmailBody {
	email: Option<String>,
}
impl Schema for EmailBody {
	type Output = Email;

	fn validate(self) -> Result<Self::Output, ValidationError> {
		rules::email("email", self.email)
	}
}

/// `POST /api/create-password` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePasswordBody {
	email: Option<String>,
	code: Option<String>,
	new_password: Option<String>,
}
impl Schema for CreatePasswordBody {
	type Output = ConfirmForgotPassword;

	fn validate(self) -> Result<Self::Output, ValidationError> {
		Ok(ConfirmForgotPassword {
			email: rules::email("email", self.email)?,
			code: rules::secret("code", self.code, CODE_MIN_LEN)?,
			new_password: rules::secret("newPassword", self.new_password, PASSWORD_MIN_LEN)?,
		})
	}
}

/// `POST /api/refresh-token` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenBody {
	refresh_token: Option<String>,
}
impl Schema for RefreshTokenBody {
	type Output = Secret;

	fn validate(self) -> Result<Self::Output, ValidationError> {
		rules::secret("refreshToken", self.refresh_token, REFRESH_TOKEN_MIN_LEN)
	}
}

/// `GET /api/logout` query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutQuery {
	redirect_uri: Option<String>,
}
impl Schema for LogoutQuery {
	type Output = RedirectUri;

	fn validate(self) -> Result<Self::Output, ValidationError> {
		rules::redirect_uri("redirectUri", self.redirect_uri)
	}
}

/// `POST /api/generate-url` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateUrlBody {
	redirect_uri: Option<String>,
	#[serde(default)]
	scopes: Vec<String>,
	identity_provider: Option<String>,
}
impl Schema for GenerateUrlBody {
	type Output = AuthorizeRequest;

	fn validate(self) -> Result<Self::Output, ValidationError> {
		let redirect_uri = rules::redirect_uri("redirectUri", self.redirect_uri)?;
		let scopes = if self.scopes.is_empty() {
			ScopeSet::openid_default()
		} else {
			ScopeSet::new(self.scopes).map_err(|err| ValidationError::Invalid {
				field: "scopes",
				reason: format!("is invalid: {}", err.to_string().trim_end_matches('.')),
			})?
		};
		let identity_provider = rules::optional_text("identityProvider", self.identity_provider)?;

		Ok(AuthorizeRequest { redirect_uri, scopes, identity_provider })
	}
}

/// `GET /api/callback` query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackQuery {
	code: Option<String>,
	redirect_uri: Option<String>,
	code_verifier: Option<String>,
	state: Option<String>,
}
impl Schema for CallbackQuery {
	type Output = CodeExchange;

	fn validate(self) -> Result<Self::Output, ValidationError> {
		Ok(CodeExchange {
			code: rules::secret("code", self.code, 1)?,
			redirect_uri: rules::redirect_uri("redirectUri", self.redirect_uri)?,
			code_verifier: rules::optional_pkce_verifier("codeVerifier", self.code_verifier)?,
			state: rules::optional_text("state", self.state)?,
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::validate::{parse_json, parse_query};

	#[test]
	fn login_enforces_eight_character_password() {
		let err = parse_json::<LoginBody>(br#"{"email":"a@b.com","password":"short"}"#)
			.expect_err("Short login password must be rejected.");

		assert_eq!(err, ValidationError::TooShort { field: "password", min: 8 });

		let login = parse_json::<LoginBody>(br#"{"email":"a@b.com","password":"longenough"}"#)
			.expect("Valid login should pass.");

		assert_eq!(login.email.as_str(), "a@b.com");
		assert_eq!(login.password.expose(), "longenough");
	}

	#[test]
	fn signup_names_are_optional() {
		let signup = parse_json::<SignUpBody>(
			br#"{"email":"ada@example.com","password":"secret1","firstName":"Ada"}"#,
		)
		.expect("Sign-up without last name should pass.");

		assert_eq!(signup.given_name.as_deref(), Some("Ada"));
		assert!(signup.family_name.is_none());
	}

	#[test]
	fn create_password_checks_every_field() {
		let err = parse_json::<CreatePasswordBody>(
			br#"{"email":"ada@example.com","code":"123456","newPassword":"abc"}"#,
		)
		.expect_err("Short new password must be rejected.");

		assert_eq!(err, ValidationError::TooShort { field: "newPassword", min: 6 });
	}

	#[test]
	fn generate_url_defaults_scopes() {
		let request =
			parse_json::<GenerateUrlBody>(br#"{"redirectUri":"https://app.example.com/cb"}"#)
				.expect("Minimal body should pass.");

		assert_eq!(request.scopes, ScopeSet::openid_default());

		let err = parse_json::<GenerateUrlBody>(
			br#"{"redirectUri":"https://app.example.com/cb","scopes":["bad scope"]}"#,
		)
		.expect_err("Whitespace scope must be rejected.");

		assert!(matches!(err, ValidationError::Invalid { field: "scopes", .. }));
	}

	#[test]
	fn callback_requires_code_and_redirect() {
		let err = parse_query::<CallbackQuery>(Some("redirectUri=https%3A%2F%2Fapp.example.com"))
			.expect_err("Missing code must be rejected.");

		assert_eq!(err, ValidationError::Missing { field: "code" });

		let exchange =
			parse_query::<CallbackQuery>(Some("code=abc&redirectUri=https%3A%2F%2Fapp.example.com"))
				.expect("Code plus redirect should pass.");

		assert_eq!(exchange.code.expose(), "abc");
		assert!(exchange.code_verifier.is_none());
	}
}
