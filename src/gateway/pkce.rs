//! PKCE verifier, S256 challenge, and `state` generation for the hosted-login round trip.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, auth::Secret};

/// Length of the generated `state` parameter.
pub const STATE_LEN: usize = 32;
/// Length of the generated PKCE verifier.
pub const PKCE_VERIFIER_LEN: usize = 64;

/// Supported PKCE challenge methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PkceCodeChallengeMethod {
	/// SHA-256 based PKCE (RFC 7636 S256).
	S256,
}
impl PkceCodeChallengeMethod {
	/// Returns the RFC 7636 identifier for the challenge method.
	pub fn as_str(self) -> &'static str {
		match self {
			PkceCodeChallengeMethod::S256 => "S256",
		}
	}
}

/// Verifier and derived challenge for one authorization round trip.
#[derive(Clone, Debug)]
pub struct PkcePair {
	/// Secret verifier the caller keeps until the callback.
	pub verifier: Secret,
	/// Challenge sent in the authorize URL.
	pub challenge: String,
	/// Challenge method.
	pub method: PkceCodeChallengeMethod,
}
impl PkcePair {
	/// Generates a fresh S256 pair.
	pub fn generate() -> Self {
		let verifier = random_string(PKCE_VERIFIER_LEN);
		let challenge = compute_pkce_challenge(&verifier);

		Self { verifier: Secret::new(verifier), challenge, method: PkceCodeChallengeMethod::S256 }
	}
}

/// Random alphanumeric `state` value.
pub fn generate_state() -> String {
	random_string(STATE_LEN)
}

/// S256 challenge for `verifier`.
pub fn compute_pkce_challenge(verifier: &str) -> String {
	let digest = Sha256::digest(verifier.as_bytes());

	URL_SAFE_NO_PAD.encode(digest)
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
