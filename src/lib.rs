//! Authentication API that fronts a Cognito user pool and its hosted OAuth 2.0 domain.
//!
//! Every operation validates its input into a typed command, issues at most one call to the
//! identity provider (or builds a hosted-gateway URL without any remote call), and maps the
//! outcome into a small JSON payload or a client-facing error. Token refresh is the one flow
//! with branching: the native provider refresh runs first and the hosted gateway's
//! `refresh_token` grant is attempted only when it fails.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod gateway;
pub mod http;
pub mod idp;
pub mod obs;
pub mod validate;

#[cfg(feature = "server")] pub mod api;
#[cfg(feature = "server")] pub mod cli;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tower as _};
