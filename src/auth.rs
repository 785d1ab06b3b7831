//! Auth-domain value types: validated emails, redirect targets, redacted secrets, scope sets, and token bundles.

pub mod email;
pub mod redirect;
pub mod scope;
pub mod secret;
pub mod token;

pub use email::*;
pub use redirect::*;
pub use scope::*;
pub use secret::*;
pub use token::*;
