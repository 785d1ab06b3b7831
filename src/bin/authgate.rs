//! authgate server binary.

// std
use std::{error::Error as _, process::ExitCode};

#[tokio::main]
async fn main() -> ExitCode {
	match authgate::cli::run().await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("Error: {err}");

			let mut source = err.source();

			while let Some(cause) = source {
				eprintln!("Caused by: {cause}");

				source = cause.source();
			}

			ExitCode::FAILURE
		},
	}
}
