//! Command-line entry point: flags with environment fallbacks, telemetry bootstrap, and the
//! HTTP server loop.

// std
use std::net::{Ipv4Addr, SocketAddr};
// crates.io
use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};
use tokio::net::TcpListener;
use tracing::Level;
use tracing_subscriber::EnvFilter;
// self
use crate::{
	_prelude::*,
	api,
	config::{AuthConfig, DEFAULT_HTTP_TIMEOUT},
	error::ConfigError,
	flows::Authenticator,
};

/// Failures that stop the binary.
#[derive(Debug, ThisError)]
pub enum CliError {
	/// Configuration was rejected.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The authenticator could not be constructed.
	#[error(transparent)]
	Setup(#[from] Error),
	/// The listener could not be bound or the server loop failed.
	#[error("Server I/O failed.")]
	Io(#[from] std::io::Error),
	/// The global subscriber could not be installed.
	#[error("Telemetry could not be initialized: {0}.")]
	Telemetry(String),
}

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
	/// Human-readable multi-line output.
	#[default]
	Pretty,
	/// One JSON object per event.
	Json,
}
impl FromStr for LogFormat {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"pretty" => Ok(Self::Pretty),
			"json" => Ok(Self::Json),
			other => Err(ConfigError::Malformed { field: "log_format", value: other.to_owned() }),
		}
	}
}

/// Everything the server needs to start.
#[derive(Clone, Debug)]
pub struct Settings {
	/// Resolved auth configuration.
	pub config: AuthConfig,
	/// Listening port.
	pub port: u16,
	/// Number of `--verbose` flags.
	pub verbosity: u8,
	/// Log output format.
	pub log_format: LogFormat,
}
impl Settings {
	/// Reads settings out of parsed arguments.
	pub fn from_matches(matches: &ArgMatches) -> Result<Self, ConfigError> {
		let text = |id: &str| matches.get_one::<String>(id).cloned();
		let timeout = matches
			.get_one::<u64>("timeout-secs")
			.map(|secs| std::time::Duration::from_secs(*secs))
			.unwrap_or(DEFAULT_HTTP_TIMEOUT);
		let mut builder = AuthConfig::builder().idp_endpoint(text("idp-endpoint")).http_timeout(timeout);

		if let Some(client_id) = text("client-id") {
			builder = builder.client_id(client_id);
		}
		if let Some(region) = text("region") {
			builder = builder.region(region);
		}
		if let Some(auth_domain) = text("auth-domain") {
			builder = builder.auth_domain(auth_domain);
		}

		let log_format = text("log-format").as_deref().unwrap_or("pretty").parse()?;

		Ok(Self {
			config: builder.build()?,
			port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
			verbosity: matches.get_count("verbose"),
			log_format,
		})
	}
}

/// Builds the clap command.
pub fn command() -> Command {
	Command::new(env!("CARGO_PKG_NAME"))
		.about(env!("CARGO_PKG_DESCRIPTION"))
		.version(env!("CARGO_PKG_VERSION"))
		.color(ColorChoice::Auto)
		.arg(
			Arg::new("client-id")
				.long("client-id")
				.help("User pool app client identifier")
				.env("USER_POOL_CLIENT_ID")
				.required(true),
		)
		.arg(
			Arg::new("region")
				.long("region")
				.help("AWS region hosting the user pool")
				.env("AWS_REGION")
				.required(true),
		)
		.arg(
			Arg::new("auth-domain")
				.long("auth-domain")
				.help("Host name of the hosted login domain, e.g. auth.example.com")
				.env("AUTH_DOMAIN")
				.required(true),
		)
		.arg(
			Arg::new("idp-endpoint")
				.long("idp-endpoint")
				.help("Override for the Cognito endpoint")
				.env("COGNITO_ENDPOINT"),
		)
		.arg(
			Arg::new("port")
				.short('p')
				.long("port")
				.help("Port to listen on")
				.default_value("8080")
				.env("AUTHGATE_PORT")
				.value_parser(clap::value_parser!(u16)),
		)
		.arg(
			Arg::new("timeout-secs")
				.long("timeout-secs")
				.help("Timeout for outbound requests, in seconds")
				.default_value("10")
				.env("AUTHGATE_HTTP_TIMEOUT_SECS")
				.value_parser(clap::value_parser!(u64).range(1..)),
		)
		.arg(
			Arg::new("log-format")
				.long("log-format")
				.help("Log output format")
				.default_value("pretty")
				.env("AUTHGATE_LOG_FORMAT")
				.value_parser(["pretty", "json"]),
		)
		.arg(
			Arg::new("verbose")
				.short('v')
				.long("verbose")
				.help("Increase verbosity, -vv for debug")
				.action(ArgAction::Count),
		)
}

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides the verbosity default.
pub fn init_telemetry(verbosity: u8, format: LogFormat) -> Result<(), CliError> {
	let level = match verbosity {
		0 => Level::WARN,
		1 => Level::INFO,
		2 => Level::DEBUG,
		_ => Level::TRACE,
	};
	let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
	let installed = match format {
		LogFormat::Pretty =>
			tracing_subscriber::fmt().with_env_filter(filter).with_target(false).pretty().try_init(),
		LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().try_init(),
	};

	installed.map_err(|err| CliError::Telemetry(err.to_string()))
}

/// Binds the listener and serves until Ctrl-C.
pub async fn serve(settings: Settings) -> Result<(), CliError> {
	let authenticator = Arc::new(Authenticator::from_config(&settings.config)?);
	let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, settings.port));
	let listener = TcpListener::bind(addr).await?;

	tracing::info!(
		%addr,
		idp = settings.config.idp_endpoint.as_str(),
		client_id = settings.config.client_id.as_str(),
		"Listening."
	);

	axum::serve(listener, api::router(authenticator))
		.with_graceful_shutdown(async {
			let _ = tokio::signal::ctrl_c().await;

			tracing::info!("Shutting down.");
		})
		.await?;

	Ok(())
}

/// Parses process arguments, initializes telemetry, and serves.
pub async fn run() -> Result<(), CliError> {
	let matches = command().get_matches();
	let settings = Settings::from_matches(&matches)?;

	init_telemetry(settings.verbosity, settings.log_format)?;
	serve(settings).await
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn command_reads_flags() {
		let matches = command()
			.try_get_matches_from([
				"authgate",
				"--client-id",
				"client-123",
				"--region",
				"us-east-1",
				"--auth-domain",
				"auth.example.com",
				"--log-format",
				"json",
				"-vv",
			])
			.expect("Flags should parse.");
		let settings = Settings::from_matches(&matches).expect("Settings should build.");

		assert_eq!(settings.config.client_id, "client-123");
		assert_eq!(settings.port, 8080);
		assert_eq!(settings.verbosity, 2);
		assert_eq!(settings.log_format, LogFormat::Json);
		assert_eq!(settings.config.http_timeout, std::time::Duration::from_secs(10));
	}

	#[test]
	fn command_requires_client_id() {
		let err = command()
			.mut_arg("client-id", |arg| arg.env(Option::<&'static str>::None))
			.try_get_matches_from([
				"authgate",
				"--region",
				"us-east-1",
				"--auth-domain",
				"auth.example.com",
			])
			.expect_err("Missing client id must be rejected.");

		assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
	}

	#[test]
	fn log_format_parses_case_insensitively() {
		assert_eq!("JSON".parse::<LogFormat>().expect("Format should parse."), LogFormat::Json);
		assert!("xml".parse::<LogFormat>().is_err());
	}
}
