// self
use crate::{_prelude::*, obs::Operation};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used by the auth operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("authgate.operation", operation = operation.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs the native refresh failure that is about to be replaced by the gateway fallback.
pub fn warn_native_refresh_failed(err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			error.kind = err.kind(),
			error = %err,
			"Native refresh failed; falling back to the hosted gateway."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = err;
	}
}

/// Logs an operation failure at `debug`; every failure is a client error.
pub fn debug_operation_failed(operation: Operation, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			operation = operation.as_str(),
			error.kind = err.kind(),
			error = %err,
			"Operation failed."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (operation, err);
	}
}
