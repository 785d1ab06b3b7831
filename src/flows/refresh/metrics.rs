// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing which refresh path ran.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	native_attempts: AtomicU64,
	fallback_attempts: AtomicU64,
	exhausted: AtomicU64,
}
impl RefreshMetrics {
	/// Returns the number of native provider refresh attempts.
	pub fn native_attempts(&self) -> u64 {
		self.native_attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of hosted gateway fallback attempts.
	pub fn fallback_attempts(&self) -> u64 {
		self.fallback_attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of refreshes where both paths failed.
	pub fn exhausted(&self) -> u64 {
		self.exhausted.load(Ordering::Relaxed)
	}

	pub(crate) fn record_native_attempt(&self) {
		self.native_attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_fallback_attempt(&self) {
		self.fallback_attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_exhausted(&self) {
		self.exhausted.fetch_add(1, Ordering::Relaxed);
	}
}
