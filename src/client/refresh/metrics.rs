// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for the 401 recovery machine.
///
/// `successes` counts every recovery that obtained a usable access token; `reuses` is the
/// subset that adopted a rotation performed by a concurrent task instead of exchanging.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	reuse: AtomicU64,
	failure: AtomicU64,
}
impl RefreshMetrics {
	/// Returns how many recoveries were entered.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns how many recoveries obtained a usable access token.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns how many recoveries reused a rotation instead of exchanging themselves.
	pub fn reuses(&self) -> u64 {
		self.reuse.load(Ordering::Relaxed)
	}

	/// Returns how many recoveries were abandoned.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_reuse(&self) {
		self.reuse.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}
}
