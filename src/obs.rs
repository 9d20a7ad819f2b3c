//! Optional observability helpers for client calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `medtag_client.call` with the `site`,
//!   `method`, and `path` fields.
//! - Enable `metrics` to increment the `medtag_client_call_total` counter for every
//!   attempt/success/failure, labeled by `site` + `outcome`.
//!
//! Token material never appears in spans or metric labels.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Call sites observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallSite {
	/// A caller-issued request moving through the dispatch pipeline.
	Request,
	/// The 401 recovery machine exchanging the refresh token.
	Refresh,
}
impl CallSite {
	/// Returns the label used in span and metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallSite::Request => "request",
			CallSite::Refresh => "refresh",
		}
	}
}
impl Display for CallSite {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Result labels attached to every observed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to the call site.
	Attempt,
	/// Completed without error.
	Success,
	/// Failed and surfaced an error to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns the outcome label used in span and metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
