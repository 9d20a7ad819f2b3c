// self
use crate::obs::{CallOutcome, CallSite};

/// Feeds one call outcome to the global metrics recorder when the feature is enabled.
pub fn record_call_outcome(site: CallSite, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"medtag_client_call_total",
			"site" => site.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (site, outcome);
	}
}
