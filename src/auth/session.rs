//! The stored credentials pair.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access/refresh token pair persisted by a credential store.
///
/// The pair is written on login and refresh success, cleared on logout or a failed refresh, and
/// read on every outgoing authenticated request. The refresh half is optional; a session without
/// it can authenticate until the access token expires but cannot recover from a 401.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SessionTokens {
	/// Bearer token attached to authenticated requests.
	pub access: TokenSecret,
	/// Long-lived token exchanged for a new access token.
	pub refresh: Option<TokenSecret>,
}
impl SessionTokens {
	/// Builds a full pair.
	pub fn new(access: impl Into<TokenSecret>, refresh: impl Into<TokenSecret>) -> Self {
		Self { access: access.into(), refresh: Some(refresh.into()) }
	}

	/// Builds a pair carrying only the access half.
	pub fn bearer_only(access: impl Into<TokenSecret>) -> Self {
		Self { access: access.into(), refresh: None }
	}

	/// Returns whether the pair can recover from a 401.
	pub fn has_refresh(&self) -> bool {
		self.refresh.is_some()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn pair_round_trips_through_json() {
		let tokens = SessionTokens::new("access-1", "refresh-1");
		let encoded = serde_json::to_string(&tokens).expect("Pair must serialize.");
		let decoded =
			serde_json::from_str::<SessionTokens>(&encoded).expect("Pair must deserialize.");

		assert_eq!(decoded, tokens);
		assert!(encoded.contains("access-1"), "Persisted form must carry the raw secret.");
	}

	#[test]
	fn bearer_only_pair_cannot_refresh() {
		assert!(!SessionTokens::bearer_only("access-1").has_refresh());
	}
}
