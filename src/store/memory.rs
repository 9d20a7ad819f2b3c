//! Thread-safe in-memory [`CredentialStore`] for sessions that live and die with the process.

// self
use crate::{
	_prelude::*,
	auth::SessionTokens,
	store::{CredentialStore, StoreFuture},
};

type StoreSlot = Arc<RwLock<Option<SessionTokens>>>;

/// In-process credential store; the default for fresh clients and the workhorse for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreSlot);
impl MemoryStore {
	/// Returns the stored pair without going through the async contract.
	pub fn load_now(&self) -> Option<SessionTokens> {
		self.0.read().clone()
	}

	/// Stores the pair without going through the async contract.
	pub fn save_now(&self, tokens: SessionTokens) {
		*self.0.write() = Some(tokens);
	}

	/// Clears the stored pair without going through the async contract.
	pub fn clear_now(&self) {
		*self.0.write() = None;
	}
}
impl CredentialStore for MemoryStore {
	fn load(&self) -> StoreFuture<'_, Option<SessionTokens>> {
		let slot = self.0.clone();

		Box::pin(async move { Ok(slot.read().clone()) })
	}

	fn save(&self, tokens: SessionTokens) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			*slot.write() = Some(tokens);

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let slot = self.0.clone();

		Box::pin(async move {
			*slot.write() = None;

			Ok(())
		})
	}
}
