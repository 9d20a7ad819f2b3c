//! Storage contracts and built-in credential store implementations.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::SessionTokens};

/// Future type returned by [`CredentialStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for the session credentials pair.
///
/// The client takes an implementation behind `Arc<dyn CredentialStore>`; swapping it is how
/// applications choose between per-test isolation, in-process sessions, and on-disk persistence.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Returns the persisted pair, if any.
	fn load(&self) -> StoreFuture<'_, Option<SessionTokens>>;

	/// Persists the pair, fully replacing any previous one.
	fn save(&self, tokens: SessionTokens) -> StoreFuture<'_, ()>;

	/// Removes the persisted pair; succeeds when nothing is stored.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failure surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure of the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
