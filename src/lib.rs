//! Async client SDK for the MedTag emergency medical ID service - bearer sessions, transparent
//! 401 refresh recovery, and pluggable credential stores in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod hooks;
pub mod http;
pub mod obs;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and test doubles for integration tests; enabled via `cfg(test)` or
	//! the `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::ApiClient,
		config::ClientConfig,
		hooks::{SessionEndReason, SessionHooks},
		http::{ApiResponse, HttpTransport, Method, RequestDescriptor, TransportFuture},
		store::{CredentialStore, MemoryStore},
	};

	enum BearerRule {
		Any,
		Exact(String),
	}
	impl BearerRule {
		fn matches(&self, request: &RequestDescriptor) -> bool {
			match self {
				Self::Any => true,
				Self::Exact(token) => request
					.header_value("authorization")
					.is_some_and(|value| value == format!("Bearer {token}")),
			}
		}
	}

	struct ResponseRule {
		method: Method,
		path: String,
		bearer: BearerRule,
		status: u16,
		body: String,
	}

	/// In-process transport double that answers from a rule table and records every descriptor it
	/// executes; unmatched requests receive a 404.
	#[derive(Default)]
	pub struct RecordingTransport {
		rules: Mutex<Vec<ResponseRule>>,
		seen: Mutex<Vec<RequestDescriptor>>,
	}
	impl RecordingTransport {
		/// Registers a rule answering `status`/`body` for the given method and path, regardless of
		/// the bearer carried.
		pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
			self.rules.lock().push(ResponseRule {
				method,
				path: path.into(),
				bearer: BearerRule::Any,
				status,
				body: body.into(),
			});
		}

		/// Registers a rule that additionally requires the exact bearer token.
		pub fn respond_for_bearer(
			&self,
			method: Method,
			path: &str,
			bearer: &str,
			status: u16,
			body: &str,
		) {
			self.rules.lock().push(ResponseRule {
				method,
				path: path.into(),
				bearer: BearerRule::Exact(bearer.into()),
				status,
				body: body.into(),
			});
		}

		/// Returns every descriptor executed so far, in arrival order.
		pub fn requests(&self) -> Vec<RequestDescriptor> {
			self.seen.lock().clone()
		}

		/// Returns how many executed requests targeted the given path.
		pub fn hits(&self, path: &str) -> usize {
			self.seen.lock().iter().filter(|request| request.url.path() == path).count()
		}
	}
	impl HttpTransport for RecordingTransport {
		fn execute(&self, request: RequestDescriptor) -> TransportFuture<'_> {
			let answer = self
				.rules
				.lock()
				.iter()
				.find(|rule| {
					rule.method == request.method
						&& rule.path == request.url.path()
						&& rule.bearer.matches(&request)
				})
				.map(|rule| ApiResponse::new(rule.status, rule.body.clone().into_bytes()))
				.unwrap_or_else(|| ApiResponse::new(404, b"no rule matched".to_vec()));

			self.seen.lock().push(request);

			Box::pin(async move { Ok(answer) })
		}
	}

	/// Session-hook double capturing every reason the client reports.
	#[derive(Default)]
	pub struct RecordingHooks {
		events: Mutex<Vec<SessionEndReason>>,
	}
	impl RecordingHooks {
		/// Returns the captured session-end reasons in arrival order.
		pub fn events(&self) -> Vec<SessionEndReason> {
			self.events.lock().clone()
		}
	}
	impl SessionHooks for RecordingHooks {
		fn on_session_end(&self, reason: SessionEndReason) {
			self.events.lock().push(reason);
		}
	}

	/// Builds a client wired to a recording transport, a fresh in-memory store, and recording
	/// hooks, handing back every collaborator for assertions.
	pub fn build_recording_client(
		base_url: &str,
	) -> (ApiClient, Arc<RecordingTransport>, Arc<MemoryStore>, Arc<RecordingHooks>) {
		let config = ClientConfig::new(base_url).expect("Test base URL must parse.");
		let transport = Arc::new(RecordingTransport::default());
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn CredentialStore> = store_backend.clone();
		let hooks_backend = Arc::new(RecordingHooks::default());
		let hooks: Arc<dyn SessionHooks> = hooks_backend.clone();
		let client = ApiClient::with_transport(config, transport.clone())
			.with_store(store)
			.with_hooks(hooks);

		(client, transport, store_backend, hooks_backend)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
