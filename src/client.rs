//! The request pipeline: endpoint joining, bearer injection, and 401 recovery.

pub mod refresh;

pub use refresh::*;

// self
use crate::{
	_prelude::*,
	auth::SessionTokens,
	config::ClientConfig,
	error::ConfigError,
	hooks::{NoopSessionHooks, SessionHooks},
	http::{ApiResponse, HttpTransport, Method, RequestDescriptor},
	obs::{self, CallOutcome, CallSite, CallSpan},
	store::{CredentialStore, MemoryStore},
};
#[cfg(feature = "reqwest")]
use crate::http::ReqwestTransport;

/// Issues JSON requests against one configured service root.
///
/// The client owns the transport, credential store, and session hooks behind `Arc` seams so
/// clones are cheap and every clone shares one session. Endpoint bindings focus on paths and
/// payload shapes; header injection, status classification, and the single-flight 401 recovery
/// live here.
#[derive(Clone)]
pub struct ApiClient {
	/// Validated base URL and per-request timeout.
	pub config: ClientConfig,
	/// Transport executing every outbound request.
	pub transport: Arc<dyn HttpTransport>,
	/// Credential store consulted before each authenticated call and rewritten on recovery.
	pub store: Arc<dyn CredentialStore>,
	/// Observer notified when recovery abandons the session.
	pub hooks: Arc<dyn SessionHooks>,
	/// Shared metrics recorder for refresh recovery outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl ApiClient {
	/// Creates a client that reuses the caller-provided transport.
	///
	/// Credentials start in a fresh [`MemoryStore`] and teardown is silent until
	/// [`ApiClient::with_store`] and [`ApiClient::with_hooks`] replace the defaults.
	pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
		Self {
			config,
			transport,
			store: Arc::new(MemoryStore::default()),
			hooks: Arc::new(NoopSessionHooks),
			refresh_metrics: Default::default(),
			refresh_guard: Arc::new(AsyncMutex::new(())),
		}
	}

	/// Replaces the credential store shared by every clone made from here on.
	pub fn with_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
		self.store = store;

		self
	}

	/// Replaces the session hooks invoked when recovery abandons the session.
	pub fn with_hooks(mut self, hooks: Arc<dyn SessionHooks>) -> Self {
		self.hooks = hooks;

		self
	}

	/// Returns the stored credentials pair, if any.
	pub async fn session(&self) -> Result<Option<SessionTokens>> {
		Ok(self.store.load().await?)
	}

	/// Issues an authenticated JSON request.
	///
	/// The stored access token rides along as a bearer header when one exists. A 401 on a
	/// first attempt triggers the recovery machine; every other non-2xx status maps to
	/// [`Error::Http`] with the body passed through untouched.
	pub async fn request(
		&self,
		method: Method,
		path: &str,
		body: Option<&Value>,
	) -> Result<ApiResponse> {
		self.dispatch(method, path, body, AuthMode::Bearer).await
	}

	/// Issues a request that never consults the credential store.
	///
	/// Used by endpoints meant for unauthenticated callers; stored tokens must not leak onto
	/// these requests, and a 401 passes through without triggering recovery.
	pub async fn request_public(
		&self,
		method: Method,
		path: &str,
		body: Option<&Value>,
	) -> Result<ApiResponse> {
		self.dispatch(method, path, body, AuthMode::Public).await
	}

	async fn dispatch(
		&self,
		method: Method,
		path: &str,
		body: Option<&Value>,
		auth: AuthMode,
	) -> Result<ApiResponse> {
		const SITE: CallSite = CallSite::Request;

		let span = CallSpan::new(SITE, method.as_str(), path);

		obs::record_call_outcome(SITE, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.config.endpoint(path)?;
				let body = body
					.map(serde_json::to_vec)
					.transpose()
					.map_err(|e| ConfigError::SerializeBody { source: e })?;
				let request = self.descriptor(method, url, body, auth).await?;
				let response = self.transport.execute(request.clone()).await?;

				if response.is_success() {
					return Ok(response);
				}
				if response.status() == 401 && auth == AuthMode::Bearer && !request.retried {
					return self.recover_unauthorized(request).await;
				}

				Err(response.into_status_error())
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(SITE, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(SITE, CallOutcome::Failure),
		}

		result
	}

	async fn descriptor(
		&self,
		method: Method,
		url: Url,
		body: Option<Vec<u8>>,
		auth: AuthMode,
	) -> Result<RequestDescriptor> {
		let tokens = match auth {
			AuthMode::Bearer => self.store.load().await?,
			AuthMode::Public => None,
		};
		let mut request = RequestDescriptor::new(method, url, self.config.timeout())
			.with_header("content-type", "application/json");

		if let Some(tokens) = tokens {
			request = request
				.with_header("authorization", format!("Bearer {}", tokens.access.expose()));
		}
		if let Some(body) = body {
			request = request.with_body(body);
		}

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient {
	/// Creates a client backed by the crate's default reqwest transport.
	///
	/// The client provisions its own transport so callers do not need to pass HTTP handles
	/// explicitly. Use [`ApiClient::with_store`] to persist the session beyond the process and
	/// [`ApiClient::with_hooks`] to observe teardown.
	pub fn new(config: ClientConfig) -> Self {
		Self::with_transport(config, Arc::new(ReqwestTransport::default()))
	}
}
impl Debug for ApiClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient").field("config", &self.config).finish()
	}
}

/// Whether a call carries the stored bearer token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AuthMode {
	/// Attach `Authorization: Bearer <access>` when a pair is stored.
	Bearer,
	/// Skip the store entirely; the request carries no credentials.
	Public,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	const BASE: &str = "http://localhost:8000/api";

	#[tokio::test]
	async fn request_without_a_session_omits_the_bearer_header() {
		let (client, transport, _, _) = build_recording_client(BASE);

		transport.respond(Method::Get, "/api/nfc/tags/", 200, "[]");

		let response = client
			.request(Method::Get, "/nfc/tags/", None)
			.await
			.expect("The call must succeed.");

		assert_eq!(response.status(), 200);

		let sent = transport
			.requests()
			.pop()
			.expect("The request must be recorded.");

		assert_eq!(sent.header_value("authorization"), None);
		assert_eq!(sent.header_value("content-type"), Some("application/json"));
	}

	#[tokio::test]
	async fn non_unauthorized_failures_pass_through_without_recovery() {
		let (client, transport, store, hooks) = build_recording_client(BASE);

		store.save_now(SessionTokens::new("jwt-access", "jwt-refresh"));
		transport.respond(Method::Get, "/api/nfc/tags/", 503, "{\"detail\":\"maintenance\"}");

		let error = client
			.request(Method::Get, "/nfc/tags/", None)
			.await
			.expect_err("The failure must surface.");

		match error {
			Error::Http { status, body } => {
				assert_eq!(status, 503);
				assert!(body.contains("maintenance"));
			},
			error => panic!("Unexpected error variant: {error:?}."),
		}

		assert_eq!(transport.hits("/api/auth/token/refresh/"), 0);
		assert!(store.load_now().is_some(), "A plain server failure must not touch the session.");
		assert!(hooks.events().is_empty());
	}

	#[tokio::test]
	async fn session_reads_through_to_the_store() {
		let (client, _, store, _) = build_recording_client(BASE);

		assert_eq!(client.session().await.expect("An empty store must read back."), None);

		store.save_now(SessionTokens::new("jwt-access", "jwt-refresh"));

		let session = client
			.session()
			.await
			.expect("The stored pair must read back.")
			.expect("The stored pair must be present.");

		assert_eq!(session.access.expose(), "jwt-access");
	}
}
