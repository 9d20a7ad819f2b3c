//! Session recovery for rejected bearer tokens.
//!
//! A first-attempt 401 routes through `ApiClient::recover_unauthorized`: the task takes the
//! client-wide refresh guard, re-reads the store to pick up rotations that finished while it
//! waited, and otherwise performs one unauthenticated exchange at the token-refresh endpoint
//! before reissuing the original request with the new access token. Unrecoverable sessions are
//! cleared exactly once, with the session hooks told why.

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::{SessionTokens, TokenSecret},
	client::ApiClient,
	error::{AuthError, ConfigError},
	hooks::SessionEndReason,
	http::{ApiResponse, Method, RequestDescriptor},
	obs::{self, CallOutcome, CallSite, CallSpan},
};

const REFRESH_PATH: &str = "/auth/token/refresh/";

#[derive(Serialize)]
struct RefreshRequest<'a> {
	refresh: &'a str,
}

#[derive(Deserialize)]
struct RefreshGrant {
	access: String,
	refresh: Option<String>,
}

impl ApiClient {
	/// Runs the single-flight recovery machine for a first-attempt 401.
	///
	/// Exactly one task refreshes at a time. A waiter that finds the pair already rotated
	/// reissues with the stored token instead of exchanging again, and a waiter that finds the
	/// session gone fails quietly so teardown side effects fire once.
	pub(crate) async fn recover_unauthorized(
		&self,
		request: RequestDescriptor,
	) -> Result<ApiResponse> {
		const SITE: CallSite = CallSite::Refresh;

		let span = CallSpan::new(SITE, request.method.as_str(), request.url.path());

		obs::record_call_outcome(SITE, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.refresh_metrics.record_attempt();

				let _singleflight = self.refresh_guard.lock().await;
				let sent_bearer = request.header_value("authorization").map(str::to_owned);
				let current = self.store.load().await.map_err(|e| {
					self.refresh_metrics.record_failure();

					Error::from(e)
				})?;
				let tokens = match current {
					Some(tokens) => tokens,
					None if sent_bearer.is_some() => {
						// Another waiter already tore the session down; stay quiet so the
						// login signal fires once.
						self.refresh_metrics.record_failure();

						return Err(AuthError::MissingRefreshToken.into());
					},
					None =>
						return Err(self
							.abandon_session(
								SessionEndReason::MissingRefreshToken,
								AuthError::MissingRefreshToken.into(),
							)
							.await),
				};
				let stored_bearer = format!("Bearer {}", tokens.access.expose());

				if sent_bearer.as_deref() != Some(stored_bearer.as_str()) {
					// A rotation finished while this task waited; reuse it.
					self.refresh_metrics.record_success();
					self.refresh_metrics.record_reuse();

					return self.reissue(request, &tokens.access).await;
				}

				let refresh = match &tokens.refresh {
					Some(refresh) => refresh.clone(),
					None =>
						return Err(self
							.abandon_session(
								SessionEndReason::MissingRefreshToken,
								AuthError::MissingRefreshToken.into(),
							)
							.await),
				};
				let rotated = match self.exchange_refresh(&refresh).await {
					Ok(rotated) => rotated,
					Err(e) =>
						return Err(self
							.abandon_session(SessionEndReason::RefreshFailed, e)
							.await),
				};

				self.store.save(rotated.clone()).await.map_err(|e| {
					self.refresh_metrics.record_failure();

					Error::from(e)
				})?;
				self.refresh_metrics.record_success();
				self.reissue(request, &rotated.access).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(SITE, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(SITE, CallOutcome::Failure),
		}

		result
	}

	/// Exchanges the refresh token for a rotated pair at the token-refresh endpoint.
	///
	/// The exchange never carries a bearer header. Servers that do not rotate refresh tokens
	/// omit the refresh half in the response; the old token is kept in that case.
	pub(crate) async fn exchange_refresh(&self, refresh: &TokenSecret) -> Result<SessionTokens> {
		let url = self.config.endpoint(REFRESH_PATH)?;
		let body = serde_json::to_vec(&RefreshRequest { refresh: refresh.expose() })
			.map_err(|e| ConfigError::SerializeBody { source: e })?;
		let request = RequestDescriptor::new(Method::Post, url, self.config.timeout())
			.with_header("content-type", "application/json")
			.with_body(body);
		let response = self.transport.execute(request).await?;

		if !response.is_success() {
			return Err(response.into_status_error());
		}

		let grant = response.json::<RefreshGrant>()?;
		let rotated = match grant.refresh {
			Some(next) => SessionTokens::new(grant.access, next),
			None => SessionTokens::new(grant.access, refresh.clone()),
		};

		Ok(rotated)
	}

	async fn reissue(
		&self,
		request: RequestDescriptor,
		access: &TokenSecret,
	) -> Result<ApiResponse> {
		let mut request = request.with_retried();

		request.headers.retain(|(name, _)| name.as_str() != "authorization");

		let request = request.with_header("authorization", format!("Bearer {}", access.expose()));
		let response = self.transport.execute(request).await?;

		if response.is_success() {
			Ok(response)
		} else {
			// The retried flag is set, so a second 401 surfaces as a plain status error.
			Err(response.into_status_error())
		}
	}

	async fn abandon_session(&self, reason: SessionEndReason, error: Error) -> Error {
		// Best-effort teardown; the triggering failure is what surfaces to the caller.
		let _ = self.store.clear().await;

		self.hooks.on_session_end(reason);
		self.refresh_metrics.record_failure();

		error
	}
}
