//! Account and session endpoints.

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	auth::SessionTokens,
	client::ApiClient,
	error::AuthError,
	http::{ApiResponse, Method},
};

#[derive(Deserialize)]
struct SessionGrant {
	access: String,
	refresh: Option<String>,
}

impl ApiClient {
	/// Registers a new account.
	///
	/// The payload shape is owned by the server; registration does not log the account in, so
	/// nothing is stored.
	pub async fn register(&self, profile: &Value) -> Result<ApiResponse> {
		self.request(Method::Post, "/auth/register/", Some(profile)).await
	}

	/// Logs in with an email/password pair and stores the issued tokens.
	///
	/// The full response is returned so callers can read the user fields delivered alongside
	/// the token pair.
	pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse> {
		let body = json!({ "email": email, "password": password });
		let response = self.request(Method::Post, "/auth/login/", Some(&body)).await?;
		let grant = response.json::<SessionGrant>()?;
		let tokens = match grant.refresh {
			Some(refresh) => SessionTokens::new(grant.access, refresh),
			None => SessionTokens::bearer_only(grant.access),
		};

		self.store.save(tokens).await?;

		Ok(response)
	}

	/// Revokes the stored refresh token server-side and forgets the session locally.
	///
	/// Local credentials are cleared even when the revocation call fails; the server failure
	/// is still reported. Without a stored refresh token the logout is local only.
	pub async fn logout(&self) -> Result<()> {
		let refresh = self.store.load().await?.and_then(|tokens| tokens.refresh);
		let outcome = match refresh {
			Some(refresh) => {
				let body = json!({ "refresh_token": refresh.expose() });

				self.request(Method::Post, "/auth/logout/", Some(&body)).await.map(|_| ())
			},
			None => Ok(()),
		};

		self.store.clear().await?;

		outcome
	}

	/// Fetches the account behind the stored session.
	pub async fn current_user(&self) -> Result<ApiResponse> {
		self.request(Method::Get, "/auth/me/", None).await
	}

	/// Exchanges the stored refresh token for a rotated pair and stores it.
	///
	/// Unlike the transparent 401 recovery, a missing refresh token fails the call without
	/// tearing the session down; peers that only hold an access token keep it.
	pub async fn refresh_session(&self) -> Result<SessionTokens> {
		let refresh = match self.store.load().await? {
			Some(SessionTokens { refresh: Some(refresh), .. }) => refresh,
			_ => return Err(AuthError::MissingRefreshToken.into()),
		};
		let rotated = self.exchange_refresh(&refresh).await?;

		self.store.save(rotated.clone()).await?;

		Ok(rotated)
	}

	/// Changes the account password; the payload shape is owned by the server.
	pub async fn change_password(&self, payload: &Value) -> Result<ApiResponse> {
		self.request(Method::Post, "/auth/change-password/", Some(payload)).await
	}
}
