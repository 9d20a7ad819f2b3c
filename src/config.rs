//! Client configuration: base URL validation, endpoint joining, and the request timeout.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Default development API root used when no override is provided.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
/// Environment variable consulted by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "MEDTAG_API_URL";
/// Per-request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Validated client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	base: Url,
	timeout: Duration,
}
impl ClientConfig {
	/// Validates and normalizes the given base URL.
	///
	/// The URL must be absolute with an `http` or `https` scheme; trailing slashes are stripped
	/// so endpoint paths join by plain concatenation.
	pub fn new(base_url: &str) -> Result<Self, ConfigError> {
		let base = Url::parse(base_url.trim_end_matches('/'))
			.map_err(|e| ConfigError::InvalidBaseUrl { source: e })?;

		match base.scheme() {
			"http" | "https" => (),
			scheme => return Err(ConfigError::UnsupportedScheme { scheme: scheme.into() }),
		}

		Ok(Self { base, timeout: DEFAULT_TIMEOUT })
	}

	/// Reads the base URL from [`BASE_URL_ENV`], falling back to [`DEFAULT_BASE_URL`].
	pub fn from_env() -> Result<Self, ConfigError> {
		match env::var(BASE_URL_ENV) {
			Ok(base_url) => Self::new(&base_url),
			Err(_) => Self::new(DEFAULT_BASE_URL),
		}
	}

	/// Overrides the per-request timeout; defaults to [`DEFAULT_TIMEOUT`].
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Returns the configured base URL.
	pub fn base_url(&self) -> &Url {
		&self.base
	}

	/// Returns the per-request timeout.
	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Joins an endpoint path onto the base by concatenation, preserving the path byte-for-byte.
	pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let joined = format!("{}{path}", self.base.as_str().trim_end_matches('/'));

		Url::parse(&joined).map_err(|e| ConfigError::InvalidPath { path: path.into(), source: e })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn base_url_normalizes_trailing_slash() {
		let config = ClientConfig::new("http://localhost:8000/api/").expect("URL must parse.");
		let endpoint = config.endpoint("/auth/me/").expect("Path must join.");

		assert_eq!(endpoint.as_str(), "http://localhost:8000/api/auth/me/");
	}

	#[test]
	fn default_base_url_is_accepted() {
		let config = ClientConfig::new(DEFAULT_BASE_URL).expect("Default URL must parse.");

		assert_eq!(config.base_url().as_str(), "http://localhost:8000/api");
		assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
	}

	#[test]
	fn timeout_override_replaces_the_default() {
		let config = ClientConfig::new(DEFAULT_BASE_URL)
			.expect("Default URL must parse.")
			.with_timeout(Duration::from_secs(3));

		assert_eq!(config.timeout(), Duration::from_secs(3));
	}

	#[test]
	fn non_http_scheme_is_rejected() {
		let error =
			ClientConfig::new("ftp://localhost/api").expect_err("Scheme must be rejected.");

		assert!(matches!(error, ConfigError::UnsupportedScheme { .. }));
	}

	#[test]
	fn garbage_base_url_is_rejected() {
		let error = ClientConfig::new("not a url").expect_err("Garbage must be rejected.");

		assert!(matches!(error, ConfigError::InvalidBaseUrl { .. }));
	}
}
