//! Client-level error types shared across the transport, stores, and endpoint bindings.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential-storage failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout); no response was received.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Session recovery failure that requires a fresh login.
	#[error(transparent)]
	Auth(#[from] AuthError),

	/// Server responded with a non-success status; the body is passed through untouched.
	#[error("Server responded with HTTP {status}.")]
	Http {
		/// HTTP status code of the response.
		status: u16,
		/// Raw response body, decoded lossily.
		body: String,
	},
	/// Server responded successfully but the payload could not be decoded.
	#[error("Response payload is not the expected JSON shape.")]
	Decode {
		/// Structured parsing failure locating the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}
impl Error {
	/// Returns the HTTP status carried by the error, when the server produced a response.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Http { status, .. } | Self::Decode { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Session-recovery failures; the stored credentials cannot produce an authorized request.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Recovery was attempted with no stored refresh token.
	#[error("No refresh token is stored; a fresh login is required.")]
	MissingRefreshToken,
}

/// Configuration and request-construction failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL scheme is neither `http` nor `https`.
	#[error("Base URL scheme `{scheme}` is not supported.")]
	UnsupportedScheme {
		/// Scheme found on the configured URL.
		scheme: String,
	},
	/// Endpoint path does not combine with the base URL into a valid URL.
	#[error("Endpoint path `{path}` does not form a valid URL.")]
	InvalidPath {
		/// Path passed to the client.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized to JSON.")]
	SerializeBody {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::error::Error,
	},
}

/// Transport-level failures raised before any response arrives.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while reaching the service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
