//! Transport primitives for issuing JSON requests.
//!
//! The module exposes [`HttpTransport`] as the client's only dependency on an HTTP stack.
//! Descriptors and responses are crate-owned plain data, so alternative transports and test
//! doubles integrate without touching reqwest types.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// HTTP verbs used by the service.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
	/// GET request.
	Get,
	/// POST request.
	Post,
	/// PUT request.
	Put,
	/// DELETE request.
	Delete,
}
impl Method {
	/// Returns the canonical upper-case verb.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Plain-data description of one outgoing request.
///
/// Kept free of HTTP-client types so transports and test doubles stay decoupled from any
/// particular stack.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
	/// Verb to issue.
	pub method: Method,
	/// Fully joined request URL.
	pub url: Url,
	/// Header name/value pairs; names are lowercase.
	pub headers: Vec<(String, String)>,
	/// JSON body bytes, when present.
	pub body: Option<Vec<u8>>,
	/// Timeout applied to this request.
	pub timeout: Duration,
	/// Set when the recovery machine reissues the request after a refresh; transitions from
	/// unset to set exactly once.
	pub retried: bool,
}
impl RequestDescriptor {
	/// Creates a descriptor with no headers or body.
	pub fn new(method: Method, url: Url, timeout: Duration) -> Self {
		Self { method, url, headers: Vec::new(), body: None, timeout, retried: false }
	}

	/// Appends a header pair; names must be lowercase.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Attaches JSON body bytes.
	pub fn with_body(mut self, body: Vec<u8>) -> Self {
		self.body = Some(body);

		self
	}

	/// Marks the descriptor as the single post-refresh reissue.
	pub fn with_retried(mut self) -> Self {
		self.retried = true;

		self
	}

	/// Returns the value of the first header with the given lowercase name.
	pub fn header_value(&self, name: &str) -> Option<&str> {
		self.headers.iter().find(|(key, _)| key.as_str() == name).map(|(_, value)| value.as_str())
	}
}

/// Response returned by transports and by every client operation.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	status: u16,
	body: Vec<u8>,
}
impl ApiResponse {
	/// Builds a response from a status code and raw body bytes.
	pub fn new(status: u16, body: Vec<u8>) -> Self {
		Self { status, body }
	}

	/// Returns the HTTP status code.
	pub fn status(&self) -> u16 {
		self.status
	}

	/// Returns the raw body bytes.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Returns whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Decodes the body as JSON into `T`, reporting the offending path on failure.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|e| Error::Decode { source: e, status: self.status })
	}

	/// Decodes the body as an opaque JSON value.
	pub fn value(&self) -> Result<Value> {
		self.json()
	}

	/// Converts a non-success response into the status error carrying the raw body.
	pub(crate) fn into_status_error(self) -> Error {
		Error::Http { status: self.status, body: String::from_utf8_lossy(&self.body).into_owned() }
	}
}

/// Abstraction over HTTP transports capable of executing [`RequestDescriptor`]s.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can back every clone of a client, and the futures
/// they return must be `Send` so callers can box them freely. Transports never interpret
/// status codes; classification stays in the client.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes one request, resolving to the raw response or a transport failure.
	fn execute(&self, request: RequestDescriptor) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The per-request timeout comes from the descriptor, so the default client needs no builder
/// configuration. Supply a custom client to tune TLS, proxies, or connection pooling.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: RequestDescriptor) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Put => reqwest::Method::PUT,
				Method::Delete => reqwest::Method::DELETE,
			};
			let mut builder = client.request(method, request.url).timeout(request.timeout);

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse::new(status, body))
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn header_lookup_finds_first_match() {
		let url = Url::parse("http://localhost:8000/api/auth/me/").expect("URL must parse.");
		let request = RequestDescriptor::new(Method::Get, url, Duration::from_secs(10))
			.with_header("content-type", "application/json")
			.with_header("authorization", "Bearer token-1");

		assert_eq!(request.header_value("authorization"), Some("Bearer token-1"));
		assert_eq!(request.header_value("accept"), None);
	}

	#[test]
	fn decode_failure_carries_the_status() {
		#[derive(Debug, Deserialize)]
		struct Grant {
			#[allow(dead_code)]
			access: String,
		}

		let response = ApiResponse::new(200, b"{\"token\":\"x\"}".to_vec());
		let error = response.json::<Grant>().expect_err("Decode must fail.");

		assert_eq!(error.status(), Some(200));
	}

	#[test]
	fn non_success_response_becomes_a_status_error() {
		let response = ApiResponse::new(503, b"unavailable".to_vec());

		match response.into_status_error() {
			Error::Http { status, body } => {
				assert_eq!(status, 503);
				assert_eq!(body, "unavailable");
			},
			error => panic!("Unexpected error variant: {error:?}."),
		}
	}
}
