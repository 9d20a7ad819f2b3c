//! Demonstrates the transparent 401 recovery: log in against a mock service, let the access
//! token go stale, and watch one refresh exchange rescue the rejected call.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use medtag_client::{client::ApiClient, config::ClientConfig, store::MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/login/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access\":\"stale\",\"refresh\":\"refresh-1\",\"user\":{\"id\":1}}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/me/").header("authorization", "Bearer stale");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"detail\":\"token expired\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token/refresh/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access\":\"fresh\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/auth/me/").header("authorization", "Bearer fresh");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":1,\"email\":\"ada@example.org\"}");
		})
		.await;

	let config = ClientConfig::new(&server.base_url())?;
	let client = ApiClient::new(config).with_store(Arc::new(MemoryStore::default()));

	client.login("ada@example.org", "hunter2").await?;

	// The mock issues a token the service immediately rejects, so this call exercises the
	// whole recovery path: 401, refresh exchange, retried request.
	let me = client.current_user().await?.value()?;

	println!("Recovered session for {}.", me["email"]);
	println!(
		"Refresh recoveries: {} attempted, {} succeeded.",
		client.refresh_metrics.attempts(),
		client.refresh_metrics.successes(),
	);

	Ok(())
}
