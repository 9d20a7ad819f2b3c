//! Demonstrates the unauthenticated emergency surface: read a tag's public payload and file an
//! emergency access request without any stored session.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use medtag_client::{
	api::TagUid,
	client::ApiClient,
	config::ClientConfig,
	serde_json::Map,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/nfc/public/04:A3:22:B1/");
			then.status(200).header("content-type", "application/json").body(
				"{\"blood_type\":\"O+\",\"allergies\":[\"penicillin\"],\"emergency_contact\":\"+1-555-0114\"}",
			);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/nfc/emergency-access/request/");
			then.status(202)
				.header("content-type", "application/json")
				.body("{\"status\":\"pending\",\"expires_in\":900}");
		})
		.await;

	let config = ClientConfig::new(&server.base_url())?;
	let client = ApiClient::new(config);
	let uid: TagUid = "04:A3:22:B1".parse()?;
	let card = client.public_tag(&uid).await?.value()?;

	println!("Scanned tag {uid}: blood type {}.", card["blood_type"]);

	let mut details = Map::new();

	details.insert("requester_name".into(), "EMT Ortiz".into());
	details.insert("reason".into(), "roadside triage".into());

	let ticket = client.request_emergency_access(&uid, &details).await?.value()?;

	println!("Emergency access request is {}.", ticket["status"]);

	Ok(())
}
