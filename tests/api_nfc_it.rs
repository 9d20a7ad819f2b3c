#![cfg(feature = "reqwest")]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use medtag_client::{
	api::TagUid,
	auth::SessionTokens,
	client::ApiClient,
	config::ClientConfig,
	error::Error,
	serde_json::json,
	store::MemoryStore,
};

fn build_client(server: &MockServer) -> (ApiClient, Arc<MemoryStore>) {
	let config = ClientConfig::new(&server.base_url()).expect("Mock base URL must parse.");
	let store = Arc::new(MemoryStore::default());
	let client = ApiClient::new(config).with_store(store.clone());

	(client, store)
}

#[tokio::test]
async fn tag_lifecycle_targets_the_expected_paths() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	store.save_now(SessionTokens::new("jwt-access", "jwt-refresh"));

	let created = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/nfc/tags/")
				.header("authorization", "Bearer jwt-access")
				.json_body(json!({ "uid": "04:A3:22:B1", "name": "bracelet" }));
			then.status(201)
				.header("content-type", "application/json")
				.body("{\"id\":5,\"uid\":\"04:A3:22:B1\",\"is_active\":false}");
		})
		.await;
	let activated = server
		.mock_async(|when, then| {
			when.method(POST).path("/nfc/tags/5/activate/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":5,\"is_active\":true}");
		})
		.await;
	let deleted = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/nfc/tags/5/");
			then.status(204);
		})
		.await;
	let response = client
		.create_tag(&json!({ "uid": "04:A3:22:B1", "name": "bracelet" }))
		.await
		.expect("Creation must succeed.");

	assert_eq!(response.status(), 201);

	client.activate_tag(5).await.expect("Activation must succeed.");

	assert_eq!(client.delete_tag(5).await.expect("Deletion must succeed.").status(), 204);

	created.assert_async().await;
	activated.assert_async().await;
	deleted.assert_async().await;
}

#[tokio::test]
async fn public_lookup_works_without_any_session() {
	let server = MockServer::start_async().await;
	let (client, _) = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/nfc/public/04:A3:22:B1/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"blood_type\":\"O+\",\"allergies\":[\"penicillin\"]}");
		})
		.await;
	let uid = TagUid::new("04:A3:22:B1").expect("Test UID must be valid.");
	let response = client.public_tag(&uid).await.expect("The lookup must succeed.");

	mock.assert_async().await;

	assert_eq!(
		response.value().expect("Payload must decode.")["blood_type"],
		json!("O+"),
	);
}

#[tokio::test]
async fn public_rejection_passes_through_without_recovery() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	store.save_now(SessionTokens::new("jwt-access", "jwt-refresh"));

	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/nfc/public/04:A3:22:B1/");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"detail\":\"tag suspended\"}");
		})
		.await;
	let exchanged = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/token/refresh/");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access\":\"fresh\"}");
		})
		.await;
	let uid = TagUid::new("04:A3:22:B1").expect("Test UID must be valid.");
	let error = client.public_tag(&uid).await.expect_err("The rejection must surface.");

	assert!(matches!(error, Error::Http { status: 401, .. }));

	rejected.assert_calls_async(1).await;
	exchanged.assert_calls_async(0).await;

	assert!(store.load_now().is_some(), "A public rejection must not touch the session.");
}

#[tokio::test]
async fn emergency_access_posts_the_merged_payload() {
	let server = MockServer::start_async().await;
	let (client, _) = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/nfc/emergency-access/request/").json_body(json!({
				"tag_uid": "04:A3:22:B1",
				"requester_name": "EMT Ortiz",
				"reason": "roadside triage",
			}));
			then.status(202)
				.header("content-type", "application/json")
				.body("{\"status\":\"pending\"}");
		})
		.await;
	let uid = TagUid::new("04:A3:22:B1").expect("Test UID must be valid.");
	let details = json!({ "requester_name": "EMT Ortiz", "reason": "roadside triage" });
	let details = details.as_object().expect("Details fixture must be an object.");
	let response = client
		.request_emergency_access(&uid, details)
		.await
		.expect("The request must succeed.");

	mock.assert_async().await;

	assert_eq!(response.status(), 202);
}

#[tokio::test]
async fn access_logs_travel_authenticated() {
	let server = MockServer::start_async().await;
	let (client, store) = build_client(&server);

	store.save_now(SessionTokens::new("jwt-access", "jwt-refresh"));

	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/nfc/access-logs/")
				.header("authorization", "Bearer jwt-access");
			then.status(200).header("content-type", "application/json").body("[]");
		})
		.await;

	client.access_logs().await.expect("The listing must succeed.");
	mock.assert_async().await;
}
