//! Endpoint bindings grouped by service resource.
//!
//! Each submodule extends [`ApiClient`](crate::client::ApiClient) with the operations of one
//! resource group. Fixed payload shapes (credentials, token exchanges) are typed; free-form
//! payloads whose shape the server owns travel as [`Value`](serde_json::Value) so the bindings
//! do not chase server-side schema changes.

pub mod auth;
pub mod nfc;
pub mod profile;

pub use nfc::*;
