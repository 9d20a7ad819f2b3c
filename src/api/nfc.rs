//! NFC tag endpoints: tag CRUD, activation, access logs, and the unauthenticated
//! emergency surface.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use serde_json::{Map, json};
// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiResponse, Method},
};

const TAG_UID_MAX_LEN: usize = 64;
const TAG_UID_RESERVED: [char; 4] = ['/', '?', '#', '%'];

/// Error returned when tag UID validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum TagUidError {
	/// The UID was empty.
	#[error("Tag UID cannot be empty.")]
	Empty,
	/// The UID contains whitespace characters.
	#[error("Tag UID contains whitespace.")]
	ContainsWhitespace,
	/// The UID contains a character that cannot travel inside a URL path segment.
	#[error("Tag UID contains the reserved character `{character}`.")]
	ContainsReservedCharacter {
		/// Offending character.
		character: char,
	},
	/// The UID exceeded the allowed character count.
	#[error("Tag UID exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Physical tag identifier as printed on the NFC chip.
///
/// Validated on construction so it can be substituted into URL paths verbatim.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagUid(String);
impl TagUid {
	/// Creates a new UID after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, TagUidError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for TagUid {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for TagUid {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<TagUid> for String {
	fn from(value: TagUid) -> Self {
		value.0
	}
}
impl TryFrom<String> for TagUid {
	type Error = TagUidError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Borrow<str> for TagUid {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl Debug for TagUid {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TagUid({})", self.0)
	}
}
impl Display for TagUid {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for TagUid {
	type Err = TagUidError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate_view(view: &str) -> Result<(), TagUidError> {
	if view.is_empty() {
		return Err(TagUidError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(TagUidError::ContainsWhitespace);
	}
	if let Some(character) = view.chars().find(|c| TAG_UID_RESERVED.contains(c)) {
		return Err(TagUidError::ContainsReservedCharacter { character });
	}
	if view.chars().count() > TAG_UID_MAX_LEN {
		return Err(TagUidError::TooLong { max: TAG_UID_MAX_LEN });
	}

	Ok(())
}

impl ApiClient {
	/// Lists the caller's tags.
	pub async fn tags(&self) -> Result<ApiResponse> {
		self.request(Method::Get, "/nfc/tags/", None).await
	}

	/// Fetches one tag by its identifier.
	pub async fn tag(&self, id: u64) -> Result<ApiResponse> {
		self.request(Method::Get, &format!("/nfc/tags/{id}/"), None).await
	}

	/// Registers a new tag; the payload shape is owned by the server.
	pub async fn create_tag(&self, tag: &Value) -> Result<ApiResponse> {
		self.request(Method::Post, "/nfc/tags/", Some(tag)).await
	}

	/// Updates a tag by its identifier.
	pub async fn update_tag(&self, id: u64, tag: &Value) -> Result<ApiResponse> {
		self.request(Method::Put, &format!("/nfc/tags/{id}/"), Some(tag)).await
	}

	/// Deletes a tag by its identifier.
	pub async fn delete_tag(&self, id: u64) -> Result<ApiResponse> {
		self.request(Method::Delete, &format!("/nfc/tags/{id}/"), None).await
	}

	/// Activates a tag so scans serve its profile.
	pub async fn activate_tag(&self, id: u64) -> Result<ApiResponse> {
		self.request(Method::Post, &format!("/nfc/tags/{id}/activate/"), None).await
	}

	/// Deactivates a tag; scans stop serving its profile.
	pub async fn deactivate_tag(&self, id: u64) -> Result<ApiResponse> {
		self.request(Method::Post, &format!("/nfc/tags/{id}/deactivate/"), None).await
	}

	/// Lists access log entries for the caller's tags.
	pub async fn access_logs(&self) -> Result<ApiResponse> {
		self.request(Method::Get, "/nfc/access-logs/", None).await
	}

	/// Fetches the public emergency payload behind a physical tag.
	///
	/// First responders call this from arbitrary devices, so stored tokens never ride along
	/// and a 401 passes through untouched.
	pub async fn public_tag(&self, uid: &TagUid) -> Result<ApiResponse> {
		self.request_public(Method::Get, &format!("/nfc/public/{uid}/"), None).await
	}

	/// Requests elevated emergency access for a physical tag.
	///
	/// The UID is posted as `tag_uid` alongside the caller's fields; a caller-supplied
	/// `tag_uid` field wins over the parameter. Like [`ApiClient::public_tag`], the request
	/// carries no stored credentials.
	pub async fn request_emergency_access(
		&self,
		uid: &TagUid,
		details: &Map<String, Value>,
	) -> Result<ApiResponse> {
		let mut fields = details.clone();

		fields.entry("tag_uid").or_insert_with(|| json!(uid));

		let body = Value::Object(fields);

		self.request_public(Method::Post, "/nfc/emergency-access/request/", Some(&body)).await
	}
}
