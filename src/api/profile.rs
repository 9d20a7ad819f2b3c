//! Medical profile endpoints: the profile document and its four owned collections.

// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiResponse, Method},
};

impl ApiClient {
	/// Fetches the caller's medical profile.
	pub async fn medical_profile(&self) -> Result<ApiResponse> {
		self.request(Method::Get, "/profiles/medical-profile/", None).await
	}

	/// Replaces the caller's medical profile.
	pub async fn update_medical_profile(&self, profile: &Value) -> Result<ApiResponse> {
		self.request(Method::Put, "/profiles/medical-profile/", Some(profile)).await
	}

	/// Lists the stored allergies.
	pub async fn allergies(&self) -> Result<ApiResponse> {
		self.request(Method::Get, "/profiles/allergies/", None).await
	}

	/// Records a new allergy.
	pub async fn add_allergy(&self, allergy: &Value) -> Result<ApiResponse> {
		self.request(Method::Post, "/profiles/allergies/", Some(allergy)).await
	}

	/// Deletes an allergy by its identifier.
	pub async fn remove_allergy(&self, id: u64) -> Result<ApiResponse> {
		self.request(Method::Delete, &format!("/profiles/allergies/{id}/"), None).await
	}

	/// Lists the stored chronic diseases.
	pub async fn chronic_diseases(&self) -> Result<ApiResponse> {
		self.request(Method::Get, "/profiles/chronic-diseases/", None).await
	}

	/// Records a new chronic disease.
	pub async fn add_chronic_disease(&self, disease: &Value) -> Result<ApiResponse> {
		self.request(Method::Post, "/profiles/chronic-diseases/", Some(disease)).await
	}

	/// Deletes a chronic disease by its identifier.
	pub async fn remove_chronic_disease(&self, id: u64) -> Result<ApiResponse> {
		self.request(Method::Delete, &format!("/profiles/chronic-diseases/{id}/"), None).await
	}

	/// Lists the stored medications.
	pub async fn medications(&self) -> Result<ApiResponse> {
		self.request(Method::Get, "/profiles/medications/", None).await
	}

	/// Records a new medication.
	pub async fn add_medication(&self, medication: &Value) -> Result<ApiResponse> {
		self.request(Method::Post, "/profiles/medications/", Some(medication)).await
	}

	/// Deletes a medication by its identifier.
	pub async fn remove_medication(&self, id: u64) -> Result<ApiResponse> {
		self.request(Method::Delete, &format!("/profiles/medications/{id}/"), None).await
	}

	/// Lists the stored emergency contacts.
	pub async fn emergency_contacts(&self) -> Result<ApiResponse> {
		self.request(Method::Get, "/profiles/emergency-contacts/", None).await
	}

	/// Records a new emergency contact.
	pub async fn add_emergency_contact(&self, contact: &Value) -> Result<ApiResponse> {
		self.request(Method::Post, "/profiles/emergency-contacts/", Some(contact)).await
	}

	/// Deletes an emergency contact by its identifier.
	pub async fn remove_emergency_contact(&self, id: u64) -> Result<ApiResponse> {
		self.request(Method::Delete, &format!("/profiles/emergency-contacts/{id}/"), None).await
	}
}
