//! User and company profile endpoints.

use serde::Serialize;
use uuid::Uuid;

use crate::api::{ApiClient, ApiError};
use crate::models::user::{Company, Profile};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl ApiClient {
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Profile, ApiError> {
        self.get(&format!("/users/{user_id}")).await
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Profile, ApiError> {
        self.put(&format!("/users/{user_id}"), update).await
    }

    pub async fn get_company(&self, company_id: Uuid) -> Result<Company, ApiError> {
        self.get(&format!("/companies/{company_id}")).await
    }
}
