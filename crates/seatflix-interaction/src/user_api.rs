//! Typed calls to the SeatFlix user endpoints.

use seatflix_core::Result;
use seatflix_core::http::MultipartFile;
use seatflix_core::user::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserProfile,
};

use crate::api_client::ApiClient;
use crate::endpoints;

#[derive(Clone)]
pub struct UserApi {
    client: ApiClient,
}

impl UserApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        self.client.post_json(endpoints::REGISTER, request).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.client.post_json(endpoints::LOGIN, request).await
    }

    pub async fn get_user(&self, id: &str) -> Result<UserProfile> {
        self.client.get_json(&endpoints::user(id)).await
    }

    pub async fn current_user(&self) -> Result<UserProfile> {
        self.client.get_json(endpoints::CURRENT_USER).await
    }

    /// Uploads an avatar and returns the updated profile.
    pub async fn upload_avatar(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UserProfile> {
        let file = MultipartFile {
            field: endpoints::AVATAR_FIELD.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        };
        self.client.post_multipart(endpoints::UPLOAD_AVATAR, file).await
    }
}
