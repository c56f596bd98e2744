//! Profile view: fetch the signed-in user's record and change the avatar.

use std::path::Path;
use std::sync::Arc;

use seatflix_core::storage::USER_ID_KEY;
use seatflix_core::user::UserProfile;
use seatflix_core::{DurableStorage, Result, SeatflixError, SessionStore};
use seatflix_interaction::UserApi;

#[derive(Clone)]
pub struct ProfileUseCase {
    api: UserApi,
    storage: Arc<dyn DurableStorage>,
    session: Arc<SessionStore>,
}

impl ProfileUseCase {
    pub fn new(api: UserApi, storage: Arc<dyn DurableStorage>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            storage,
            session,
        }
    }

    /// Loads the profile of the user id kept in durable storage.
    pub async fn load_profile(&self) -> Result<UserProfile> {
        let user_id = self
            .storage
            .get_item(USER_ID_KEY)?
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SeatflixError::not_found("user id", USER_ID_KEY))?;

        self.api.get_user(&user_id).await
    }

    /// Asks the backend who the bearer token belongs to.
    pub async fn current_profile(&self) -> Result<UserProfile> {
        self.api.current_user().await
    }

    /// Uploads an image file as the avatar and refreshes the session identity.
    pub async fn upload_avatar(&self, path: &Path) -> Result<UserProfile> {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(SeatflixError::validation("Only image files are allowed"));
        }

        let bytes = tokio::fs::read(path).await?;
        if bytes.is_empty() {
            return Err(SeatflixError::validation("No file uploaded"));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "avatar".to_string());

        let profile = self
            .api
            .upload_avatar(&file_name, mime.essence_str(), bytes)
            .await?;

        self.session.update_identity(profile.identity())?;
        tracing::info!(user_id = %profile.id, "[Profile] avatar updated");
        Ok(profile)
    }

    /// Absolute avatar URL, if the profile has one.
    pub fn avatar_url(&self, profile: &UserProfile) -> Option<String> {
        let pic = profile.profile_pic.as_deref()?;
        let base_url = self.api.client().base_url()?;
        Some(format!("{}/{}", base_url, pic.trim_start_matches('/')))
    }
}
