//! Third-party embed player URLs.

use seatflix_core::catalog::MediaType;
use seatflix_core::config::ClientConfig;
use seatflix_core::{Result, SeatflixError};

pub const INVALID_MEDIA_ID: &str = "Invalid Movie ID";

#[derive(Debug, Clone)]
pub struct PlayerEmbed {
    base_url: String,
}

impl PlayerEmbed {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.player_base_url.clone())
    }

    /// `<base>/<movie|tv>/<id>`.
    pub fn embed_url(&self, media_type: MediaType, id: &str) -> Result<String> {
        let id = id.trim();
        if id.is_empty() || id.contains('/') {
            return Err(SeatflixError::validation(INVALID_MEDIA_ID));
        }
        Ok(format!("{}/{}/{}", self.base_url, media_type, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_url() {
        let player = PlayerEmbed::new("https://player.vidsrc.co/embed/");
        assert_eq!(
            player.embed_url(MediaType::Movie, "603").unwrap(),
            "https://player.vidsrc.co/embed/movie/603"
        );
        assert_eq!(
            player.embed_url(MediaType::Tv, "1399").unwrap(),
            "https://player.vidsrc.co/embed/tv/1399"
        );
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let player = PlayerEmbed::from_config(&ClientConfig::default());
        let err = player.embed_url(MediaType::Movie, " ").unwrap_err();
        assert_eq!(err, SeatflixError::Validation(INVALID_MEDIA_ID.to_string()));
    }
}
