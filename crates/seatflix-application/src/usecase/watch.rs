use seatflix_core::Result;
use seatflix_core::SeatflixError;
use seatflix_core::catalog::MediaType;
use seatflix_interaction::PlayerEmbed;
use seatflix_interaction::player::INVALID_MEDIA_ID;

#[derive(Debug, Clone)]
pub struct WatchUseCase {
    player: PlayerEmbed,
}

impl WatchUseCase {
    pub fn new(player: PlayerEmbed) -> Self {
        Self { player }
    }

    /// Player URL for the `/watch/:type/:id` route parameters.
    pub fn embed_url(&self, media_type: &str, id: &str) -> Result<String> {
        let media_type: MediaType = media_type
            .parse()
            .map_err(|_| SeatflixError::validation(INVALID_MEDIA_ID))?;
        self.player.embed_url(media_type, id)
    }
}
