//! Outbound HTTP for the SeatFlix client.
//!
//! `ApiClient` talks to the SeatFlix backend and owns the session-expiry
//! behavior. `TmdbClient` talks to the catalog API directly and never
//! touches the session.

pub mod api_client;
pub mod endpoints;
pub mod player;
pub mod reqwest_transport;
pub mod tmdb_client;
pub mod user_api;

pub use api_client::ApiClient;
pub use player::PlayerEmbed;
pub use reqwest_transport::ReqwestTransport;
pub use tmdb_client::TmdbClient;
pub use user_api::UserApi;
