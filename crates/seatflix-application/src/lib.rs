//! Application layer for SeatFlix.
//!
//! Use cases coordinate the session store, the backend client and the
//! catalog services. `ClientApp` wires them together and owns routing.

pub mod app;
pub mod routing;
pub mod usecase;

pub use app::{ClientApp, Navigation};
pub use routing::{BrowserLocation, Route};
pub use usecase::{AuthUseCase, CatalogUseCase, ProfileUseCase, WatchUseCase};
