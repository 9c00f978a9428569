//! Profile persistence and the profile screens' view-state controller.

mod controller;
mod repository;
mod view_state;

pub use controller::ProfileController;
pub use repository::{ProfileRepository, ProfileStream};
pub use view_state::{LoadPhase, ProfileViewState};
