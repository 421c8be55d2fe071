//! Host layer
//!
//! Everything between the outside world and [`crate::sim::tick`]:
//! - Input intents buffered between frames
//! - Frame timestamps turned into clamped elapsed time
//! - Session ownership of the state and its collaborators

pub mod input;
pub mod session;
pub mod time;

pub use input::{Intent, IntentBuffer};
pub use session::Session;
pub use time::FrameClock;
