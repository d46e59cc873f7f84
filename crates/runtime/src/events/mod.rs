//! Topic-based event bus for battle observers.
//!
//! The battle publishes what happened at each resolution milestone. Observers
//! (the client, tests, tooling) subscribe to the topics they care about.
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ActionEvent, TurnEvent};
