//! Plume Runtime - Frame loop infrastructure
//!
//! Provides the building blocks a driver needs around the simulation:
//! - `FrameClock` - per-frame timing and frames-per-second measurement
//! - `KeyBindings` - key to `Control` mapping with TOML overrides
//! - `EventBus` - queue that input handlers push to and the simulation drains
//! - `RuntimeSystem` - trait for systems ticked once per frame

mod clock;
mod event_bus;
mod input;
mod system;

pub use clock::FrameClock;
pub use event_bus::EventBus;
pub use input::{display_key, KeyBindings, ESCAPE};
pub use system::RuntimeSystem;
