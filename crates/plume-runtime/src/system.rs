//! Runtime system trait

use plume_core::Result;

/// A system that can be ticked by the frame loop
///
/// The driver calls `update` exactly once per displayed frame.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self) -> Result<()>;

    /// Called once per frame. `dt` is the wall-clock time since the previous
    /// frame in seconds; frame-stepped systems may ignore it.
    fn update(&mut self, dt: f64) -> Result<()>;

    /// Called when the driver is shutting down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
