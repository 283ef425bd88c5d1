use async_trait::async_trait;
use voxplug_core::{DeviceError, PlugState};

/// A controllable smart plug, one session per call.
///
/// Implementations are transport adapters ([`KasaPlug`](crate::KasaPlug) for
/// the real device, [`MockPlug`](crate::MockPlug) for tests); the on/off/toggle
/// decisions live in [`PlugController`](crate::PlugController).
#[async_trait]
pub trait SmartPlug: Send + Sync {
    /// Returns the transport name (e.g. `"kasa"`, `"mock"`).
    fn name(&self) -> &str;
    /// Fetch the plug's current relay state.
    async fn fetch_state(&self) -> Result<PlugState, DeviceError>;
    /// Set the relay on or off.
    async fn set_power(&self, on: bool) -> Result<(), DeviceError>;
}
