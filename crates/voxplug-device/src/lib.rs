pub mod codec;
pub mod controller;
pub mod kasa;
pub mod mock_plug;
pub mod plug_trait;

pub use controller::PlugController;
pub use kasa::KasaPlug;
pub use mock_plug::{MockCall, MockPlug};
pub use plug_trait::SmartPlug;
