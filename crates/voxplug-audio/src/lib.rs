pub mod capture;
pub mod device;

pub use capture::{BlockAssembler, CaptureNode};
pub use device::DeviceManager;
