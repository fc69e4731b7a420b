mod devices;
mod error_state;
mod loading;
mod status;
pub mod toast;
mod update_panel;

pub use devices::{AvailableDevicesPanel, ConfiguredDevicesPanel};
pub use error_state::ErrorState;
pub use loading::Loading;
pub use status::{CpuPanel, InfoPanel, MemoryPanel, StoragePanel, SystemPanel};
pub use toast::ToastContainer;
pub use update_panel::UpdatePanel;
