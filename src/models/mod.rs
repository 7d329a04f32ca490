pub mod command;
pub mod device;

// Re-export common types for easier access
pub use command::{Command, CommandRequest, CommandResponse, CommandResult, PowerState};
pub use device::DeviceStatus;
