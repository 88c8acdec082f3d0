mod cache;
mod detector;
mod flags;

pub use cache::{ArchitectureCache, ArchitectureInfo};
pub use detector::{
    Architecture, are_turbo_modules_enabled, architecture_name, classify, is_bridgeless_enabled,
    is_fabric_enabled, is_new_architecture_enabled, log_architecture_info,
};
pub use flags::{EnvFlags, RuntimeFlags, StaticFlags};
