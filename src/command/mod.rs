mod dispatch;
mod encode;
mod spec;
mod types;

pub use dispatch::CommandDispatcher;
pub use encode::{ArgEncoding, decode_bool, decode_result, encode_args};
pub use spec::{all_command_specs, command_registry, find_command_spec};
pub use types::{ArgKind, ArgSpec, CommandId, CommandSpec, Delivery, ViewCommand};
