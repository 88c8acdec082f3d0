mod id;
mod reference;
mod registry;

pub use id::{LazySessionId, SessionId, allocate};
pub use reference::{NativeHandleResolver, ViewReference};
pub use registry::{RegistrationToken, ViewRegistry};
