#[cfg(test)]
pub(crate) mod testing;
mod traits;

pub use crate::session::NativeHandleResolver;
pub use traits::{
    GeneratedEventModule, NativeDocumentManager, NativeEventModule, NativeViewManager,
    NativeViewModule,
};
