use std::sync::Arc;

use crate::architecture::{ArchitectureInfo, RuntimeFlags};
use crate::native::{
    GeneratedEventModule, NativeDocumentManager, NativeEventModule, NativeViewManager,
    NativeViewModule,
};
use crate::transport::{DirectTransport, EventHub, LegacyTransport, Transport};

/// Native collaborators a view is mounted against.
#[derive(Clone)]
pub struct NativeBindings {
    pub flags: Arc<dyn RuntimeFlags>,
    pub view_manager: Arc<dyn NativeViewManager>,
    pub view_module: Arc<dyn NativeViewModule>,
    pub documents: Arc<dyn NativeDocumentManager>,
    pub event_module: Arc<dyn NativeEventModule>,
    pub generated_events: Option<Arc<dyn GeneratedEventModule>>,
    /// Generic emitter shared by every view.
    pub events: EventHub,
    /// Whether the new-architecture view component can be created.
    pub new_architecture_component: bool,
}

impl NativeBindings {
    pub(crate) fn transport_for(&self, info: ArchitectureInfo) -> Arc<dyn Transport> {
        if info.is_new_architecture {
            Arc::new(DirectTransport::new(
                self.view_module.clone(),
                self.event_module.clone(),
                self.generated_events.clone(),
                self.events.clone(),
            ))
        } else {
            Arc::new(LegacyTransport::new(
                self.view_manager.clone(),
                self.event_module.clone(),
                self.events.clone(),
            ))
        }
    }
}
