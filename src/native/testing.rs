//! Recording doubles for the native collaborator traits.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};
use crate::session::{NativeHandleResolver, SessionId};
use crate::transport::EventHub;

use super::{
    GeneratedEventModule, NativeDocumentManager, NativeEventModule, NativeViewManager,
    NativeViewModule,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NativeCall {
    pub target: String,
    pub method: String,
    pub args: Vec<Value>,
}

impl NativeCall {
    pub fn new(target: impl Into<String>, method: &str, args: Vec<Value>) -> Self {
        Self {
            target: target.into(),
            method: method.to_string(),
            args,
        }
    }
}

#[derive(Clone)]
enum Response {
    Value(Value),
    Fail { code: String, message: String },
}

/// Shared call log with canned responses; unknown methods answer `true`.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<NativeCall>>,
    responses: Mutex<HashMap<String, Response>>,
}

impl Recorder {
    fn record(&self, target: String, method: &str, args: Vec<Value>) -> BridgeResult<Value> {
        // A stored toolbar is what the next getToolbar returns.
        if method == "setToolbar"
            && let Some(toolbar) = args.first()
        {
            self.respond("getToolbar", toolbar.clone());
        }
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(NativeCall::new(target, method, args));
        let response = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(method)
            .cloned();
        match response {
            Some(Response::Value(value)) => Ok(value),
            Some(Response::Fail { code, message }) => Err(BridgeError::native(Some(&code), message)),
            None => Ok(Value::Bool(true)),
        }
    }

    fn respond(&self, method: &str, value: Value) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(method.to_string(), Response::Value(value));
    }

    fn fail(&self, method: &str, code: &str, message: &str) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                method.to_string(),
                Response::Fail {
                    code: code.to_string(),
                    message: message.to_string(),
                },
            );
    }

    fn calls(&self) -> Vec<NativeCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

macro_rules! recording_double {
    ($name:ident) => {
        #[derive(Default)]
        pub(crate) struct $name {
            recorder: Recorder,
        }

        impl $name {
            pub fn respond(&self, method: &str, value: Value) {
                self.recorder.respond(method, value);
            }

            pub fn fail(&self, method: &str, code: &str, message: &str) {
                self.recorder.fail(method, code, message);
            }

            pub fn calls(&self) -> Vec<NativeCall> {
                self.recorder.calls()
            }

            pub fn methods(&self) -> Vec<String> {
                self.calls().into_iter().map(|call| call.method).collect()
            }
        }
    };
}

recording_double!(RecordingViewManager);
recording_double!(RecordingViewModule);
recording_double!(RecordingDocuments);

#[async_trait]
impl NativeViewManager for RecordingViewManager {
    async fn dispatch_view_manager_command(
        &self,
        handle: SessionId,
        command: &str,
        args: Vec<Value>,
    ) -> BridgeResult<Value> {
        self.recorder.record(handle.native_id(), command, args)
    }
}

#[async_trait]
impl NativeViewModule for RecordingViewModule {
    async fn invoke(&self, reference: &str, method: &str, args: Vec<Value>) -> BridgeResult<Value> {
        self.recorder.record(reference.to_string(), method, args)
    }
}

#[async_trait]
impl NativeDocumentManager for RecordingDocuments {
    async fn invoke(
        &self,
        reference: SessionId,
        method: &str,
        args: Vec<Value>,
    ) -> BridgeResult<Value> {
        self.recorder.record(reference.native_id(), method, args)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListenerNotice {
    Added(String, Option<SessionId>),
    Removed(String, Option<SessionId>),
}

#[derive(Default)]
pub(crate) struct RecordingEvents {
    notices: Mutex<Vec<ListenerNotice>>,
}

impl RecordingEvents {
    pub fn notices(&self) -> Vec<ListenerNotice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn removed_count(&self) -> usize {
        self.notices()
            .iter()
            .filter(|notice| matches!(notice, ListenerNotice::Removed(..)))
            .count()
    }

    fn push(&self, notice: ListenerNotice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

#[async_trait]
impl NativeEventModule for RecordingEvents {
    async fn handle_listener_added(
        &self,
        event: &str,
        component_id: Option<SessionId>,
    ) -> BridgeResult<()> {
        self.push(ListenerNotice::Added(event.to_string(), component_id));
        Ok(())
    }

    async fn handle_listener_removed(
        &self,
        event: &str,
        component_id: Option<SessionId>,
    ) -> BridgeResult<()> {
        self.push(ListenerNotice::Removed(event.to_string(), component_id));
        Ok(())
    }
}

/// Generated module exposing a fixed set of typed emitters.
#[derive(Default)]
pub(crate) struct TypedEmitters {
    emitters: HashMap<String, EventHub>,
}

impl TypedEmitters {
    pub fn with_events(events: &[&str]) -> Self {
        Self {
            emitters: events
                .iter()
                .map(|event| (event.to_string(), EventHub::new()))
                .collect(),
        }
    }

    pub fn emitter(&self, event: &str) -> Option<EventHub> {
        self.emitters.get(event).cloned()
    }
}

impl GeneratedEventModule for TypedEmitters {
    fn emitter_for(&self, event: &str) -> Option<EventHub> {
        self.emitter(event)
    }
}

/// Component handle that tests can attach and detach.
#[derive(Default)]
pub(crate) struct SwitchableHandle {
    handle: Mutex<Option<SessionId>>,
}

impl SwitchableHandle {
    pub fn attached(handle: i64) -> Self {
        Self {
            handle: Mutex::new(Some(SessionId::new(handle))),
        }
    }

    pub fn set(&self, handle: Option<SessionId>) {
        *self.handle.lock().unwrap_or_else(PoisonError::into_inner) = handle;
    }
}

impl NativeHandleResolver for SwitchableHandle {
    fn find_node_handle(&self) -> Option<SessionId> {
        *self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
