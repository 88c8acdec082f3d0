use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value, json};

/// Application callback for a view event.
pub type Callback = Arc<dyn Fn(Value) + Send + Sync>;

/// Handler attached to the native view; receives the raw native event.
pub type NativeEventHandler = Arc<dyn Fn(&Value) + Send + Sync>;

pub const DEFAULT_LOAD_FAILED_CODE: &str = "CORRUPTED";
pub const DEFAULT_LOAD_FAILED_MESSAGE: &str = "Document failed to load";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewEvent {
    Ready,
    DocumentLoaded,
    DocumentSaved,
    CloseButtonPressed,
    StateChanged,
    CustomToolbarButtonTapped,
    CustomAnnotationContextualMenuItemTapped,
    DocumentLoadFailed,
    DocumentSaveFailed,
    AnnotationsChanged,
}

impl ViewEvent {
    pub const ALL: [Self; 10] = [
        Self::Ready,
        Self::DocumentLoaded,
        Self::DocumentSaved,
        Self::CloseButtonPressed,
        Self::StateChanged,
        Self::CustomToolbarButtonTapped,
        Self::CustomAnnotationContextualMenuItemTapped,
        Self::DocumentLoadFailed,
        Self::DocumentSaveFailed,
        Self::AnnotationsChanged,
    ];

    pub fn prop_name(self) -> &'static str {
        match self {
            Self::Ready => "onReady",
            Self::DocumentLoaded => "onDocumentLoaded",
            Self::DocumentSaved => "onDocumentSaved",
            Self::CloseButtonPressed => "onCloseButtonPressed",
            Self::StateChanged => "onStateChanged",
            Self::CustomToolbarButtonTapped => "onCustomToolbarButtonTapped",
            Self::CustomAnnotationContextualMenuItemTapped => {
                "onCustomAnnotationContextualMenuItemTapped"
            }
            Self::DocumentLoadFailed => "onDocumentLoadFailed",
            Self::DocumentSaveFailed => "onDocumentSaveFailed",
            Self::AnnotationsChanged => "onAnnotationsChanged",
        }
    }

    /// Reshapes a new-architecture event into its legacy payload.
    pub fn normalize(self, event: &Value) -> Value {
        match self {
            Self::Ready | Self::DocumentLoaded | Self::DocumentSaved | Self::CloseButtonPressed => {
                json!({})
            }
            Self::StateChanged => native_event(event).clone(),
            Self::CustomToolbarButtonTapped => normalize_custom_toolbar_button_tapped(event),
            Self::CustomAnnotationContextualMenuItemTapped => {
                normalize_annotation_menu_item_tapped(event)
            }
            Self::DocumentLoadFailed => normalize_document_load_failed(event),
            Self::DocumentSaveFailed => normalize_document_save_failed(event),
            Self::AnnotationsChanged => normalize_annotations_changed(event),
        }
    }
}

/// `nativeEvent` when the transport wrapped the payload, else the event itself.
pub fn native_event(event: &Value) -> &Value {
    match event.get("nativeEvent") {
        Some(inner) if !inner.is_null() => inner,
        _ => event,
    }
}

fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|field| !field.is_null())
}

// Absent fields stay absent rather than becoming `null`.
fn object(entries: impl IntoIterator<Item = (&'static str, Option<Value>)>) -> Value {
    let map: Map<String, Value> = entries
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key.to_string(), value)))
        .collect();
    Value::Object(map)
}

pub fn normalize_custom_toolbar_button_tapped(event: &Value) -> Value {
    let native = native_event(event);
    let id = field(native, "buttonId").or_else(|| field(native, "id"));
    object([("id", id.cloned())])
}

pub fn normalize_annotation_menu_item_tapped(event: &Value) -> Value {
    let native = native_event(event);
    object([("id", field(native, "id").cloned())])
}

pub fn normalize_document_load_failed(event: &Value) -> Value {
    let native = native_event(event);
    let code = field(native, "code")
        .cloned()
        .unwrap_or_else(|| Value::from(DEFAULT_LOAD_FAILED_CODE));
    let message = field(native, "message")
        .or_else(|| field(native, "error"))
        .cloned()
        .unwrap_or_else(|| Value::from(DEFAULT_LOAD_FAILED_MESSAGE));
    json!({ "code": code, "message": message })
}

pub fn normalize_document_save_failed(event: &Value) -> Value {
    let native = native_event(event);
    object([("error", field(native, "error").cloned())])
}

/// Parses `annotationsJSONString`; anything unparsable becomes `[]`.
pub fn normalize_annotations_changed(event: &Value) -> Value {
    let native = native_event(event);
    let annotations = match native.get("annotationsJSONString") {
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => Value::Array(items),
            Ok(_) => {
                tracing::debug!("annotationsJSONString is not an array; using []");
                Value::Array(Vec::new())
            }
            Err(err) => {
                tracing::debug!(error = %err, "failed to parse annotationsJSONString; using []");
                Value::Array(Vec::new())
            }
        },
        _ => Value::Array(Vec::new()),
    };
    object([
        ("change", field(native, "change").cloned()),
        ("annotations", Some(annotations)),
    ])
}

/// Callbacks supplied by the application, keyed by view event.
#[derive(Clone, Default)]
pub struct ViewCallbacks {
    callbacks: HashMap<ViewEvent, Callback>,
}

impl ViewCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(mut self, event: ViewEvent, callback: F) -> Self
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        self.callbacks.insert(event, Arc::new(callback));
        self
    }

    pub fn get(&self, event: ViewEvent) -> Option<&Callback> {
        self.callbacks.get(&event)
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

/// Handlers handed to the native view, one per supplied callback.
#[derive(Clone, Default)]
pub struct NativeCallbacks {
    handlers: HashMap<ViewEvent, NativeEventHandler>,
}

impl NativeCallbacks {
    /// Wraps each callback so it receives the legacy payload shape.
    pub fn normalized(callbacks: &ViewCallbacks) -> Self {
        Self::wrap(callbacks, |event, payload| event.normalize(payload))
    }

    /// Legacy payloads already have the expected shape.
    pub fn passthrough(callbacks: &ViewCallbacks) -> Self {
        Self::wrap(callbacks, |_, payload| payload.clone())
    }

    fn wrap(callbacks: &ViewCallbacks, shape: fn(ViewEvent, &Value) -> Value) -> Self {
        let handlers = callbacks
            .callbacks
            .iter()
            .map(|(&event, callback)| {
                let callback = Arc::clone(callback);
                let handler: NativeEventHandler =
                    Arc::new(move |payload: &Value| callback(shape(event, payload)));
                (event, handler)
            })
            .collect();
        Self { handlers }
    }

    pub fn has(&self, event: ViewEvent) -> bool {
        self.handlers.contains_key(&event)
    }

    /// Prop names of the attached handlers, sorted.
    pub fn prop_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().map(|event| event.prop_name()).collect();
        names.sort_unstable();
        names
    }

    /// Runs the handler for `event`; `false` when none is attached.
    pub fn deliver(&self, event: ViewEvent, payload: &Value) -> bool {
        match self.handlers.get(&event) {
            Some(handler) => {
                handler(payload);
                true
            }
            None => false,
        }
    }
}
