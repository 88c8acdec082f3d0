use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::SessionId;

pub struct DocumentEvent;

impl DocumentEvent {
    pub const LOADED: &'static str = "documentLoaded";
    pub const LOAD_FAILED: &'static str = "documentLoadFailed";
    pub const PAGE_CHANGED: &'static str = "documentPageChanged";
    pub const SCROLLED: &'static str = "documentScrolled";
    pub const TAPPED: &'static str = "documentTapped";
    pub const ALL: [&'static str; 5] = [
        Self::LOADED,
        Self::LOAD_FAILED,
        Self::PAGE_CHANGED,
        Self::SCROLLED,
        Self::TAPPED,
    ];
}

pub struct AnnotationsEvent;

impl AnnotationsEvent {
    pub const ADDED: &'static str = "annotationsAdded";
    pub const CHANGED: &'static str = "annotationChanged";
    pub const REMOVED: &'static str = "annotationsRemoved";
    pub const SELECTED: &'static str = "annotationsSelected";
    pub const DESELECTED: &'static str = "annotationsDeselected";
    pub const TAPPED: &'static str = "annotationTapped";
    pub const ALL: [&'static str; 6] = [
        Self::ADDED,
        Self::CHANGED,
        Self::REMOVED,
        Self::SELECTED,
        Self::DESELECTED,
        Self::TAPPED,
    ];
}

pub struct TextEvent;

impl TextEvent {
    pub const SELECTED: &'static str = "textSelected";
    pub const ALL: [&'static str; 1] = [Self::SELECTED];
}

pub struct FormFieldEvent;

impl FormFieldEvent {
    pub const VALUES_UPDATED: &'static str = "formFieldValuesUpdated";
    pub const SELECTED: &'static str = "formFieldSelected";
    pub const DESELECTED: &'static str = "formFieldDeselected";
    pub const ALL: [&'static str; 3] = [Self::VALUES_UPDATED, Self::SELECTED, Self::DESELECTED];
}

pub struct BookmarksEvent;

impl BookmarksEvent {
    pub const CHANGED: &'static str = "bookmarksChanged";
    pub const ALL: [&'static str; 1] = [Self::CHANGED];
}

/// The one event class delivered to every subscriber regardless of origin.
pub struct AnalyticsEvent;

impl AnalyticsEvent {
    pub const ANALYTICS: &'static str = "analytics";
    pub const ALL: [&'static str; 1] = [Self::ANALYTICS];
}

/// Every named event native code may emit.
pub fn all_events() -> impl Iterator<Item = &'static str> {
    DocumentEvent::ALL
        .into_iter()
        .chain(AnnotationsEvent::ALL)
        .chain(TextEvent::ALL)
        .chain(FormFieldEvent::ALL)
        .chain(BookmarksEvent::ALL)
        .chain(AnalyticsEvent::ALL)
}

/// Wire shape of every native notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "componentID", default)]
    pub component_id: Option<SessionId>,
    #[serde(default)]
    pub data: Value,
}

impl EventEnvelope {
    pub fn new(component_id: SessionId, data: Value) -> Self {
        Self {
            component_id: Some(component_id),
            data,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "componentID": self.component_id,
            "data": self.data,
        })
    }
}

/// Delivery predicate: same view, or an analytics event.
pub fn should_deliver(event: &str, origin: Option<SessionId>, own: Option<SessionId>) -> bool {
    if event == AnalyticsEvent::ANALYTICS {
        return true;
    }
    matches!((origin, own), (Some(origin), Some(own)) if origin == own)
}
