mod center;
mod events;

pub use center::{NotificationCenter, RouterState};
pub use events::{
    AnalyticsEvent, AnnotationsEvent, BookmarksEvent, DocumentEvent, EventEnvelope,
    FormFieldEvent, TextEvent, all_events, should_deliver,
};
