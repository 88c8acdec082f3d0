mod events;
mod props;

pub use events::{
    Callback, DEFAULT_LOAD_FAILED_CODE, DEFAULT_LOAD_FAILED_MESSAGE, NativeCallbacks,
    NativeEventHandler, ViewCallbacks, ViewEvent, native_event, normalize_annotation_menu_item_tapped,
    normalize_annotations_changed, normalize_custom_toolbar_button_tapped,
    normalize_document_load_failed, normalize_document_save_failed,
};
pub use props::{DEFAULT_FRAGMENT_TAG, NativeViewProps, RenderedView, ViewProps, render_native};
