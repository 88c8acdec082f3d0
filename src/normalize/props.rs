use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{BridgeError, BridgeResult};
use crate::model::Toolbar;
use crate::session::SessionId;

use super::events::{NativeCallbacks, ViewCallbacks};

/// Legacy default kept so both architectures agree when the prop is unset.
pub const DEFAULT_FRAGMENT_TAG: &str = "NutrientView.FragmentTag";

/// Props as the application writes them.
#[derive(Clone, Default)]
pub struct ViewProps {
    pub document: Option<String>,
    pub configuration: Option<Value>,
    pub toolbar: Option<Toolbar>,
    pub menu_item_grouping: Option<Value>,
    pub annotation_contextual_menu: Option<Value>,
    pub available_font_names: Option<Vec<String>>,
    pub fragment_tag: Option<String>,
    /// Scalar props forwarded unchanged.
    pub extra: Map<String, Value>,
    pub callbacks: ViewCallbacks,
}

/// Props handed to the new-architecture native component.
///
/// Structured props travel as JSON strings and stay unset when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeViewProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(rename = "configurationJSONString", skip_serializing_if = "Option::is_none")]
    pub configuration_json: Option<String>,
    #[serde(rename = "toolbarJSONString", skip_serializing_if = "Option::is_none")]
    pub toolbar_json: Option<String>,
    #[serde(
        rename = "menuItemGroupingJSONString",
        skip_serializing_if = "Option::is_none"
    )]
    pub menu_item_grouping_json: Option<String>,
    #[serde(
        rename = "annotationContextualMenuJSONString",
        skip_serializing_if = "Option::is_none"
    )]
    pub annotation_contextual_menu_json: Option<String>,
    #[serde(
        rename = "availableFontNamesJSONString",
        skip_serializing_if = "Option::is_none"
    )]
    pub available_font_names_json: Option<String>,
    pub fragment_tag: String,
    #[serde(rename = "nativeID")]
    pub native_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Native prop names owned by [`NativeViewProps`]; `extra` may not set them.
const MANAGED_PROPS: [&str; 8] = [
    "document",
    "configurationJSONString",
    "toolbarJSONString",
    "menuItemGroupingJSONString",
    "annotationContextualMenuJSONString",
    "availableFontNamesJSONString",
    "fragmentTag",
    "nativeID",
];

fn to_json_string<T: Serialize + ?Sized>(value: Option<&T>, prop: &str) -> BridgeResult<Option<String>> {
    value
        .map(|value| {
            serde_json::to_string(value)
                .map_err(|source| BridgeError::serialization(source, format!("failed to encode {prop}")))
        })
        .transpose()
}

impl NativeViewProps {
    pub fn from_props(props: &ViewProps, session: SessionId) -> BridgeResult<Self> {
        if let Some(key) = MANAGED_PROPS.iter().find(|key| props.extra.contains_key(**key)) {
            return Err(BridgeError::invalid_argument(format!(
                "prop {key} is managed by the view and cannot be passed through"
            )));
        }
        Ok(Self {
            document: props.document.clone(),
            configuration_json: to_json_string(props.configuration.as_ref(), "configuration")?,
            toolbar_json: to_json_string(props.toolbar.as_ref(), "toolbar")?,
            menu_item_grouping_json: to_json_string(
                props.menu_item_grouping.as_ref(),
                "menuItemGrouping",
            )?,
            annotation_contextual_menu_json: to_json_string(
                props.annotation_contextual_menu.as_ref(),
                "annotationContextualMenu",
            )?,
            available_font_names_json: to_json_string(
                props.available_font_names.as_deref(),
                "availableFontNames",
            )?,
            fragment_tag: props
                .fragment_tag
                .clone()
                .unwrap_or_else(|| DEFAULT_FRAGMENT_TAG.to_string()),
            native_id: session.native_id(),
            extra: props.extra.clone(),
        })
    }

    pub fn to_value(&self) -> BridgeResult<Value> {
        serde_json::to_value(self)
            .map_err(|source| BridgeError::serialization(source, "failed to encode view props"))
    }
}

/// Result of rendering a view. Never an error.
#[derive(Clone)]
pub enum RenderedView {
    Native {
        props: NativeViewProps,
        callbacks: NativeCallbacks,
    },
    /// Shown when the native component could not be described.
    Placeholder { message: String },
}

impl RenderedView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Builds the native description of a view, degrading to a placeholder.
pub fn render_native(props: &ViewProps, session: SessionId, normalize_events: bool) -> RenderedView {
    match NativeViewProps::from_props(props, session) {
        Ok(native) => RenderedView::Native {
            props: native,
            callbacks: if normalize_events {
                NativeCallbacks::normalized(&props.callbacks)
            } else {
                NativeCallbacks::passthrough(&props.callbacks)
            },
        },
        Err(err) => {
            tracing::error!(session = %session, error = %err, "failed to render native view");
            RenderedView::Placeholder {
                message: format!("Nutrient view error: {err}"),
            }
        }
    }
}
