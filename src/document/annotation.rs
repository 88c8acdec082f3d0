use serde::Deserialize;
use serde_json::{Map, Value};

use super::form_element::{FormElement, FormRoute};
use super::form_field::{lenient, or_default, tag};

pub const WIDGET_ANNOTATION_TYPE: &str = "pspdfkit/widget";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AnnotationHeader {
    #[serde(rename = "type", deserialize_with = "or_default")]
    annotation_type: Option<String>,
    #[serde(deserialize_with = "or_default")]
    name: Option<String>,
    #[serde(deserialize_with = "or_default")]
    uuid: Option<String>,
    #[serde(deserialize_with = "or_default")]
    page_index: Option<u32>,
}

/// Annotation as reported by the native SDK.
///
/// Only widget annotations carry a `form_element`.
#[derive(Debug, Clone)]
pub struct AnnotationInstance {
    pub annotation_type: Option<String>,
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub page_index: Option<u32>,
    pub form_element: Option<FormElement>,
    /// Full Instant JSON payload.
    pub raw: Map<String, Value>,
}

impl AnnotationInstance {
    pub fn is_widget(&self) -> bool {
        self.annotation_type.as_deref() == Some(WIDGET_ANNOTATION_TYPE)
    }
}

pub fn create_annotation_instance(payload: &Value, route: Option<&FormRoute>) -> AnnotationInstance {
    let is_widget = tag(payload, "type") == WIDGET_ANNOTATION_TYPE;
    let header: AnnotationHeader = lenient(payload, "annotation");
    let raw = payload.as_object().cloned().unwrap_or_default();
    let form_element = if is_widget {
        raw.get("formElement")
            .filter(|element| element.is_object())
            .map(|element| FormElement::from_native(element, route.cloned()))
    } else {
        None
    };
    AnnotationInstance {
        annotation_type: header.annotation_type,
        name: header.name,
        uuid: header.uuid,
        page_index: header.page_index,
        form_element,
        raw,
    }
}
