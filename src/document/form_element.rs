use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};
use crate::native::NativeDocumentManager;
use crate::session::{SessionId, ViewReference};

use super::form_field::{FormField, FormKind, FormOption, SignatureInfo, lenient, or_default, tag};

/// Where follow-up calls from a form element are sent.
#[derive(Clone)]
pub struct FormRoute {
    pub reference: ViewReference,
    pub documents: Arc<dyn NativeDocumentManager>,
}

impl FormRoute {
    pub fn new(reference: ViewReference, documents: Arc<dyn NativeDocumentManager>) -> Self {
        Self {
            reference,
            documents,
        }
    }

    pub fn target(&self) -> BridgeResult<SessionId> {
        self.reference.require()
    }

    pub(crate) async fn invoke(&self, method: &str, args: Vec<Value>) -> BridgeResult<Value> {
        let target = self.target()?;
        tracing::debug!(method, target = %target, "document call");
        self.documents.invoke(target, method, args).await
    }
}

impl fmt::Debug for FormRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormRoute")
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}

/// New value for a form field, shaped per field kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Button(bool),
    Choice(Vec<u32>),
    Text(String),
}

impl FormValue {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Button(selected) => Value::Bool(*selected),
            Self::Choice(indices) => Value::from(indices.clone()),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormElementCommon {
    #[serde(deserialize_with = "or_default")]
    pub resettable: Option<bool>,
    #[serde(deserialize_with = "or_default")]
    pub default_value: Option<Value>,
    #[serde(deserialize_with = "or_default")]
    pub export_value: Option<Value>,
    #[serde(deserialize_with = "or_default")]
    pub highlight_color: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub calculation_order_index: i64,
    #[serde(deserialize_with = "or_default")]
    pub read_only: bool,
    #[serde(deserialize_with = "or_default")]
    pub required: bool,
    #[serde(deserialize_with = "or_default")]
    pub no_export: bool,
    #[serde(deserialize_with = "or_default")]
    pub field_name: String,
    #[serde(deserialize_with = "or_default")]
    pub fully_qualified_field_name: String,
    #[serde(deserialize_with = "or_default")]
    pub form_type_name: String,
    #[serde(deserialize_with = "or_default")]
    pub max_length: i64,
    #[serde(deserialize_with = "or_default")]
    pub do_not_scroll: bool,
    #[serde(deserialize_with = "or_default")]
    pub is_multiline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonElementData {
    pub selected: bool,
    pub options: Option<Vec<FormOption>>,
    pub on_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoiceElementData {
    pub options: Vec<FormOption>,
    pub selected_indices: Vec<u32>,
    pub is_editable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignatureElementData {
    pub signature_info: Option<SignatureInfo>,
    pub is_signed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextElementData {
    pub value: String,
    pub is_password: bool,
    pub font_size: f64,
    pub font_name: Option<String>,
}

impl Default for TextElementData {
    fn default() -> Self {
        Self {
            value: String::new(),
            is_password: false,
            font_size: 12.0,
            font_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormElementKind {
    Button(ButtonElementData),
    Choice(ChoiceElementData),
    Signature(SignatureElementData),
    TextField(TextElementData),
    Generic,
}

#[derive(Debug, Clone)]
pub struct FormElement {
    pub common: FormElementCommon,
    pub kind: FormElementKind,
    pub form_field: Option<FormField>,
    route: Option<FormRoute>,
}

impl FormElement {
    /// Builds the variant selected by `formTypeName`. Never fails.
    ///
    /// The tag is read before any other field so a malformed sibling cannot
    /// change the variant.
    pub fn from_native(payload: &Value, route: Option<FormRoute>) -> Self {
        let form_kind = FormKind::classify(tag(payload, "formTypeName"));
        let common: FormElementCommon = lenient(payload, "form element");
        let kind = match form_kind {
            FormKind::Button => FormElementKind::Button(lenient(payload, "button element")),
            FormKind::Choice => FormElementKind::Choice(lenient(payload, "choice element")),
            FormKind::Signature => {
                FormElementKind::Signature(lenient(payload, "signature element"))
            }
            FormKind::Text => FormElementKind::TextField(lenient(payload, "text element")),
            FormKind::Generic => FormElementKind::Generic,
        };
        let form_field = payload
            .get("formField")
            .filter(|field| field.is_object())
            .map(|field| FormField::from_native(form_kind, field));
        Self {
            common,
            kind,
            form_field,
            route,
        }
    }

    pub fn form_kind(&self) -> FormKind {
        match self.kind {
            FormElementKind::Button(_) => FormKind::Button,
            FormElementKind::Choice(_) => FormKind::Choice,
            FormElementKind::Signature(_) => FormKind::Signature,
            FormElementKind::TextField(_) => FormKind::Text,
            FormElementKind::Generic => FormKind::Generic,
        }
    }

    pub fn route(&self) -> Option<&FormRoute> {
        self.route.as_ref()
    }

    fn require_route(&self) -> BridgeResult<&FormRoute> {
        self.route.as_ref().ok_or_else(|| {
            BridgeError::invalid_argument(format!(
                "form element {:?} is not attached to a view",
                self.common.fully_qualified_field_name
            ))
        })
    }

    /// Writes `value` to this element's field on the owning view.
    pub async fn update_value(&self, value: FormValue) -> BridgeResult<bool> {
        let route = self.require_route()?;
        let result = route
            .invoke(
                "updateFormFieldValue",
                vec![
                    Value::String(self.common.fully_qualified_field_name.clone()),
                    value.to_value(),
                ],
            )
            .await?;
        crate::command::decode_bool(result, "updateFormFieldValue")
    }

    /// Signature annotation covering this signature element, if any.
    pub async fn overlapping_signature(&self) -> BridgeResult<Option<Value>> {
        if !matches!(self.kind, FormElementKind::Signature(_)) {
            return Err(BridgeError::invalid_argument(format!(
                "{} is not a signature element",
                self.common.fully_qualified_field_name
            )));
        }
        let route = self.require_route()?;
        let result = route
            .invoke(
                "getOverlappingSignature",
                vec![Value::String(self.common.fully_qualified_field_name.clone())],
            )
            .await?;
        Ok((!result.is_null()).then_some(result))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::error::BridgeError;
    use crate::native::testing::RecordingDocuments;
    use crate::session::{SessionId, ViewReference};

    use crate::document::{FormFieldKind, FormKind};
    use super::{FormElement, FormElementKind, FormRoute, FormValue};

    fn route(documents: Arc<RecordingDocuments>) -> FormRoute {
        FormRoute::new(ViewReference::Session(SessionId::new(1234)), documents)
    }

    #[test]
    fn element_and_nested_field_follow_the_element_tag() {
        let element = FormElement::from_native(
            &json!({
                "formTypeName": "BUTTON",
                "fieldName": "btn1",
                "selected": true,
                "formField": {"name": "btn1", "isCheckBox": true}
            }),
            None,
        );

        assert_eq!(element.form_kind(), FormKind::Button);
        assert!(matches!(&element.kind, FormElementKind::Button(data) if data.selected));
        let field = element.form_field.expect("field present");
        assert!(matches!(&field.kind, FormFieldKind::Button(data) if data.is_check_box));
    }

    #[test]
    fn null_or_mistyped_common_fields_keep_the_tag() {
        let element = FormElement::from_native(
            &json!({
                "formTypeName": "button",
                "fullyQualifiedFieldName": "form.agree",
                "maxLength": null,
                "readOnly": "",
                "formField": {"name": "agree", "isEditable": ""}
            }),
            None,
        );

        assert_eq!(element.form_kind(), FormKind::Button);
        assert_eq!(element.common.fully_qualified_field_name, "form.agree");
        assert_eq!(element.common.max_length, 0);
        assert!(!element.common.read_only);
        let field = element.form_field.expect("field present");
        assert_eq!(field.form_kind(), FormKind::Button);
        assert_eq!(field.common.name.as_deref(), Some("agree"));
        assert_eq!(field.common.is_editable, None);
    }

    #[tokio::test]
    async fn mistyped_sibling_does_not_redirect_updates() {
        let documents = Arc::new(RecordingDocuments::default());
        let element = FormElement::from_native(
            &json!({
                "formTypeName": "textField",
                "fullyQualifiedFieldName": "form.name",
                "calculationOrderIndex": null
            }),
            Some(route(documents.clone())),
        );

        element
            .update_value(FormValue::Text("Ada".to_string()))
            .await
            .expect("update");
        assert_eq!(documents.calls()[0].args[0], json!("form.name"));
    }

    #[test]
    fn unknown_tag_yields_generic_element_and_field() {
        let element = FormElement::from_native(
            &json!({"formTypeName": "unknown-type", "formField": {"name": "x"}}),
            None,
        );
        assert_eq!(element.kind, FormElementKind::Generic);
        assert_eq!(
            element.form_field.map(|field| field.form_kind()),
            Some(FormKind::Generic)
        );
    }

    #[test]
    fn missing_form_field_stays_absent() {
        let element = FormElement::from_native(&json!({"formTypeName": "choice"}), None);
        assert!(element.form_field.is_none());
        assert_eq!(element.form_kind(), FormKind::Choice);
    }

    #[tokio::test]
    async fn update_value_is_routed_to_owning_view() {
        let documents = Arc::new(RecordingDocuments::default());
        let element = FormElement::from_native(
            &json!({"formTypeName": "textField", "fullyQualifiedFieldName": "form.name"}),
            Some(route(documents.clone())),
        );

        assert!(
            element
                .update_value(FormValue::Text("Ada".to_string()))
                .await
                .expect("update")
        );

        let calls = documents.calls();
        assert_eq!(calls[0].target, "1234");
        assert_eq!(calls[0].method, "updateFormFieldValue");
        assert_eq!(calls[0].args, vec![json!("form.name"), json!("Ada")]);
    }

    #[tokio::test]
    async fn overlapping_signature_only_for_signature_elements() {
        let documents = Arc::new(RecordingDocuments::default());
        documents.respond("getOverlappingSignature", json!({"type": "pspdfkit/ink"}));
        let signature = FormElement::from_native(
            &json!({"formTypeName": "signature", "fullyQualifiedFieldName": "sig1"}),
            Some(route(documents.clone())),
        );
        let text = FormElement::from_native(
            &json!({"formTypeName": "textField"}),
            Some(route(documents.clone())),
        );

        assert_eq!(
            signature.overlapping_signature().await.expect("signature"),
            Some(json!({"type": "pspdfkit/ink"}))
        );
        assert!(matches!(
            text.overlapping_signature().await,
            Err(BridgeError::InvalidArgument(_))
        ));
        assert_eq!(documents.methods(), vec!["getOverlappingSignature"]);
    }
}
