use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Button,
    Choice,
    Signature,
    Text,
    Generic,
}

impl FormKind {
    /// Case-insensitive and total; unknown tags are [`FormKind::Generic`].
    ///
    /// `text` is the field-level `type` tag; elements report `textField`.
    pub fn classify(form_type_name: &str) -> Self {
        match form_type_name.to_ascii_lowercase().as_str() {
            "button" | "checkbox" | "radiobutton" => Self::Button,
            "choice" | "listbox" | "combobox" => Self::Choice,
            "signature" => Self::Signature,
            "textfield" | "text" => Self::Text,
            _ => Self::Generic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Choice => "choice",
            Self::Signature => "signature",
            Self::Text => "text",
            Self::Generic => "generic",
        }
    }
}

/// Reads `T` from a native payload, falling back to defaults field by field.
pub(crate) fn lenient<T: DeserializeOwned + Default>(payload: &Value, what: &str) -> T {
    match T::deserialize(payload) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(what, error = %err, "unexpected native form payload; using defaults");
            T::default()
        }
    }
}

/// Field deserializer that turns `null` or a mistyped value into `T::default()`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Tag a form payload is classified by, read on its own.
pub(crate) fn tag<'a>(payload: &'a Value, key: &str) -> &'a str {
    payload.get(key).and_then(Value::as_str).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormOption {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignatureInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormFieldCommon {
    #[serde(rename = "type", deserialize_with = "or_default")]
    pub field_type: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub name: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub fully_qualified_name: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub mapping_name: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub alternate_field_name: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub is_editable: Option<bool>,
    #[serde(deserialize_with = "or_default")]
    pub is_read_only: Option<bool>,
    #[serde(deserialize_with = "or_default")]
    pub is_required: Option<bool>,
    #[serde(deserialize_with = "or_default")]
    pub is_no_export: Option<bool>,
    #[serde(deserialize_with = "or_default")]
    pub default_value: Option<Value>,
    #[serde(deserialize_with = "or_default")]
    pub export_value: Option<Value>,
    #[serde(deserialize_with = "or_default")]
    pub value: Option<Value>,
    #[serde(deserialize_with = "or_default")]
    pub calculation_order_index: Option<i64>,
    #[serde(deserialize_with = "or_default")]
    pub dirty: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonFieldData {
    pub is_push_button: bool,
    pub is_check_box: bool,
    pub is_radio_button: bool,
    pub selected_annotation_object_numbers: Vec<i64>,
    pub options: Vec<FormOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoiceFieldData {
    pub options: Vec<FormOption>,
    pub selected_indices: Vec<u32>,
    pub is_multi_select: bool,
    pub is_combo: bool,
    pub is_editable: bool,
    pub top_index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignatureFieldData {
    pub signature_contents: Option<String>,
    pub signature_info: Option<SignatureInfo>,
    pub is_signed: bool,
    pub signature_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextFieldData {
    pub value: String,
    pub placeholder: Option<String>,
    pub is_password: bool,
    pub is_rich_text: bool,
    pub alignment: String,
    pub font_size: f64,
    pub font_name: Option<String>,
    pub text_color: Option<String>,
    pub max_length: Option<u32>,
    pub is_multiline: bool,
    pub do_not_scroll: bool,
}

impl Default for TextFieldData {
    fn default() -> Self {
        Self {
            value: String::new(),
            placeholder: None,
            is_password: false,
            is_rich_text: false,
            alignment: "left".to_string(),
            font_size: 12.0,
            font_name: None,
            text_color: None,
            max_length: None,
            is_multiline: false,
            do_not_scroll: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldKind {
    Button(ButtonFieldData),
    Choice(ChoiceFieldData),
    Signature(SignatureFieldData),
    Text(TextFieldData),
    Generic,
}

/// Field behind a form element; its variant follows the element's tag.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub common: FormFieldCommon,
    pub kind: FormFieldKind,
}

impl FormField {
    pub fn from_native(kind: FormKind, payload: &Value) -> Self {
        let common = lenient(payload, "form field");
        let kind = match kind {
            FormKind::Button => FormFieldKind::Button(lenient(payload, "button field")),
            FormKind::Choice => FormFieldKind::Choice(lenient(payload, "choice field")),
            FormKind::Signature => FormFieldKind::Signature(lenient(payload, "signature field")),
            FormKind::Text => FormFieldKind::Text(lenient(payload, "text field")),
            FormKind::Generic => FormFieldKind::Generic,
        };
        Self { common, kind }
    }

    pub fn form_kind(&self) -> FormKind {
        match self.kind {
            FormFieldKind::Button(_) => FormKind::Button,
            FormFieldKind::Choice(_) => FormKind::Choice,
            FormFieldKind::Signature(_) => FormKind::Signature,
            FormFieldKind::Text(_) => FormKind::Text,
            FormFieldKind::Generic => FormKind::Generic,
        }
    }
}
