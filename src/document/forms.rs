use std::sync::Arc;

use serde_json::Value;

use crate::command::decode_bool;
use crate::error::{BridgeError, BridgeResult};
use crate::native::NativeDocumentManager;
use crate::session::ViewReference;

use super::form_element::{FormElement, FormRoute, FormValue};

/// Form access for one view.
#[derive(Clone, Debug)]
pub struct Forms {
    route: FormRoute,
}

impl Forms {
    pub fn new(reference: ViewReference, documents: Arc<dyn NativeDocumentManager>) -> Self {
        Self {
            route: FormRoute::new(reference, documents),
        }
    }

    /// Every form element of the document, each carrying this view's route.
    pub async fn get_form_elements(&self) -> BridgeResult<Vec<FormElement>> {
        let payload = self.route.invoke("getFormElements", Vec::new()).await?;
        let elements = match payload {
            Value::Array(elements) => elements,
            Value::Null => Vec::new(),
            other => {
                return Err(BridgeError::native(
                    Some("INVALID_RESULT"),
                    format!("getFormElements resolved with {other} instead of an array"),
                ));
            }
        };
        Ok(elements
            .iter()
            .map(|element| FormElement::from_native(element, Some(self.route.clone())))
            .collect())
    }

    pub async fn update_button_form_field_value(
        &self,
        fully_qualified_name: &str,
        selected: bool,
    ) -> BridgeResult<bool> {
        self.update_form_field_value(fully_qualified_name, FormValue::Button(selected))
            .await
    }

    pub async fn update_choice_form_field_value(
        &self,
        fully_qualified_name: &str,
        selected_indices: Vec<u32>,
    ) -> BridgeResult<bool> {
        self.update_form_field_value(fully_qualified_name, FormValue::Choice(selected_indices))
            .await
    }

    pub async fn update_text_form_field_value(
        &self,
        fully_qualified_name: &str,
        value: &str,
    ) -> BridgeResult<bool> {
        self.update_form_field_value(fully_qualified_name, FormValue::Text(value.to_string()))
            .await
    }

    async fn update_form_field_value(
        &self,
        fully_qualified_name: &str,
        value: FormValue,
    ) -> BridgeResult<bool> {
        let result = self
            .route
            .invoke(
                "updateFormFieldValue",
                vec![Value::String(fully_qualified_name.to_string()), value.to_value()],
            )
            .await?;
        decode_bool(result, "updateFormFieldValue")
    }
}
