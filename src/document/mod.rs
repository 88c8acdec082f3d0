mod annotation;
mod form_element;
mod form_field;
mod forms;
mod pdf_document;

pub use annotation::{AnnotationInstance, WIDGET_ANNOTATION_TYPE, create_annotation_instance};
pub use form_element::{
    ButtonElementData, ChoiceElementData, FormElement, FormElementCommon, FormElementKind,
    FormRoute, FormValue, SignatureElementData, TextElementData,
};
pub use form_field::{
    ButtonFieldData, ChoiceFieldData, FormField, FormFieldCommon, FormFieldKind, FormKind,
    FormOption, SignatureFieldData, SignatureInfo, TextFieldData,
};
pub use forms::Forms;
pub(crate) use pdf_document::ensure_page_index;
pub use pdf_document::PdfDocument;
