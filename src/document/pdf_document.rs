use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;

use crate::command::{decode_bool, decode_result};
use crate::error::{BridgeError, BridgeResult};
use crate::native::NativeDocumentManager;
use crate::session::{SessionId, ViewReference};

use super::annotation::{AnnotationInstance, create_annotation_instance};
use super::form_element::FormRoute;
use super::forms::Forms;

/// Fails unless `index` addresses a page of the currently loaded document.
///
/// The page count is fetched on every call.
pub(crate) async fn ensure_page_index(
    documents: &dyn NativeDocumentManager,
    target: SessionId,
    index: i64,
) -> BridgeResult<()> {
    let page_count: u32 = decode_result(
        documents.invoke(target, "getPageCount", Vec::new()).await?,
        "getPageCount",
    )?;
    if index < 0 || index >= i64::from(page_count) {
        return Err(BridgeError::PageIndexOutOfRange { index, page_count });
    }
    Ok(())
}

/// Document proxy of one view.
#[derive(Debug)]
pub struct PdfDocument {
    route: FormRoute,
    forms: Option<Forms>,
    destroyed: Arc<AtomicBool>,
}

impl PdfDocument {
    pub fn new(reference: ViewReference, documents: Arc<dyn NativeDocumentManager>) -> Self {
        Self {
            route: FormRoute::new(reference, documents),
            forms: None,
            destroyed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shares the owning view's destroyed flag so view commands issued here
    /// are rejected after `destroy_view`.
    pub(crate) fn with_destroyed_flag(mut self, destroyed: Arc<AtomicBool>) -> Self {
        self.destroyed = destroyed;
        self
    }

    /// Identifier used for document-manager calls. `None` while a legacy view
    /// has no native handle.
    pub fn get_ref(&self) -> Option<SessionId> {
        self.route.reference.resolve()
    }

    /// Form proxy, created on first access.
    pub fn forms(&mut self) -> &Forms {
        let route = &self.route;
        self.forms
            .get_or_insert_with(|| Forms::new(route.reference.clone(), route.documents.clone()))
    }

    pub async fn get_document_id(&self) -> BridgeResult<String> {
        let id = self.route.invoke("getDocumentId", Vec::new()).await?;
        decode_result(id, "getDocumentId")
    }

    pub async fn get_page_count(&self) -> BridgeResult<u32> {
        let count = self.route.invoke("getPageCount", Vec::new()).await?;
        decode_result(count, "getPageCount")
    }

    pub async fn invalidate_cache_for_page(&self, page_index: u32) -> BridgeResult<bool> {
        self.call_bool("invalidateCacheForPage", vec![Value::from(page_index)])
            .await
    }

    pub async fn invalidate_cache(&self) -> BridgeResult<bool> {
        self.call_bool("invalidateCache", Vec::new()).await
    }

    pub async fn save(&self) -> BridgeResult<bool> {
        self.call_bool("save", Vec::new()).await
    }

    /// Unsaved changes as Instant JSON.
    pub async fn get_all_unsaved_annotations(&self) -> BridgeResult<Value> {
        self.route.invoke("getAllUnsavedAnnotations", Vec::new()).await
    }

    pub async fn get_annotations(
        &self,
        annotation_type: Option<&str>,
    ) -> BridgeResult<Vec<AnnotationInstance>> {
        let annotations = self
            .route
            .invoke("getAnnotations", vec![optional_string(annotation_type)])
            .await?;
        self.annotation_list(annotations, "getAnnotations")
    }

    pub async fn get_annotations_for_page(
        &self,
        page_index: u32,
        annotation_type: Option<&str>,
    ) -> BridgeResult<Vec<AnnotationInstance>> {
        let annotations = self
            .route
            .invoke(
                "getAnnotationsForPage",
                vec![Value::from(page_index), optional_string(annotation_type)],
            )
            .await?;
        self.annotation_list(annotations, "getAnnotationsForPage")
    }

    pub async fn add_annotations(&self, instant_json: Value) -> BridgeResult<bool> {
        self.call_bool("addAnnotations", vec![instant_json]).await
    }

    pub async fn remove_annotations(&self, annotations: Vec<Value>) -> BridgeResult<bool> {
        self.call_bool("removeAnnotations", vec![Value::Array(annotations)])
            .await
    }

    pub async fn import_xfdf(&self, file_path: &str) -> BridgeResult<bool> {
        self.call_bool("importXFDF", vec![Value::String(file_path.to_string())])
            .await
    }

    /// Native result describing the written file.
    pub async fn export_xfdf(&self, file_path: &str) -> BridgeResult<Value> {
        self.route
            .invoke("exportXFDF", vec![Value::String(file_path.to_string())])
            .await
    }

    pub async fn set_page_index(&self, index: i64, animated: bool) -> BridgeResult<bool> {
        if self.destroyed.load(Ordering::SeqCst) {
            return Err(BridgeError::ViewDestroyed);
        }
        let target = self.route.target()?;
        ensure_page_index(self.route.documents.as_ref(), target, index).await?;
        self.call_bool("setPageIndex", vec![Value::from(index), Value::Bool(animated)])
            .await
    }

    async fn call_bool(&self, method: &str, args: Vec<Value>) -> BridgeResult<bool> {
        let result = self.route.invoke(method, args).await?;
        decode_bool(result, method)
    }

    fn annotation_list(&self, payload: Value, method: &str) -> BridgeResult<Vec<AnnotationInstance>> {
        let payload = match payload {
            Value::String(raw) => serde_json::from_str(&raw).map_err(|source| {
                BridgeError::serialization(source, format!("failed to decode {method} result"))
            })?,
            other => other,
        };
        match payload {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => Ok(items
                .iter()
                .map(|item| create_annotation_instance(item, Some(&self.route)))
                .collect()),
            other => Err(BridgeError::native(
                Some("INVALID_RESULT"),
                format!("{method} resolved with {other} instead of an array"),
            )),
        }
    }
}

fn optional_string(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |value| Value::String(value.to_string()))
}
