use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::Value;

use crate::document::ensure_page_index;
use crate::error::{BridgeError, BridgeResult};
use crate::model::{MeasurementValueConfiguration, PdfViewMode, Toolbar};
use crate::native::NativeDocumentManager;
use crate::session::ViewReference;
use crate::transport::Transport;

use super::encode::{decode_bool, decode_result};
use super::types::{Delivery, ViewCommand};

/// Typed view commands routed through the view's transport.
///
/// Cheap to clone; clones share the destroyed flag.
#[derive(Clone)]
pub struct CommandDispatcher {
    transport: Arc<dyn Transport>,
    documents: Arc<dyn NativeDocumentManager>,
    reference: ViewReference,
    destroyed: Arc<AtomicBool>,
}

impl CommandDispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        documents: Arc<dyn NativeDocumentManager>,
        reference: ViewReference,
    ) -> Self {
        Self {
            transport,
            documents,
            reference,
            destroyed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn reference(&self) -> &ViewReference {
        &self.reference
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Flag set by `destroy_view`, for proxies that issue view commands.
    pub(crate) fn destroyed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.destroyed)
    }

    pub async fn enter_annotation_creation_mode(
        &self,
        annotation_type: Option<&str>,
    ) -> BridgeResult<bool> {
        self.awaited_bool(ViewCommand::EnterAnnotationCreationMode {
            annotation_type: annotation_type.map(str::to_string),
        })
        .await
    }

    pub async fn exit_currently_active_mode(&self) -> BridgeResult<bool> {
        self.awaited_bool(ViewCommand::ExitCurrentlyActiveMode).await
    }

    pub async fn clear_selected_annotations(&self) -> BridgeResult<bool> {
        self.awaited_bool(ViewCommand::ClearSelectedAnnotations).await
    }

    pub async fn select_annotations(
        &self,
        annotations: Vec<Value>,
        show_context_menu: bool,
    ) -> BridgeResult<bool> {
        self.awaited_bool(ViewCommand::SelectAnnotations {
            annotations,
            show_context_menu,
        })
        .await
    }

    /// Checks `index` against a freshly queried page count before sending.
    pub async fn set_page_index(&self, index: i64, animated: bool) -> BridgeResult<bool> {
        self.ensure_live()?;
        let target = self.reference.require()?;
        ensure_page_index(self.documents.as_ref(), target, index).await?;
        self.awaited_bool(ViewCommand::SetPageIndex { index, animated })
            .await
    }

    pub async fn set_toolbar(&self, toolbar: &Toolbar) -> BridgeResult<()> {
        self.ensure_live()?;
        self.fire(ViewCommand::SetToolbar {
            toolbar: toolbar.clone(),
        })
        .await
    }

    pub async fn get_toolbar(&self, view_mode: Option<PdfViewMode>) -> BridgeResult<Toolbar> {
        let value = self.awaited(ViewCommand::GetToolbar { view_mode }).await?;
        decode_result(value, "getToolbar")
    }

    pub async fn set_measurement_value_configurations(
        &self,
        configurations: &[MeasurementValueConfiguration],
    ) -> BridgeResult<bool> {
        for configuration in configurations {
            configuration.validate()?;
        }
        self.awaited_bool(ViewCommand::SetMeasurementValueConfigurations {
            configurations: configurations.to_vec(),
        })
        .await
    }

    pub async fn get_measurement_value_configurations(
        &self,
    ) -> BridgeResult<Vec<MeasurementValueConfiguration>> {
        let value = self
            .awaited(ViewCommand::GetMeasurementValueConfigurations)
            .await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        decode_result(value, "getMeasurementValueConfigurations")
    }

    pub async fn get_configuration(&self) -> BridgeResult<Value> {
        let value = self.awaited(ViewCommand::GetConfiguration).await?;
        match value {
            Value::String(text) => serde_json::from_str(&text).map_err(|source| {
                BridgeError::serialization(source, "unexpected result from getConfiguration")
            }),
            other => Ok(other),
        }
    }

    pub async fn set_excluded_annotations(&self, annotation_ids: &[String]) -> BridgeResult<()> {
        self.ensure_live()?;
        self.fire(ViewCommand::SetExcludedAnnotations {
            annotation_ids: annotation_ids.to_vec(),
        })
        .await
    }

    pub async fn set_user_interface_visible(&self, visible: bool) -> BridgeResult<bool> {
        self.awaited_bool(ViewCommand::SetUserInterfaceVisible { visible })
            .await
    }

    /// Later commands on this view fail with [`BridgeError::ViewDestroyed`].
    pub async fn destroy_view(&self) -> BridgeResult<()> {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return Err(BridgeError::ViewDestroyed);
        }
        self.fire(ViewCommand::DestroyView).await
    }

    fn ensure_live(&self) -> BridgeResult<()> {
        if self.is_destroyed() {
            return Err(BridgeError::ViewDestroyed);
        }
        Ok(())
    }

    async fn awaited(&self, command: ViewCommand) -> BridgeResult<Value> {
        debug_assert_eq!(command.id().delivery(), Delivery::Awaited);
        self.ensure_live()?;
        let target = self.reference.require()?;
        tracing::debug!(
            command = command.id().as_str(),
            target = %target,
            transport = %self.transport.kind(),
            "dispatching view command"
        );
        self.transport.dispatch_command(target, &command).await
    }

    async fn awaited_bool(&self, command: ViewCommand) -> BridgeResult<bool> {
        let name = command.id().as_str();
        let value = self.awaited(command).await?;
        decode_bool(value, name)
    }

    async fn fire(&self, command: ViewCommand) -> BridgeResult<()> {
        let target = self.reference.require()?;
        let name = command.id().as_str();
        tracing::debug!(command = name, target = %target, "sending view command");
        if let Err(err) = self.transport.dispatch_command(target, &command).await {
            tracing::warn!(command = name, target = %target, error = %err, "native rejected view command");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use crate::error::BridgeError;
    use crate::model::{
        DefaultToolbarButton, MeasurementPrecision, MeasurementScale,
        MeasurementValueConfiguration, PdfViewMode, ScaleUnitFrom, ScaleUnitTo, Toolbar,
        ToolbarItem, ToolbarItems,
    };
    use crate::native::testing::{
        RecordingDocuments, RecordingEvents, RecordingViewManager, RecordingViewModule,
        SwitchableHandle,
    };
    use crate::session::{SessionId, ViewReference};
    use crate::transport::{DirectTransport, EventHub, LegacyTransport};

    use super::CommandDispatcher;

    struct Direct {
        module: Arc<RecordingViewModule>,
        documents: Arc<RecordingDocuments>,
        dispatcher: CommandDispatcher,
    }

    fn direct(id: i64) -> Direct {
        let module = Arc::new(RecordingViewModule::default());
        let documents = Arc::new(RecordingDocuments::default());
        let transport = DirectTransport::new(
            module.clone(),
            Arc::new(RecordingEvents::default()),
            None,
            EventHub::new(),
        );
        let dispatcher = CommandDispatcher::new(
            Arc::new(transport),
            documents.clone(),
            ViewReference::Session(SessionId::new(id)),
        );
        Direct {
            module,
            documents,
            dispatcher,
        }
    }

    fn legacy(handle: Arc<SwitchableHandle>) -> (Arc<RecordingViewManager>, CommandDispatcher) {
        let manager = Arc::new(RecordingViewManager::default());
        let transport = LegacyTransport::new(
            manager.clone(),
            Arc::new(RecordingEvents::default()),
            EventHub::new(),
        );
        let dispatcher = CommandDispatcher::new(
            Arc::new(transport),
            Arc::new(RecordingDocuments::default()),
            ViewReference::Component(handle),
        );
        (manager, dispatcher)
    }

    fn scale() -> MeasurementScale {
        MeasurementScale {
            unit_from: ScaleUnitFrom::Inch,
            value_from: 1.0,
            unit_to: ScaleUnitTo::Ft,
            value_to: 10.0,
        }
    }

    #[tokio::test]
    async fn set_page_index_rejects_out_of_range_after_querying_page_count() {
        let view = direct(5);
        view.documents.respond("getPageCount", json!(3));

        for index in [-1, 3, 10] {
            let err = view
                .dispatcher
                .set_page_index(index, false)
                .await
                .expect_err("index is out of range");
            assert!(matches!(
                err,
                BridgeError::PageIndexOutOfRange { page_count: 3, .. }
            ));
        }

        assert_eq!(view.documents.methods(), vec!["getPageCount"; 3]);
        assert!(view.module.calls().is_empty());
    }

    #[tokio::test]
    async fn set_page_index_uses_the_fresh_count() {
        let view = direct(5);
        view.documents.respond("getPageCount", json!(3));
        assert!(
            view.dispatcher
                .set_page_index(2, true)
                .await
                .expect("index 2 fits three pages")
        );

        view.documents.respond("getPageCount", json!(2));
        assert!(view.dispatcher.set_page_index(2, true).await.is_err());

        let sent = view.module.calls();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, "setPageIndex");
        assert_eq!(sent[0].args, vec![json!(2), json!(true)]);
    }

    #[tokio::test]
    async fn toolbar_round_trips_through_native_echo() {
        let view = direct(1001);
        let toolbar = Toolbar {
            left_bar_button_items: Some(ToolbarItems {
                buttons: vec![DefaultToolbarButton::Close.into()],
                ..Default::default()
            }),
            right_bar_button_items: Some(ToolbarItems {
                buttons: vec![
                    DefaultToolbarButton::Annotation.into(),
                    ToolbarItem {
                        id: "export".to_string(),
                        image: "ic_export".to_string(),
                        title: Some("Export".to_string()),
                        show_as_action: None,
                    }
                    .into(),
                ],
                view_mode: Some(PdfViewMode::Document),
                animated: Some(true),
            }),
            toolbar_menu_items: None,
        };

        view.dispatcher
            .set_toolbar(&toolbar)
            .await
            .expect("setToolbar");
        let echoed = view
            .dispatcher
            .get_toolbar(Some(PdfViewMode::Document))
            .await
            .expect("getToolbar");

        assert_eq!(echoed, toolbar);
        let calls = view.module.calls();
        assert!(matches!(calls[0].args[0], Value::String(_)));
        assert_eq!(calls[1].args, vec![json!("document")]);
    }

    #[tokio::test]
    async fn fire_and_forget_setters_ignore_native_failures() {
        let view = direct(7);
        view.module
            .fail("setExcludedAnnotations", "E_NATIVE", "view not ready");

        view.dispatcher
            .set_excluded_annotations(&["a".to_string()])
            .await
            .expect("native failure is discarded");
        assert_eq!(view.module.methods(), vec!["setExcludedAnnotations"]);
    }

    #[tokio::test]
    async fn awaited_commands_propagate_native_errors_unchanged() {
        let view = direct(7);
        view.module
            .fail("enterAnnotationCreationMode", "E_MODE", "no toolbar");

        let err = view
            .dispatcher
            .enter_annotation_creation_mode(Some("ink"))
            .await
            .expect_err("native rejects");
        assert!(matches!(
            err,
            BridgeError::Native { code: Some(ref code), ref message } if code == "E_MODE" && message == "no toolbar"
        ));
    }

    #[tokio::test]
    async fn invalid_measurement_is_rejected_before_dispatch() {
        let view = direct(7);
        let mut bad = scale();
        bad.value_to = 0.0;

        let result = view
            .dispatcher
            .set_measurement_value_configurations(&[MeasurementValueConfiguration::new(
                bad,
                MeasurementPrecision::Whole,
            )])
            .await;

        assert!(matches!(result, Err(BridgeError::InvalidMeasurement(_))));
        assert!(view.module.calls().is_empty());
    }

    #[tokio::test]
    async fn measurement_configurations_decode_from_native() {
        let view = direct(7);
        view.module.respond(
            "getMeasurementValueConfigurations",
            json!([{
                "name": "Floor",
                "scale": {"unitFrom": "inch", "valueFrom": 1.0, "unitTo": "ft", "valueTo": 10.0},
                "precision": "whole"
            }]),
        );

        let configurations = view
            .dispatcher
            .get_measurement_value_configurations()
            .await
            .expect("decodes");
        assert_eq!(configurations.len(), 1);
        assert_eq!(configurations[0].scale, scale());
        assert_eq!(configurations[0].name.as_deref(), Some("Floor"));
    }

    #[tokio::test]
    async fn commands_after_destroy_fail_with_view_destroyed() {
        let view = direct(42);
        view.dispatcher.destroy_view().await.expect("destroy");

        assert!(matches!(
            view.dispatcher.clear_selected_annotations().await,
            Err(BridgeError::ViewDestroyed)
        ));
        assert!(matches!(
            view.dispatcher.set_toolbar(&Toolbar::default()).await,
            Err(BridgeError::ViewDestroyed)
        ));
        assert!(matches!(
            view.dispatcher.destroy_view().await,
            Err(BridgeError::ViewDestroyed)
        ));
        assert_eq!(view.module.methods(), vec!["destroyView"]);
    }

    #[tokio::test]
    async fn legacy_dispatch_resolves_handle_per_call_and_fails_fast() {
        let handle = Arc::new(SwitchableHandle::attached(31));
        let (manager, dispatcher) = legacy(handle.clone());

        assert!(dispatcher.set_user_interface_visible(true).await.expect("sent"));
        handle.set(Some(SessionId::new(32)));
        dispatcher
            .exit_currently_active_mode()
            .await
            .expect("sent");
        handle.set(None);
        assert!(matches!(
            dispatcher.clear_selected_annotations().await,
            Err(BridgeError::NativeHandleUnavailable)
        ));

        let targets: Vec<_> = manager.calls().into_iter().map(|call| call.target).collect();
        assert_eq!(targets, vec!["31", "32"]);
    }
}
