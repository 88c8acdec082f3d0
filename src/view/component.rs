use std::sync::Arc;

use serde_json::Value;

use crate::architecture::{ArchitectureCache, ArchitectureInfo};
use crate::command::CommandDispatcher;
use crate::document::PdfDocument;
use crate::error::BridgeResult;
use crate::model::{MeasurementValueConfiguration, PdfViewMode, Toolbar};
use crate::native::{NativeDocumentManager, NativeHandleResolver};
use crate::normalize::{RenderedView, ViewProps, render_native};
use crate::notification::NotificationCenter;
use crate::session::{LazySessionId, SessionId, ViewReference, ViewRegistry};
use crate::transport::{Transport, TransportKind};

use super::bindings::NativeBindings;

/// Architecture decision shared by every [`NutrientView`].
pub static VIEW_ARCHITECTURE: ArchitectureCache = ArchitectureCache::new();

/// Registration of a view in a native-facing registry, removed by the
/// identifier it was made under.
struct PeerRegistration {
    id: SessionId,
    detach: Box<dyn FnOnce() -> bool + Send>,
}

/// One mounted PDF view.
///
/// Owns the session identity, the transport picked for the running
/// architecture and the lazily created document and notification proxies.
pub struct NutrientView {
    props: ViewProps,
    session: LazySessionId,
    architecture: ArchitectureInfo,
    reference: ViewReference,
    transport: Arc<dyn Transport>,
    documents: Arc<dyn NativeDocumentManager>,
    commands: CommandDispatcher,
    document: Option<PdfDocument>,
    notification_center: Option<NotificationCenter>,
    peer: Option<PeerRegistration>,
}

impl NutrientView {
    /// `component` locates the platform handle when the legacy path is used.
    pub fn mount(
        props: ViewProps,
        bindings: &NativeBindings,
        component: Arc<dyn NativeHandleResolver>,
    ) -> Self {
        Self::mount_with(&VIEW_ARCHITECTURE, props, bindings, component, LazySessionId::new())
    }

    /// Mounts again under an identifier that survived a fast refresh.
    pub fn recover(
        session: SessionId,
        props: ViewProps,
        bindings: &NativeBindings,
        component: Arc<dyn NativeHandleResolver>,
    ) -> Self {
        Self::mount_with(
            &VIEW_ARCHITECTURE,
            props,
            bindings,
            component,
            LazySessionId::with_value(session),
        )
    }

    pub fn mount_with(
        cache: &ArchitectureCache,
        props: ViewProps,
        bindings: &NativeBindings,
        component: Arc<dyn NativeHandleResolver>,
        session: LazySessionId,
    ) -> Self {
        let architecture = cache.resolve(bindings.flags.as_ref(), || {
            bindings.new_architecture_component
        });
        let reference = if architecture.is_new_architecture {
            ViewReference::Session(session.get())
        } else {
            ViewReference::Component(component)
        };
        let transport = bindings.transport_for(architecture);
        tracing::info!(
            transport = transport.kind().as_str(),
            reference = ?reference,
            "mounted nutrient view"
        );
        let commands = CommandDispatcher::new(
            transport.clone(),
            bindings.documents.clone(),
            reference.clone(),
        );

        Self {
            props,
            session,
            architecture,
            reference,
            transport,
            documents: bindings.documents.clone(),
            commands,
            document: None,
            notification_center: None,
            peer: None,
        }
    }

    pub fn architecture(&self) -> ArchitectureInfo {
        self.architecture
    }

    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// Identifier native code addresses this view by; `None` while a legacy
    /// view has no handle.
    pub fn session_id(&self) -> Option<SessionId> {
        self.reference.resolve()
    }

    pub fn reference(&self) -> &ViewReference {
        &self.reference
    }

    pub fn props(&self) -> &ViewProps {
        &self.props
    }

    pub fn set_props(&mut self, props: ViewProps) {
        self.props = props;
    }

    pub fn commands(&self) -> &CommandDispatcher {
        &self.commands
    }

    pub fn render(&self) -> RenderedView {
        let session = match &self.reference {
            ViewReference::Session(id) => *id,
            ViewReference::Component(_) => self.session.get(),
        };
        render_native(&self.props, session, self.architecture.is_new_architecture)
    }

    /// Document proxy, created on first access.
    pub fn get_document(&mut self) -> &mut PdfDocument {
        let reference = &self.reference;
        let documents = &self.documents;
        let commands = &self.commands;
        self.document.get_or_insert_with(|| {
            PdfDocument::new(reference.clone(), documents.clone())
                .with_destroyed_flag(commands.destroyed_flag())
        })
    }

    /// Event router, created on first access.
    pub fn get_notification_center(&mut self) -> &mut NotificationCenter {
        let reference = &self.reference;
        let transport = &self.transport;
        self.notification_center
            .get_or_insert_with(|| NotificationCenter::new(reference.clone(), transport.clone()))
    }

    /// Publishes this view to `registry` under its identifier, replacing an
    /// earlier registration of this view.
    pub fn attach_peer<V: Send + 'static>(
        &mut self,
        registry: &Arc<ViewRegistry<V>>,
        view: V,
    ) -> BridgeResult<SessionId> {
        let id = self.reference.require()?;
        self.detach_peer();
        let token = registry.register(id, view);
        let registry = Arc::clone(registry);
        self.peer = Some(PeerRegistration {
            id,
            detach: Box::new(move || registry.unregister(id, token)),
        });
        Ok(id)
    }

    /// Identifier the peer was registered under, if attached.
    pub fn peer_id(&self) -> Option<SessionId> {
        self.peer.as_ref().map(|peer| peer.id)
    }

    /// Removes this view's own registration; a newer one under the same
    /// identifier is left in place.
    pub fn detach_peer(&mut self) -> bool {
        let Some(peer) = self.peer.take() else {
            return false;
        };
        let removed = (peer.detach)();
        tracing::debug!(session = %peer.id, removed, "detached native peer");
        removed
    }

    /// Unregisters the peer and tears down event subscriptions. The view
    /// stays usable for commands.
    pub async fn unmount(&mut self) -> BridgeResult<()> {
        self.detach_peer();
        if let Some(center) = self.notification_center.as_mut() {
            center.unsubscribe_all_events().await?;
        }
        tracing::debug!(reference = ?self.reference, "unmounted nutrient view");
        Ok(())
    }

    pub async fn enter_annotation_creation_mode(
        &self,
        annotation_type: Option<&str>,
    ) -> BridgeResult<bool> {
        self.commands
            .enter_annotation_creation_mode(annotation_type)
            .await
    }

    pub async fn exit_currently_active_mode(&self) -> BridgeResult<bool> {
        self.commands.exit_currently_active_mode().await
    }

    pub async fn clear_selected_annotations(&self) -> BridgeResult<bool> {
        self.commands.clear_selected_annotations().await
    }

    pub async fn select_annotations(
        &self,
        annotations: Vec<Value>,
        show_context_menu: bool,
    ) -> BridgeResult<bool> {
        self.commands
            .select_annotations(annotations, show_context_menu)
            .await
    }

    pub async fn set_page_index(&self, index: i64, animated: bool) -> BridgeResult<bool> {
        self.commands.set_page_index(index, animated).await
    }

    pub async fn set_toolbar(&self, toolbar: &Toolbar) -> BridgeResult<()> {
        self.commands.set_toolbar(toolbar).await
    }

    pub async fn get_toolbar(&self, view_mode: Option<PdfViewMode>) -> BridgeResult<Toolbar> {
        self.commands.get_toolbar(view_mode).await
    }

    pub async fn set_measurement_value_configurations(
        &self,
        configurations: &[MeasurementValueConfiguration],
    ) -> BridgeResult<bool> {
        self.commands
            .set_measurement_value_configurations(configurations)
            .await
    }

    pub async fn get_measurement_value_configurations(
        &self,
    ) -> BridgeResult<Vec<MeasurementValueConfiguration>> {
        self.commands.get_measurement_value_configurations().await
    }

    pub async fn get_configuration(&self) -> BridgeResult<Value> {
        self.commands.get_configuration().await
    }

    pub async fn set_excluded_annotations(&self, annotation_ids: &[String]) -> BridgeResult<()> {
        self.commands.set_excluded_annotations(annotation_ids).await
    }

    pub async fn set_user_interface_visible(&self, visible: bool) -> BridgeResult<bool> {
        self.commands.set_user_interface_visible(visible).await
    }

    pub async fn destroy_view(&self) -> BridgeResult<()> {
        self.commands.destroy_view().await
    }
}
