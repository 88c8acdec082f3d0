use serde_json::Value;

use crate::model::{MeasurementValueConfiguration, PdfViewMode, Toolbar};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    EnterAnnotationCreationMode {
        annotation_type: Option<String>,
    },
    ExitCurrentlyActiveMode,
    ClearSelectedAnnotations,
    SelectAnnotations {
        annotations: Vec<Value>,
        show_context_menu: bool,
    },
    SetPageIndex {
        index: i64,
        animated: bool,
    },
    SetToolbar {
        toolbar: Toolbar,
    },
    GetToolbar {
        view_mode: Option<PdfViewMode>,
    },
    SetMeasurementValueConfigurations {
        configurations: Vec<MeasurementValueConfiguration>,
    },
    GetMeasurementValueConfigurations,
    GetConfiguration,
    SetExcludedAnnotations {
        annotation_ids: Vec<String>,
    },
    SetUserInterfaceVisible {
        visible: bool,
    },
    DestroyView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    EnterAnnotationCreationMode,
    ExitCurrentlyActiveMode,
    ClearSelectedAnnotations,
    SelectAnnotations,
    SetPageIndex,
    SetToolbar,
    GetToolbar,
    SetMeasurementValueConfigurations,
    GetMeasurementValueConfigurations,
    GetConfiguration,
    SetExcludedAnnotations,
    SetUserInterfaceVisible,
    DestroyView,
}

impl CommandId {
    /// Method name on both native transports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EnterAnnotationCreationMode => "enterAnnotationCreationMode",
            Self::ExitCurrentlyActiveMode => "exitCurrentlyActiveMode",
            Self::ClearSelectedAnnotations => "clearSelectedAnnotations",
            Self::SelectAnnotations => "selectAnnotations",
            Self::SetPageIndex => "setPageIndex",
            Self::SetToolbar => "setToolbar",
            Self::GetToolbar => "getToolbar",
            Self::SetMeasurementValueConfigurations => "setMeasurementValueConfigurations",
            Self::GetMeasurementValueConfigurations => "getMeasurementValueConfigurations",
            Self::GetConfiguration => "getConfiguration",
            Self::SetExcludedAnnotations => "setExcludedAnnotations",
            Self::SetUserInterfaceVisible => "setUserInterfaceVisible",
            Self::DestroyView => "destroyView",
        }
    }

    pub fn delivery(self) -> Delivery {
        match self {
            Self::SetToolbar | Self::SetExcludedAnnotations | Self::DestroyView => {
                Delivery::FireAndForget
            }
            _ => Delivery::Awaited,
        }
    }
}

impl ViewCommand {
    pub fn id(&self) -> CommandId {
        match self {
            Self::EnterAnnotationCreationMode { .. } => CommandId::EnterAnnotationCreationMode,
            Self::ExitCurrentlyActiveMode => CommandId::ExitCurrentlyActiveMode,
            Self::ClearSelectedAnnotations => CommandId::ClearSelectedAnnotations,
            Self::SelectAnnotations { .. } => CommandId::SelectAnnotations,
            Self::SetPageIndex { .. } => CommandId::SetPageIndex,
            Self::SetToolbar { .. } => CommandId::SetToolbar,
            Self::GetToolbar { .. } => CommandId::GetToolbar,
            Self::SetMeasurementValueConfigurations { .. } => {
                CommandId::SetMeasurementValueConfigurations
            }
            Self::GetMeasurementValueConfigurations => CommandId::GetMeasurementValueConfigurations,
            Self::GetConfiguration => CommandId::GetConfiguration,
            Self::SetExcludedAnnotations { .. } => CommandId::SetExcludedAnnotations,
            Self::SetUserInterfaceVisible { .. } => CommandId::SetUserInterfaceVisible,
            Self::DestroyView => CommandId::DestroyView,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Caller awaits the native result.
    Awaited,
    /// Native result is discarded; only local preconditions can fail.
    FireAndForget,
}

impl Delivery {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Awaited => "awaited",
            Self::FireAndForget => "fire-and-forget",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Bool,
    Integer,
    String,
    /// Structured value; a single JSON string on the direct transport.
    Json,
}

impl ArgKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: CommandId,
    pub title: &'static str,
    pub args: &'static [ArgSpec],
}

impl CommandSpec {
    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }

    pub fn delivery(&self) -> Delivery {
        self.id.delivery()
    }
}
