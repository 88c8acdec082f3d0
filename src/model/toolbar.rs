use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PdfViewMode {
    #[serde(rename = "document")]
    Document,
    #[serde(rename = "thumbnails")]
    Thumbnails,
    #[serde(rename = "documentEditor")]
    DocumentEditor,
}

impl PdfViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Thumbnails => "thumbnails",
            Self::DocumentEditor => "documentEditor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "document" => Some(Self::Document),
            "thumbnails" => Some(Self::Thumbnails),
            "documentEditor" => Some(Self::DocumentEditor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultToolbarButton {
    Close,
    Outline,
    Search,
    Thumbnails,
    DocumentEditor,
    Print,
    OpenIn,
    Email,
    Message,
    Annotation,
    Bookmark,
    Brightness,
    Activity,
    Settings,
    ReaderView,
    AnnotationList,
    Share,
}

impl DefaultToolbarButton {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Close => "closeButtonItem",
            Self::Outline => "outlineButtonItem",
            Self::Search => "searchButtonItem",
            Self::Thumbnails => "thumbnailsButtonItem",
            Self::DocumentEditor => "documentEditorButtonItem",
            Self::Print => "printButtonItem",
            Self::OpenIn => "openInButtonItem",
            Self::Email => "emailButtonItem",
            Self::Message => "messageButtonItem",
            Self::Annotation => "annotationButtonItem",
            Self::Bookmark => "bookmarkButtonItem",
            Self::Brightness => "brightnessButtonItem",
            Self::Activity => "activityButtonItem",
            Self::Settings => "settingsButtonItem",
            Self::ReaderView => "readerViewButtonItem",
            Self::AnnotationList => "annotationListButtonItem",
            Self::Share => "shareButtonItem",
        }
    }
}

/// App-defined toolbar button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarItem {
    pub id: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_as_action: Option<bool>,
}

/// Built-in buttons travel as their name, custom ones as an object.
/// Unknown names are kept so newer native SDKs round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolbarButton {
    Default(String),
    Custom(ToolbarItem),
}

impl From<DefaultToolbarButton> for ToolbarButton {
    fn from(button: DefaultToolbarButton) -> Self {
        Self::Default(button.as_str().to_string())
    }
}

impl From<ToolbarItem> for ToolbarButton {
    fn from(item: ToolbarItem) -> Self {
        Self::Custom(item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarItems {
    #[serde(default)]
    pub buttons: Vec<ToolbarButton>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_mode: Option<PdfViewMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toolbar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_bar_button_items: Option<ToolbarItems>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_bar_button_items: Option<ToolbarItems>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolbar_menu_items: Option<ToolbarItems>,
}
