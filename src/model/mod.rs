mod measurements;
mod toolbar;

pub use measurements::{
    MeasurementPrecision, MeasurementScale, MeasurementValueConfiguration, ScaleUnitFrom,
    ScaleUnitTo,
};
pub use toolbar::{DefaultToolbarButton, PdfViewMode, Toolbar, ToolbarButton, ToolbarItem, ToolbarItems};
