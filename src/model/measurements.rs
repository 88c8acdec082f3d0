use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleUnitFrom {
    Inch,
    Mm,
    Cm,
}

impl ScaleUnitFrom {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inch => "inch",
            Self::Mm => "mm",
            Self::Cm => "cm",
        }
    }

    pub fn parse(value: &str) -> BridgeResult<Self> {
        match value {
            "inch" => Ok(Self::Inch),
            "mm" => Ok(Self::Mm),
            "cm" => Ok(Self::Cm),
            other => Err(BridgeError::invalid_measurement(format!(
                "unknown source unit: {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleUnitTo {
    Inch,
    Mm,
    Cm,
    Ft,
    M,
    Yd,
    Km,
    Mi,
}

impl ScaleUnitTo {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inch => "inch",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::Ft => "ft",
            Self::M => "m",
            Self::Yd => "yd",
            Self::Km => "km",
            Self::Mi => "mi",
        }
    }

    pub fn parse(value: &str) -> BridgeResult<Self> {
        match value {
            "inch" => Ok(Self::Inch),
            "mm" => Ok(Self::Mm),
            "cm" => Ok(Self::Cm),
            "ft" => Ok(Self::Ft),
            "m" => Ok(Self::M),
            "yd" => Ok(Self::Yd),
            "km" => Ok(Self::Km),
            "mi" => Ok(Self::Mi),
            other => Err(BridgeError::invalid_measurement(format!(
                "unknown target unit: {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementPrecision {
    #[serde(rename = "oneDP")]
    OneDp,
    #[serde(rename = "twoDP")]
    TwoDp,
    #[serde(rename = "threeDP")]
    ThreeDp,
    #[serde(rename = "fourDP")]
    FourDp,
    #[serde(rename = "whole")]
    Whole,
    #[serde(rename = "1/2")]
    HalvesInch,
    #[serde(rename = "1/4")]
    QuartersInch,
    #[serde(rename = "1/8")]
    EighthsInch,
    #[serde(rename = "1/16")]
    SixteenthsInch,
}

impl MeasurementPrecision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneDp => "oneDP",
            Self::TwoDp => "twoDP",
            Self::ThreeDp => "threeDP",
            Self::FourDp => "fourDP",
            Self::Whole => "whole",
            Self::HalvesInch => "1/2",
            Self::QuartersInch => "1/4",
            Self::EighthsInch => "1/8",
            Self::SixteenthsInch => "1/16",
        }
    }

    pub fn parse(value: &str) -> BridgeResult<Self> {
        match value {
            "oneDP" => Ok(Self::OneDp),
            "twoDP" => Ok(Self::TwoDp),
            "threeDP" => Ok(Self::ThreeDp),
            "fourDP" => Ok(Self::FourDp),
            "whole" => Ok(Self::Whole),
            "1/2" => Ok(Self::HalvesInch),
            "1/4" => Ok(Self::QuartersInch),
            "1/8" => Ok(Self::EighthsInch),
            "1/16" => Ok(Self::SixteenthsInch),
            other => Err(BridgeError::invalid_measurement(format!(
                "unknown precision: {other:?}"
            ))),
        }
    }

    /// Fractional precisions only make sense for imperial target units.
    pub fn is_fractional(self) -> bool {
        matches!(
            self,
            Self::HalvesInch | Self::QuartersInch | Self::EighthsInch | Self::SixteenthsInch
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementScale {
    pub unit_from: ScaleUnitFrom,
    pub value_from: f64,
    pub unit_to: ScaleUnitTo,
    pub value_to: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementValueConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_to_undo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,
    pub scale: MeasurementScale,
    pub precision: MeasurementPrecision,
}

impl MeasurementValueConfiguration {
    pub fn new(scale: MeasurementScale, precision: MeasurementPrecision) -> Self {
        Self {
            name: None,
            add_to_undo: None,
            is_selected: None,
            scale,
            precision,
        }
    }

    pub fn validate(&self) -> BridgeResult<()> {
        let scale = &self.scale;
        for (label, value) in [("valueFrom", scale.value_from), ("valueTo", scale.value_to)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BridgeError::invalid_measurement(format!(
                    "scale {label} must be a positive number, got {value}"
                )));
            }
        }
        if self.precision.is_fractional()
            && !matches!(scale.unit_to, ScaleUnitTo::Inch | ScaleUnitTo::Ft | ScaleUnitTo::Yd)
        {
            return Err(BridgeError::invalid_measurement(format!(
                "precision {} requires an imperial target unit, got {}",
                self.precision.as_str(),
                scale.unit_to.as_str()
            )));
        }
        Ok(())
    }
}
