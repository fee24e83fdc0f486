use serde::{Deserialize, Serialize};

use crate::quantity::TypedValue;

/// Device performance as measured
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformedMeasurements {
    /// JV measurements, one per scan
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub jv: Vec<JvResult>,
    /// External quantum efficiency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eqe: Option<EqeResult>,
    /// Maximum power point tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stabilised: Option<StabilisedPerformance>,
}

impl PerformedMeasurements {
    /// True when nothing was measured
    pub fn is_empty(&self) -> bool {
        self.jv.is_empty() && self.eqe.is_none() && self.stabilised.is_none()
    }
}

/// One current-voltage scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JvResult {
    /// `Forward` or `Reverse`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_direction: Option<String>,
    /// Open-circuit voltage in V
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub voc: TypedValue,
    /// Short-circuit current density in mA/cm²
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub jsc: TypedValue,
    /// Fill factor
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub fill_factor: TypedValue,
    /// Power conversion efficiency in %
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub pce: TypedValue,
    /// Illumination in mW/cm²
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub light_intensity: TypedValue,
}

/// EQE summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EqeResult {
    /// Jsc integrated over the EQE spectrum
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub integrated_jsc: TypedValue,
    /// Whether a light bias was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_bias: Option<bool>,
}

/// Stabilised efficiency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilisedPerformance {
    /// Stabilised PCE in %
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub pce: TypedValue,
    /// Tracking time in min
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub measurement_time: TypedValue,
    /// Tracking procedure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedure: Option<String>,
}
