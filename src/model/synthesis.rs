use serde::{Deserialize, Serialize};

use super::{QuenchingSolvent, ReactionComponent, Solvent};
use crate::quantity::TypedValue;

/// Everything done to form one layer, in chronological order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Synthesis {
    /// Cleaning, always performed before any step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning: Option<Cleaning>,
    /// Processing steps
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<ProcessingStep>,
}

impl Synthesis {
    /// True when there is neither a cleaning nor any step
    pub fn is_empty(&self) -> bool {
        self.cleaning.is_none() && self.steps.is_empty()
    }

    /// Number of steps including the leading cleaning
    pub fn step_count(&self) -> usize {
        self.steps.len() + usize::from(self.cleaning.is_some())
    }
}

/// Substrate cleaning actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cleaning {
    /// Cleaning actions in order (`Soap`, `Ultrasonic bath`, `UV-ozone`, ...)
    pub procedures: Vec<String>,
}

/// One discrete fabrication action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingStep {
    /// Method as declared (`Spin-coating`, `Evaporation`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Atmosphere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<String>,
    /// Pressure
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub pressure: TypedValue,
    /// Relative humidity
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub humidity: TypedValue,
    /// Temperature
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub temperature: TypedValue,
    /// Duration
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub duration: TypedValue,
    /// Variant-specific data
    pub details: StepDetails,
}

impl ProcessingStep {
    /// A step of the given method and variant with no conditions set
    pub fn new(method: Option<String>, details: StepDetails) -> Self {
        Self {
            method,
            details,
            ..Default::default()
        }
    }

    /// True for thermal and solvent annealing
    pub fn is_annealing(&self) -> bool {
        matches!(
            self.details,
            StepDetails::ThermalAnnealing | StepDetails::SolventAnnealing(_)
        )
    }

    /// True when any shared condition is known
    pub fn has_conditions(&self) -> bool {
        self.atmosphere.is_some()
            || self.pressure.is_known()
            || self.humidity.is_known()
            || self.temperature.is_known()
            || self.duration.is_known()
    }
}

/// Variant of a processing step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepDetails {
    /// Solution-based deposition
    LiquidSynthesis(LiquidSynthesis),
    /// Vapour or vacuum deposition
    GasPhaseSynthesis(GasPhaseSynthesis),
    /// Heating after a step
    ThermalAnnealing,
    /// Exposure to solvent vapour after a step
    SolventAnnealing(SolventAnnealing),
    /// Surface treatment without deposition
    SurfaceTreatment,
    /// Method not found in any vocabulary
    #[default]
    Unclassified,
}

impl StepDetails {
    /// Short variant name for logs and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            StepDetails::LiquidSynthesis(_) => "liquid",
            StepDetails::GasPhaseSynthesis(_) => "gas-phase",
            StepDetails::ThermalAnnealing => "thermal annealing",
            StepDetails::SolventAnnealing(_) => "solvent annealing",
            StepDetails::SurfaceTreatment => "surface treatment",
            StepDetails::Unclassified => "unclassified",
        }
    }
}

/// Solution-based deposition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquidSynthesis {
    /// Solvents of the precursor solution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub solvents: Vec<Solvent>,
    /// Dissolved compounds
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reaction_components: Vec<ReactionComponent>,
    /// Antisolvent quenching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quenching: Option<QuenchingSolvent>,
}

/// Vapour or vacuum deposition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasPhaseSynthesis {
    /// Sources and precursors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reaction_components: Vec<ReactionComponent>,
    /// Deposition rate
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub deposition_rate: TypedValue,
    /// Source temperature
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub source_temperature: TypedValue,
}

/// Solvent vapour annealing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolventAnnealing {
    /// Solvents of the annealing atmosphere
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub solvents: Vec<Solvent>,
}
