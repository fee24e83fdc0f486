//! Transcoder configuration shared by the decoder and the encoder.
//!
//! Both directions take the same [`TranscoderConfig`], so the process-name
//! vocabularies that classify steps exist in exactly one place. Every field
//! has a default; a TOML file only needs to name what it overrides:
//!
//! ```toml
//! padding = "repeat-last"
//! unclassified_concentrations = "keep"
//!
//! [vocabulary]
//! version = 2
//! liquid = ["Spin-coating", "Slot-die coating"]
//!
//! [aliases]
//! "Deposition. Solvent mixing ratios" = "Deposition. Solvents. Mixing ratios"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::quantity::UnclassifiedPolicy;
use crate::table::PaddingPolicy;

/// Current version of the built-in vocabulary
pub const VOCABULARY_VERSION: u32 = 1;

/// How a deposition method is routed to an extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepClass {
    /// Solution-based processes
    Liquid,
    /// Vapour and vacuum processes
    GasPhase,
    /// Surface treatments without material deposition
    SurfaceTreatment,
    /// Not in any vocabulary
    Unrecognized,
}

/// Photoabsorber family, chosen by exact material name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsorberKind {
    /// Metal halide perovskites
    Perovskite,
    /// Crystalline or amorphous silicon
    Silicon,
    /// CIGS-type chalcopyrites
    Chalcopyrite,
    /// Any other absorber
    Generic,
}

/// Versioned process and material vocabularies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessVocabulary {
    /// Vocabulary version, bumped whenever a list changes
    pub version: u32,
    /// Liquid-based deposition methods
    pub liquid: Vec<String>,
    /// Gas-phase deposition methods
    pub gas_phase: Vec<String>,
    /// Surface treatments
    pub surface_treatment: Vec<String>,
    /// Material names of perovskite absorbers
    pub perovskite: Vec<String>,
    /// Material names of silicon absorbers
    pub silicon: Vec<String>,
    /// Material names of chalcopyrite absorbers
    pub chalcopyrite: Vec<String>,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Default for ProcessVocabulary {
    fn default() -> Self {
        Self {
            version: VOCABULARY_VERSION,
            liquid: owned(&[
                "Spin-coating",
                "Dip-coating",
                "Blade-coating",
                "Doctor blading",
                "Slot-die coating",
                "Spray-coating",
                "Spray-pyrolysis",
                "Bar coating",
                "Meniscus coating",
                "Drop-casting",
                "Inkjet printing",
                "Screen printing",
                "Gravure printing",
                "CBD",
                "Chemical bath deposition",
                "Electrodeposition",
                "Hydrothermal",
                "Sol-gel",
                "SILAR",
            ]),
            gas_phase: owned(&[
                "Evaporation",
                "Thermal evaporation",
                "Co-evaporation",
                "E-beam evaporation",
                "Sputtering",
                "DC sputtering",
                "RF sputtering",
                "Magnetron sputtering",
                "CVD",
                "PECVD",
                "LPCVD",
                "MOCVD",
                "Hot-wire CVD",
                "ALD",
                "Spatial ALD",
                "PLD",
                "Pulsed laser deposition",
                "Close space sublimation",
                "Vapour transport deposition",
            ]),
            surface_treatment: owned(&[
                "UV-ozone",
                "Plasma",
                "O2 plasma",
                "Corona treatment",
                "Self-assembled monolayer",
                "Surface treatment",
                "Passivation",
            ]),
            perovskite: owned(&["Perovskite"]),
            silicon: owned(&["Silicon", "Si", "c-Si", "a-Si", "a-Si:H", "nc-Si", "poly-Si"]),
            chalcopyrite: owned(&["Chalcopyrite", "CIGS", "CIS", "CIGSe", "CIGSSe", "CuInSe2"]),
        }
    }
}

fn contains_name(names: &[String], name: &str) -> bool {
    let name = name.trim();
    names.iter().any(|known| known.eq_ignore_ascii_case(name))
}

impl ProcessVocabulary {
    /// Classify a deposition method name (case-insensitive, exact)
    pub fn classify_method(&self, method: &str) -> StepClass {
        if contains_name(&self.liquid, method) {
            StepClass::Liquid
        } else if contains_name(&self.gas_phase, method) {
            StepClass::GasPhase
        } else if contains_name(&self.surface_treatment, method) {
            StepClass::SurfaceTreatment
        } else {
            StepClass::Unrecognized
        }
    }

    /// Absorber family of a material name, `None` when it is no known absorber
    pub fn absorber_kind(&self, material: &str) -> Option<AbsorberKind> {
        if contains_name(&self.perovskite, material) {
            Some(AbsorberKind::Perovskite)
        } else if contains_name(&self.silicon, material) {
            Some(AbsorberKind::Silicon)
        } else if contains_name(&self.chalcopyrite, material) {
            Some(AbsorberKind::Chalcopyrite)
        } else {
            None
        }
    }
}

/// Settings for decoding and encoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscoderConfig {
    /// Process and material vocabularies
    pub vocabulary: ProcessVocabulary,
    /// Padding applied when sibling lists are ragged
    pub padding: PaddingPolicy,
    /// Handling of concentrations with unknown dimensionality
    pub unclassified_concentrations: UnclassifiedPolicy,
    /// Legacy label fragments mapped to canonical label paths
    pub aliases: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_methods() {
        let vocabulary = ProcessVocabulary::default();
        assert_eq!(vocabulary.classify_method("spin-coating"), StepClass::Liquid);
        assert_eq!(vocabulary.classify_method(" Co-evaporation "), StepClass::GasPhase);
        assert_eq!(vocabulary.classify_method("UV-ozone"), StepClass::SurfaceTreatment);
        assert_eq!(vocabulary.classify_method("Lamination"), StepClass::Unrecognized);
    }

    #[test]
    fn test_absorber_kinds() {
        let vocabulary = ProcessVocabulary::default();
        assert_eq!(vocabulary.absorber_kind("Perovskite"), Some(AbsorberKind::Perovskite));
        assert_eq!(vocabulary.absorber_kind("c-Si"), Some(AbsorberKind::Silicon));
        assert_eq!(vocabulary.absorber_kind("CIGS"), Some(AbsorberKind::Chalcopyrite));
        assert_eq!(vocabulary.absorber_kind("CdTe"), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: TranscoderConfig = toml::from_str(
            r#"
            padding = "fill-unknown"

            [vocabulary]
            version = 7
            liquid = ["Spin-coating", "Lamination"]
            "#,
        )
        .unwrap();

        assert_eq!(config.padding, PaddingPolicy::FillUnknown);
        assert_eq!(config.unclassified_concentrations, UnclassifiedPolicy::Keep);
        assert_eq!(config.vocabulary.version, 7);
        assert_eq!(config.vocabulary.classify_method("Lamination"), StepClass::Liquid);
        assert_eq!(config.vocabulary.classify_method("ALD"), StepClass::GasPhase);
    }
}
