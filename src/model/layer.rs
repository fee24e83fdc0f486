use serde::{Deserialize, Serialize};

use super::{Additive, Synthesis};
use crate::quantity::TypedValue;

/// Role of a layer in the device stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Functionality {
    /// Carrier substrate (glass, foil)
    Substrate,
    /// Electron transport layer
    ElectronTransport,
    /// Light absorbing layer
    Photoabsorber,
    /// Hole transport layer
    HoleTransport,
    /// Front or back contact
    Contact,
    /// Buffer, interlayer or anything unlisted
    Other,
}

impl Functionality {
    /// Lenient parse of a curated functionality cell
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        if lower.contains("substrate") {
            Functionality::Substrate
        } else if lower.contains("electron") || lower == "etl" {
            Functionality::ElectronTransport
        } else if lower.contains("hole") || lower == "htl" {
            Functionality::HoleTransport
        } else if lower.contains("absorber")
            || lower.contains("photoactive")
            || lower.contains("active layer")
        {
            Functionality::Photoabsorber
        } else if lower.contains("contact") || lower.contains("electrode") {
            Functionality::Contact
        } else {
            Functionality::Other
        }
    }

    /// Label written back into the flat table
    pub fn label(&self) -> &'static str {
        match self {
            Functionality::Substrate => "Substrate",
            Functionality::ElectronTransport => "Electron transport layer",
            Functionality::Photoabsorber => "Photoabsorber",
            Functionality::HoleTransport => "Hole transport layer",
            Functionality::Contact => "Contact",
            Functionality::Other => "Other",
        }
    }
}

/// One material layer of the stack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layer {
    /// 1-based stack position; sublayers of one position share it
    pub position: usize,
    /// Material name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Role in the device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functionality: Option<Functionality>,
    /// Thickness in nm
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub thickness: TypedValue,
    /// Area in cm²
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub area: TypedValue,
    /// Surface roughness in nm
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub roughness: TypedValue,
    /// Material composition
    pub composition: Composition,
    /// Fabrication history
    pub synthesis: Synthesis,
    /// Storage conditions after fabrication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<Storage>,
}

impl Layer {
    /// True when the layer is a photoabsorber
    pub fn is_photoabsorber(&self) -> bool {
        self.functionality == Some(Functionality::Photoabsorber)
    }
}

/// Material composition of a layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Composition {
    /// Bulk material
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Additives
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additives: Vec<Additive>,
    /// Absorber-specific composition, photoabsorbers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absorber: Option<Absorber>,
}

/// One ion of a crystal site with its stoichiometric coefficient
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IonShare {
    /// Ion formula or abbreviation (`MA`, `Pb`, `I`)
    pub ion: String,
    /// Coefficient
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub coefficient: TypedValue,
}

/// Absorber composition, one variant per absorber family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Absorber {
    /// ABX3 metal halide perovskite
    Perovskite {
        /// A-site ions
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        a_ions: Vec<IonShare>,
        /// B-site ions
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        b_ions: Vec<IonShare>,
        /// X-site ions
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        c_ions: Vec<IonShare>,
        /// Structural dimensionality
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dimension: Option<String>,
        /// Band gap in eV
        #[serde(default, skip_serializing_if = "TypedValue::is_absent")]
        band_gap: TypedValue,
    },
    /// Silicon absorber
    Silicon {
        /// Silicon type
        #[serde(default, skip_serializing_if = "Option::is_none")]
        silicon_type: Option<String>,
        /// Doping sequence
        #[serde(default, skip_serializing_if = "Option::is_none")]
        doping: Option<String>,
        /// Band gap in eV
        #[serde(default, skip_serializing_if = "TypedValue::is_absent")]
        band_gap: TypedValue,
    },
    /// Chalcopyrite absorber
    Chalcopyrite {
        /// Ions with coefficients
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        ions: Vec<IonShare>,
        /// Alkali metal doping
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alkali_doping: Option<String>,
        /// Band gap in eV
        #[serde(default, skip_serializing_if = "TypedValue::is_absent")]
        band_gap: TypedValue,
    },
    /// Any other absorber material
    Generic {
        /// Absorber material
        #[serde(default, skip_serializing_if = "Option::is_none")]
        material: Option<String>,
        /// Band gap in eV
        #[serde(default, skip_serializing_if = "TypedValue::is_absent")]
        band_gap: TypedValue,
    },
}

impl Absorber {
    /// Band gap of any variant
    pub fn band_gap(&self) -> &TypedValue {
        match self {
            Absorber::Perovskite { band_gap, .. }
            | Absorber::Silicon { band_gap, .. }
            | Absorber::Chalcopyrite { band_gap, .. }
            | Absorber::Generic { band_gap, .. } => band_gap,
        }
    }
}

/// Storage conditions between fabrication steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// Atmosphere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<String>,
    /// Storage time in h
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub time: TypedValue,
    /// Relative humidity in %
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub humidity: TypedValue,
}
