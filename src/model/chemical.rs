use serde::{Deserialize, Serialize};

use crate::quantity::{Concentration, TypedValue};

/// A solvent of a solution or an annealing atmosphere
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Solvent {
    /// Solvent name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Mixing ratio relative to the other solvents
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub mixing_ratio: TypedValue,
    /// Supplier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    /// Purity as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purity: Option<String>,
}

impl Solvent {
    /// A solvent known only by name
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// True when no field carries information
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.mixing_ratio.is_absent()
            && self.supplier.is_none()
            && self.purity.is_none()
    }
}

/// A non-solvent chemical of a solution or gas mixture
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionComponent {
    /// Compound name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Supplier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    /// Purity as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purity: Option<String>,
    /// Amount dissolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration: Option<Concentration>,
    /// Solution volume
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub volume: TypedValue,
    /// Solution age
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub age: TypedValue,
    /// Solution temperature
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub temperature: TypedValue,
}

impl ReactionComponent {
    /// A component known only by name
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    /// True when no field carries information
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.supplier.is_none()
            && self.purity.is_none()
            && self.concentration.is_none()
            && self.volume.is_absent()
            && self.age.is_absent()
            && self.temperature.is_absent()
    }
}

/// An additive dissolved in a layer or a quenching medium
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Additive {
    /// Compound name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration: Option<Concentration>,
}

impl Additive {
    /// True when no field carries information
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.concentration.is_none()
    }
}

/// Media dropped onto a wet film to trigger crystallization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuenchingSolvent {
    /// Quenching media (antisolvents)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<Solvent>,
    /// Dropped volume
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub volume: TypedValue,
    /// Delay between the start of the step and quenching
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub delay: TypedValue,
    /// Additives dissolved in the media
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additives: Vec<Additive>,
}

impl QuenchingSolvent {
    /// True when no field carries information
    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
            && self.volume.is_absent()
            && self.delay.is_absent()
            && self.additives.is_empty()
    }
}
