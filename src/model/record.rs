use serde::{Deserialize, Serialize};

use super::{Layer, PerformedMeasurements};
use crate::quantity::TypedValue;

/// One device record, decoded from one table column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    /// Record identifier, the column header
    pub id: String,
    /// Publication reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// Device summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<General>,
    /// Layer stack, bottom to top
    pub layers: LayerStack,
    /// Measured performance
    pub measurements: PerformedMeasurements,
}

/// Publication the record was curated from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    /// DOI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// First author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_author: Option<String>,
    /// Publication date as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    /// Journal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    /// Curator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_entered_by: Option<String>,
    /// Free text comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Device-level summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct General {
    /// Architecture (`nip`, `pin`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    /// Terminal count of tandem devices
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub number_of_terminals: TypedValue,
    /// Active area in cm²
    #[serde(skip_serializing_if = "TypedValue::is_absent")]
    pub area: TypedValue,
    /// Flexible substrate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flexible: Option<bool>,
    /// Layer names bottom to top
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stack_sequence: Vec<String>,
}

/// Ordered layers of a device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStack {
    /// Layers bottom to top
    pub layers: Vec<Layer>,
}

impl LayerStack {
    /// Number of layers, counting sublayers separately
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True when the stack has no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterate the layers bottom to top
    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    /// Distinct stack positions in ascending order
    pub fn positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self.layers.iter().map(|layer| layer.position).collect();
        positions.dedup();
        positions
    }

    /// The photoabsorber layers
    pub fn photoabsorbers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|layer| layer.is_photoabsorber())
    }
}

impl<'a> IntoIterator for &'a LayerStack {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
