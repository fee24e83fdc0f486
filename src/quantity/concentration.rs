use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{convert, Dimension, FractionMarker, Quantity, TypedValue, Unit};

static GRAM_PER_LITRE: Lazy<Unit> = Lazy::new(|| Unit::parse("g/L").expect("valid unit"));
static MOLE_PER_LITRE: Lazy<Unit> = Lazy::new(|| Unit::parse("mol/L").expect("valid unit"));

/// How much of a component is dissolved, in exactly one of four kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concentration {
    /// Mass per volume, in g/L
    MassConcentration(Quantity),
    /// Amount of substance per volume, in mol/L
    MolarConcentration(Quantity),
    /// Mass ratio, in the notation it was written in (`wt%`, `mg/g`, ...)
    MassFraction(Quantity),
    /// Volume ratio, in the notation it was written in (`vol%`, `v/v`, ...)
    VolumeFraction(Quantity),
    /// A value whose dimensionality matched none of the kinds above
    Unclassified(String),
}

impl Concentration {
    /// The classified quantity, `None` for [`Concentration::Unclassified`]
    pub fn quantity(&self) -> Option<&Quantity> {
        match self {
            Concentration::MassConcentration(q)
            | Concentration::MolarConcentration(q)
            | Concentration::MassFraction(q)
            | Concentration::VolumeFraction(q) => Some(q),
            Concentration::Unclassified(_) => None,
        }
    }

    /// Text notation as written back into a flat table cell
    pub fn to_cell(&self) -> String {
        match self {
            Concentration::Unclassified(raw) => raw.clone(),
            other => other
                .quantity()
                .map(|q| q.to_string())
                .unwrap_or_default(),
        }
    }
}

/// What to do with concentrations that fit none of the four kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnclassifiedPolicy {
    /// Keep the raw cell as [`Concentration::Unclassified`]
    #[default]
    Keep,
    /// Drop the value, leaving the field empty
    Drop,
}

/// Classify a parsed quantity by its dimensionality.
///
/// Mass and molar concentrations are canonicalized to g/L and mol/L; ratios
/// need a mass or volume marker from their original notation.
pub fn classify(quantity: &Quantity) -> Option<Concentration> {
    let unit = quantity.unit();
    let dimension = unit.dimension();

    if dimension == Dimension::MASS_CONCENTRATION {
        return quantity
            .convert_to(&GRAM_PER_LITRE)
            .map(Concentration::MassConcentration);
    }
    if dimension == Dimension::MOLAR_CONCENTRATION {
        return quantity
            .convert_to(&MOLE_PER_LITRE)
            .map(Concentration::MolarConcentration);
    }
    if dimension.is_dimensionless() {
        return match unit.marker() {
            Some(FractionMarker::Mass) => Some(Concentration::MassFraction(quantity.clone())),
            Some(FractionMarker::Volume) => Some(Concentration::VolumeFraction(quantity.clone())),
            None => None,
        };
    }
    None
}

/// Normalize and classify a concentration cell
pub fn concentration(raw: &str, policy: UnclassifiedPolicy) -> Option<Concentration> {
    let classified = match convert(raw, None) {
        TypedValue::Absent => return None,
        TypedValue::Quantity(q) => classify(&q),
        _ => None,
    };
    if classified.is_some() {
        return classified;
    }

    match policy {
        UnclassifiedPolicy::Keep => {
            log::warn!("Concentration '{}' has no recognized dimensionality, kept as raw text", raw.trim());
            Some(Concentration::Unclassified(raw.trim().to_string()))
        }
        UnclassifiedPolicy::Drop => {
            log::warn!("Concentration '{}' has no recognized dimensionality, dropped", raw.trim());
            None
        }
    }
}
