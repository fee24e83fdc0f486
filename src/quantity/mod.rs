//! # Quantity Normalizer
//!
//! Turns a single free-text cell into a [`TypedValue`]: a boolean, a bare
//! number, a number with a unit, the untouched text, or an explicit absence.
//!
//! Cells are curated by hand, so normalization never fails. Anything that
//! cannot be interpreted flows through as [`TypedValue::Text`] for manual
//! review downstream.
//!
//! ```rust
//! use pvstack::quantity::{convert, TypedValue, Unit};
//!
//! let molar = Unit::parse("mol/L").unwrap();
//! let value = convert("0.15 M", Some(&molar));
//! assert!(matches!(value, TypedValue::Quantity(ref q) if q.unit().symbol() == "mol/L"));
//! assert_eq!(convert("nan", None), TypedValue::Absent);
//! ```

mod concentration;
mod error;
mod units;


use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use concentration::{classify, concentration, Concentration, UnclassifiedPolicy};
pub use error::UnitError;
pub use units::{Dimension, FractionMarker, Unit};

/// Literal tokens meaning "not known" at the text layer
pub const UNKNOWN_TOKENS: &[&str] = &["nan", "unknown"];

/// Token written by the encoder for absent values
pub const UNKNOWN: &str = "Unknown";

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid number regex")
});

static QUANTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)\s*(\S.*)$")
        .expect("valid quantity regex")
});

/// A number together with its unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    /// Create a quantity
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Numeric magnitude in [`Quantity::unit`]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit of the magnitude
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Express the quantity in `target`, or `None` when the dimensions disagree
    /// or the converted value leaves the f64 range
    pub fn convert_to(&self, target: &Unit) -> Option<Quantity> {
        if !self.unit.is_compatible(target) {
            return None;
        }
        let value = if self.unit.same_scale(target) {
            self.value
        } else {
            target.from_base(self.unit.to_base(self.value))
        };
        value
            .is_finite()
            .then(|| Quantity::new(value, target.clone()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// The interpretation of one cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    /// `true` / `false`
    Boolean(bool),
    /// A number without unit
    Number(f64),
    /// A number with unit
    Quantity(Quantity),
    /// Text that could not be interpreted, kept verbatim
    Text(String),
    /// Explicitly unknown (`nan`, `Unknown`, blank)
    #[default]
    Absent,
}

impl TypedValue {
    /// True for [`TypedValue::Absent`]
    pub fn is_absent(&self) -> bool {
        matches!(self, TypedValue::Absent)
    }

    /// True for anything but [`TypedValue::Absent`]
    pub fn is_known(&self) -> bool {
        !self.is_absent()
    }

    /// The quantity, if this value is one
    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            TypedValue::Quantity(q) => Some(q),
            _ => None,
        }
    }

    /// The magnitude of a number or quantity
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Number(n) => Some(*n),
            TypedValue::Quantity(q) => Some(q.value()),
            _ => None,
        }
    }

    /// Interpret the value as a flag (`true`, `1`, `yes` are set)
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            TypedValue::Boolean(b) => Some(*b),
            TypedValue::Number(n) => Some(*n != 0.0),
            TypedValue::Text(t) => match t.trim().to_lowercase().as_str() {
                "yes" | "y" => Some(true),
                "no" | "n" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Boolean(b) => write!(f, "{b}"),
            TypedValue::Number(n) => write!(f, "{n}"),
            TypedValue::Quantity(q) => write!(f, "{q}"),
            TypedValue::Text(t) => f.write_str(t),
            TypedValue::Absent => f.write_str(UNKNOWN),
        }
    }
}

/// True for blank cells and the `nan` / `Unknown` sentinels
pub fn is_unknown(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || UNKNOWN_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Normalize one raw cell value.
///
/// With an `expected` unit, bare numbers are trusted to be in that unit and
/// quantities written in a compatible unit are converted into it.
pub fn convert(raw: &str, expected: Option<&Unit>) -> TypedValue {
    let trimmed = raw.trim();
    if is_unknown(trimmed) {
        return TypedValue::Absent;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return TypedValue::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return TypedValue::Boolean(false);
    }

    if NUMBER_RE.is_match(trimmed) {
        if let Some(value) = parse_number(trimmed) {
            return convert_number(value, expected);
        }
    }

    if let Some(captures) = QUANTITY_RE.captures(trimmed) {
        let number = parse_number(&captures[1]);
        let unit = Unit::parse(&captures[2]);
        if let (Some(value), Ok(unit)) = (number, unit) {
            let quantity = Quantity::new(value, unit);
            return TypedValue::Quantity(match expected {
                Some(target) => quantity.convert_to(target).unwrap_or_else(|| {
                    log::debug!(
                        "'{}' is not convertible to {}, keeping its own unit",
                        trimmed,
                        target
                    );
                    quantity
                }),
                None => quantity,
            });
        }
    }

    TypedValue::Text(raw.to_string())
}

/// Wrap a number already known to be numeric, attaching `unit` when given
pub fn convert_number(value: f64, unit: Option<&Unit>) -> TypedValue {
    match unit {
        Some(unit) => TypedValue::Quantity(Quantity::new(value, unit.clone())),
        None => TypedValue::Number(value),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    // Integers first so that long integer literals keep their exact value where possible
    let value = match text.parse::<i64>() {
        Ok(integer) => integer as f64,
        Err(_) => text.parse::<f64>().ok()?,
    };
    // Literals beyond the f64 range stay text
    value.is_finite().then_some(value)
}
