//! Unit algebra for free-text physical quantities.
//!
//! Units are reduced to a scale factor (and, for temperatures, an offset) onto
//! a small SI base together with a [`Dimension`] vector. Two quantities can be
//! converted into each other whenever their dimensions agree.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::UnitError;

/// Exponents of the base dimensions of a unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Dimension {
    /// Mass exponent
    pub mass: i8,
    /// Length exponent
    pub length: i8,
    /// Time exponent
    pub time: i8,
    /// Amount of substance exponent
    pub amount: i8,
    /// Temperature exponent
    pub temperature: i8,
    /// Electric current exponent
    pub current: i8,
}

impl Dimension {
    /// Dimensionless ratio
    pub const NONE: Dimension = Dimension::new(0, 0, 0, 0, 0, 0);
    /// Mass
    pub const MASS: Dimension = Dimension::new(1, 0, 0, 0, 0, 0);
    /// Length
    pub const LENGTH: Dimension = Dimension::new(0, 1, 0, 0, 0, 0);
    /// Time
    pub const TIME: Dimension = Dimension::new(0, 0, 1, 0, 0, 0);
    /// Amount of substance
    pub const AMOUNT: Dimension = Dimension::new(0, 0, 0, 1, 0, 0);
    /// Temperature
    pub const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 0, 1, 0);
    /// Electric current
    pub const CURRENT: Dimension = Dimension::new(0, 0, 0, 0, 0, 1);
    /// Volume (length cubed)
    pub const VOLUME: Dimension = Dimension::new(0, 3, 0, 0, 0, 0);
    /// Mass per volume
    pub const MASS_CONCENTRATION: Dimension = Dimension::new(1, -3, 0, 0, 0, 0);
    /// Amount of substance per volume
    pub const MOLAR_CONCENTRATION: Dimension = Dimension::new(0, -3, 0, 1, 0, 0);

    /// Create a dimension from its base exponents
    pub const fn new(
        mass: i8,
        length: i8,
        time: i8,
        amount: i8,
        temperature: i8,
        current: i8,
    ) -> Self {
        Self {
            mass,
            length,
            time,
            amount,
            temperature,
            current,
        }
    }

    /// True for pure ratios
    pub fn is_dimensionless(&self) -> bool {
        *self == Self::NONE
    }

    /// Raise every exponent to the given power, `None` when an exponent overflows
    pub fn checked_powi(self, exponent: i8) -> Option<Self> {
        Some(Self::new(
            self.mass.checked_mul(exponent)?,
            self.length.checked_mul(exponent)?,
            self.time.checked_mul(exponent)?,
            self.amount.checked_mul(exponent)?,
            self.temperature.checked_mul(exponent)?,
            self.current.checked_mul(exponent)?,
        ))
    }

    /// Dimension of a product, `None` when an exponent overflows
    pub fn checked_mul(self, rhs: Dimension) -> Option<Self> {
        Some(Self::new(
            self.mass.checked_add(rhs.mass)?,
            self.length.checked_add(rhs.length)?,
            self.time.checked_add(rhs.time)?,
            self.amount.checked_add(rhs.amount)?,
            self.temperature.checked_add(rhs.temperature)?,
            self.current.checked_add(rhs.current)?,
        ))
    }

    /// Dimension of a quotient, `None` when an exponent overflows
    pub fn checked_div(self, rhs: Dimension) -> Option<Self> {
        self.checked_mul(rhs.checked_powi(-1)?)
    }
}

/// Which component a dimensionless ratio was written against.
///
/// `5 wt%` and `5 vol%` have the same dimension but different meaning, so
/// the marker is kept from the original notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractionMarker {
    /// Mass per mass (`wt%`, `w/w`, `mg/g`)
    Mass,
    /// Volume per volume (`vol%`, `v/v`, `ml/ml`)
    Volume,
}

/// A parsed unit expression
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    symbol: String,
    factor: f64,
    offset: f64,
    dimension: Dimension,
    marker: Option<FractionMarker>,
}

impl Unit {
    /// Parse a unit expression such as `mg/ml`, `cm^2/(V*s)` or `mTorr`
    pub fn parse(expression: &str) -> Result<Self, UnitError> {
        let symbol = expression.trim();
        if symbol.is_empty() {
            return Err(UnitError::Empty);
        }
        if let Some(unit) = fraction_notation(symbol) {
            return Ok(unit);
        }

        let mut parser = Parser::new(symbol);
        let term = parser.product()?;
        parser.skip_whitespace();
        if let Some(found) = parser.peek() {
            return Err(UnitError::Unexpected {
                found,
                position: parser.pos,
            });
        }

        let marker = if term.dimension.is_dimensionless() {
            if parser.saw_mass {
                Some(FractionMarker::Mass)
            } else if parser.saw_volume {
                Some(FractionMarker::Volume)
            } else {
                None
            }
        } else {
            None
        };

        Ok(Self {
            symbol: symbol.to_string(),
            factor: term.factor,
            offset: term.offset,
            dimension: term.dimension,
            marker,
        })
    }

    /// The unit as written
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Scale factor onto the base units
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Physical dimension
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Fraction marker for dimensionless ratios
    pub fn marker(&self) -> Option<FractionMarker> {
        self.marker
    }

    /// True when values in `self` can be converted into `other`
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// True when both units share scale and offset, so values carry over untouched
    pub(crate) fn same_scale(&self, other: &Unit) -> bool {
        self.factor == other.factor && self.offset == other.offset
    }

    pub(crate) fn to_base(&self, value: f64) -> f64 {
        value * self.factor + self.offset
    }

    pub(crate) fn from_base(&self, value: f64) -> f64 {
        (value - self.offset) / self.factor
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::parse(s)
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.symbol)
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        Unit::parse(&symbol).map_err(serde::de::Error::custom)
    }
}

/// Mass and volume fraction notations that are not unit algebra (`wt%`, `v/v`, ...)
fn fraction_notation(symbol: &str) -> Option<Unit> {
    const MASS: &[&str] = &[
        "wt%", "wt", "w/w", "w/w%", "%w/w", "wt/wt", "%wt", "mass%", "m/m", "%m/m",
    ];
    const VOLUME: &[&str] = &[
        "vol%", "vol", "v/v", "v/v%", "%v/v", "vol/vol", "%vol", "volume%",
    ];

    let compact: String = symbol
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != '-')
        .collect::<String>()
        .to_lowercase();

    let marker = if MASS.contains(&compact.as_str()) {
        FractionMarker::Mass
    } else if VOLUME.contains(&compact.as_str()) {
        FractionMarker::Volume
    } else {
        return None;
    };

    Some(Unit {
        symbol: symbol.to_string(),
        factor: if compact.contains('%') { 0.01 } else { 1.0 },
        offset: 0.0,
        dimension: Dimension::NONE,
        marker: Some(marker),
    })
}

struct BaseUnit {
    symbol: &'static str,
    factor: f64,
    offset: f64,
    dimension: Dimension,
    prefixable: bool,
}

const fn base(symbol: &'static str, factor: f64, dimension: Dimension, prefixable: bool) -> BaseUnit {
    BaseUnit {
        symbol,
        factor,
        offset: 0.0,
        dimension,
        prefixable,
    }
}

const ENERGY: Dimension = Dimension::new(1, 2, -2, 0, 0, 0);
const POWER: Dimension = Dimension::new(1, 2, -3, 0, 0, 0);
const VOLTAGE: Dimension = Dimension::new(1, 2, -3, 0, 0, -1);
const RESISTANCE: Dimension = Dimension::new(1, 2, -3, 0, 0, -2);
const PRESSURE: Dimension = Dimension::new(1, -1, -2, 0, 0, 0);
const FREQUENCY: Dimension = Dimension::new(0, 0, -1, 0, 0, 0);

// Mass is based on the kilogram so that derived units (V, W, Pa) carry a unit factor.
const BASE_UNITS: &[BaseUnit] = &[
    base("g", 1e-3, Dimension::MASS, true),
    base("m", 1.0, Dimension::LENGTH, true),
    base("Å", 1e-10, Dimension::LENGTH, false),
    base("s", 1.0, Dimension::TIME, true),
    base("sec", 1.0, Dimension::TIME, false),
    base("min", 60.0, Dimension::TIME, false),
    base("h", 3600.0, Dimension::TIME, false),
    base("hr", 3600.0, Dimension::TIME, false),
    base("hrs", 3600.0, Dimension::TIME, false),
    base("hour", 3600.0, Dimension::TIME, false),
    base("hours", 3600.0, Dimension::TIME, false),
    base("d", 86400.0, Dimension::TIME, false),
    base("day", 86400.0, Dimension::TIME, false),
    base("days", 86400.0, Dimension::TIME, false),
    base("mol", 1.0, Dimension::AMOUNT, true),
    base("K", 1.0, Dimension::TEMPERATURE, true),
    BaseUnit {
        symbol: "°C",
        factor: 1.0,
        offset: 273.15,
        dimension: Dimension::TEMPERATURE,
        prefixable: false,
    },
    BaseUnit {
        symbol: "ºC",
        factor: 1.0,
        offset: 273.15,
        dimension: Dimension::TEMPERATURE,
        prefixable: false,
    },
    BaseUnit {
        symbol: "℃",
        factor: 1.0,
        offset: 273.15,
        dimension: Dimension::TEMPERATURE,
        prefixable: false,
    },
    BaseUnit {
        symbol: "degC",
        factor: 1.0,
        offset: 273.15,
        dimension: Dimension::TEMPERATURE,
        prefixable: false,
    },
    base("L", 1e-3, Dimension::VOLUME, true),
    base("l", 1e-3, Dimension::VOLUME, true),
    base("M", 1e3, Dimension::MOLAR_CONCENTRATION, true),
    base("A", 1.0, Dimension::CURRENT, true),
    base("V", 1.0, VOLTAGE, true),
    base("W", 1.0, POWER, true),
    base("J", 1.0, ENERGY, true),
    base("eV", 1.602_176_634e-19, ENERGY, true),
    base("Pa", 1.0, PRESSURE, true),
    base("bar", 1e5, PRESSURE, true),
    base("Torr", 101_325.0 / 760.0, PRESSURE, true),
    base("torr", 101_325.0 / 760.0, PRESSURE, true),
    base("atm", 101_325.0, PRESSURE, false),
    base("Hz", 1.0, FREQUENCY, true),
    base("rpm", 1.0 / 60.0, FREQUENCY, false),
    base("Ω", 1.0, RESISTANCE, true),
    base("ohm", 1.0, RESISTANCE, true),
    base("Ohm", 1.0, RESISTANCE, true),
    base("%", 1e-2, Dimension::NONE, false),
    base("ppm", 1e-6, Dimension::NONE, false),
];

const PREFIXES: &[(char, f64)] = &[
    ('G', 1e9),
    ('M', 1e6),
    ('k', 1e3),
    ('h', 1e2),
    ('d', 1e-1),
    ('c', 1e-2),
    ('m', 1e-3),
    ('u', 1e-6),
    ('µ', 1e-6),
    ('μ', 1e-6),
    ('n', 1e-9),
    ('p', 1e-12),
    ('f', 1e-15),
];

fn lookup_base(symbol: &str) -> Option<&'static BaseUnit> {
    BASE_UNITS.iter().find(|unit| unit.symbol == symbol)
}

/// Resolve an atom such as `mTorr` to a term, preferring exact symbols over prefixed ones
fn lookup_atom(atom: &str) -> Option<Term> {
    if let Some(unit) = lookup_base(atom) {
        return Some(Term {
            factor: unit.factor,
            offset: unit.offset,
            dimension: unit.dimension,
        });
    }

    let mut chars = atom.chars();
    let first = chars.next()?;
    let rest = chars.as_str();
    if rest.is_empty() {
        return None;
    }
    let (_, scale) = PREFIXES.iter().find(|(prefix, _)| *prefix == first)?;
    let unit = lookup_base(rest).filter(|unit| unit.prefixable)?;
    Some(Term {
        factor: scale * unit.factor,
        offset: 0.0,
        dimension: unit.dimension,
    })
}

#[derive(Debug, Clone, Copy)]
struct Term {
    factor: f64,
    offset: f64,
    dimension: Dimension,
}

impl Term {
    fn times(self, rhs: Term) -> Result<Term, UnitError> {
        Ok(Term {
            factor: self.factor * rhs.factor,
            offset: 0.0,
            dimension: self
                .dimension
                .checked_mul(rhs.dimension)
                .ok_or(UnitError::ExponentOverflow)?,
        })
    }

    fn over(self, rhs: Term) -> Result<Term, UnitError> {
        Ok(Term {
            factor: self.factor / rhs.factor,
            offset: 0.0,
            dimension: self
                .dimension
                .checked_div(rhs.dimension)
                .ok_or(UnitError::ExponentOverflow)?,
        })
    }

    fn powi(self, exponent: i8) -> Result<Term, UnitError> {
        if exponent == 1 {
            return Ok(self);
        }
        Ok(Term {
            factor: self.factor.powi(i32::from(exponent)),
            offset: 0.0,
            dimension: self
                .dimension
                .checked_powi(exponent)
                .ok_or(UnitError::ExponentOverflow)?,
        })
    }
}

fn is_atom_char(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '%' | '°' | 'º' | '℃')
}

fn superscript_digit(c: char) -> Option<u32> {
    match c {
        '⁰' => Some(0),
        '¹' => Some(1),
        '²' => Some(2),
        '³' => Some(3),
        '⁴' => Some(4),
        '⁵' => Some(5),
        '⁶' => Some(6),
        '⁷' => Some(7),
        '⁸' => Some(8),
        '⁹' => Some(9),
        _ => None,
    }
}

/// Recursive-descent parser over unit expressions
struct Parser {
    chars: Vec<char>,
    pos: usize,
    saw_mass: bool,
    saw_volume: bool,
}

impl Parser {
    fn new(expression: &str) -> Self {
        Self {
            chars: expression.chars().collect(),
            pos: 0,
            saw_mass: false,
            saw_volume: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn product(&mut self) -> Result<Term, UnitError> {
        let mut acc = self.power()?;
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('*') | Some('·') | Some('×') => {
                    self.bump();
                    acc = acc.times(self.power()?)?;
                }
                Some('/') => {
                    self.bump();
                    acc = acc.over(self.power()?)?;
                }
                Some(c) if is_atom_char(c) || c == '(' => {
                    acc = acc.times(self.power()?)?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn power(&mut self) -> Result<Term, UnitError> {
        self.skip_whitespace();
        let base = match self.peek() {
            Some('(') => {
                self.bump();
                let inner = self.product()?;
                self.skip_whitespace();
                match self.bump() {
                    Some(')') => inner,
                    Some(found) => {
                        return Err(UnitError::Unexpected {
                            found,
                            position: self.pos - 1,
                        })
                    }
                    None => return Err(UnitError::UnexpectedEnd),
                }
            }
            Some(c) if is_atom_char(c) => self.atom()?,
            Some(found) => {
                return Err(UnitError::Unexpected {
                    found,
                    position: self.pos,
                })
            }
            None => return Err(UnitError::UnexpectedEnd),
        };

        let term = base.powi(self.exponent()?)?;
        let magnitude = if term.dimension.length < 0 {
            term.dimension.checked_powi(-1)
        } else {
            Some(term.dimension)
        };
        if magnitude == Some(Dimension::MASS) {
            self.saw_mass = true;
        } else if magnitude == Some(Dimension::VOLUME) {
            self.saw_volume = true;
        }
        Ok(term)
    }

    fn atom(&mut self) -> Result<Term, UnitError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_atom_char(c)) {
            self.pos += 1;
        }
        let atom: String = self.chars[start..self.pos].iter().collect();
        lookup_atom(&atom).ok_or(UnitError::UnknownSymbol(atom))
    }

    fn exponent(&mut self) -> Result<i8, UnitError> {
        let explicit = self.peek() == Some('^');
        if explicit {
            self.bump();
        }

        let mut negative = false;
        match self.peek() {
            Some('-') | Some('⁻') => {
                negative = true;
                self.bump();
            }
            Some('+') if explicit => {
                self.bump();
            }
            _ => {}
        }

        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if let Some(d) = superscript_digit(c) {
                digits.push(char::from_digit(d, 10).unwrap_or('0'));
            } else {
                break;
            }
            self.pos += 1;
        }

        if digits.is_empty() {
            if explicit || negative {
                return Err(UnitError::InvalidExponent(
                    self.chars[..self.pos].iter().collect(),
                ));
            }
            return Ok(1);
        }

        let value: i8 = digits
            .parse()
            .map_err(|_| UnitError::InvalidExponent(digits.clone()))?;
        Ok(if negative { -value } else { value })
    }
}
