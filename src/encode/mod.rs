//! # Inverse Encoder
//!
//! Serializes nested layers back into the three-tier flat notation so the
//! output can be fed to consumers of the flat table and decoded again.
//!
//! Encoding is incremental: [`append_layer`] accumulates one sublayer value
//! at a time behind `" | "`, and appending values one by one produces the
//! same cell as appending their pipe-joined form at once. Step-level values
//! are joined with `" >> "` before they are appended, and component lists
//! with `"; "`, mirroring the order in which the decoder splits them.
//!
//! ```
//! use pvstack::encode::append_layer;
//!
//! let cell = append_layer(None, Some("Spin-coating >> CBD"));
//! let cell = append_layer(Some(&cell), None);
//! assert_eq!(cell, "Spin-coating >> CBD | Unknown");
//! ```

mod cells;
mod layer;
mod record;

#[cfg(test)]
mod tests;

pub use layer::{encode_layers, LayerEncoder};
pub use record::encode_record;

use crate::quantity::UNKNOWN;
use crate::table::Delimiter;

/// Append one sublayer value to an accumulated layer cell.
///
/// Without an existing cell the result is the value itself. Missing values
/// are written as `Unknown` so sublayer positions stay aligned.
pub fn append_layer(existing: Option<&str>, value: Option<&str>) -> String {
    let value = value.unwrap_or(UNKNOWN);
    match existing {
        None => value.to_string(),
        Some(existing) => format!("{}{}{}", existing, Delimiter::Layer.as_str(), value),
    }
}

/// Join per-step values with `" >> "`, writing `Unknown` for missing steps
pub fn join_steps<I, S>(values: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    join(values, Delimiter::Step)
}

/// Join per-component values with `"; "`, writing `Unknown` for missing components
pub fn join_components<I, S>(values: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    join(values, Delimiter::Component)
}

fn join<I, S>(values: I, delimiter: Delimiter) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let parts: Vec<String> = values
        .into_iter()
        .map(|value| match value {
            Some(value) => value.as_ref().to_string(),
            None => UNKNOWN.to_string(),
        })
        .collect();
    if parts.is_empty() {
        return UNKNOWN.to_string();
    }
    parts.join(delimiter.as_str())
}
