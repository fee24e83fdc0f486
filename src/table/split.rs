use serde::{Deserialize, Serialize};

use super::LabelIndex;
use crate::quantity::UNKNOWN;

/// A set of aligned sub-columns produced by one split
pub type Frame = Vec<LabelIndex>;

/// The three nesting tiers of the flat notation, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `" | "`: parallel sublayers, or repeated measurements
    Layer,
    /// `" >> "`: sequential process steps
    Step,
    /// `"; "`: co-occurring components within one step
    Component,
}

impl Delimiter {
    /// Separator as written by the encoder
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Layer => " | ",
            Delimiter::Step => " >> ",
            Delimiter::Component => "; ",
        }
    }

    /// Separator without surrounding whitespace, used when splitting
    pub fn token(&self) -> &'static str {
        self.as_str().trim()
    }
}

/// How shorter token lists are filled up to the longest one in a column.
///
/// `RepeatLast` encodes the curation convention that a trailing layer,
/// step or component without its own value inherits the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaddingPolicy {
    /// Repeat the row's last token
    #[default]
    RepeatLast,
    /// Pad with the `Unknown` sentinel
    FillUnknown,
}

/// Split one cell into trimmed tokens; cells without the delimiter yield themselves
pub fn split_cell(cell: &str, delimiter: Delimiter) -> Vec<String> {
    if !cell.contains(delimiter.token()) {
        return vec![cell.to_string()];
    }
    cell.split(delimiter.token())
        .map(|token| token.trim().to_string())
        .collect()
}

/// Split every row of `column` by `delimiter` into aligned sub-columns.
///
/// The frame has as many sub-columns as the longest token list in the
/// column. Rows with fewer tokens are padded according to `policy`.
pub fn split(column: &LabelIndex, delimiter: Delimiter, policy: PaddingPolicy) -> Frame {
    let tokens: Vec<Vec<String>> = column
        .rows()
        .iter()
        .map(|row| split_cell(&row.value, delimiter))
        .collect();
    let width = tokens.iter().map(Vec::len).max().unwrap_or(0);
    if width <= 1 {
        return vec![column.clone()];
    }
    expand(column, &tokens, width, policy)
}

/// Split every column of a frame by `delimiter` to one shared width.
///
/// Sibling columns produced by an outer split are expanded together, so a
/// sublayer with fewer steps than its siblings is padded to their count.
pub fn split_frame(frame: &[LabelIndex], delimiter: Delimiter, policy: PaddingPolicy) -> Vec<Frame> {
    let tokens: Vec<Vec<Vec<String>>> = frame
        .iter()
        .map(|column| {
            column
                .rows()
                .iter()
                .map(|row| split_cell(&row.value, delimiter))
                .collect()
        })
        .collect();
    let width = tokens
        .iter()
        .flatten()
        .map(Vec::len)
        .max()
        .unwrap_or(0);

    frame
        .iter()
        .zip(&tokens)
        .map(|(column, column_tokens)| {
            if width <= 1 {
                vec![column.clone()]
            } else {
                expand(column, column_tokens, width, policy)
            }
        })
        .collect()
}

fn expand(column: &LabelIndex, tokens: &[Vec<String>], width: usize, policy: PaddingPolicy) -> Frame {
    (0..width)
        .map(|i| {
            LabelIndex::from_rows(column.rows().iter().zip(tokens).map(|(row, cells)| {
                let value = match cells.get(i) {
                    Some(cell) => cell.clone(),
                    None => pad(cells, policy),
                };
                (row.label.clone(), value)
            }))
        })
        .collect()
}

fn pad(cells: &[String], policy: PaddingPolicy) -> String {
    match policy {
        PaddingPolicy::RepeatLast => cells.last().cloned().unwrap_or_default(),
        PaddingPolicy::FillUnknown => UNKNOWN.to_string(),
    }
}
