use std::collections::{BTreeMap, HashMap};

use crate::quantity::{self, TypedValue, Unit};

/// One labelled cell of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Hierarchical dotted label, e.g. `Layer 1. Deposition. Procedure`
    pub label: String,
    /// Raw cell text
    pub value: String,
}

/// Flat index of one record's labelled cells.
///
/// Rows keep table order. Exact lookups go through a map keyed by the
/// normalized label path; [`LabelIndex::partial`] scans rows in order and
/// returns the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIndex {
    rows: Vec<Row>,
    paths: HashMap<String, usize>,
}

impl LabelIndex {
    /// Build an index from `(label, value)` pairs in table order
    pub fn from_rows<I, L, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<String>,
        V: Into<String>,
    {
        let mut index = Self::default();
        for (label, value) in rows {
            index.push(label.into(), value.into());
        }
        index
    }

    /// Append a row. A later duplicate label stays reachable through `partial` only.
    pub fn push(&mut self, label: String, value: String) {
        let key = normalize_label(&label);
        let position = self.rows.len();
        self.paths.entry(key).or_insert(position);
        self.rows.push(Row { label, value });
    }

    /// Rewrite legacy label fragments into canonical paths.
    ///
    /// Each row label containing a legacy key has its first occurrence
    /// replaced by the canonical text, unless the rewritten path already
    /// exists. Applied once when the index is built.
    pub fn with_aliases(self, aliases: &BTreeMap<String, String>) -> Self {
        if aliases.is_empty() {
            return self;
        }
        let mut rewritten = Self::default();
        for row in self.rows {
            let mut label = row.label;
            for (legacy, canonical) in aliases {
                if label.contains(legacy.as_str()) {
                    let candidate = label.replacen(legacy.as_str(), canonical, 1);
                    if !self.paths.contains_key(&normalize_label(&candidate)) {
                        log::debug!("Label alias: '{}' -> '{}'", label, candidate);
                        label = candidate;
                        break;
                    }
                }
            }
            rewritten.push(label, row.value);
        }
        rewritten
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in table order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// True when every cell is blank or an unknown sentinel
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|row| quantity::is_unknown(&row.value))
    }

    /// Raw value of the row whose label path equals `label`
    pub fn exact(&self, label: &str) -> Option<&str> {
        self.paths
            .get(&normalize_label(label))
            .map(|&i| self.rows[i].value.as_str())
    }

    /// [`LabelIndex::exact`] with a fallback
    pub fn exact_or<'a>(&'a self, label: &str, default: &'a str) -> &'a str {
        self.exact(label).unwrap_or(default)
    }

    /// Raw value of the first row whose label contains `needle`
    pub fn partial(&self, needle: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label.contains(needle))
            .map(|row| row.value.as_str())
    }

    /// [`LabelIndex::partial`] with a fallback
    pub fn partial_or<'a>(&'a self, needle: &str, default: &'a str) -> &'a str {
        self.partial(needle).unwrap_or(default)
    }

    /// Exact lookup routed through the quantity normalizer
    pub fn exact_value(&self, label: &str, unit: Option<&Unit>) -> TypedValue {
        self.exact(label)
            .map(|raw| quantity::convert(raw, unit))
            .unwrap_or_default()
    }

    /// Partial lookup routed through the quantity normalizer
    pub fn partial_value(&self, needle: &str, unit: Option<&Unit>) -> TypedValue {
        self.partial(needle)
            .map(|raw| quantity::convert(raw, unit))
            .unwrap_or_default()
    }

    /// Normalized value of `label`, using the unit in its `[...]` suffix if any
    pub fn value(&self, label: &str) -> TypedValue {
        let unit = label_unit(label);
        self.exact_value(label, unit.as_ref())
    }

    /// Trimmed text of `label`, `None` when missing or unknown
    pub fn text(&self, label: &str) -> Option<String> {
        self.exact(label)
            .filter(|raw| !quantity::is_unknown(raw))
            .map(|raw| raw.trim().to_string())
    }

    /// Boolean interpretation of `label`
    pub fn flag(&self, label: &str) -> Option<bool> {
        self.exact_value(label, None).as_flag()
    }

    /// Rows whose label contains `marker`
    pub fn subset(&self, marker: &str) -> LabelIndex {
        Self::from_rows(
            self.rows
                .iter()
                .filter(|row| row.label.contains(marker))
                .map(|row| (row.label.clone(), row.value.clone())),
        )
    }

    /// Rows whose label path starts with `path`, labels kept whole
    pub fn branch(&self, path: &str) -> LabelIndex {
        let prefix = path_segments(path);
        Self::from_rows(
            self.rows
                .iter()
                .filter(|row| starts_with_path(&path_segments(&row.label), &prefix))
                .map(|row| (row.label.clone(), row.value.clone())),
        )
    }

    /// Rows under `prefix`, with the prefix segments stripped from the labels
    pub fn scoped(&self, prefix: &str) -> LabelIndex {
        let prefix = path_segments(prefix);
        let mut scoped = Self::default();
        for row in &self.rows {
            let segments = path_segments(&row.label);
            if segments.len() > prefix.len() && starts_with_path(&segments, &prefix) {
                scoped.push(segments[prefix.len()..].join(". "), row.value.clone());
            }
        }
        scoped
    }
}

/// Split a label into its dot-separated segments; dots inside `[...]` do not split
pub fn path_segments(label: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for c in label.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '.' if depth == 0 => {
                segments.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    segments.push(current.trim().to_string());
    segments.retain(|s| !s.is_empty());
    segments
}

/// Canonical lookup key: trimmed segments, lower case, joined by `". "`
pub fn normalize_label(label: &str) -> String {
    path_segments(label)
        .iter()
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(". ")
        .to_lowercase()
}

/// Unit declared in a label's trailing `[...]`, e.g. `Thickness [nm]`
pub fn label_unit(label: &str) -> Option<Unit> {
    let label = label.trim_end();
    let inner = label.strip_suffix(']')?;
    let start = inner.rfind('[')?;
    Unit::parse(&inner[start + 1..]).ok()
}

fn starts_with_path(segments: &[String], prefix: &[String]) -> bool {
    segments.len() >= prefix.len()
        && segments
            .iter()
            .zip(prefix)
            .all(|(a, b)| segment_eq(a, b))
}

fn segment_eq(a: &str, b: &str) -> bool {
    a.split_whitespace()
        .map(str::to_lowercase)
        .eq(b.split_whitespace().map(str::to_lowercase))
}
