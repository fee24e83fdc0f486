//! # Device Tables
//!
//! The flat side of the transcoder. A table stores one device or publication
//! per column; rows carry hierarchical dotted labels such as
//! `Layer 2. Deposition. Procedure`. Cells use three delimiter tiers:
//!
//! | Tier | Separator | Meaning |
//! |------|-----------|---------|
//! | Layer | `" \| "` | parallel sublayers or repeated measurements |
//! | Step | `" >> "` | sequential process steps |
//! | Component | `"; "` | co-occurring components of one step |
//!
//! - [`LabelIndex`] resolves labels of one record (exact path or first substring match).
//! - [`split`] / [`split_frame`] expand one delimiter tier into aligned sub-columns.
//! - [`Table`] reads and writes CSV/TSV files.

mod error;
mod index;
mod reader;
mod split;


pub use error::TableError;
pub use index::{label_unit, normalize_label, path_segments, LabelIndex, Row};
pub use reader::{Table, TableFormat};
pub use split::{split, split_cell, split_frame, Delimiter, Frame, PaddingPolicy};
