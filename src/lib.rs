//! # pvstack - Photovoltaic Device Stack Transcoder
//!
//! `pvstack` converts thin-film solar cell records between two shapes:
//!
//! - a **flat table** where every row is a dot-separated label such as
//!   `Layer 2. Deposition. Solvents` and every column is one device, with
//!   repeated structure packed into a single cell by three delimiters;
//! - a **nested record**: a stack of layers, each with its composition and an
//!   ordered list of processing steps carrying typed, unit-normalized values.
//!
//! ## Delimiter Tiers
//!
//! | Tier | Delimiter | Separates |
//! |------|-----------|-----------|
//! | Layer | `" \| "` | sublayers sharing one stack position, or repeated measurements |
//! | Step | `" >> "` | successive processing steps of one sublayer |
//! | Component | `"; "` | members of a list (solvents, ions, additives) |
//!
//! Cells are split from the outermost tier inwards. Sibling lists of uneven
//! length are padded according to a [`PaddingPolicy`](table::PaddingPolicy).
//!
//! ## Quick Start
//!
//! ```rust
//! use pvstack::prelude::*;
//!
//! let record = LabelIndex::from_rows([
//!     ("Layer 1. Layer exists", "true"),
//!     ("Layer 1. Name", "SnO2 | PCBM"),
//!     ("Layer 1. Thickness [nm]", "25 | 30"),
//!     ("Layer 1. Deposition. Procedure", "Spin-coating >> Spin-coating | Evaporation"),
//! ]);
//!
//! let config = TranscoderConfig::default();
//! let decoded = decode_record("device-1", &record, &config);
//! assert_eq!(decoded.layers.len(), 2);
//! assert_eq!(decoded.layers.layers[1].thickness.as_f64(), Some(30.0));
//!
//! // Back to the flat notation
//! let flat = encode_record(&decoded, &config);
//! assert_eq!(flat.exact("Layer 1. Name"), Some("SnO2 | PCBM"));
//! ```
//!
//! ## Architecture
//!
//! - [`quantity`]: cell normalizer, unit algebra and concentration classifier
//! - [`table`]: delimiter splitting, label lookup and table files
//! - [`labels`]: the label catalogue shared by both directions
//! - [`config`]: vocabularies and policies
//! - [`model`]: the nested record types
//! - [`extract`]: section extractors
//! - [`assemble`]: the layer-stack assembler
//! - [`encode`]: the inverse encoder
//! - [`batch`]: whole-table decoding into JSON documents

#![warn(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod assemble;
pub mod batch;
pub mod config;
pub mod encode;
pub mod extract;
pub mod labels;
pub mod model;
pub mod quantity;
pub mod table;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::assemble::{decode_record, LayerStackAssembler};
    pub use crate::batch::{
        decode_table, decode_to_directory, write_documents, BatchError, BatchOptions,
        BatchReport, RecordDocument,
    };
    pub use crate::config::{ProcessVocabulary, TranscoderConfig};
    pub use crate::encode::{append_layer, encode_layers, encode_record, LayerEncoder};
    pub use crate::model::{
        Absorber, Composition, Functionality, Layer, LayerStack, ProcessingStep, Record,
        StepDetails, Synthesis,
    };
    pub use crate::quantity::{
        concentration, convert, Concentration, Quantity, TypedValue, UnclassifiedPolicy, Unit,
    };
    pub use crate::table::{
        split, split_frame, Delimiter, LabelIndex, PaddingPolicy, Table, TableFormat,
    };
}
