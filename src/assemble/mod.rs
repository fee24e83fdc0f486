//! # Layer-Stack Assembler
//!
//! Walks one record's [`LabelIndex`] and builds the nested [`Record`].
//!
//! ## Algorithm
//!
//! 1. Stack positions are discovered from `Layer <n>` label prefixes and
//!    visited in ascending order.
//! 2. A position flagged `Layer exists = false` is skipped. A position
//!    without a flag is kept when any of its cells carries a value.
//! 3. The position's rows are split at the `" | "` tier into sublayers and
//!    all sublayers are split together at the `" >> "` tier into step
//!    columns.
//! 4. Each step column yields its main step (routed by the vocabulary),
//!    followed by thermal and solvent annealing when those rows are filled.
//! 5. Functionality, composition, cleaning and storage are read from the
//!    sublayer column.
//!
//! Decoding never fails. Unresolvable fields end up as `Absent`, `None` or
//! text, and a layer is never dropped because one of its fields is bad.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{StepClass, TranscoderConfig};
use crate::extract;
use crate::labels::{layer, layer_prefix};
use crate::model::{Layer, LayerStack, ProcessingStep, Record, StepDetails, Synthesis};
use crate::table::{path_segments, split, split_frame, Delimiter, LabelIndex};


static LAYER_SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^layer\s+(\d+)$").expect("valid layer label regex"));

/// Builds layer stacks from flat record indexes
#[derive(Debug, Clone, Copy)]
pub struct LayerStackAssembler<'a> {
    config: &'a TranscoderConfig,
}

impl<'a> LayerStackAssembler<'a> {
    /// Create an assembler using `config` for vocabularies and padding
    pub fn new(config: &'a TranscoderConfig) -> Self {
        Self { config }
    }

    /// Stack positions referenced by the record, ascending and unique
    pub fn positions(&self, record: &LabelIndex) -> Vec<usize> {
        let mut positions: Vec<usize> = record
            .rows()
            .iter()
            .filter_map(|row| {
                let segments = path_segments(&row.label);
                let first = segments.first()?;
                LAYER_SEGMENT_RE
                    .captures(first)
                    .and_then(|captures| captures[1].parse().ok())
            })
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }

    /// Assemble every present position, bottom to top
    pub fn assemble(&self, record: &LabelIndex) -> LayerStack {
        let mut stack = LayerStack::default();
        for position in self.positions(record) {
            let scope = record.scoped(&layer_prefix(position));
            match scope.flag(layer::EXISTS) {
                Some(false) => {
                    log::debug!("Layer {} is flagged absent, skipping", position);
                    continue;
                }
                None if scope.is_blank() => {
                    log::debug!("Layer {} has no values, skipping", position);
                    continue;
                }
                _ => {}
            }
            stack.layers.extend(self.assemble_position(position, &scope));
        }
        stack
    }

    /// All sublayers of one stack position, `scope` relative to its prefix
    pub fn assemble_position(&self, position: usize, scope: &LabelIndex) -> Vec<Layer> {
        let padding = self.config.padding;
        let sublayers = split(scope, Delimiter::Layer, padding);
        let step_columns = split_frame(&sublayers, Delimiter::Step, padding);

        sublayers
            .iter()
            .zip(&step_columns)
            .map(|(sublayer, steps)| self.assemble_sublayer(position, sublayer, steps))
            .collect()
    }

    fn assemble_sublayer(
        &self,
        position: usize,
        sublayer: &LabelIndex,
        steps: &[LabelIndex],
    ) -> Layer {
        let functionality = extract::functionality(sublayer, &self.config.vocabulary);
        Layer {
            position,
            name: sublayer.text(layer::NAME),
            functionality,
            thickness: sublayer.value(layer::THICKNESS),
            area: sublayer.value(layer::AREA),
            roughness: sublayer.value(layer::ROUGHNESS),
            composition: extract::composition(sublayer, functionality, self.config),
            synthesis: Synthesis {
                cleaning: extract::cleaning(sublayer),
                steps: steps.iter().flat_map(|column| self.steps(column)).collect(),
            },
            storage: extract::storage(sublayer),
        }
    }

    /// The main step of one step column followed by its annealing steps
    pub fn steps(&self, column: &LabelIndex) -> Vec<ProcessingStep> {
        let mut steps = Vec::new();

        let main = extract::conditions(column);
        if main.method.is_some() || main.has_conditions() {
            let details = self.details(main.method.as_deref(), column);
            steps.push(ProcessingStep { details, ..main });
        }
        steps.extend(extract::thermal_annealing(column));
        steps.extend(extract::solvent_annealing(column, self.config.padding));
        steps
    }

    fn details(&self, method: Option<&str>, column: &LabelIndex) -> StepDetails {
        let class = method
            .map(|method| self.config.vocabulary.classify_method(method))
            .unwrap_or(StepClass::Unrecognized);
        match class {
            StepClass::Liquid => {
                StepDetails::LiquidSynthesis(extract::liquid_synthesis(column, self.config))
            }
            StepClass::GasPhase => {
                StepDetails::GasPhaseSynthesis(extract::gas_phase_synthesis(column, self.config))
            }
            StepClass::SurfaceTreatment => StepDetails::SurfaceTreatment,
            StepClass::Unrecognized => {
                if let Some(method) = method {
                    log::debug!("Deposition method '{}' is not in the vocabulary", method);
                }
                StepDetails::Unclassified
            }
        }
    }
}

/// Decode one record column into the nested model
pub fn decode_record(id: &str, record: &LabelIndex, config: &TranscoderConfig) -> Record {
    Record {
        id: id.to_string(),
        reference: extract::reference(record),
        general: extract::general(record),
        layers: LayerStackAssembler::new(config).assemble(record),
        measurements: extract::measurements(record, config),
    }
}
