use std::collections::BTreeMap;

use super::cells::{layer_cells, slot_cells, slots, Cells};
use super::{append_layer, join_steps};
use crate::config::TranscoderConfig;
use crate::labels::{layer, layer_label, LAYER_FIELDS, STEP_FIELDS};
use crate::model::{Layer, ProcessingStep};
use crate::table::LabelIndex;

/// Accumulates the flat cells of one stack position, one sublayer at a time.
///
/// Every layer-level and step-level row is written for every sublayer, so
/// the `" | "` positions of all rows stay aligned.
#[derive(Debug, Clone)]
pub struct LayerEncoder<'a> {
    config: &'a TranscoderConfig,
    rows: Vec<(&'static str, Option<String>)>,
    sublayers: usize,
}

impl<'a> LayerEncoder<'a> {
    /// Create an empty encoder
    pub fn new(config: &'a TranscoderConfig) -> Self {
        Self {
            config,
            rows: LAYER_FIELDS
                .iter()
                .chain(STEP_FIELDS)
                .map(|field| (*field, None))
                .collect(),
            sublayers: 0,
        }
    }

    /// Append a sublayer
    pub fn append(&mut self, sublayer: &Layer) {
        self.append_padded(sublayer, 0);
    }

    /// Append a sublayer, padding its steps with `Unknown` to at least `min_steps`.
    ///
    /// Sibling sublayers are decoded with a shared step count; padding them
    /// explicitly keeps the decoder from repeating a shorter sibling's last step.
    pub fn append_padded(&mut self, sublayer: &Layer, min_steps: usize) {
        let mut values = layer_cells(sublayer);

        let slot_values: Vec<Cells> = slots(&sublayer.synthesis.steps)
            .iter()
            .map(|slot| slot_cells(slot, &self.config.vocabulary))
            .collect();
        let width = slot_values.len().max(min_steps);
        if width > 0 {
            for field in STEP_FIELDS {
                let joined = join_steps(
                    (0..width).map(|i| slot_values.get(i).and_then(|cells| cells.get(*field))),
                );
                values.insert(*field, joined);
            }
        }

        for (field, cell) in &mut self.rows {
            let value = values.remove(*field);
            *cell = Some(append_layer(cell.as_deref(), value.as_deref()));
        }
        self.sublayers += 1;
    }

    /// Number of sublayers appended so far
    pub fn sublayers(&self) -> usize {
        self.sublayers
    }

    /// Accumulated cell of a layer-relative `field`
    pub fn cell(&self, field: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(label, _)| *label == field)
            .and_then(|(_, cell)| cell.as_deref())
    }

    /// Rows of stack `position`, labels prefixed, in catalogue order
    pub fn into_rows(self, position: usize) -> Vec<(String, String)> {
        self.rows
            .into_iter()
            .filter_map(|(field, cell)| cell.map(|cell| (layer_label(position, field), cell)))
            .collect()
    }
}

/// Number of `" >> "` entries the steps of one sublayer occupy
fn step_slot_count(steps: &[ProcessingStep]) -> usize {
    slots(steps).len()
}

/// Encode a sequence of sublayers into flat rows.
///
/// Sublayers sharing a position are pipe-joined under `Layer <n>`. Layers
/// without a position (0) each take the position after the previous one.
pub fn encode_layers(layers: &[Layer], config: &TranscoderConfig) -> LabelIndex {
    let mut positions: BTreeMap<usize, Vec<&Layer>> = BTreeMap::new();
    let mut previous = 0;
    for sublayer in layers {
        let position = if sublayer.position == 0 {
            previous + 1
        } else {
            sublayer.position
        };
        positions.entry(position).or_default().push(sublayer);
        previous = position;
    }

    let mut index = LabelIndex::default();
    for (position, sublayers) in positions {
        let min_steps = sublayers
            .iter()
            .map(|sublayer| step_slot_count(&sublayer.synthesis.steps))
            .max()
            .unwrap_or(0);

        let mut encoder = LayerEncoder::new(config);
        for sublayer in &sublayers {
            encoder.append_padded(sublayer, min_steps);
        }
        log::debug!("Encoded layer {} with {} sublayer(s)", position, encoder.sublayers());

        index.push(layer_label(position, layer::EXISTS), "true".to_string());
        for (label, value) in encoder.into_rows(position) {
            index.push(label, value);
        }
    }
    index
}
