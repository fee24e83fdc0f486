//! # Section Extractors
//!
//! Pure functions that turn one scope of a [`LabelIndex`] into a typed
//! entity of the record model. An extractor never fails: missing or
//! unparsable cells become [`TypedValue::Absent`](crate::quantity::TypedValue)
//! or text, and a blank section yields `None` or an empty list.
//!
//! Scopes are nested the way the assembler walks a record:
//!
//! - record level: [`reference`], [`general`], [`measurements`]
//! - sublayer level (one `" | "` token): [`composition`], [`cleaning`], [`storage`]
//! - step level (one `" >> "` token): [`conditions`], [`liquid_synthesis`],
//!   [`gas_phase_synthesis`], [`thermal_annealing`], [`solvent_annealing`]
//!
//! Component lists (`"; "`) are split inside the extractors.

mod chemicals;
mod composition;
mod process;
mod record;

pub use chemicals::{additives, quenching, reaction_components, solvents, SolventRows};
pub use composition::{absorber, composition, functionality, ion_shares};
pub use process::{
    cleaning, conditions, gas_phase_synthesis, liquid_synthesis, solvent_annealing, storage,
    thermal_annealing, SOLVENT_ANNEALING_METHOD, THERMAL_ANNEALING_METHOD,
};
pub use record::{eqe, general, jv_results, measurements, reference, stabilised};

use crate::table::{split, Delimiter, Frame, LabelIndex, PaddingPolicy};

/// Rows of `labels` present in `scope`, split at the component tier.
///
/// Returns an empty frame when every selected cell is blank, so callers can
/// map the frame straight into entities.
pub(crate) fn components(scope: &LabelIndex, labels: &[&str], padding: PaddingPolicy) -> Frame {
    let selected = LabelIndex::from_rows(
        labels
            .iter()
            .filter_map(|label| scope.exact(label).map(|value| (*label, value))),
    );
    if selected.is_blank() {
        return Vec::new();
    }
    split(&selected, Delimiter::Component, padding)
}

/// Text of an optional label
pub(crate) fn optional_text(scope: &LabelIndex, label: Option<&str>) -> Option<String> {
    label.and_then(|label| scope.text(label))
}
