use std::collections::HashMap;

use super::join_components;
use crate::config::{ProcessVocabulary, StepClass};
use crate::extract::SolventRows;
use crate::labels::{
    chalcopyrite, cleaning, deposition, layer, perovskite, photoabsorber, silicon,
    solvent_annealing, storage, thermal_annealing,
};
use crate::model::{
    Absorber, Additive, IonShare, Layer, ProcessingStep, QuenchingSolvent, ReactionComponent,
    Solvent, StepDetails,
};
use crate::quantity::TypedValue;
use crate::table::label_unit;

/// Known cell values of one sublayer or one step slot, keyed by label
pub(crate) type Cells = HashMap<&'static str, String>;

/// Cell text of a value in a row whose label may declare a unit.
///
/// Quantities are written as bare numbers in the label's unit. A quantity
/// that cannot be converted keeps its own unit symbol.
pub(crate) fn in_label_unit(value: &TypedValue, label: &str) -> Option<String> {
    match value {
        TypedValue::Absent => None,
        TypedValue::Quantity(quantity) => Some(
            label_unit(label)
                .and_then(|unit| quantity.convert_to(&unit))
                .map(|converted| converted.value().to_string())
                .unwrap_or_else(|| quantity.to_string()),
        ),
        other => Some(other.to_string()),
    }
}

fn put(cells: &mut Cells, label: &'static str, value: Option<String>) {
    if let Some(value) = value {
        cells.insert(label, value);
    }
}

/// Component-joined cell of a list, `None` when no member has a value
fn list<T>(items: &[T], cell: impl Fn(&T) -> Option<String>) -> Option<String> {
    let values: Vec<Option<String>> = items.iter().map(cell).collect();
    if values.iter().all(Option::is_none) {
        return None;
    }
    Some(join_components(values))
}

/// One position of the `" >> "` tier: a main step and the annealing that followed it
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Slot<'s> {
    pub main: Option<&'s ProcessingStep>,
    pub thermal: Option<&'s ProcessingStep>,
    pub solvent: Option<&'s ProcessingStep>,
}

/// Group steps into slots. Annealing attaches to the preceding slot unless
/// that slot already holds annealing which would come out of order.
pub(crate) fn slots(steps: &[ProcessingStep]) -> Vec<Slot<'_>> {
    let mut slots: Vec<Slot<'_>> = Vec::new();
    for step in steps {
        match step.details {
            StepDetails::ThermalAnnealing => {
                match slots.last_mut() {
                    Some(slot) if slot.thermal.is_none() && slot.solvent.is_none() => {
                        slot.thermal = Some(step);
                        continue;
                    }
                    _ => {}
                }
                slots.push(Slot {
                    thermal: Some(step),
                    ..Default::default()
                });
            }
            StepDetails::SolventAnnealing(_) => {
                match slots.last_mut() {
                    Some(slot) if slot.solvent.is_none() => {
                        slot.solvent = Some(step);
                        continue;
                    }
                    _ => {}
                }
                slots.push(Slot {
                    solvent: Some(step),
                    ..Default::default()
                });
            }
            _ => slots.push(Slot {
                main: Some(step),
                ..Default::default()
            }),
        }
    }
    slots
}

/// Values of the layer-level rows of one sublayer
pub(crate) fn layer_cells(sublayer: &Layer) -> Cells {
    let mut cells = Cells::new();
    put(&mut cells, layer::NAME, sublayer.name.clone());
    put(
        &mut cells,
        layer::FUNCTIONALITY,
        sublayer.functionality.map(|f| f.label().to_string()),
    );
    put(&mut cells, layer::THICKNESS, in_label_unit(&sublayer.thickness, layer::THICKNESS));
    put(&mut cells, layer::AREA, in_label_unit(&sublayer.area, layer::AREA));
    put(&mut cells, layer::ROUGHNESS, in_label_unit(&sublayer.roughness, layer::ROUGHNESS));
    additives(
        &mut cells,
        &sublayer.composition.additives,
        layer::ADDITIVE_COMPOUNDS,
        layer::ADDITIVE_CONCENTRATIONS,
    );

    match &sublayer.composition.absorber {
        Some(Absorber::Perovskite {
            a_ions,
            b_ions,
            c_ions,
            dimension,
            band_gap,
        }) => {
            ions(&mut cells, a_ions, perovskite::A_IONS, perovskite::A_COEFFICIENTS);
            ions(&mut cells, b_ions, perovskite::B_IONS, perovskite::B_COEFFICIENTS);
            ions(&mut cells, c_ions, perovskite::C_IONS, perovskite::C_COEFFICIENTS);
            put(&mut cells, perovskite::DIMENSION, dimension.clone());
            put(&mut cells, perovskite::BAND_GAP, in_label_unit(band_gap, perovskite::BAND_GAP));
        }
        Some(Absorber::Silicon {
            silicon_type,
            doping,
            band_gap,
        }) => {
            put(&mut cells, silicon::TYPE, silicon_type.clone());
            put(&mut cells, silicon::DOPING, doping.clone());
            put(&mut cells, silicon::BAND_GAP, in_label_unit(band_gap, silicon::BAND_GAP));
        }
        Some(Absorber::Chalcopyrite {
            ions: shares,
            alkali_doping,
            band_gap,
        }) => {
            ions(&mut cells, shares, chalcopyrite::IONS, chalcopyrite::COEFFICIENTS);
            put(&mut cells, chalcopyrite::ALKALI_DOPING, alkali_doping.clone());
            put(
                &mut cells,
                chalcopyrite::BAND_GAP,
                in_label_unit(band_gap, chalcopyrite::BAND_GAP),
            );
        }
        Some(Absorber::Generic { material, band_gap }) => {
            put(&mut cells, photoabsorber::MATERIAL, material.clone());
            put(
                &mut cells,
                photoabsorber::BAND_GAP,
                in_label_unit(band_gap, photoabsorber::BAND_GAP),
            );
        }
        None => {}
    }

    if let Some(cleaned) = &sublayer.synthesis.cleaning {
        if !cleaned.procedures.is_empty() {
            put(
                &mut cells,
                cleaning::PROCEDURE,
                Some(join_components(cleaned.procedures.iter().map(Some))),
            );
        }
    }

    if let Some(stored) = &sublayer.storage {
        put(&mut cells, storage::ATMOSPHERE, stored.atmosphere.clone());
        put(&mut cells, storage::TIME, in_label_unit(&stored.time, storage::TIME));
        put(&mut cells, storage::HUMIDITY, in_label_unit(&stored.humidity, storage::HUMIDITY));
    }
    cells
}

/// Values of the step-level rows of one slot
pub(crate) fn slot_cells(slot: &Slot<'_>, vocabulary: &ProcessVocabulary) -> Cells {
    let mut cells = Cells::new();

    if let Some(step) = slot.main {
        check_vocabulary(step, vocabulary);
        put(&mut cells, deposition::PROCEDURE, step.method.clone());
        put(&mut cells, deposition::ATMOSPHERE, step.atmosphere.clone());
        put(
            &mut cells,
            deposition::PRESSURE,
            in_label_unit(&step.pressure, deposition::PRESSURE),
        );
        put(
            &mut cells,
            deposition::HUMIDITY,
            in_label_unit(&step.humidity, deposition::HUMIDITY),
        );
        put(
            &mut cells,
            deposition::TEMPERATURE,
            in_label_unit(&step.temperature, deposition::TEMPERATURE),
        );
        put(
            &mut cells,
            deposition::DURATION,
            in_label_unit(&step.duration, deposition::DURATION),
        );

        match &step.details {
            StepDetails::LiquidSynthesis(liquid) => {
                solvents(&mut cells, &SolventRows::DEPOSITION, &liquid.solvents);
                reaction_components(&mut cells, &liquid.reaction_components);
                if let Some(quenching) = &liquid.quenching {
                    quenching_cells(&mut cells, quenching);
                }
            }
            StepDetails::GasPhaseSynthesis(gas) => {
                reaction_components(&mut cells, &gas.reaction_components);
                put(
                    &mut cells,
                    deposition::RATE,
                    in_label_unit(&gas.deposition_rate, deposition::RATE),
                );
                put(
                    &mut cells,
                    deposition::SOURCE_TEMPERATURE,
                    in_label_unit(&gas.source_temperature, deposition::SOURCE_TEMPERATURE),
                );
            }
            _ => {}
        }
    }

    if let Some(step) = slot.thermal {
        put(
            &mut cells,
            thermal_annealing::TEMPERATURE,
            in_label_unit(&step.temperature, thermal_annealing::TEMPERATURE),
        );
        put(
            &mut cells,
            thermal_annealing::TIME,
            in_label_unit(&step.duration, thermal_annealing::TIME),
        );
        put(&mut cells, thermal_annealing::ATMOSPHERE, step.atmosphere.clone());
    }

    if let Some(step) = slot.solvent {
        if let StepDetails::SolventAnnealing(annealing) = &step.details {
            solvents(&mut cells, &SolventRows::ANNEALING, &annealing.solvents);
        }
        put(
            &mut cells,
            solvent_annealing::TEMPERATURE,
            in_label_unit(&step.temperature, solvent_annealing::TEMPERATURE),
        );
        put(
            &mut cells,
            solvent_annealing::TIME,
            in_label_unit(&step.duration, solvent_annealing::TIME),
        );
    }
    cells
}

fn check_vocabulary(step: &ProcessingStep, vocabulary: &ProcessVocabulary) {
    let Some(method) = step.method.as_deref() else {
        return;
    };
    let declared = match step.details {
        StepDetails::LiquidSynthesis(_) => StepClass::Liquid,
        StepDetails::GasPhaseSynthesis(_) => StepClass::GasPhase,
        StepDetails::SurfaceTreatment => StepClass::SurfaceTreatment,
        StepDetails::Unclassified => StepClass::Unrecognized,
        StepDetails::ThermalAnnealing | StepDetails::SolventAnnealing(_) => return,
    };
    let classified = vocabulary.classify_method(method);
    if classified != declared {
        log::warn!(
            "Step '{}' is encoded as {} but vocabulary v{} classifies it as {:?}",
            method,
            step.details.kind(),
            vocabulary.version,
            classified
        );
    }
}

fn plain(value: &TypedValue) -> Option<String> {
    value.is_known().then(|| value.to_string())
}

fn solvents(cells: &mut Cells, rows: &SolventRows, solvents: &[Solvent]) {
    put(cells, rows.name, list(solvents, |s| s.name.clone()));
    if let Some(label) = rows.mixing_ratio {
        put(cells, label, list(solvents, |s| plain(&s.mixing_ratio)));
    }
    if let Some(label) = rows.supplier {
        put(cells, label, list(solvents, |s| s.supplier.clone()));
    }
    if let Some(label) = rows.purity {
        put(cells, label, list(solvents, |s| s.purity.clone()));
    }
}

fn reaction_components(cells: &mut Cells, components: &[ReactionComponent]) {
    put(cells, deposition::COMPOUNDS, list(components, |c| c.name.clone()));
    put(cells, deposition::COMPOUND_SUPPLIER, list(components, |c| c.supplier.clone()));
    put(cells, deposition::COMPOUND_PURITY, list(components, |c| c.purity.clone()));
    put(
        cells,
        deposition::CONCENTRATIONS,
        list(components, |c| c.concentration.as_ref().map(|amount| amount.to_cell())),
    );
    put(
        cells,
        deposition::VOLUMES,
        list(components, |c| in_label_unit(&c.volume, deposition::VOLUMES)),
    );
    put(
        cells,
        deposition::AGE,
        list(components, |c| in_label_unit(&c.age, deposition::AGE)),
    );
    put(
        cells,
        deposition::SOLUTION_TEMPERATURE,
        list(components, |c| {
            in_label_unit(&c.temperature, deposition::SOLUTION_TEMPERATURE)
        }),
    );
}

fn quenching_cells(cells: &mut Cells, quenching: &QuenchingSolvent) {
    solvents(cells, &SolventRows::QUENCHING, &quenching.media);
    put(
        cells,
        deposition::QUENCHING_VOLUME,
        in_label_unit(&quenching.volume, deposition::QUENCHING_VOLUME),
    );
    put(
        cells,
        deposition::QUENCHING_DELAY,
        in_label_unit(&quenching.delay, deposition::QUENCHING_DELAY),
    );
    additives(
        cells,
        &quenching.additives,
        deposition::QUENCHING_ADDITIVE_COMPOUNDS,
        deposition::QUENCHING_ADDITIVE_CONCENTRATIONS,
    );
}

fn additives(
    cells: &mut Cells,
    additives: &[Additive],
    compounds: &'static str,
    concentrations: &'static str,
) {
    put(cells, compounds, list(additives, |a| a.name.clone()));
    put(
        cells,
        concentrations,
        list(additives, |a| a.concentration.as_ref().map(|amount| amount.to_cell())),
    );
}

fn ions(cells: &mut Cells, shares: &[IonShare], ions: &'static str, coefficients: &'static str) {
    put(cells, ions, list(shares, |share| Some(share.ion.clone())));
    put(cells, coefficients, list(shares, |share| plain(&share.coefficient)));
}
