use super::*;
use crate::assemble::LayerStackAssembler;
use crate::config::TranscoderConfig;
use crate::extract::{SOLVENT_ANNEALING_METHOD, THERMAL_ANNEALING_METHOD};
use crate::model::*;
use crate::quantity::{concentration, Quantity, TypedValue, UnclassifiedPolicy, Unit};
use crate::table::LabelIndex;

fn quantity(value: f64, unit: &str) -> TypedValue {
    TypedValue::Quantity(Quantity::new(value, Unit::parse(unit).unwrap()))
}

fn thermal(temperature: f64, minutes: f64) -> ProcessingStep {
    let mut step = ProcessingStep::new(
        Some(THERMAL_ANNEALING_METHOD.to_string()),
        StepDetails::ThermalAnnealing,
    );
    step.temperature = quantity(temperature, "°C");
    step.duration = quantity(minutes, "min");
    step
}

fn solvent_annealing(solvent: &str) -> ProcessingStep {
    let mut step = ProcessingStep::new(
        Some(SOLVENT_ANNEALING_METHOD.to_string()),
        StepDetails::SolventAnnealing(SolventAnnealing {
            solvents: vec![Solvent::named(solvent)],
        }),
    );
    step.duration = quantity(5.0, "min");
    step
}

fn spin_coating(solvents: Vec<Solvent>) -> ProcessingStep {
    ProcessingStep::new(
        Some("Spin-coating".to_string()),
        StepDetails::LiquidSynthesis(LiquidSynthesis {
            solvents,
            ..Default::default()
        }),
    )
}

fn evaporation(rate: f64) -> ProcessingStep {
    ProcessingStep::new(
        Some("Evaporation".to_string()),
        StepDetails::GasPhaseSynthesis(GasPhaseSynthesis {
            deposition_rate: quantity(rate, "nm/s"),
            ..Default::default()
        }),
    )
}

fn ion(name: &str, coefficient: f64) -> IonShare {
    IonShare {
        ion: name.to_string(),
        coefficient: TypedValue::Number(coefficient),
    }
}

/// A stack in the form the decoder produces
fn device() -> Vec<Layer> {
    let substrate = Layer {
        position: 1,
        name: Some("FTO".to_string()),
        functionality: Some(Functionality::Substrate),
        composition: Composition {
            material: Some("FTO".to_string()),
            ..Default::default()
        },
        synthesis: Synthesis {
            cleaning: Some(Cleaning {
                procedures: vec!["Soap".to_string(), "UV-ozone".to_string()],
            }),
            steps: Vec::new(),
        },
        ..Default::default()
    };

    let mut precursor = spin_coating(vec![
        Solvent {
            name: Some("DMF".to_string()),
            mixing_ratio: TypedValue::Number(4.0),
            ..Default::default()
        },
        Solvent {
            name: Some("DMSO".to_string()),
            mixing_ratio: TypedValue::Number(1.0),
            ..Default::default()
        },
    ]);
    precursor.atmosphere = Some("N2".to_string());
    precursor.duration = quantity(30.0, "s");
    if let StepDetails::LiquidSynthesis(liquid) = &mut precursor.details {
        liquid.reaction_components = vec![ReactionComponent {
            name: Some("PbI2".to_string()),
            concentration: concentration("1.2 mol/L", UnclassifiedPolicy::Keep),
            ..Default::default()
        }];
        liquid.quenching = Some(QuenchingSolvent {
            media: vec![Solvent::named("Chlorobenzene")],
            delay: quantity(10.0, "s"),
            ..Default::default()
        });
    }

    let absorber = Layer {
        position: 2,
        name: Some("Perovskite".to_string()),
        functionality: Some(Functionality::Photoabsorber),
        thickness: quantity(500.0, "nm"),
        composition: Composition {
            material: Some("Perovskite".to_string()),
            additives: Vec::new(),
            absorber: Some(Absorber::Perovskite {
                a_ions: vec![ion("MA", 1.0)],
                b_ions: vec![ion("Pb", 1.0)],
                c_ions: vec![ion("I", 3.0)],
                dimension: Some("3D".to_string()),
                band_gap: quantity(1.6, "eV"),
            }),
        },
        synthesis: Synthesis {
            cleaning: None,
            steps: vec![precursor, thermal(100.0, 10.0)],
        },
        ..Default::default()
    };

    let hole_transport = Layer {
        position: 3,
        name: Some("Spiro-OMeTAD".to_string()),
        functionality: Some(Functionality::HoleTransport),
        composition: Composition {
            material: Some("Spiro-OMeTAD".to_string()),
            ..Default::default()
        },
        synthesis: Synthesis {
            cleaning: None,
            steps: vec![spin_coating(vec![Solvent::named("Chlorobenzene")])],
        },
        ..Default::default()
    };

    let contact = Layer {
        position: 3,
        name: Some("Au".to_string()),
        functionality: Some(Functionality::Contact),
        composition: Composition {
            material: Some("Au".to_string()),
            ..Default::default()
        },
        synthesis: Synthesis {
            cleaning: None,
            steps: vec![evaporation(0.1)],
        },
        storage: Some(Storage {
            atmosphere: Some("Air".to_string()),
            time: quantity(12.0, "h"),
            ..Default::default()
        }),
        ..Default::default()
    };

    vec![substrate, absorber, hole_transport, contact]
}

fn decode(index: &LabelIndex, config: &TranscoderConfig) -> Vec<Layer> {
    LayerStackAssembler::new(config).assemble(index).layers
}

#[test]
fn test_append_layer_is_associative() {
    let first = append_layer(None, Some("ITO"));
    let one_at_a_time = append_layer(Some(first.as_str()), Some("PEDOT"));
    let joined = ["ITO", "PEDOT"].join(" | ");
    let at_once = append_layer(None, Some(joined.as_str()));
    assert_eq!(one_at_a_time, at_once);
    assert_eq!(one_at_a_time, "ITO | PEDOT");
}

#[test]
fn test_missing_values_become_unknown() {
    assert_eq!(append_layer(None, None), "Unknown");
    assert_eq!(append_layer(Some("Au"), None), "Au | Unknown");
    assert_eq!(join_steps([Some("Spin-coating"), None]), "Spin-coating >> Unknown");
    assert_eq!(join_components([None, Some("DMSO")]), "Unknown; DMSO");
    assert_eq!(join_components(Vec::<Option<&str>>::new()), "Unknown");
}

#[test]
fn test_encoder_keeps_sublayer_positions_aligned() {
    let config = TranscoderConfig::default();
    let layers = device();
    let mut encoder = LayerEncoder::new(&config);
    encoder.append(&layers[2]);
    encoder.append(&layers[3]);

    assert_eq!(encoder.sublayers(), 2);
    assert_eq!(encoder.cell("Name"), Some("Spiro-OMeTAD | Au"));
    assert_eq!(encoder.cell("Deposition. Procedure"), Some("Spin-coating | Evaporation"));
    assert_eq!(encoder.cell("Deposition. Solvents"), Some("Chlorobenzene | Unknown"));
    assert_eq!(encoder.cell("Deposition. Rate [nm/s]"), Some("Unknown | 0.1"));
    assert_eq!(encoder.cell("Silicon. Type"), Some("Unknown | Unknown"));
    assert_eq!(encoder.cell("Storage. Time [h]"), Some("Unknown | 12"));
}

#[test]
fn test_incremental_encoding_matches_joined_sublayers() {
    let config = TranscoderConfig::default();
    let layers = device();

    let mut both = LayerEncoder::new(&config);
    both.append(&layers[2]);
    both.append(&layers[3]);

    let mut first = LayerEncoder::new(&config);
    first.append(&layers[2]);
    let mut second = LayerEncoder::new(&config);
    second.append(&layers[3]);

    for field in crate::labels::LAYER_FIELDS.iter().chain(crate::labels::STEP_FIELDS) {
        let joined = format!("{} | {}", first.cell(field).unwrap(), second.cell(field).unwrap());
        assert_eq!(both.cell(field), Some(joined.as_str()), "row {}", field);
    }
}

#[test]
fn test_annealing_written_to_dedicated_rows() {
    let config = TranscoderConfig::default();
    let layer = Layer {
        position: 1,
        name: Some("Perovskite".to_string()),
        synthesis: Synthesis {
            cleaning: None,
            steps: vec![spin_coating(Vec::new()), thermal(100.0, 10.0), evaporation(0.2)],
        },
        ..Default::default()
    };
    let mut encoder = LayerEncoder::new(&config);
    encoder.append(&layer);

    assert_eq!(encoder.cell("Deposition. Procedure"), Some("Spin-coating >> Evaporation"));
    assert_eq!(
        encoder.cell("Thermal annealing. Temperature [°C]"),
        Some("100 >> Unknown")
    );
    assert_eq!(encoder.cell("Thermal annealing. Time [min]"), Some("10 >> Unknown"));
}

#[test]
fn test_layers_round_trip() {
    let config = TranscoderConfig::default();
    let layers = device();
    let index = encode_layers(&layers, &config);

    assert_eq!(index.exact("Layer 3. Layer exists"), Some("true"));
    assert_eq!(decode(&index, &config), layers);
}

#[test]
fn test_annealing_order_round_trips() {
    let config = TranscoderConfig::default();
    let layer = Layer {
        position: 1,
        name: Some("Perovskite".to_string()),
        synthesis: Synthesis {
            cleaning: None,
            steps: vec![
                thermal(70.0, 1.0),
                spin_coating(vec![Solvent::named("DMF")]),
                solvent_annealing("DMF"),
                thermal(100.0, 10.0),
            ],
        },
        ..Default::default()
    };
    let index = encode_layers(std::slice::from_ref(&layer), &config);

    assert_eq!(
        index.exact("Layer 1. Deposition. Procedure"),
        Some("Unknown >> Spin-coating >> Unknown")
    );
    let decoded = decode(&index, &config);
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].synthesis, layer.synthesis);
}

#[test]
fn test_ragged_sibling_steps_are_padded_explicitly() {
    let config = TranscoderConfig::default();
    let bottom = Layer {
        position: 1,
        name: Some("SnO2".to_string()),
        synthesis: Synthesis {
            cleaning: None,
            steps: vec![spin_coating(Vec::new()), evaporation(0.3)],
        },
        ..Default::default()
    };
    let top = Layer {
        position: 1,
        name: Some("PCBM".to_string()),
        synthesis: Synthesis {
            cleaning: None,
            steps: vec![spin_coating(Vec::new())],
        },
        ..Default::default()
    };
    let layers = vec![bottom, top];
    let index = encode_layers(&layers, &config);

    assert_eq!(
        index.exact("Layer 1. Deposition. Procedure"),
        Some("Spin-coating >> Evaporation | Spin-coating >> Unknown")
    );
    let decoded = decode(&index, &config);
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0].synthesis, layers[0].synthesis);
    // Not a repeat of the sibling's evaporation
    assert_eq!(decoded[1].synthesis, layers[1].synthesis);
}

#[test]
fn test_unpositioned_layers_are_numbered_in_order() {
    let config = TranscoderConfig::default();
    let layers = vec![
        Layer {
            name: Some("Glass".to_string()),
            ..Default::default()
        },
        Layer {
            name: Some("ITO".to_string()),
            ..Default::default()
        },
    ];
    let index = encode_layers(&layers, &config);
    assert_eq!(index.exact("Layer 1. Name"), Some("Glass"));
    assert_eq!(index.exact("Layer 2. Name"), Some("ITO"));
}

#[test]
fn test_record_round_trip() {
    let config = TranscoderConfig::default();
    let record = Record {
        id: "device-7".to_string(),
        reference: Some(Reference {
            doi: Some("10.1000/abc".to_string()),
            lead_author: Some("Doe".to_string()),
            ..Default::default()
        }),
        general: Some(General {
            architecture: Some("nip".to_string()),
            area: quantity(0.09, "cm^2"),
            flexible: Some(false),
            stack_sequence: vec!["FTO".to_string(), "Perovskite".to_string()],
            ..Default::default()
        }),
        layers: LayerStack { layers: device() },
        measurements: PerformedMeasurements {
            jv: vec![
                JvResult {
                    scan_direction: Some("Reverse".to_string()),
                    voc: quantity(1.12, "V"),
                    pce: quantity(20.1, "%"),
                    ..Default::default()
                },
                JvResult {
                    scan_direction: Some("Forward".to_string()),
                    voc: quantity(1.08, "V"),
                    ..Default::default()
                },
            ],
            eqe: Some(EqeResult {
                light_bias: Some(true),
                ..Default::default()
            }),
            stabilised: None,
        },
    };

    let index = encode_record(&record, &config);
    let decoded = crate::assemble::decode_record("device-7", &index, &config);
    assert_eq!(decoded, record);
}
