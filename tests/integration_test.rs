//! Integration tests for pvstack
//!
//! These tests run whole tables through decoding, document writing and
//! encoding.

use pvstack::batch::{decode_table, decode_to_directory, BatchOptions, RecordDocument};
use pvstack::config::TranscoderConfig;
use pvstack::encode::encode_record;
use pvstack::model::{Absorber, Functionality, Record, StepDetails};
use pvstack::quantity::{
    concentration, convert, Concentration, TypedValue, UnclassifiedPolicy, Unit,
};
use pvstack::table::{
    split, split_frame, Delimiter, LabelIndex, PaddingPolicy, Table, TableFormat,
};
use std::fs;
use tempfile::tempdir;

/// Label, dev-1, dev-2
const ROWS: &[(&str, &str, &str)] = &[
    ("Ref. DOI number", "10.1000/pv.1", "nan"),
    ("Cell. Architecture", "nip", "pin"),
    ("Cell. Stack sequence", "FTO | Perovskite | Spiro-OMeTAD | Au", "ITO | Ag"),
    ("Layer 1. Layer exists", "true", "true"),
    ("Layer 1. Name", "FTO", "ITO"),
    ("Layer 1. Functionality", "Substrate", "Substrate"),
    ("Layer 1. Cleaning. Procedure", "Soap; Ethanol; UV-ozone", "Unknown"),
    ("Layer 2. Layer exists", "true", "false"),
    ("Layer 2. Name", "Perovskite", "Ghost"),
    ("Layer 2. Thickness [nm]", "0.5 um", "Unknown"),
    ("Layer 2. Perovskite. A-ions", "Cs; FA", "Unknown"),
    ("Layer 2. Perovskite. A-ions. Coefficients", "0.05; 0.95", "Unknown"),
    ("Layer 2. Perovskite. C-ions", "I", "Unknown"),
    ("Layer 2. Deposition. Procedure", "Spin-coating >> Spin-coating", "Spin-coating"),
    ("Layer 2. Deposition. Solvents", "DMF; DMSO >> IPA", "Unknown"),
    ("Layer 2. Deposition. Reaction solutions. Compounds", "PbI2; FAI >> Unknown", "Unknown"),
    (
        "Layer 2. Deposition. Reaction solutions. Concentrations",
        "1.2 M; 10 mg/ml >> Unknown",
        "Unknown",
    ),
    ("Layer 2. Thermal annealing. Temperature [°C]", "100 >> 150", "Unknown"),
    ("Layer 2. Thermal annealing. Time [min]", "10 >> 15", "Unknown"),
    ("Layer 3. Layer exists", "false", "true"),
    ("Layer 3. Name", "Ghost", "Ag"),
    ("Layer 3. Deposition. Procedure", "Unknown", "Evaporation"),
    ("Layer 4. Layer exists", "true", "false"),
    ("Layer 4. Name", "Spiro-OMeTAD | Au", "Unknown"),
    ("Layer 4. Functionality", "Hole transport layer | Contact", "Unknown"),
    ("Layer 4. Deposition. Procedure", "Spin-coating | Evaporation", "Unknown"),
    ("Measurements. JV. Scan direction", "Reverse | Forward", "Unknown"),
    ("Measurements. JV. Voc [V]", "1.1 | 1.05", "0.98"),
];

fn fixture(separator: char) -> String {
    let mut content = format!("Label{0}dev-1{0}dev-2\n", separator);
    for (label, first, second) in ROWS {
        content.push_str(&format!("{label}{separator}{first}{separator}{second}\n"));
    }
    content
}

fn decode_fixture(config: &TranscoderConfig) -> Vec<Record> {
    let table = Table::from_reader(fixture('\t').as_bytes(), TableFormat::Tsv).unwrap();
    decode_table(&table, config)
}

fn names(record: &Record) -> Vec<&str> {
    record
        .layers
        .iter()
        .map(|layer| layer.name.as_deref().unwrap_or("?"))
        .collect()
}

/// Test decoding a table end to end
#[test]
fn test_decode_table() {
    let config = TranscoderConfig::default();
    let records = decode_fixture(&config);
    assert_eq!(records.len(), 2);

    let device = &records[0];
    assert_eq!(device.id, "dev-1");
    assert_eq!(names(device), vec!["FTO", "Perovskite", "Spiro-OMeTAD", "Au"]);
    assert_eq!(
        device.reference.as_ref().unwrap().doi.as_deref(),
        Some("10.1000/pv.1")
    );
    assert_eq!(device.general.as_ref().unwrap().stack_sequence.len(), 4);

    let substrate = &device.layers.layers[0];
    assert_eq!(substrate.functionality, Some(Functionality::Substrate));
    assert_eq!(
        substrate.synthesis.cleaning.as_ref().unwrap().procedures,
        vec!["Soap", "Ethanol", "UV-ozone"]
    );
    assert!(substrate.synthesis.steps.is_empty());

    let absorber = &device.layers.layers[1];
    assert_eq!(absorber.position, 2);
    assert!(absorber.is_photoabsorber());
    assert!((absorber.thickness.as_f64().unwrap() - 500.0).abs() < 1e-9);
    match &absorber.composition.absorber {
        Some(Absorber::Perovskite { a_ions, c_ions, .. }) => {
            assert_eq!(a_ions.len(), 2);
            assert_eq!(a_ions[1].coefficient, TypedValue::Number(0.95));
            assert_eq!(c_ions[0].ion, "I");
        }
        other => panic!("expected a perovskite absorber, got {:?}", other),
    }

    let kinds: Vec<&str> = absorber
        .synthesis
        .steps
        .iter()
        .map(|step| step.details.kind())
        .collect();
    assert_eq!(
        kinds,
        vec!["liquid", "thermal annealing", "liquid", "thermal annealing"]
    );
    assert_eq!(absorber.synthesis.steps[3].temperature.as_f64(), Some(150.0));

    match &absorber.synthesis.steps[0].details {
        StepDetails::LiquidSynthesis(liquid) => {
            assert_eq!(liquid.solvents.len(), 2);
            assert!(matches!(
                liquid.reaction_components[0].concentration,
                Some(Concentration::MolarConcentration(_))
            ));
            assert!(matches!(
                liquid.reaction_components[1].concentration,
                Some(Concentration::MassConcentration(_))
            ));
        }
        other => panic!("expected a liquid step, got {:?}", other),
    }

    // Sublayers of one position
    assert_eq!(device.layers.layers[2].position, 4);
    assert_eq!(device.layers.layers[3].position, 4);
    assert_eq!(
        device.layers.layers[3].functionality,
        Some(Functionality::Contact)
    );
    assert!(matches!(
        device.layers.layers[3].synthesis.steps[0].details,
        StepDetails::GasPhaseSynthesis(_)
    ));

    assert_eq!(device.measurements.jv.len(), 2);
    assert_eq!(
        device.measurements.jv[1].scan_direction.as_deref(),
        Some("Forward")
    );
}

/// Flags [true, false, true] give exactly two layers in order
#[test]
fn test_absent_layers_are_skipped() {
    let records = decode_fixture(&TranscoderConfig::default());
    let device = &records[1];

    assert!(device.reference.is_none());
    assert_eq!(names(device), vec!["ITO", "Ag"]);
    assert_eq!(device.layers.positions(), vec![1, 3]);
    assert_eq!(device.measurements.jv.len(), 1);
}

/// Decoding an encoded record gives the same record back
#[test]
fn test_encode_decode_is_idempotent() {
    let config = TranscoderConfig::default();
    for record in decode_fixture(&config) {
        let flat = encode_record(&record, &config);
        let again = pvstack::assemble::decode_record(&record.id, &flat, &config);
        assert_eq!(again, record, "record {}", record.id);
    }
}

/// Encoded records survive a trip through a table file
#[test]
fn test_encoded_table_file_cycle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("encoded.csv");
    let config = TranscoderConfig::default();
    let records = decode_fixture(&config);

    let columns: Vec<(String, LabelIndex)> = records
        .iter()
        .map(|record| (record.id.clone(), encode_record(record, &config)))
        .collect();
    let table = Table::from_indexes(&columns);
    table
        .to_writer(fs::File::create(&path).unwrap(), TableFormat::Csv)
        .unwrap();

    let restored = Table::from_path(&path).unwrap();
    assert_eq!(restored.record_ids(), table.record_ids());
    assert_eq!(decode_table(&restored, &config), records);
}

/// Test writing one JSON document per record
#[test]
fn test_decode_to_directory() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("devices.csv");
    fs::write(&input, fixture(',')).unwrap();
    let output = dir.path().join("records");

    let report = decode_to_directory(
        &input,
        None,
        &output,
        &TranscoderConfig::default(),
        BatchOptions::default(),
    )
    .unwrap();

    assert_eq!(report.written_count(), 2);
    assert!(!report.has_failures());

    let content = fs::read_to_string(output.join("dev-1.json")).unwrap();
    let document: RecordDocument = serde_json::from_str(&content).unwrap();
    assert_eq!(document.record_id, "dev-1");
    assert_eq!(
        document.source_file.as_deref(),
        Some(input.display().to_string().as_str())
    );
    assert_eq!(document.record.layers.len(), 4);

    // Tagged values in the document
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    let thickness = &json["record"]["layers"]["layers"][1]["thickness"];
    assert_eq!(thickness["kind"], "quantity");
    assert_eq!(thickness["value"]["unit"], "nm");
}

/// A tab-separated file read with an explicit format override
#[test]
fn test_format_override() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("devices.txt");
    fs::write(&input, fixture(',')).unwrap();

    let report = decode_to_directory(
        &input,
        Some(TableFormat::Csv),
        &dir.path().join("out"),
        &TranscoderConfig::default(),
        BatchOptions { pretty: false },
    )
    .unwrap();
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.outcomes[0].layers, 4);
}

/// Splitting at the layer tier and then at the step tier
#[test]
fn test_tiered_split_pads_by_repetition() {
    let column = LabelIndex::from_rows([(
        "Deposition. Procedure",
        "Spin-coating >> CBD | Spin-coating",
    )]);
    let layers = split(&column, Delimiter::Layer, PaddingPolicy::RepeatLast);
    assert_eq!(layers.len(), 2);

    let steps = split_frame(&layers, Delimiter::Step, PaddingPolicy::RepeatLast);
    let procedures = |frame: &[LabelIndex]| -> Vec<String> {
        frame
            .iter()
            .map(|step| step.exact_or("Deposition. Procedure", "").to_string())
            .collect()
    };
    assert_eq!(procedures(&steps[0]), vec!["Spin-coating", "CBD"]);
    assert_eq!(procedures(&steps[1]), vec!["Spin-coating", "Spin-coating"]);
}

/// Concentrations are classified and canonicalized
#[test]
fn test_concentration_normalization() {
    let molar = Unit::parse("mol/L").unwrap();
    let value = convert("0.15 M", Some(&molar));
    let quantity = value.as_quantity().unwrap();
    assert_eq!(quantity.unit().symbol(), "mol/L");
    assert!((quantity.value() - 0.15).abs() < 1e-12);

    match concentration("10 mg/ml", UnclassifiedPolicy::Keep) {
        Some(Concentration::MassConcentration(q)) => {
            assert_eq!(q.unit().symbol(), "g/L");
            assert!((q.value() - 10.0).abs() < 1e-9);
        }
        other => panic!("expected a mass concentration, got {:?}", other),
    }

    assert_eq!(convert("nan", None), TypedValue::Absent);
}
