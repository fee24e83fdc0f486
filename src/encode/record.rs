use super::append_layer;
use super::cells::in_label_unit;
use super::encode_layers;
use crate::config::TranscoderConfig;
use crate::labels::{cell, measurements as rows, reference as refs};
use crate::model::{JvResult, PerformedMeasurements, Record};
use crate::table::{Delimiter, LabelIndex};

fn scoped(scope: &str, field: &str) -> String {
    format!("{}. {}", scope, field)
}

fn push_known(index: &mut LabelIndex, scope: &str, field: &str, value: Option<String>) {
    if let Some(value) = value {
        index.push(scoped(scope, field), value);
    }
}

/// Encode a whole record: reference, cell summary, layers and measurements
pub fn encode_record(record: &Record, config: &TranscoderConfig) -> LabelIndex {
    let mut index = LabelIndex::default();

    if let Some(reference) = &record.reference {
        for (field, value) in [
            (refs::DOI, &reference.doi),
            (refs::LEAD_AUTHOR, &reference.lead_author),
            (refs::PUBLICATION_DATE, &reference.publication_date),
            (refs::JOURNAL, &reference.journal),
            (refs::DATA_ENTERED_BY, &reference.data_entered_by),
            (refs::COMMENT, &reference.comment),
        ] {
            push_known(&mut index, refs::SCOPE, field, value.clone());
        }
    }

    if let Some(general) = &record.general {
        push_known(&mut index, cell::SCOPE, cell::ARCHITECTURE, general.architecture.clone());
        push_known(
            &mut index,
            cell::SCOPE,
            cell::TERMINALS,
            in_label_unit(&general.number_of_terminals, cell::TERMINALS),
        );
        push_known(
            &mut index,
            cell::SCOPE,
            cell::AREA,
            in_label_unit(&general.area, cell::AREA),
        );
        push_known(
            &mut index,
            cell::SCOPE,
            cell::FLEXIBLE,
            general.flexible.map(|flexible| flexible.to_string()),
        );
        if !general.stack_sequence.is_empty() {
            push_known(
                &mut index,
                cell::SCOPE,
                cell::STACK_SEQUENCE,
                Some(general.stack_sequence.join(Delimiter::Layer.as_str())),
            );
        }
    }

    for row in encode_layers(&record.layers.layers, config).rows() {
        index.push(row.label.clone(), row.value.clone());
    }

    encode_measurements(&mut index, &record.measurements);
    index
}

const JV_FIELDS: [&str; 6] = [
    rows::JV_SCAN_DIRECTION,
    rows::JV_VOC,
    rows::JV_JSC,
    rows::JV_FF,
    rows::JV_PCE,
    rows::JV_LIGHT_INTENSITY,
];

fn jv_cell(scan: &JvResult, field: &str) -> Option<String> {
    let value = match field {
        rows::JV_SCAN_DIRECTION => return scan.scan_direction.clone(),
        rows::JV_VOC => &scan.voc,
        rows::JV_JSC => &scan.jsc,
        rows::JV_FF => &scan.fill_factor,
        rows::JV_PCE => &scan.pce,
        rows::JV_LIGHT_INTENSITY => &scan.light_intensity,
        _ => return None,
    };
    in_label_unit(value, field)
}

fn encode_measurements(index: &mut LabelIndex, measured: &PerformedMeasurements) {
    if !measured.jv.is_empty() {
        for field in JV_FIELDS {
            let joined = measured.jv.iter().fold(None, |acc: Option<String>, scan| {
                Some(append_layer(acc.as_deref(), jv_cell(scan, field).as_deref()))
            });
            push_known(index, rows::SCOPE, field, joined);
        }
    }

    if let Some(eqe) = &measured.eqe {
        push_known(
            index,
            rows::SCOPE,
            rows::EQE_INTEGRATED_JSC,
            in_label_unit(&eqe.integrated_jsc, rows::EQE_INTEGRATED_JSC),
        );
        push_known(
            index,
            rows::SCOPE,
            rows::EQE_LIGHT_BIAS,
            eqe.light_bias.map(|bias| bias.to_string()),
        );
    }

    if let Some(stabilised) = &measured.stabilised {
        push_known(
            index,
            rows::SCOPE,
            rows::STABILISED_PCE,
            in_label_unit(&stabilised.pce, rows::STABILISED_PCE),
        );
        push_known(
            index,
            rows::SCOPE,
            rows::STABILISED_TIME,
            in_label_unit(&stabilised.measurement_time, rows::STABILISED_TIME),
        );
        push_known(index, rows::SCOPE, rows::STABILISED_PROCEDURE, stabilised.procedure.clone());
    }
}
