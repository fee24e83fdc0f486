use crate::config::TranscoderConfig;
use crate::labels::{cell, measurements as rows, reference as refs};
use crate::model::{
    EqeResult, General, JvResult, PerformedMeasurements, Reference, StabilisedPerformance,
};
use crate::quantity;
use crate::table::{split, split_cell, Delimiter, LabelIndex, PaddingPolicy};

/// Publication reference from the `Ref.` rows
pub fn reference(record: &LabelIndex) -> Option<Reference> {
    let scope = record.scoped(refs::SCOPE);
    let reference = Reference {
        doi: scope.text(refs::DOI),
        lead_author: scope.text(refs::LEAD_AUTHOR),
        publication_date: scope.text(refs::PUBLICATION_DATE),
        journal: scope.text(refs::JOURNAL),
        data_entered_by: scope.text(refs::DATA_ENTERED_BY),
        comment: scope.text(refs::COMMENT),
    };
    (reference != Reference::default()).then_some(reference)
}

/// Device summary from the `Cell.` rows
pub fn general(record: &LabelIndex) -> Option<General> {
    let scope = record.scoped(cell::SCOPE);
    let stack_sequence = scope
        .text(cell::STACK_SEQUENCE)
        .map(|sequence| {
            split_cell(&sequence, Delimiter::Layer)
                .into_iter()
                .filter(|name| !quantity::is_unknown(name))
                .collect()
        })
        .unwrap_or_default();

    let general = General {
        architecture: scope.text(cell::ARCHITECTURE),
        number_of_terminals: scope.value(cell::TERMINALS),
        area: scope.value(cell::AREA),
        flexible: scope.flag(cell::FLEXIBLE),
        stack_sequence,
    };
    (general != General::default()).then_some(general)
}

/// All measurements from the `Measurements.` rows
pub fn measurements(record: &LabelIndex, config: &TranscoderConfig) -> PerformedMeasurements {
    let scope = record.scoped(rows::SCOPE);
    PerformedMeasurements {
        jv: jv_results(&scope, config.padding),
        eqe: eqe(&scope),
        stabilised: stabilised(&scope),
    }
}

/// JV scans; repeated scans are separated at the layer tier
pub fn jv_results(scope: &LabelIndex, padding: PaddingPolicy) -> Vec<JvResult> {
    let jv = scope.branch(rows::JV);
    if jv.is_blank() {
        return Vec::new();
    }
    split(&jv, Delimiter::Layer, padding)
        .iter()
        .map(|scan| JvResult {
            scan_direction: scan.text(rows::JV_SCAN_DIRECTION),
            voc: scan.value(rows::JV_VOC),
            jsc: scan.value(rows::JV_JSC),
            fill_factor: scan.value(rows::JV_FF),
            pce: scan.value(rows::JV_PCE),
            light_intensity: scan.value(rows::JV_LIGHT_INTENSITY),
        })
        .filter(|scan| *scan != JvResult::default())
        .collect()
}

/// EQE summary
pub fn eqe(scope: &LabelIndex) -> Option<EqeResult> {
    let eqe = EqeResult {
        integrated_jsc: scope.value(rows::EQE_INTEGRATED_JSC),
        light_bias: scope.flag(rows::EQE_LIGHT_BIAS),
    };
    (eqe != EqeResult::default()).then_some(eqe)
}

/// Stabilised performance
pub fn stabilised(scope: &LabelIndex) -> Option<StabilisedPerformance> {
    let stabilised = StabilisedPerformance {
        pce: scope.value(rows::STABILISED_PCE),
        measurement_time: scope.value(rows::STABILISED_TIME),
        procedure: scope.text(rows::STABILISED_PROCEDURE),
    };
    (stabilised != StabilisedPerformance::default()).then_some(stabilised)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LabelIndex {
        LabelIndex::from_rows([
            ("Ref. DOI number", "10.1000/xyz"),
            ("Ref. Lead author", "Doe"),
            ("Ref. Journal", "nan"),
            ("Cell. Architecture", "nip"),
            ("Cell. Area [cm^2]", "0.09"),
            ("Cell. Flexible", "FALSE"),
            ("Cell. Stack sequence", "FTO | TiO2 | Perovskite | Spiro | Au"),
            ("Measurements. JV. Scan direction", "Reverse | Forward"),
            ("Measurements. JV. Voc [V]", "1.12 | 1.08"),
            ("Measurements. JV. PCE [%]", "20.1 | 18.7"),
            ("Measurements. EQE. Integrated Jsc [mA/cm^2]", "22.8"),
            ("Measurements. Stabilised performance. PCE [%]", "Unknown"),
        ])
    }

    #[test]
    fn test_reference_and_general() {
        let index = record();
        let reference = reference(&index).unwrap();
        assert_eq!(reference.doi.as_deref(), Some("10.1000/xyz"));
        assert_eq!(reference.journal, None);

        let general = general(&index).unwrap();
        assert_eq!(general.architecture.as_deref(), Some("nip"));
        assert_eq!(general.flexible, Some(false));
        assert_eq!(general.stack_sequence.len(), 5);
        assert_eq!(general.area.as_quantity().unwrap().unit().symbol(), "cm^2");
    }

    #[test]
    fn test_repeated_jv_scans() {
        let measured = measurements(&record(), &TranscoderConfig::default());
        assert_eq!(measured.jv.len(), 2);
        assert_eq!(measured.jv[1].scan_direction.as_deref(), Some("Forward"));
        assert_eq!(measured.jv[1].voc.as_f64(), Some(1.08));
        assert!(measured.jv[0].jsc.is_absent());
        assert_eq!(measured.eqe.unwrap().integrated_jsc.as_f64(), Some(22.8));
        assert!(measured.stabilised.is_none());
    }

    #[test]
    fn test_blank_record_sections() {
        let index = LabelIndex::from_rows([("Layer 1. Name", "ITO")]);
        assert!(reference(&index).is_none());
        assert!(general(&index).is_none());
        assert!(measurements(&index, &TranscoderConfig::default()).is_empty());
    }
}
