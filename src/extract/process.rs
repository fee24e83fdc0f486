use super::chemicals::{quenching, reaction_components, solvents, SolventRows};
use crate::config::TranscoderConfig;
use crate::labels::{
    cleaning as cleaning_rows, deposition, solvent_annealing as sa, storage as st,
    thermal_annealing as ta,
};
use crate::model::{
    Cleaning, GasPhaseSynthesis, LiquidSynthesis, ProcessingStep, SolventAnnealing, StepDetails,
    Storage,
};
use crate::quantity;
use crate::table::{split_cell, Delimiter, LabelIndex, PaddingPolicy};

/// Method name given to thermal annealing steps
pub const THERMAL_ANNEALING_METHOD: &str = "Thermal annealing";

/// Method name given to solvent annealing steps
pub const SOLVENT_ANNEALING_METHOD: &str = "Solvent annealing";

/// Cleaning actions of a sublayer, `None` when none are listed
pub fn cleaning(scope: &LabelIndex) -> Option<Cleaning> {
    let procedures: Vec<String> = scope
        .text(cleaning_rows::PROCEDURE)
        .map(|cell| split_cell(&cell, Delimiter::Component))
        .unwrap_or_default()
        .into_iter()
        .filter(|procedure| !quantity::is_unknown(procedure))
        .collect();
    (!procedures.is_empty()).then_some(Cleaning { procedures })
}

/// Storage conditions of a sublayer
pub fn storage(scope: &LabelIndex) -> Option<Storage> {
    let storage = Storage {
        atmosphere: scope.text(st::ATMOSPHERE),
        time: scope.value(st::TIME),
        humidity: scope.value(st::HUMIDITY),
    };
    (storage != Storage::default()).then_some(storage)
}

/// Method and shared conditions of a deposition step, details left unclassified
pub fn conditions(step: &LabelIndex) -> ProcessingStep {
    ProcessingStep {
        method: step.text(deposition::PROCEDURE),
        atmosphere: step.text(deposition::ATMOSPHERE),
        pressure: step.value(deposition::PRESSURE),
        humidity: step.value(deposition::HUMIDITY),
        temperature: step.value(deposition::TEMPERATURE),
        duration: step.value(deposition::DURATION),
        details: StepDetails::Unclassified,
    }
}

/// Solvents, reaction components and quenching of a solution step
pub fn liquid_synthesis(step: &LabelIndex, config: &TranscoderConfig) -> LiquidSynthesis {
    LiquidSynthesis {
        solvents: solvents(step, &SolventRows::DEPOSITION, config.padding),
        reaction_components: reaction_components(step, config),
        quenching: quenching(step, config),
    }
}

/// Sources, rate and source temperature of a vapour step
pub fn gas_phase_synthesis(step: &LabelIndex, config: &TranscoderConfig) -> GasPhaseSynthesis {
    GasPhaseSynthesis {
        reaction_components: reaction_components(step, config),
        deposition_rate: step.value(deposition::RATE),
        source_temperature: step.value(deposition::SOURCE_TEMPERATURE),
    }
}

/// Thermal annealing following a step, `None` when its rows are blank
pub fn thermal_annealing(step: &LabelIndex) -> Option<ProcessingStep> {
    let mut annealing = ProcessingStep::new(
        Some(THERMAL_ANNEALING_METHOD.to_string()),
        StepDetails::ThermalAnnealing,
    );
    annealing.temperature = step.value(ta::TEMPERATURE);
    annealing.duration = step.value(ta::TIME);
    annealing.atmosphere = step.text(ta::ATMOSPHERE);
    annealing.has_conditions().then_some(annealing)
}

/// Solvent annealing following a step, `None` when its rows are blank
pub fn solvent_annealing(step: &LabelIndex, padding: PaddingPolicy) -> Option<ProcessingStep> {
    let solvents = solvents(step, &SolventRows::ANNEALING, padding);
    let mut annealing = ProcessingStep::new(
        Some(SOLVENT_ANNEALING_METHOD.to_string()),
        StepDetails::SolventAnnealing(SolventAnnealing { solvents }),
    );
    annealing.temperature = step.value(sa::TEMPERATURE);
    annealing.duration = step.value(sa::TIME);

    let has_solvents = matches!(
        &annealing.details,
        StepDetails::SolventAnnealing(details) if !details.solvents.is_empty()
    );
    (has_solvents || annealing.has_conditions()).then_some(annealing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::TypedValue;

    #[test]
    fn test_cleaning_procedures() {
        let scope =
            LabelIndex::from_rows([("Cleaning. Procedure", "Soap; Ultrasonic bath; UV-ozone")]);
        let cleaning = cleaning(&scope).unwrap();
        assert_eq!(cleaning.procedures, vec!["Soap", "Ultrasonic bath", "UV-ozone"]);

        let blank = LabelIndex::from_rows([("Cleaning. Procedure", "Unknown")]);
        assert!(super::cleaning(&blank).is_none());
    }

    #[test]
    fn test_conditions_convert_into_label_units() {
        let step = LabelIndex::from_rows([
            ("Deposition. Procedure", "Spin-coating"),
            ("Deposition. Atmosphere", "N2"),
            ("Deposition. Pressure [mbar]", "1 atm"),
            ("Deposition. Duration [s]", "0.5 min"),
            ("Deposition. Temperature [°C]", "room temperature"),
        ]);
        let step = conditions(&step);
        assert_eq!(step.method.as_deref(), Some("Spin-coating"));
        assert!((step.pressure.as_f64().unwrap() - 1013.25).abs() < 1e-9);
        assert!((step.duration.as_f64().unwrap() - 30.0).abs() < 1e-9);
        assert_eq!(step.temperature, TypedValue::Text("room temperature".to_string()));
        assert!(step.humidity.is_absent());
        assert_eq!(step.details, StepDetails::Unclassified);
    }

    #[test]
    fn test_annealing_only_when_filled() {
        let step = LabelIndex::from_rows([
            ("Thermal annealing. Temperature [°C]", "100"),
            ("Thermal annealing. Time [min]", "10"),
            ("Solvent annealing. Solvents", "Unknown"),
        ]);
        let thermal = thermal_annealing(&step).unwrap();
        assert_eq!(thermal.method.as_deref(), Some(THERMAL_ANNEALING_METHOD));
        assert_eq!(thermal.temperature.as_f64(), Some(100.0));
        assert!(solvent_annealing(&step, PaddingPolicy::RepeatLast).is_none());

        let step = LabelIndex::from_rows([("Solvent annealing. Solvents", "DMF")]);
        let solvent = solvent_annealing(&step, PaddingPolicy::RepeatLast).unwrap();
        assert!(solvent.is_annealing());
        assert!(thermal_annealing(&step).is_none());
    }

    #[test]
    fn test_gas_phase_fields() {
        let step = LabelIndex::from_rows([
            ("Deposition. Reaction solutions. Compounds", "PbI2; MAI"),
            ("Deposition. Rate [nm/s]", "0.1 | 0.2"),
            ("Deposition. Source temperature [°C]", "573.15 K"),
        ]);
        let gas = gas_phase_synthesis(&step, &TranscoderConfig::default());
        assert_eq!(gas.reaction_components.len(), 2);
        assert!((gas.source_temperature.as_f64().unwrap() - 300.0).abs() < 1e-9);
        // Not split at this tier
        assert!(matches!(gas.deposition_rate, TypedValue::Text(_)));
    }
}
