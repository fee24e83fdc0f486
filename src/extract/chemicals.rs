use super::{components, optional_text};
use crate::config::TranscoderConfig;
use crate::labels::{deposition, layer, solvent_annealing};
use crate::model::{Additive, QuenchingSolvent, ReactionComponent, Solvent};
use crate::quantity;
use crate::table::{LabelIndex, PaddingPolicy};

/// Labels of one solvent list. Lists other than the deposition solvents
/// carry only some of the attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolventRows {
    /// Solvent names
    pub name: &'static str,
    /// Mixing ratios
    pub mixing_ratio: Option<&'static str>,
    /// Suppliers
    pub supplier: Option<&'static str>,
    /// Purities
    pub purity: Option<&'static str>,
}

impl SolventRows {
    /// Solvents of a liquid deposition step
    pub const DEPOSITION: SolventRows = SolventRows {
        name: deposition::SOLVENTS,
        mixing_ratio: Some(deposition::SOLVENT_MIXING_RATIOS),
        supplier: Some(deposition::SOLVENT_SUPPLIER),
        purity: Some(deposition::SOLVENT_PURITY),
    };

    /// Antisolvent quenching media
    pub const QUENCHING: SolventRows = SolventRows {
        name: deposition::QUENCHING_MEDIA,
        mixing_ratio: Some(deposition::QUENCHING_MIXING_RATIOS),
        supplier: None,
        purity: None,
    };

    /// Solvent annealing atmosphere
    pub const ANNEALING: SolventRows = SolventRows {
        name: solvent_annealing::SOLVENTS,
        mixing_ratio: None,
        supplier: None,
        purity: None,
    };

    fn labels(&self) -> Vec<&'static str> {
        std::iter::once(self.name)
            .chain(self.mixing_ratio)
            .chain(self.supplier)
            .chain(self.purity)
            .collect()
    }
}

/// Solvents listed in `rows`, one per component token
pub fn solvents(scope: &LabelIndex, rows: &SolventRows, padding: PaddingPolicy) -> Vec<Solvent> {
    components(scope, &rows.labels(), padding)
        .iter()
        .map(|component| Solvent {
            name: component.text(rows.name),
            mixing_ratio: rows
                .mixing_ratio
                .map(|label| component.exact_value(label, None))
                .unwrap_or_default(),
            supplier: optional_text(component, rows.supplier),
            purity: optional_text(component, rows.purity),
        })
        .filter(|solvent| !solvent.is_empty())
        .collect()
}

/// Dissolved or evaporated compounds of a deposition step
pub fn reaction_components(
    scope: &LabelIndex,
    config: &TranscoderConfig,
) -> Vec<ReactionComponent> {
    let labels = [
        deposition::COMPOUNDS,
        deposition::COMPOUND_SUPPLIER,
        deposition::COMPOUND_PURITY,
        deposition::CONCENTRATIONS,
        deposition::VOLUMES,
        deposition::AGE,
        deposition::SOLUTION_TEMPERATURE,
    ];
    components(scope, &labels, config.padding)
        .iter()
        .map(|component| ReactionComponent {
            name: component.text(deposition::COMPOUNDS),
            supplier: component.text(deposition::COMPOUND_SUPPLIER),
            purity: component.text(deposition::COMPOUND_PURITY),
            concentration: component.exact(deposition::CONCENTRATIONS).and_then(|raw| {
                quantity::concentration(raw, config.unclassified_concentrations)
            }),
            volume: component.value(deposition::VOLUMES),
            age: component.value(deposition::AGE),
            temperature: component.value(deposition::SOLUTION_TEMPERATURE),
        })
        .filter(|component| !component.is_empty())
        .collect()
}

/// Additives given by a compound row and a concentration row
pub fn additives(
    scope: &LabelIndex,
    compounds: &str,
    concentrations: &str,
    config: &TranscoderConfig,
) -> Vec<Additive> {
    components(scope, &[compounds, concentrations], config.padding)
        .iter()
        .map(|component| Additive {
            name: component.text(compounds),
            concentration: component
                .exact(concentrations)
                .and_then(|raw| quantity::concentration(raw, config.unclassified_concentrations)),
        })
        .filter(|additive| !additive.is_empty())
        .collect()
}

/// Antisolvent quenching of a liquid deposition step
pub fn quenching(scope: &LabelIndex, config: &TranscoderConfig) -> Option<QuenchingSolvent> {
    let quenching = QuenchingSolvent {
        media: solvents(scope, &SolventRows::QUENCHING, config.padding),
        volume: scope.value(deposition::QUENCHING_VOLUME),
        delay: scope.value(deposition::QUENCHING_DELAY),
        additives: additives(
            scope,
            deposition::QUENCHING_ADDITIVE_COMPOUNDS,
            deposition::QUENCHING_ADDITIVE_CONCENTRATIONS,
            config,
        ),
    };
    (!quenching.is_empty()).then_some(quenching)
}

/// Additives of the layer material itself
pub(crate) fn layer_additives(scope: &LabelIndex, config: &TranscoderConfig) -> Vec<Additive> {
    additives(
        scope,
        layer::ADDITIVE_COMPOUNDS,
        layer::ADDITIVE_CONCENTRATIONS,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::{Concentration, TypedValue, UnclassifiedPolicy};

    fn step() -> LabelIndex {
        LabelIndex::from_rows([
            ("Deposition. Solvents", "DMF; DMSO"),
            ("Deposition. Solvents. Mixing ratios", "4; 1"),
            ("Deposition. Solvents. Supplier", "Sigma"),
            ("Deposition. Reaction solutions. Compounds", "PbI2; MAI"),
            ("Deposition. Reaction solutions. Concentrations", "1.2 M; 200 mg/ml"),
            ("Deposition. Reaction solutions. Volumes [uL]", "50"),
            ("Deposition. Quenching. Media", "Chlorobenzene"),
            ("Deposition. Quenching. Delay [s]", "10"),
            ("Deposition. Quenching. Additives. Compounds", "nan"),
        ])
    }

    #[test]
    fn test_solvents_repeat_supplier() {
        let solvents = solvents(&step(), &SolventRows::DEPOSITION, PaddingPolicy::RepeatLast);
        assert_eq!(solvents.len(), 2);
        assert_eq!(solvents[1].name.as_deref(), Some("DMSO"));
        assert_eq!(solvents[1].mixing_ratio, TypedValue::Number(1.0));
        assert_eq!(solvents[1].supplier.as_deref(), Some("Sigma"));
        assert_eq!(solvents[1].purity, None);
    }

    #[test]
    fn test_reaction_components_classify_concentrations() {
        let components = reaction_components(&step(), &TranscoderConfig::default());
        assert_eq!(components.len(), 2);
        assert!(matches!(
            components[0].concentration,
            Some(Concentration::MolarConcentration(_))
        ));
        let mass = components[1].concentration.as_ref().unwrap().quantity().unwrap();
        assert_eq!(mass.unit().symbol(), "g/L");
        assert!((mass.value() - 200.0).abs() < 1e-9);
        assert_eq!(components[1].volume.as_f64(), Some(50.0));
    }

    #[test]
    fn test_unclassified_concentration_policy() {
        let scope = LabelIndex::from_rows([
            ("Additives. Compounds", "KI"),
            ("Additives. Concentrations", "3 cm"),
        ]);
        let mut config = TranscoderConfig::default();
        let kept = layer_additives(&scope, &config);
        assert_eq!(
            kept[0].concentration,
            Some(Concentration::Unclassified("3 cm".to_string()))
        );

        config.unclassified_concentrations = UnclassifiedPolicy::Drop;
        let dropped = layer_additives(&scope, &config);
        assert_eq!(dropped[0].name.as_deref(), Some("KI"));
        assert_eq!(dropped[0].concentration, None);
    }

    #[test]
    fn test_quenching() {
        let quenching = quenching(&step(), &TranscoderConfig::default()).unwrap();
        assert_eq!(quenching.media, vec![Solvent::named("Chlorobenzene")]);
        assert_eq!(quenching.delay.as_f64(), Some(10.0));
        assert!(quenching.additives.is_empty());

        let empty = LabelIndex::from_rows([("Deposition. Quenching. Media", "Unknown")]);
        assert!(super::quenching(&empty, &TranscoderConfig::default()).is_none());
    }
}
