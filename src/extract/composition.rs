use super::chemicals::layer_additives;
use super::components;
use crate::config::{AbsorberKind, ProcessVocabulary, TranscoderConfig};
use crate::labels::{chalcopyrite, layer, perovskite, photoabsorber, silicon};
use crate::model::{Absorber, Composition, Functionality, IonShare};
use crate::table::{LabelIndex, PaddingPolicy};

/// Declared functionality, or `Photoabsorber` when the name is a known absorber
pub fn functionality(scope: &LabelIndex, vocabulary: &ProcessVocabulary) -> Option<Functionality> {
    if let Some(declared) = scope.text(layer::FUNCTIONALITY) {
        return Some(Functionality::parse(&declared));
    }
    let name = scope.text(layer::NAME)?;
    vocabulary.absorber_kind(&name).map(|kind| {
        log::debug!("Layer '{}' inferred as photoabsorber ({:?})", name, kind);
        Functionality::Photoabsorber
    })
}

/// Material, additives and, for photoabsorbers, the absorber composition
pub fn composition(
    scope: &LabelIndex,
    functionality: Option<Functionality>,
    config: &TranscoderConfig,
) -> Composition {
    let material = scope.text(layer::NAME);
    let absorber = (functionality == Some(Functionality::Photoabsorber))
        .then(|| absorber(scope, material.as_deref(), config));
    Composition {
        additives: layer_additives(scope, config),
        material,
        absorber,
    }
}

/// Absorber composition, dispatched on the exact material name
pub fn absorber(scope: &LabelIndex, material: Option<&str>, config: &TranscoderConfig) -> Absorber {
    let kind = material
        .and_then(|name| config.vocabulary.absorber_kind(name))
        .unwrap_or(AbsorberKind::Generic);

    match kind {
        AbsorberKind::Perovskite => Absorber::Perovskite {
            a_ions: ion_shares(
                scope,
                perovskite::A_IONS,
                perovskite::A_COEFFICIENTS,
                config.padding,
            ),
            b_ions: ion_shares(
                scope,
                perovskite::B_IONS,
                perovskite::B_COEFFICIENTS,
                config.padding,
            ),
            c_ions: ion_shares(
                scope,
                perovskite::C_IONS,
                perovskite::C_COEFFICIENTS,
                config.padding,
            ),
            dimension: scope.text(perovskite::DIMENSION),
            band_gap: scope.value(perovskite::BAND_GAP),
        },
        AbsorberKind::Silicon => Absorber::Silicon {
            silicon_type: scope.text(silicon::TYPE),
            doping: scope.text(silicon::DOPING),
            band_gap: scope.value(silicon::BAND_GAP),
        },
        AbsorberKind::Chalcopyrite => Absorber::Chalcopyrite {
            ions: ion_shares(
                scope,
                chalcopyrite::IONS,
                chalcopyrite::COEFFICIENTS,
                config.padding,
            ),
            alkali_doping: scope.text(chalcopyrite::ALKALI_DOPING),
            band_gap: scope.value(chalcopyrite::BAND_GAP),
        },
        AbsorberKind::Generic => Absorber::Generic {
            material: scope.text(photoabsorber::MATERIAL),
            band_gap: scope.value(photoabsorber::BAND_GAP),
        },
    }
}

/// Ions of one crystal site paired with their coefficients
pub fn ion_shares(
    scope: &LabelIndex,
    ions: &str,
    coefficients: &str,
    padding: PaddingPolicy,
) -> Vec<IonShare> {
    components(scope, &[ions, coefficients], padding)
        .iter()
        .filter_map(|component| {
            component.text(ions).map(|ion| IonShare {
                ion,
                coefficient: component.exact_value(coefficients, None),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::TypedValue;

    #[test]
    fn test_perovskite_ions() {
        let scope = LabelIndex::from_rows([
            ("Name", "Perovskite"),
            ("Perovskite. A-ions", "Cs; FA; MA"),
            ("Perovskite. A-ions. Coefficients", "0.05; 0.79; 0.16"),
            ("Perovskite. B-ions", "Pb"),
            ("Perovskite. C-ions", "I; Br"),
            ("Perovskite. Band gap [eV]", "1.6"),
        ]);
        let config = TranscoderConfig::default();
        assert_eq!(
            functionality(&scope, &config.vocabulary),
            Some(Functionality::Photoabsorber)
        );

        let composition = composition(&scope, Some(Functionality::Photoabsorber), &config);
        match composition.absorber {
            Some(Absorber::Perovskite { a_ions, b_ions, c_ions, band_gap, .. }) => {
                assert_eq!(a_ions.len(), 3);
                assert_eq!(a_ions[1].ion, "FA");
                assert_eq!(a_ions[1].coefficient, TypedValue::Number(0.79));
                assert_eq!(b_ions[0].coefficient, TypedValue::Absent);
                assert_eq!(c_ions.len(), 2);
                assert_eq!(band_gap.as_f64(), Some(1.6));
            }
            other => panic!("expected a perovskite absorber, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_is_exact_on_material_name() {
        let config = TranscoderConfig::default();
        let scope = LabelIndex::from_rows([
            ("Silicon. Type", "c-Si"),
            ("Photoabsorber. Material", "CdTe"),
        ]);

        assert!(matches!(
            absorber(&scope, Some("c-Si"), &config),
            Absorber::Silicon { silicon_type: Some(_), .. }
        ));
        // Substring of a known name does not count
        assert!(matches!(
            absorber(&scope, Some("c-Si wafer"), &config),
            Absorber::Generic { material: Some(_), .. }
        ));
        assert!(matches!(absorber(&scope, None, &config), Absorber::Generic { .. }));
    }

    #[test]
    fn test_non_absorber_has_no_absorber_composition() {
        let scope = LabelIndex::from_rows([
            ("Name", "TiO2"),
            ("Functionality", "Electron transport layer"),
            ("Additives. Compounds", "Li-TFSI"),
        ]);
        let config = TranscoderConfig::default();
        let functionality = functionality(&scope, &config.vocabulary);
        assert_eq!(functionality, Some(Functionality::ElectronTransport));

        let composition = composition(&scope, functionality, &config);
        assert_eq!(composition.material.as_deref(), Some("TiO2"));
        assert_eq!(composition.additives.len(), 1);
        assert!(composition.absorber.is_none());
    }
}
