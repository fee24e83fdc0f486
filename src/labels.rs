//! # Label Catalogue
//!
//! Row labels of the flat table, shared by the decoder and the encoder so
//! both directions agree on every path. Layer fields are relative to the
//! stack position prefix `Layer <n>`; record fields are relative to their
//! scope (`Ref`, `Cell`, `Measurements`).

/// First path segment of every layer row, followed by the position
pub const LAYER_SCOPE: &str = "Layer";

/// Prefix of stack position `position`, e.g. `Layer 3`
pub fn layer_prefix(position: usize) -> String {
    format!("{LAYER_SCOPE} {position}")
}

/// Full label of a layer field, e.g. `Layer 3. Name`
pub fn layer_label(position: usize, field: &str) -> String {
    format!("{}. {}", layer_prefix(position), field)
}

/// Layer-level fields
pub mod layer {
    /// Boolean existence flag of a stack position
    pub const EXISTS: &str = "Layer exists";
    /// Material name
    pub const NAME: &str = "Name";
    /// Functionality tag
    pub const FUNCTIONALITY: &str = "Functionality";
    /// Layer thickness
    pub const THICKNESS: &str = "Thickness [nm]";
    /// Layer area
    pub const AREA: &str = "Area [cm^2]";
    /// Surface roughness
    pub const ROUGHNESS: &str = "Surface roughness [nm]";
    /// Branch of the additive rows
    pub const ADDITIVES: &str = "Additives";
    /// Additive compound names
    pub const ADDITIVE_COMPOUNDS: &str = "Additives. Compounds";
    /// Additive concentrations
    pub const ADDITIVE_CONCENTRATIONS: &str = "Additives. Concentrations";
}

/// Perovskite absorber composition
pub mod perovskite {
    /// A-site ions
    pub const A_IONS: &str = "Perovskite. A-ions";
    /// A-site stoichiometric coefficients
    pub const A_COEFFICIENTS: &str = "Perovskite. A-ions. Coefficients";
    /// B-site ions
    pub const B_IONS: &str = "Perovskite. B-ions";
    /// B-site stoichiometric coefficients
    pub const B_COEFFICIENTS: &str = "Perovskite. B-ions. Coefficients";
    /// X-site (anion) ions
    pub const C_IONS: &str = "Perovskite. C-ions";
    /// X-site stoichiometric coefficients
    pub const C_COEFFICIENTS: &str = "Perovskite. C-ions. Coefficients";
    /// Structural dimensionality (`3D`, `2D/3D`, ...)
    pub const DIMENSION: &str = "Perovskite. Dimension";
    /// Band gap
    pub const BAND_GAP: &str = "Perovskite. Band gap [eV]";
}

/// Silicon absorber composition
pub mod silicon {
    /// Silicon type (`c-Si`, `a-Si:H`, ...)
    pub const TYPE: &str = "Silicon. Type";
    /// Doping sequence
    pub const DOPING: &str = "Silicon. Doping";
    /// Band gap
    pub const BAND_GAP: &str = "Silicon. Band gap [eV]";
}

/// Chalcopyrite absorber composition
pub mod chalcopyrite {
    /// Ions
    pub const IONS: &str = "Chalcopyrite. Ions";
    /// Stoichiometric coefficients
    pub const COEFFICIENTS: &str = "Chalcopyrite. Ions. Coefficients";
    /// Alkali metal doping
    pub const ALKALI_DOPING: &str = "Chalcopyrite. Alkali doping";
    /// Band gap
    pub const BAND_GAP: &str = "Chalcopyrite. Band gap [eV]";
}

/// Any other photoabsorber
pub mod photoabsorber {
    /// Absorber material
    pub const MATERIAL: &str = "Photoabsorber. Material";
    /// Band gap
    pub const BAND_GAP: &str = "Photoabsorber. Band gap [eV]";
}

/// Substrate cleaning
pub mod cleaning {
    /// Cleaning actions, component-separated
    pub const PROCEDURE: &str = "Cleaning. Procedure";
}

/// Storage after the layer was deposited
pub mod storage {
    /// Storage atmosphere
    pub const ATMOSPHERE: &str = "Storage. Atmosphere";
    /// Time until the next step
    pub const TIME: &str = "Storage. Time [h]";
    /// Relative humidity
    pub const HUMIDITY: &str = "Storage. Relative humidity [%]";
}

/// Deposition step rows, one arrow-separated entry per step
pub mod deposition {
    /// Deposition method
    pub const PROCEDURE: &str = "Deposition. Procedure";
    /// Atmosphere
    pub const ATMOSPHERE: &str = "Deposition. Atmosphere";
    /// Pressure
    pub const PRESSURE: &str = "Deposition. Pressure [mbar]";
    /// Relative humidity
    pub const HUMIDITY: &str = "Deposition. Relative humidity [%]";
    /// Substrate temperature
    pub const TEMPERATURE: &str = "Deposition. Temperature [°C]";
    /// Duration
    pub const DURATION: &str = "Deposition. Duration [s]";
    /// Gas-phase deposition rate
    pub const RATE: &str = "Deposition. Rate [nm/s]";
    /// Gas-phase source temperature
    pub const SOURCE_TEMPERATURE: &str = "Deposition. Source temperature [°C]";

    /// Branch of the solvent rows
    pub const SOLVENTS: &str = "Deposition. Solvents";
    /// Solvent mixing ratios
    pub const SOLVENT_MIXING_RATIOS: &str = "Deposition. Solvents. Mixing ratios";
    /// Solvent suppliers
    pub const SOLVENT_SUPPLIER: &str = "Deposition. Solvents. Supplier";
    /// Solvent purities
    pub const SOLVENT_PURITY: &str = "Deposition. Solvents. Purity";

    /// Branch of the reaction component rows
    pub const REACTION: &str = "Deposition. Reaction solutions";
    /// Compound names
    pub const COMPOUNDS: &str = "Deposition. Reaction solutions. Compounds";
    /// Compound suppliers
    pub const COMPOUND_SUPPLIER: &str = "Deposition. Reaction solutions. Compounds. Supplier";
    /// Compound purities
    pub const COMPOUND_PURITY: &str = "Deposition. Reaction solutions. Compounds. Purity";
    /// Compound concentrations
    pub const CONCENTRATIONS: &str = "Deposition. Reaction solutions. Concentrations";
    /// Solution volumes
    pub const VOLUMES: &str = "Deposition. Reaction solutions. Volumes [uL]";
    /// Solution age
    pub const AGE: &str = "Deposition. Reaction solutions. Age [h]";
    /// Solution temperature
    pub const SOLUTION_TEMPERATURE: &str = "Deposition. Reaction solutions. Temperature [°C]";

    /// Branch of the quenching media rows
    pub const QUENCHING_MEDIA: &str = "Deposition. Quenching. Media";
    /// Quenching media mixing ratios
    pub const QUENCHING_MIXING_RATIOS: &str = "Deposition. Quenching. Media. Mixing ratios";
    /// Quenching volume
    pub const QUENCHING_VOLUME: &str = "Deposition. Quenching. Volume [uL]";
    /// Delay before quenching
    pub const QUENCHING_DELAY: &str = "Deposition. Quenching. Delay [s]";
    /// Branch of the quenching additive rows
    pub const QUENCHING_ADDITIVES: &str = "Deposition. Quenching. Additives";
    /// Quenching additive compounds
    pub const QUENCHING_ADDITIVE_COMPOUNDS: &str = "Deposition. Quenching. Additives. Compounds";
    /// Quenching additive concentrations
    pub const QUENCHING_ADDITIVE_CONCENTRATIONS: &str =
        "Deposition. Quenching. Additives. Concentrations";
}

/// Thermal annealing after a step
pub mod thermal_annealing {
    /// Annealing temperature
    pub const TEMPERATURE: &str = "Thermal annealing. Temperature [°C]";
    /// Annealing time
    pub const TIME: &str = "Thermal annealing. Time [min]";
    /// Annealing atmosphere
    pub const ATMOSPHERE: &str = "Thermal annealing. Atmosphere";
}

/// Solvent annealing after a step
pub mod solvent_annealing {
    /// Branch of the solvent annealing rows
    pub const SOLVENTS: &str = "Solvent annealing. Solvents";
    /// Annealing temperature
    pub const TEMPERATURE: &str = "Solvent annealing. Temperature [°C]";
    /// Annealing time
    pub const TIME: &str = "Solvent annealing. Time [min]";
}

/// Publication reference, relative to [`reference::SCOPE`]
pub mod reference {
    /// Scope prefix
    pub const SCOPE: &str = "Ref";
    /// DOI
    pub const DOI: &str = "DOI number";
    /// Lead author
    pub const LEAD_AUTHOR: &str = "Lead author";
    /// Publication date
    pub const PUBLICATION_DATE: &str = "Publication date";
    /// Journal
    pub const JOURNAL: &str = "Journal";
    /// Curator
    pub const DATA_ENTERED_BY: &str = "Data entered by";
    /// Free text comment
    pub const COMMENT: &str = "Free text comment";
}

/// Device summary, relative to [`cell::SCOPE`]
pub mod cell {
    /// Scope prefix
    pub const SCOPE: &str = "Cell";
    /// Device architecture (`nip`, `pin`, ...)
    pub const ARCHITECTURE: &str = "Architecture";
    /// Number of terminals of a tandem device
    pub const TERMINALS: &str = "Number of terminals";
    /// Active area
    pub const AREA: &str = "Area [cm^2]";
    /// Flexible device flag
    pub const FLEXIBLE: &str = "Flexible";
    /// Layer names bottom to top, pipe-separated
    pub const STACK_SEQUENCE: &str = "Stack sequence";
}

/// Performance measurements, relative to [`measurements::SCOPE`]
pub mod measurements {
    /// Scope prefix
    pub const SCOPE: &str = "Measurements";
    /// Branch of the JV rows, pipe-separated per measurement
    pub const JV: &str = "JV";
    /// Scan direction
    pub const JV_SCAN_DIRECTION: &str = "JV. Scan direction";
    /// Open-circuit voltage
    pub const JV_VOC: &str = "JV. Voc [V]";
    /// Short-circuit current density
    pub const JV_JSC: &str = "JV. Jsc [mA/cm^2]";
    /// Fill factor
    pub const JV_FF: &str = "JV. FF";
    /// Power conversion efficiency
    pub const JV_PCE: &str = "JV. PCE [%]";
    /// Illumination intensity
    pub const JV_LIGHT_INTENSITY: &str = "JV. Light intensity [mW/cm^2]";
    /// Branch of the EQE rows
    pub const EQE: &str = "EQE";
    /// Integrated Jsc from EQE
    pub const EQE_INTEGRATED_JSC: &str = "EQE. Integrated Jsc [mA/cm^2]";
    /// Light bias during EQE
    pub const EQE_LIGHT_BIAS: &str = "EQE. Light bias";
    /// Branch of the stabilised performance rows
    pub const STABILISED: &str = "Stabilised performance";
    /// Stabilised efficiency
    pub const STABILISED_PCE: &str = "Stabilised performance. PCE [%]";
    /// Tracking time
    pub const STABILISED_TIME: &str = "Stabilised performance. Measurement time [min]";
    /// Tracking procedure
    pub const STABILISED_PROCEDURE: &str = "Stabilised performance. Procedure";
}

/// Layer-level rows written for every sublayer, in output order
pub const LAYER_FIELDS: &[&str] = &[
    layer::NAME,
    layer::FUNCTIONALITY,
    layer::THICKNESS,
    layer::AREA,
    layer::ROUGHNESS,
    layer::ADDITIVE_COMPOUNDS,
    layer::ADDITIVE_CONCENTRATIONS,
    perovskite::A_IONS,
    perovskite::A_COEFFICIENTS,
    perovskite::B_IONS,
    perovskite::B_COEFFICIENTS,
    perovskite::C_IONS,
    perovskite::C_COEFFICIENTS,
    perovskite::DIMENSION,
    perovskite::BAND_GAP,
    silicon::TYPE,
    silicon::DOPING,
    silicon::BAND_GAP,
    chalcopyrite::IONS,
    chalcopyrite::COEFFICIENTS,
    chalcopyrite::ALKALI_DOPING,
    chalcopyrite::BAND_GAP,
    photoabsorber::MATERIAL,
    photoabsorber::BAND_GAP,
    cleaning::PROCEDURE,
    storage::ATMOSPHERE,
    storage::TIME,
    storage::HUMIDITY,
];

/// Step-level rows, arrow-joined per sublayer, in output order
pub const STEP_FIELDS: &[&str] = &[
    deposition::PROCEDURE,
    deposition::ATMOSPHERE,
    deposition::PRESSURE,
    deposition::HUMIDITY,
    deposition::TEMPERATURE,
    deposition::DURATION,
    deposition::RATE,
    deposition::SOURCE_TEMPERATURE,
    deposition::SOLVENTS,
    deposition::SOLVENT_MIXING_RATIOS,
    deposition::SOLVENT_SUPPLIER,
    deposition::SOLVENT_PURITY,
    deposition::COMPOUNDS,
    deposition::COMPOUND_SUPPLIER,
    deposition::COMPOUND_PURITY,
    deposition::CONCENTRATIONS,
    deposition::VOLUMES,
    deposition::AGE,
    deposition::SOLUTION_TEMPERATURE,
    deposition::QUENCHING_MEDIA,
    deposition::QUENCHING_MIXING_RATIOS,
    deposition::QUENCHING_VOLUME,
    deposition::QUENCHING_DELAY,
    deposition::QUENCHING_ADDITIVE_COMPOUNDS,
    deposition::QUENCHING_ADDITIVE_CONCENTRATIONS,
    thermal_annealing::TEMPERATURE,
    thermal_annealing::TIME,
    thermal_annealing::ATMOSPHERE,
    solvent_annealing::SOLVENTS,
    solvent_annealing::TEMPERATURE,
    solvent_annealing::TIME,
];
