use super::{ParamDef, SliderRange, Tier, ValueKind};

/// TESS submissions fall back to defaults for every blank field.
pub const TESS_REQUIRED: &[&str] = &[];

const fn field(
    id: &'static str,
    label: &'static str,
    default: f64,
    unit: &'static str,
    range: (f64, f64, f64),
    description: &'static str,
) -> ParamDef {
    ParamDef {
        id,
        label,
        default,
        tier: Tier::Primary,
        kind: ValueKind::Number,
        unit: Some(unit),
        description,
        range: Some(SliderRange {
            min: range.0,
            max: range.1,
            step: range.2,
        }),
    }
}

pub const TESS_PARAMS: &[ParamDef] = &[
    field(
        "pl_orbper",
        "Orbital Period",
        8.5,
        "days",
        (0.0, 500.0, 0.1),
        "Time the planet takes to orbit its host star. Shorter periods mean closer orbits.",
    ),
    field(
        "pl_trandurh",
        "Transit Duration",
        2.5,
        "hours",
        (0.0, 30.0, 0.1),
        "Time the planet takes to cross the stellar disk as seen from Earth.",
    ),
    field(
        "pl_trandep",
        "Transit Depth",
        1000.0,
        "ppm",
        (0.0, 5000.0, 10.0),
        "Starlight blocked during transit. Deeper dips usually mean bigger planets.",
    ),
    field(
        "pl_rade",
        "Planet Radius",
        2.0,
        "Earth radii",
        (0.0, 20.0, 0.1),
        "Planet size relative to Earth.",
    ),
    field(
        "pl_insol",
        "Insolation Flux",
        5.0,
        "Earth = 1",
        (0.0, 500.0, 0.1),
        "Stellar energy received relative to Earth. Higher values mean a hotter planet.",
    ),
    field(
        "pl_eqt",
        "Equilibrium Temperature",
        1000.0,
        "K",
        (200.0, 4000.0, 10.0),
        "Estimated average temperature assuming no atmosphere.",
    ),
    field(
        "st_teff",
        "Stellar Effective Temperature",
        5500.0,
        "K",
        (2500.0, 10000.0, 50.0),
        "Surface temperature of the host star.",
    ),
    field(
        "st_logg",
        "Stellar Surface Gravity",
        4.5,
        "log g",
        (0.0, 5.0, 0.01),
        "Base-10 log of the host star's surface gravity, tied to its mass and radius.",
    ),
    field(
        "st_rad",
        "Stellar Radius",
        1.0,
        "Solar radii",
        (0.0, 10.0, 0.01),
        "Host star radius relative to the Sun.",
    ),
];
