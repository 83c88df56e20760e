use super::{ParamDef, SliderRange, Tier, ValueKind};

pub const KEPLER_REQUIRED: &[&str] = &[
    "koi_period",
    "koi_prad",
    "koi_teq",
    "koi_insol",
    "koi_steff",
    "koi_srad",
];

const fn primary(
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

const fn extra(id: &'static str, label: &'static str, default: f64, description: &'static str) -> ParamDef {
    ParamDef {
        id,
        label,
        default,
        tier: Tier::Extra,
        kind: ValueKind::Number,
        unit: None,
        description,
        range: None,
    }
}

pub const KEPLER_PARAMS: &[ParamDef] = &[
    primary(
        "koi_period",
        "Orbital Period",
        3.52,
        "days",
        (0.0, 500.0, 0.1),
        "Time the planet takes to complete one orbit. Short periods mean close-in orbits such as hot Jupiters; long periods mean wider orbits.",
    ),
    primary(
        "koi_prad",
        "Planet Radius",
        1.96,
        "Earth radii",
        (0.0, 20.0, 0.1),
        "Planet size relative to Earth. Values below 1 suggest rocky planets, values above 10 are usually gas giants.",
    ),
    primary(
        "koi_teq",
        "Equilibrium Temperature",
        1294.0,
        "K",
        (200.0, 3000.0, 10.0),
        "Estimated temperature without an atmosphere, set by orbital distance and stellar luminosity.",
    ),
    primary(
        "koi_insol",
        "Insolation",
        183.6,
        "Earth = 1",
        (0.0, 500.0, 0.1),
        "Stellar flux received relative to Earth. Values near 1 mean Earth-like heating.",
    ),
    primary(
        "koi_steff",
        "Stellar Effective Temperature",
        5455.0,
        "K",
        (2500.0, 10000.0, 50.0),
        "Surface temperature of the host star. Red dwarfs sit around 3000 to 4000 K; blue-white stars exceed 7000 K.",
    ),
    primary(
        "koi_srad",
        "Stellar Radius",
        0.927,
        "Solar radii",
        (0.1, 20.0, 0.1),
        "Host star radius relative to the Sun. Larger stars push the habitable zone outward.",
    ),
    extra("koi_fpflag_nt", "KOI FP Flag NT", 0.0, "Not-transit-like false positive flag."),
    extra("koi_fpflag_ss", "KOI FP Flag SS", 0.0, "Stellar eclipse false positive flag."),
    extra("koi_fpflag_co", "KOI FP Flag CO", 0.0, "Centroid offset flag: the signal may come from a nearby star."),
    extra("koi_fpflag_ec", "KOI FP Flag EC", 0.0, "Ephemeris match flag: the signal matches a known eclipsing binary."),
    extra("koi_period_err1", "KOI Period Err1", 0.00000582, "Upper uncertainty of the orbital period."),
    extra("koi_period_err2", "KOI Period Err2", -0.00000582, "Lower uncertainty of the orbital period."),
    extra("koi_time0bk", "KOI Time0 BK", 134.51415, "Mid-time of the first transit in Barycentric Kepler Julian Date."),
    extra("koi_time0bk_err1", "KOI Time0bk Err1", 0.00041, "Upper uncertainty of the transit mid-time."),
    extra("koi_time0bk_err2", "KOI Time0bk Err2", -0.00041, "Lower uncertainty of the transit mid-time."),
    extra("koi_impact", "KOI Impact", 0.586, "Sky-projected distance between the transit chord and the stellar center, in stellar radii. Near 0 is central, near 1 is grazing."),
    extra("koi_impact_err1", "KOI Impact Err1", 0.115, "Upper uncertainty of the impact parameter."),
    extra("koi_impact_err2", "KOI Impact Err2", -0.115, "Lower uncertainty of the impact parameter."),
    extra("koi_duration", "KOI Duration", 2.8092, "Transit duration in hours."),
    extra("koi_duration_err1", "KOI Duration Err1", 0.0094, "Upper uncertainty of the transit duration."),
    extra("koi_duration_err2", "KOI Duration Err2", -0.0094, "Lower uncertainty of the transit duration."),
    extra("koi_depth", "KOI Depth", 2793.0, "Fraction of starlight blocked during transit, in ppm."),
    extra("koi_depth_err1", "KOI Depth Err1", 29.0, "Upper uncertainty of the transit depth."),
    extra("koi_depth_err2", "KOI Depth Err2", -29.0, "Lower uncertainty of the transit depth."),
    extra("koi_prad_err1", "KOI Planet Radius Err1", 0.11, "Upper uncertainty of the planet radius."),
    extra("koi_prad_err2", "KOI Planet Radius Err2", -0.11, "Lower uncertainty of the planet radius."),
    extra("koi_teq_err1", "KOI Equilibrium Temp Err1", 19.0, "Upper uncertainty of the equilibrium temperature."),
    extra("koi_teq_err2", "KOI Equilibrium Temp Err2", -19.0, "Lower uncertainty of the equilibrium temperature."),
    extra("koi_insol_err1", "KOI Insolation Err1", 5.4, "Upper uncertainty of the insolation."),
    extra("koi_insol_err2", "KOI Insolation Err2", -5.4, "Lower uncertainty of the insolation."),
    extra("koi_model_snr", "KOI Model SNR", 96.2, "Signal-to-noise ratio of the transit model. Above 10 is a reliable detection."),
    extra("koi_tce_plnt_num", "KOI TCE Planet Num", 1.0, "Index of the planet among the threshold crossing events of its star."),
    extra("koi_steff_err1", "KOI Stellar Effective Temp Err1", 81.0, "Upper uncertainty of the stellar temperature."),
    extra("koi_steff_err2", "KOI Stellar Effective Temp Err2", -81.0, "Lower uncertainty of the stellar temperature."),
    extra("koi_slogg", "KOI Stellar Surface Gravity", 4.467, "Base-10 log of the stellar surface gravity. Separates dwarfs from giants."),
    extra("koi_slogg_err1", "KOI Stellar Surface Gravity Err1", 0.064, "Upper uncertainty of log g."),
    extra("koi_slogg_err2", "KOI Stellar Surface Gravity Err2", -0.064, "Lower uncertainty of log g."),
    extra("koi_srad_err1", "KOI Stellar Radius Err1", 0.105, "Upper uncertainty of the stellar radius."),
    extra("koi_srad_err2", "KOI Stellar Radius Err2", -0.105, "Lower uncertainty of the stellar radius."),
    extra("ra", "Right Ascension", 291.93423, "Sky longitude of the star, in degrees."),
    extra("dec", "Declination", 48.141651, "Sky latitude of the star, in degrees."),
    extra("koi_kepmag", "KOI Kepler Magnitude", 15.347, "Brightness in the Kepler band. Lower is brighter."),
];
