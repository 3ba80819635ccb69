/// Default number of axial sample positions.
pub const SAMPLE_COUNT: usize = 1000;

/// Largest accepted number of axial sample positions.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Largest accepted number of power-law variants.
pub const MAX_EXPONENTS: usize = 64;

/// Universal gas constant in J/(mol·K).
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.3145;

/// Area-ratio coefficient in the Mach number approximation
/// M = ∛(1.728·A/A_t − 1) / √((k−1)/k).
pub const MACH_AREA_COEFFICIENT: f64 = 1.728;

/// Fraction of the nozzle length below which the converging wall angle applies.
pub const CONVERGING_FRACTION: f64 = 0.6;

/// Fixed angle (degrees) of the cosine contour variant.
pub const COSINE_PROFILE_ANGLE_DEG: f64 = 90.0;

/// Circular cross-sectional area from radius (same length unit squared).
pub fn area_from_radius(radius: f64) -> f64 {
    std::f64::consts::PI * radius * radius
}

/// Exit radius from throat radius and exit-to-throat area ratio.
pub fn exit_radius(throat_radius: f64, expansion_ratio: f64) -> f64 {
    // r_e = √(r_t²·ε)
    (throat_radius * throat_radius * expansion_ratio).sqrt()
}
