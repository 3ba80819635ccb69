pub mod angle;
pub mod config;
pub mod constants;
pub mod contour;
pub mod error;
pub mod flow;
pub mod grid;
pub mod shapes;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use error::{NozzleError, Result};

use angle::AngleProfile;
use contour::RadiusProfileSet;
use flow::FlowField;
use grid::AxialGrid;

// ---------------------------------------------------------------------------
// Shared interface types, consumed by the render crate and the binary
// ---------------------------------------------------------------------------

/// Half-open range of power-law exponents `[start, stop)` sampled every `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Default for ExponentRange {
    fn default() -> Self {
        Self {
            start: 2.3,
            stop: 2.6,
            step: 0.1,
        }
    }
}

impl ExponentRange {
    /// Upper estimate of how many exponents the range holds, computed
    /// without enumerating them. Saturates at `usize::MAX`.
    pub fn count(&self) -> usize {
        if self.step.is_nan() || self.step <= 0.0 {
            return 0;
        }
        let count = ((self.stop - self.start) / self.step).ceil();
        if count.is_nan() || count <= 0.0 {
            return 0;
        }
        if count.is_finite() {
            // float-to-int `as` saturates
            count as usize
        } else {
            usize::MAX
        }
    }

    /// Exponents `start + i·step` strictly below `stop`, at most
    /// [`constants::MAX_EXPONENTS`] of them.
    ///
    /// A relative tolerance of one part in 10⁹ of a step keeps accumulated
    /// rounding from pulling `stop` itself into the set.
    pub fn values(&self) -> Vec<f64> {
        let mut values = Vec::new();
        if self.count() == 0 {
            return values;
        }
        let limit = self.stop - self.step * 1e-9;
        for i in 0..constants::MAX_EXPONENTS {
            let n = self.start + i as f64 * self.step;
            if n >= limit {
                break;
            }
            values.push(n);
        }
        values
    }
}

/// Physical and geometric parameters of the nozzle study.
///
/// Lengths are in millimetres, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NozzleParams {
    /// Specific-heat ratio k (dimensionless).
    pub heat_capacity_ratio: f64,
    /// Universal gas constant in J/(mol·K). Reported, not used by the flow relations.
    pub gas_constant: f64,
    /// Combustion chamber temperature in K.
    pub chamber_temperature: f64,
    /// Combustion chamber density in kg/m³.
    pub chamber_density: f64,
    /// Throat radius in mm.
    pub throat_radius: f64,
    /// Exit-to-throat area ratio.
    pub expansion_ratio: f64,
    /// Axial nozzle length in mm.
    pub length: f64,
    /// Wall angles (θ₀, θ₁, θ₂) for the converging, diverging and exit regions.
    pub initial_angles: [f64; 3],
    /// Number of axial sample positions.
    pub samples: usize,
    /// Exponents of the power-law contour family.
    pub exponents: ExponentRange,
}

impl Default for NozzleParams {
    fn default() -> Self {
        Self {
            heat_capacity_ratio: 1.4,
            gas_constant: constants::UNIVERSAL_GAS_CONSTANT,
            chamber_temperature: 3455.0, // K
            chamber_density: 2.4746,     // kg/m³
            throat_radius: 73.41,        // mm
            expansion_ratio: 117.0,
            length: 2150.0, // mm
            initial_angles: [60.0, 11.0, 8.5],
            samples: constants::SAMPLE_COUNT,
            exponents: ExponentRange::default(),
        }
    }
}

impl NozzleParams {
    /// Exit radius r_e = r_t·√ε in mm.
    pub fn exit_radius(&self) -> f64 {
        constants::exit_radius(self.throat_radius, self.expansion_ratio)
    }

    /// Throat cross-sectional area A_t = π·r_t² in mm².
    pub fn throat_area(&self) -> f64 {
        constants::area_from_radius(self.throat_radius)
    }
}

/// Everything one pipeline run produces, handed to the presenter as a whole.
#[derive(Debug, Clone)]
pub struct NozzleAnalysis {
    pub grid: AxialGrid,
    /// Informational only; the flow solver does not read it.
    pub angles: AngleProfile,
    pub profiles: RadiusProfileSet,
    /// Flow field induced by the selected profile.
    pub flow: FlowField,
}

impl NozzleAnalysis {
    /// The contour used for flow analysis (the first power-law variant).
    pub fn selected_profile(&self) -> &[f64] {
        self.profiles.selected()
    }
}

/// Trait for candidate contour shapes that map an axial position to a wall radius.
pub trait ContourShape {
    /// Legend label for the shape.
    fn label(&self) -> String;

    /// Wall radius at axial position `x` for a nozzle of length `length`
    /// running from `throat_radius` to `exit_radius`.
    fn radius(&self, x: f64, throat_radius: f64, exit_radius: f64, length: f64) -> f64;
}

/// Run the full pipeline: validate params, build grid and angle profile,
/// generate the candidate contours and solve the flow on the selected one.
pub fn compute(params: &NozzleParams) -> Result<NozzleAnalysis> {
    params.validate()?;

    let grid = AxialGrid::linspace(params.length, params.samples);
    let angles = AngleProfile::build(&grid, params.initial_angles);
    debug!(
        converging = angles.count_angle(params.initial_angles[0]),
        exit = angles.count_angle(params.initial_angles[2]),
        "angle profile built"
    );

    let profiles = RadiusProfileSet::generate(&grid, params);
    debug!(variants = profiles.len(), "radius profiles generated");

    let flow = FlowField::solve(
        profiles.selected(),
        params.throat_area(),
        params.heat_capacity_ratio,
        params.chamber_temperature,
        params.chamber_density,
    )?;

    info!(
        samples = grid.len(),
        exit_radius = params.exit_radius(),
        exit_mach = flow.mach.last().copied().unwrap_or(f64::NAN),
        "nozzle analysis complete"
    );

    Ok(NozzleAnalysis {
        grid,
        angles,
        profiles,
        flow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_exponents_are_half_open() {
        let values = ExponentRange::default().values();
        assert_eq!(values.len(), 3, "values = {values:?}");
        assert_relative_eq!(values[0], 2.3);
        assert_relative_eq!(values[1], 2.4, epsilon = 1e-12);
        assert_relative_eq!(values[2], 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_non_positive_step_yields_no_exponents() {
        let range = ExponentRange {
            start: 2.0,
            stop: 3.0,
            step: 0.0,
        };
        assert!(range.values().is_empty());
    }

    #[test]
    fn test_exponent_count_without_enumeration() {
        assert_eq!(ExponentRange::default().count(), 4);
        let dense = ExponentRange {
            start: 2.3,
            stop: 2.6,
            step: 1e-12,
        };
        assert!(dense.count() > constants::MAX_EXPONENTS);
        assert_eq!(dense.values().len(), constants::MAX_EXPONENTS);
    }

    #[test]
    fn test_end_to_end_reference_nozzle() {
        let params = NozzleParams::default();
        let analysis = compute(&params).unwrap();

        assert_eq!(analysis.grid.len(), 1000);
        assert_eq!(analysis.flow.mach.len(), 1000);

        let selected = analysis.selected_profile();
        assert_relative_eq!(selected[0], 73.41, epsilon = 1e-12);
        assert_relative_eq!(selected[999], 73.41 * 117f64.sqrt(), epsilon = 1e-9);
        assert!((selected[999] - 794.05).abs() < 0.01, "r_e = {}", selected[999]);
    }

    #[test]
    fn test_compute_rejects_invalid_params() {
        let params = NozzleParams {
            heat_capacity_ratio: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            compute(&params),
            Err(NozzleError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_flow_is_supersonic_downstream_of_throat() {
        let analysis = compute(&NozzleParams::default()).unwrap();
        let mach = &analysis.flow.mach;
        assert!(mach.windows(2).all(|w| w[1] >= w[0]), "Mach must not decrease");
        let temperature = &analysis.flow.temperature;
        assert!(temperature.windows(2).all(|w| w[1] <= w[0]));
    }
}
