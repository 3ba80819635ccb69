use tracing::warn;

use crate::constants::{area_from_radius, MACH_AREA_COEFFICIENT};
use crate::error::{NozzleError, Result};

/// Isentropic flow properties at every grid position of the selected contour.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowField {
    /// Cross-sectional area in mm².
    pub area: Vec<f64>,
    pub mach: Vec<f64>,
    /// Static temperature in K.
    pub temperature: Vec<f64>,
    /// Density in kg/m³.
    pub density: Vec<f64>,
}

impl FlowField {
    /// Evaluate area, Mach number, temperature and density along `radius`.
    ///
    /// `throat_area` must use the same length unit as `radius`, squared.
    pub fn solve(
        radius: &[f64],
        throat_area: f64,
        k: f64,
        chamber_temperature: f64,
        chamber_density: f64,
    ) -> Result<Self> {
        if k == 1.0 {
            return Err(NozzleError::invalid(
                "heat_capacity_ratio",
                k,
                "density relation divides by k - 1",
            ));
        }

        let n = radius.len();
        let mut area = Vec::with_capacity(n);
        let mut mach = Vec::with_capacity(n);
        let mut temperature = Vec::with_capacity(n);
        let mut density = Vec::with_capacity(n);
        let mut below_domain = 0usize;

        for &r in radius {
            let a = area_from_radius(r);
            if MACH_AREA_COEFFICIENT * a / throat_area < 1.0 {
                below_domain += 1;
            }
            let m = mach_number(a / throat_area, k);
            area.push(a);
            mach.push(m);
            temperature.push(chamber_temperature * temperature_ratio(m, k));
            density.push(chamber_density * density_ratio(m, k));
        }

        if below_domain > 0 {
            warn!(
                positions = below_domain,
                "area below A_t/1.728, using the real negative cube root"
            );
        }

        Ok(Self {
            area,
            mach,
            temperature,
            density,
        })
    }

    pub fn len(&self) -> usize {
        self.mach.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mach.is_empty()
    }
}

/// Mach number from the local-to-throat area ratio:
/// M = ∛(1.728·A/A_t − 1) / √((k−1)/k).
///
/// The cube root is the real one, so a negative argument gives a negative Mach
/// number rather than NaN.
pub fn mach_number(area_ratio: f64, k: f64) -> f64 {
    (MACH_AREA_COEFFICIENT * area_ratio - 1.0).cbrt() / ((k - 1.0) / k).sqrt()
}

/// Static-to-chamber temperature ratio 1 / (1 + (k−1)/2·M²).
pub fn temperature_ratio(mach: f64, k: f64) -> f64 {
    1.0 / stagnation_factor(mach, k)
}

/// Static-to-chamber density ratio 1 / (1 + (k−1)/2·M²)^(1/(k−1)).
pub fn density_ratio(mach: f64, k: f64) -> f64 {
    1.0 / stagnation_factor(mach, k).powf(1.0 / (k - 1.0))
}

fn stagnation_factor(mach: f64, k: f64) -> f64 {
    1.0 + (k - 1.0) / 2.0 * mach * mach
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const K: f64 = 1.4;
    const T_C: f64 = 3455.0;
    const RHO_C: f64 = 2.4746;

    #[test]
    fn test_mach_at_throat_matches_closed_form() {
        let expected = 0.728f64.cbrt() / (0.4f64 / 1.4).sqrt();
        assert_relative_eq!(mach_number(1.0, K), expected, max_relative = 1e-12);
        assert!((expected - 1.68298).abs() < 1e-4, "M = {expected}");
    }

    #[test]
    fn test_throat_position_of_reference_nozzle() {
        let r_t: f64 = 73.41;
        let a_t = area_from_radius(r_t);
        let flow = FlowField::solve(&[r_t], a_t, K, T_C, RHO_C).unwrap();

        assert_relative_eq!(flow.area[0], a_t);
        assert_relative_eq!(MACH_AREA_COEFFICIENT * flow.area[0] / a_t - 1.0, 0.728, epsilon = 1e-12);
        assert_relative_eq!(flow.mach[0], 1.682_975_583_399_141, max_relative = 1e-12);
        assert_relative_eq!(flow.temperature[0], 2205.580_022_787_02, max_relative = 1e-10);
        assert_relative_eq!(flow.density[0], 0.805_734_441_127_024, max_relative = 1e-10);
    }

    #[test]
    fn test_zero_mach_recovers_chamber_state() {
        assert_eq!(T_C * temperature_ratio(0.0, K), T_C);
        assert_eq!(RHO_C * density_ratio(0.0, K), RHO_C);
    }

    #[test]
    fn test_negative_cube_root_is_real() {
        // 1.728·A/A_t − 1 = −1 when A = 0
        let m = mach_number(0.0, K);
        assert!(m.is_finite());
        assert_relative_eq!(m, -1.0 / (0.4f64 / 1.4).sqrt(), max_relative = 1e-12);

        let a_t = area_from_radius(10.0);
        let flow = FlowField::solve(&[1.0], a_t, K, T_C, RHO_C).unwrap();
        assert!(flow.mach[0] < 0.0);
        assert!(flow.temperature[0].is_finite() && flow.density[0].is_finite());
    }

    #[test]
    fn test_outputs_aligned_with_input() {
        let radius: Vec<f64> = (0..50).map(|i| 73.41 + i as f64).collect();
        let flow = FlowField::solve(&radius, area_from_radius(73.41), K, T_C, RHO_C).unwrap();
        assert_eq!(flow.len(), 50);
        assert_eq!(flow.area.len(), 50);
        assert_eq!(flow.temperature.len(), 50);
        assert_eq!(flow.density.len(), 50);
    }

    #[test]
    fn test_isentropic_consistency() {
        // ρ/ρ_c = (T/T_c)^(1/(k−1))
        for m in [0.5, 1.0, 2.0, 4.0] {
            let t = temperature_ratio(m, K);
            assert_relative_eq!(density_ratio(m, K), t.powf(1.0 / (K - 1.0)), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_unit_heat_capacity_ratio_rejected() {
        let err = FlowField::solve(&[1.0], 1.0, 1.0, T_C, RHO_C).unwrap_err();
        assert!(matches!(err, NozzleError::InvalidParameter { .. }));
    }
}
