use crate::constants::COSINE_PROFILE_ANGLE_DEG;
use crate::ContourShape;

/// Power-law contour r = r_t + (r_e − r_t)·(x/L)ⁿ.
#[derive(Debug, Clone, Copy)]
pub struct PowerLaw {
    pub exponent: f64,
}

impl PowerLaw {
    pub fn new(exponent: f64) -> Self {
        Self { exponent }
    }
}

impl ContourShape for PowerLaw {
    fn label(&self) -> String {
        format!("n = {:.1}", self.exponent)
    }

    fn radius(&self, x: f64, throat_radius: f64, exit_radius: f64, length: f64) -> f64 {
        throat_radius + (exit_radius - throat_radius) * (x / length).powf(self.exponent)
    }
}

/// Exponential contour r = r_t·exp((x/L)·ln(r_e/r_t)).
#[derive(Debug, Clone, Copy)]
pub struct Exponential;

impl ContourShape for Exponential {
    fn label(&self) -> String {
        "Exponential".to_string()
    }

    fn radius(&self, x: f64, throat_radius: f64, exit_radius: f64, length: f64) -> f64 {
        exponential_radius(x, throat_radius, exit_radius, length)
    }
}

/// Quadratic contour scaled by (1 − cos θ).
///
/// With the fixed θ = 90° the factor is 1 up to rounding, so this curve
/// coincides with the n = 2 power law.
#[derive(Debug, Clone, Copy)]
pub struct Cosine {
    pub angle_deg: f64,
}

impl Default for Cosine {
    fn default() -> Self {
        Self {
            angle_deg: COSINE_PROFILE_ANGLE_DEG,
        }
    }
}

impl ContourShape for Cosine {
    fn label(&self) -> String {
        "Cosine".to_string()
    }

    fn radius(&self, x: f64, throat_radius: f64, exit_radius: f64, length: f64) -> f64 {
        let factor = 1.0 - self.angle_deg.to_radians().cos();
        throat_radius + (exit_radius - throat_radius) * (x / length).powi(2) * factor
    }
}

/// Straight cone r = r_t + (r_e − r_t)·(x/L).
#[derive(Debug, Clone, Copy)]
pub struct Linear;

impl ContourShape for Linear {
    fn label(&self) -> String {
        "Linear".to_string()
    }

    fn radius(&self, x: f64, throat_radius: f64, exit_radius: f64, length: f64) -> f64 {
        throat_radius + (exit_radius - throat_radius) * (x / length)
    }
}

/// Logarithmic-spacing contour. Same curve as [`Exponential`].
#[derive(Debug, Clone, Copy)]
pub struct Logarithmic;

impl ContourShape for Logarithmic {
    fn label(&self) -> String {
        "Logarithmic".to_string()
    }

    fn radius(&self, x: f64, throat_radius: f64, exit_radius: f64, length: f64) -> f64 {
        exponential_radius(x, throat_radius, exit_radius, length)
    }
}

fn exponential_radius(x: f64, throat_radius: f64, exit_radius: f64, length: f64) -> f64 {
    throat_radius * ((x / length) * (exit_radius / throat_radius).ln()).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exit_radius;
    use approx::assert_relative_eq;

    const R_T: f64 = 73.41;
    const L: f64 = 2150.0;

    fn r_e() -> f64 {
        exit_radius(R_T, 117.0)
    }

    #[test]
    fn test_power_law_endpoints() {
        for n in [2.3, 2.4, 2.5, 0.5, 7.0] {
            let shape = PowerLaw::new(n);
            assert_eq!(shape.radius(0.0, R_T, r_e(), L), R_T, "n = {n}");
            assert_relative_eq!(shape.radius(L, R_T, r_e(), L), r_e(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_every_shape_starts_at_throat_and_ends_at_exit() {
        let shapes: Vec<Box<dyn ContourShape>> = vec![
            Box::new(PowerLaw::new(2.3)),
            Box::new(Exponential),
            Box::new(Cosine::default()),
            Box::new(Linear),
            Box::new(Logarithmic),
        ];
        for shape in &shapes {
            assert_relative_eq!(shape.radius(0.0, R_T, r_e(), L), R_T, epsilon = 1e-12);
            assert_relative_eq!(shape.radius(L, R_T, r_e(), L), r_e(), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_linear_midpoint_is_mean_radius() {
        let r = Linear.radius(L / 2.0, R_T, r_e(), L);
        assert_relative_eq!(r, (R_T + r_e()) / 2.0, max_relative = 1e-14);
    }

    #[test]
    fn test_cosine_at_right_angle_matches_quadratic_power_law() {
        let quadratic = PowerLaw::new(2.0);
        let cosine = Cosine::default();
        for i in 0..=100 {
            let x = L * i as f64 / 100.0;
            assert_relative_eq!(
                cosine.radius(x, R_T, r_e(), L),
                quadratic.radius(x, R_T, r_e(), L),
                max_relative = 1e-14
            );
        }
    }

    #[test]
    fn test_logarithmic_duplicates_exponential() {
        for i in 0..=100 {
            let x = L * i as f64 / 100.0;
            assert_eq!(
                Logarithmic.radius(x, R_T, r_e(), L),
                Exponential.radius(x, R_T, r_e(), L)
            );
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(PowerLaw::new(2.4000000000000004).label(), "n = 2.4");
        assert_eq!(Exponential.label(), "Exponential");
        assert_eq!(Cosine::default().label(), "Cosine");
        assert_eq!(Linear.label(), "Linear");
        assert_eq!(Logarithmic.label(), "Logarithmic");
    }
}
