use crate::grid::AxialGrid;
use crate::shapes::{Cosine, Exponential, Linear, Logarithmic, PowerLaw};
use crate::{ContourShape, NozzleParams};

/// One candidate contour sampled on the axial grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusProfile {
    pub label: String,
    /// Wall radius in mm at each grid position.
    pub radius: Vec<f64>,
}

/// Ordered set of candidate contours, all aligned to the same grid.
///
/// Power-law variants come first in exponent order, followed by the fixed
/// shapes. The first entry is the selected profile.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusProfileSet {
    profiles: Vec<RadiusProfile>,
    power_law_count: usize,
}

impl RadiusProfileSet {
    /// The candidate shapes for a parameter set, in display order.
    pub fn shapes(params: &NozzleParams) -> Vec<Box<dyn ContourShape>> {
        let mut shapes: Vec<Box<dyn ContourShape>> = params
            .exponents
            .values()
            .into_iter()
            .map(|n| Box::new(PowerLaw::new(n)) as Box<dyn ContourShape>)
            .collect();
        shapes.push(Box::new(Exponential));
        shapes.push(Box::new(Cosine::default()));
        shapes.push(Box::new(Linear));
        shapes.push(Box::new(Logarithmic));
        shapes
    }

    /// Sample every candidate shape on `grid`.
    pub fn generate(grid: &AxialGrid, params: &NozzleParams) -> Self {
        let throat = params.throat_radius;
        let exit = params.exit_radius();
        let length = grid.length();

        let power_law_count = params.exponents.values().len();
        let profiles = Self::shapes(params)
            .iter()
            .map(|shape| RadiusProfile {
                label: shape.label(),
                radius: grid
                    .positions()
                    .iter()
                    .map(|&x| shape.radius(x, throat, exit, length))
                    .collect(),
            })
            .collect();

        Self {
            profiles,
            power_law_count,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RadiusProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Power-law variants only, in exponent order.
    pub fn power_laws(&self) -> &[RadiusProfile] {
        &self.profiles[..self.power_law_count]
    }

    /// Look up a profile by its legend label.
    pub fn get(&self, label: &str) -> Option<&[f64]> {
        self.profiles
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.radius.as_slice())
    }

    /// The contour carried forward to flow analysis: the first power law.
    pub fn selected(&self) -> &[f64] {
        self.profiles
            .first()
            .map(|p| p.radius.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_set() -> (AxialGrid, RadiusProfileSet) {
        let params = NozzleParams::default();
        let grid = AxialGrid::linspace(params.length, params.samples);
        let set = RadiusProfileSet::generate(&grid, &params);
        (grid, set)
    }

    #[test]
    fn test_variant_order_and_labels() {
        let (_, set) = reference_set();
        let labels: Vec<&str> = set.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "n = 2.3",
                "n = 2.4",
                "n = 2.5",
                "Exponential",
                "Cosine",
                "Linear",
                "Logarithmic"
            ]
        );
        assert_eq!(set.power_laws().len(), 3);
    }

    #[test]
    fn test_all_variants_aligned_with_grid() {
        let (grid, set) = reference_set();
        for profile in set.iter() {
            assert_eq!(profile.radius.len(), grid.len(), "{}", profile.label);
        }
    }

    #[test]
    fn test_power_laws_span_throat_to_exit() {
        let (_, set) = reference_set();
        let r_e = NozzleParams::default().exit_radius();
        for profile in set.power_laws() {
            assert_eq!(profile.radius[0], 73.41, "{}", profile.label);
            assert_relative_eq!(*profile.radius.last().unwrap(), r_e, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_selected_is_first_power_law() {
        let (_, set) = reference_set();
        assert_eq!(set.selected(), set.get("n = 2.3").unwrap());
    }

    #[test]
    fn test_cosine_degenerates_to_quadratic_power_law() {
        let params = NozzleParams::default();
        let (grid, set) = reference_set();
        let quadratic = PowerLaw::new(2.0);
        let cosine = set.get("Cosine").unwrap();
        for (&x, &r) in grid.positions().iter().zip(cosine) {
            let expected = quadratic.radius(x, params.throat_radius, params.exit_radius(), params.length);
            assert_relative_eq!(r, expected, max_relative = 1e-14);
        }
    }

    #[test]
    fn test_logarithmic_is_literal_duplicate_of_exponential() {
        let (_, set) = reference_set();
        assert_eq!(set.get("Logarithmic"), set.get("Exponential"));
    }

    #[test]
    fn test_contours_widen_monotonically() {
        let (_, set) = reference_set();
        for profile in set.iter() {
            assert!(
                profile.radius.windows(2).all(|w| w[1] >= w[0]),
                "{} must not narrow",
                profile.label
            );
        }
    }
}
