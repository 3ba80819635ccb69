use crate::constants::CONVERGING_FRACTION;
use crate::grid::AxialGrid;

/// Profile exponent applied where no region rule matches.
pub const DEFAULT_EXPONENT: f64 = 1.0;
/// Profile exponent in the converging region x < 0.6·L.
pub const CONVERGING_EXPONENT: f64 = 0.5;
/// Profile exponent at the exit plane x == L.
pub const EXIT_EXPONENT: f64 = 2.0;

/// Wall angle (degrees) and profile exponent at every grid position.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleProfile {
    pub angle: Vec<f64>,
    pub exponent: Vec<f64>,
}

impl AngleProfile {
    /// Assign the piecewise wall angle and exponent to each position.
    ///
    /// Every position starts at (θ₁, 1). Positions below 0.6·L become
    /// (θ₀, 0.5), and only a position exactly equal to L becomes (θ₂, 2);
    /// the rest of [0.6·L, L) keeps the fill value.
    pub fn build(grid: &AxialGrid, angles: [f64; 3]) -> Self {
        let [converging, fill, exit] = angles;
        let length = grid.length();
        let threshold = CONVERGING_FRACTION * length;

        let mut angle = vec![fill; grid.len()];
        let mut exponent = vec![DEFAULT_EXPONENT; grid.len()];

        for (i, &x) in grid.positions().iter().enumerate() {
            if x < threshold {
                angle[i] = converging;
                exponent[i] = CONVERGING_EXPONENT;
            }
            if x == length {
                angle[i] = exit;
                exponent[i] = EXIT_EXPONENT;
            }
        }

        Self { angle, exponent }
    }

    pub fn len(&self) -> usize {
        self.angle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angle.is_empty()
    }

    /// Number of positions carrying exactly `angle`.
    pub(crate) fn count_angle(&self, angle: f64) -> usize {
        self.angle.iter().filter(|&&a| a == angle).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_angle_profile() {
        let grid = AxialGrid::linspace(2150.0, 1000);
        let profile = AngleProfile::build(&grid, [60.0, 11.0, 8.5]);
        assert_eq!(profile.len(), 1000);

        let x = grid.positions();
        let mut converging = 0;
        let mut fill = 0;
        for i in 0..999 {
            if x[i] < 0.6 * 2150.0 {
                assert_eq!((profile.angle[i], profile.exponent[i]), (60.0, 0.5), "i = {i}");
                converging += 1;
            } else {
                assert_eq!((profile.angle[i], profile.exponent[i]), (11.0, 1.0), "i = {i}");
                fill += 1;
            }
        }
        assert_eq!((profile.angle[999], profile.exponent[999]), (8.5, 2.0));
        assert_eq!(converging, 600);
        assert_eq!(fill, 399);
    }

    #[test]
    fn test_only_exit_plane_gets_exit_angle() {
        let grid = AxialGrid::linspace(2150.0, 1000);
        let profile = AngleProfile::build(&grid, [60.0, 11.0, 8.5]);
        assert_eq!(profile.count_angle(8.5), 1);
        assert_eq!(profile.exponent.iter().filter(|&&n| n == 2.0).count(), 1);
    }

    #[test]
    fn test_short_grid_has_converging_start_and_exit_end() {
        let grid = AxialGrid::linspace(10.0, 2);
        let profile = AngleProfile::build(&grid, [45.0, 15.0, 5.0]);
        assert_eq!(profile.angle, vec![45.0, 5.0]);
        assert_eq!(profile.exponent, vec![0.5, 2.0]);
    }
}
