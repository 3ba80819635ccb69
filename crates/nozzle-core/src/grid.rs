/// Ordered axial sample positions along the nozzle, in mm.
#[derive(Debug, Clone, PartialEq)]
pub struct AxialGrid {
    positions: Vec<f64>,
    length: f64,
}

impl AxialGrid {
    /// `samples` evenly spaced positions from 0 to `length` inclusive.
    ///
    /// The last position is set to `length` exactly, so callers may test
    /// `x == length` to find the exit plane.
    pub fn linspace(length: f64, samples: usize) -> Self {
        let mut positions = Vec::with_capacity(samples);
        match samples {
            0 => {}
            1 => positions.push(0.0),
            _ => {
                let step = length / (samples - 1) as f64;
                for i in 0..samples - 1 {
                    positions.push(i as f64 * step);
                }
                positions.push(length);
            }
        }
        Self { positions, length }
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Nozzle length L the grid spans.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Pair every position with the matching value of an aligned sequence.
    pub fn points(&self, values: &[f64]) -> Vec<[f64; 2]> {
        self.positions
            .iter()
            .zip(values.iter())
            .map(|(&x, &y)| [x, y])
            .collect()
    }
}
