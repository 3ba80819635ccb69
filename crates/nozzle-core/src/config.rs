//! Loading and validating [`NozzleParams`].

use std::path::Path;

use tracing::info;

use crate::constants::{MAX_EXPONENTS, MAX_SAMPLES};
use crate::error::{NozzleError, Result};
use crate::NozzleParams;

impl NozzleParams {
    /// Parse parameters from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| NozzleError::Config {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Read parameters from a JSON file and validate them.
    pub fn load(path: &Path) -> Result<Self> {
        let shown = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| NozzleError::Config {
            path: shown.clone(),
            reason: e.to_string(),
        })?;
        let params: NozzleParams =
            serde_json::from_str(&text).map_err(|e| NozzleError::Config {
                path: shown.clone(),
                reason: e.to_string(),
            })?;
        params.validate()?;
        info!(path = %shown, "loaded nozzle parameters");
        Ok(params)
    }

    /// Check the preconditions of the contour and flow formulas.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("heat_capacity_ratio", self.heat_capacity_ratio),
            ("gas_constant", self.gas_constant),
            ("chamber_temperature", self.chamber_temperature),
            ("chamber_density", self.chamber_density),
            ("throat_radius", self.throat_radius),
            ("expansion_ratio", self.expansion_ratio),
            ("length", self.length),
            ("initial_angles[0]", self.initial_angles[0]),
            ("initial_angles[1]", self.initial_angles[1]),
            ("initial_angles[2]", self.initial_angles[2]),
            ("exponents.start", self.exponents.start),
            ("exponents.stop", self.exponents.stop),
            ("exponents.step", self.exponents.step),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(NozzleError::invalid(field, value, "must be finite"));
            }
        }

        // density exponent is 1/(k−1)
        if self.heat_capacity_ratio <= 1.0 {
            return Err(NozzleError::invalid(
                "heat_capacity_ratio",
                self.heat_capacity_ratio,
                "must be greater than 1",
            ));
        }
        let positive = [
            ("chamber_temperature", self.chamber_temperature),
            ("chamber_density", self.chamber_density),
            ("throat_radius", self.throat_radius),
            ("length", self.length),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(NozzleError::invalid(field, value, "must be positive"));
            }
        }
        if self.expansion_ratio < 1.0 {
            return Err(NozzleError::invalid(
                "expansion_ratio",
                self.expansion_ratio,
                "must be at least 1 so the exit is no narrower than the throat",
            ));
        }
        if self.samples < 2 {
            return Err(NozzleError::invalid(
                "samples",
                self.samples,
                "at least 2 positions are needed to span [0, L]",
            ));
        }
        if self.samples > MAX_SAMPLES {
            return Err(NozzleError::invalid(
                "samples",
                self.samples,
                &format!("must not exceed {MAX_SAMPLES}"),
            ));
        }
        if self.exponents.step <= 0.0 {
            return Err(NozzleError::invalid(
                "exponents.step",
                self.exponents.step,
                "must be positive",
            ));
        }
        let count = self.exponents.count();
        if count > MAX_EXPONENTS {
            return Err(NozzleError::invalid(
                "exponents",
                format!(
                    "[{}, {}) step {}",
                    self.exponents.start, self.exponents.stop, self.exponents.step
                ),
                &format!("range holds {count} exponents, more than {MAX_EXPONENTS}"),
            ));
        }
        if self.exponents.values().is_empty() {
            return Err(NozzleError::invalid(
                "exponents",
                format!("[{}, {})", self.exponents.start, self.exponents.stop),
                "range contains no exponent",
            ));
        }
        Ok(())
    }
}
