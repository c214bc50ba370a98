//! Logarithmic value normalization

use super::ColorError;

/// Maps values onto `[0, 1]` on a logarithmic scale between `vmin` and `vmax`
///
/// Values outside the bounds map outside `[0, 1]` and are saturated by the
/// colormap. Non-positive and non-finite values have no logarithm and are
/// masked (`normalize` returns `None`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNorm {
    vmin: f64,
    vmax: f64,
    log_min: f64,
    log_max: f64,
}

impl LogNorm {
    pub fn new(vmin: f64, vmax: f64) -> Result<Self, ColorError> {
        let invalid = |reason: &str| ColorError::InvalidNorm {
            vmin,
            vmax,
            reason: reason.to_string(),
        };
        if !vmin.is_finite() || !vmax.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if vmin <= 0.0 {
            return Err(invalid("vmin must be positive"));
        }
        if vmin > vmax {
            return Err(invalid("vmin must not exceed vmax"));
        }

        Ok(Self {
            vmin,
            vmax,
            log_min: vmin.ln(),
            log_max: vmax.ln(),
        })
    }

    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    /// Normalized position of `value`, or `None` when it is masked
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        if self.vmin == self.vmax {
            return Some(0.0);
        }
        Some((value.ln() - self.log_min) / (self.log_max - self.log_min))
    }

    /// Powers of ten inside `[vmin, vmax]`, plus both bounds, ascending
    pub fn ticks(&self) -> Vec<f64> {
        let mut ticks = vec![self.vmin];
        let first = self.vmin.log10().ceil() as i32;
        let last = self.vmax.log10().floor() as i32;
        for exp in first..=last {
            let decade = 10f64.powi(exp);
            if decade > self.vmin && decade < self.vmax {
                ticks.push(decade);
            }
        }
        if self.vmax > self.vmin {
            ticks.push(self.vmax);
        }
        ticks
    }
}
