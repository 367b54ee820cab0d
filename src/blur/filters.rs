use crate::error::{LaneError, Result};
use serde::{Deserialize, Serialize};

/// Trait implemented by separable 1D filters used by the smoother.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];

    fn radius(&self) -> usize {
        self.taps().len() / 2
    }
}

/// Border extrapolation used when a tap falls outside the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// `aaa|abcd|ddd`
    Replicate,
    /// `cba|abcd|dcb`
    Reflect,
    /// `dcb|abcd|cba`
    #[default]
    Reflect101,
    /// Pixels outside the image read as the given value.
    Constant(u8),
}

impl BorderMode {
    /// Map a possibly out-of-range index into `[0, len)`; `None` means the
    /// constant border value applies.
    pub fn resolve(self, index: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if (0..n).contains(&index) {
            return Some(index as usize);
        }
        match self {
            BorderMode::Replicate => Some(index.clamp(0, n - 1) as usize),
            BorderMode::Constant(_) => None,
            BorderMode::Reflect | BorderMode::Reflect101 => {
                if n == 1 {
                    return Some(0);
                }
                let delta = isize::from(self == BorderMode::Reflect101);
                let mut p = index;
                while !(0..n).contains(&p) {
                    p = if p < 0 { -p - 1 + delta } else { n - 1 - (p - n) - delta };
                }
                Some(p as usize)
            }
        }
    }
}

/// Normalised Gaussian taps for an odd kernel size.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianFilter {
    taps: Vec<f32>,
    sigma: f64,
}

impl GaussianFilter {
    /// Build a kernel of `size` taps. A zero `sigma` derives one from
    /// the size as `0.3 * ((size - 1) / 2 - 1) + 0.8`.
    pub fn new(size: usize, sigma: f64) -> Result<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(LaneError::invalid(
                "blur",
                "kernel_size",
                format!("kernel size must be odd and positive, got {size}"),
            ));
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(LaneError::invalid(
                "blur",
                "sigma",
                format!("sigma must be finite and non-negative, got {sigma}"),
            ));
        }
        let sigma = if sigma > 0.0 {
            sigma
        } else {
            0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8
        };

        let center = (size / 2) as f64;
        let scale = -0.5 / (sigma * sigma);
        let raw: Vec<f64> = (0..size)
            .map(|i| {
                let x = i as f64 - center;
                (scale * x * x).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        let taps = raw.iter().map(|v| (v / sum) as f32).collect();
        Ok(Self { taps, sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl SeparableFilter for GaussianFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn derived_sigma_for_seven_taps() {
        let filter = GaussianFilter::new(7, 0.0).unwrap();
        assert_abs_diff_eq!(filter.sigma(), 1.4, epsilon = 1e-12);
        let sum: f32 = filter.taps().iter().sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-6);
        assert_eq!(filter.radius(), 3);
    }

    #[test]
    fn even_kernel_is_invalid() {
        let err = GaussianFilter::new(6, 0.0).unwrap_err();
        assert!(matches!(
            err,
            LaneError::InvalidParameter { parameter: "kernel_size", .. }
        ));
    }

    #[test]
    fn border_modes_extrapolate() {
        assert_eq!(BorderMode::Replicate.resolve(-2, 5), Some(0));
        assert_eq!(BorderMode::Reflect.resolve(-1, 5), Some(0));
        assert_eq!(BorderMode::Reflect.resolve(5, 5), Some(4));
        assert_eq!(BorderMode::Reflect101.resolve(-1, 5), Some(1));
        assert_eq!(BorderMode::Reflect101.resolve(6, 5), Some(2));
        assert_eq!(BorderMode::Constant(7).resolve(-1, 5), None);
        assert_eq!(BorderMode::Reflect101.resolve(-3, 1), Some(0));
    }
}
