//! Zero-phase low-pass smoothing of a weight series.
//!
//! Daily weigh-ins are noisy, so the trend is recovered with a digital
//! Butterworth low-pass filter that is run forwards and then backwards over
//! the series ([Butterworth::filtfilt]). Running it both ways cancels the phase
//! delay a single pass would introduce, so the smoothed curve does not lag
//! behind the measurements.
//!
//! The filter is designed the classic way: start from the analog Butterworth
//! prototype, pre-warp the cutoff, scale the prototype to a low-pass, and map
//! it into the digital domain with the bilinear transform.

use log::debug;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, f64::consts::PI, fmt};

/// Things that can go wrong while designing or running a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Returned when asking for a filter of order zero.
    ZeroOrder,

    /// Returned when the cutoff is not strictly between 0 and 1.
    Cutoff(f64),

    /// Returned when a series is too short for the requested edge padding.
    TooShort {
        /// Length of the series
        len: usize,
        /// Requested padding on each side
        padlen: usize,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            FilterError::ZeroOrder => Cow::from("filter order must be at least 1"),
            FilterError::Cutoff(c) => Cow::from(format!(
                "cutoff must be between 0 and 1 (fraction of Nyquist), got {}",
                c
            )),
            FilterError::TooShort { len, padlen } => Cow::from(format!(
                "series of length {} must be longer than the padding of {}",
                len, padlen
            )),
        };

        write!(f, "{}", msg)
    }
}

impl std::error::Error for FilterError {}

/// Parameters of the smoothing applied to a weight series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Smoothing {
    /// Filter order
    pub order: usize,
    /// Cutoff as a fraction of the Nyquist frequency
    pub cutoff: f64,
    /// Series of at most this many points are filtered without edge padding
    pub pad_threshold: usize,
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing {
            order: 3,
            cutoff: 0.03,
            pad_threshold: 12,
        }
    }
}

impl Smoothing {
    /// Smooth `data` with a zero-phase Butterworth low-pass filter. The
    /// result has the same length as the input.
    pub fn smooth(&self, data: &[f64]) -> Result<Vec<f64>, FilterError> {
        let filter = Butterworth::lowpass(self.order, self.cutoff)?;
        let padlen = if data.len() > self.pad_threshold {
            3 * filter.len()
        } else {
            0
        };
        // padding must stay shorter than the series
        filter.filtfilt(data, padlen.min(data.len().saturating_sub(1)))
    }
}

/// A digital IIR filter in transfer function form, `a[0]` is always 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Butterworth {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl Butterworth {
    /// Design a low-pass Butterworth filter. `cutoff` is given as a fraction
    /// of the Nyquist frequency.
    pub fn lowpass(order: usize, cutoff: f64) -> Result<Self, FilterError> {
        if order == 0 {
            return Err(FilterError::ZeroOrder);
        }
        if !(cutoff > 0.0 && cutoff < 1.0) {
            return Err(FilterError::Cutoff(cutoff));
        }

        let n = order as f64;
        let prototype: Vec<Complex64> = (0..order)
            .map(|k| {
                let m = 2.0 * k as f64 - n + 1.0;
                -Complex64::from_polar(1.0, PI * m / (2.0 * n))
            })
            .collect();

        // Sampling frequency of 2 puts Nyquist at 1.
        let fs2 = 4.0;
        let warped = fs2 * (PI * cutoff / 2.0).tan();
        let analog: Vec<Complex64> = prototype.iter().map(|&p| p * warped).collect();
        let analog_gain = warped.powi(order as i32);

        let poles: Vec<Complex64> = analog.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();
        let zeros = vec![Complex64::new(-1.0, 0.0); order];
        let denom: Complex64 = analog.iter().map(|&p| fs2 - p).product();
        let gain = analog_gain * (Complex64::new(1.0, 0.0) / denom).re;

        let b = poly(&zeros).iter().map(|c| c.re * gain).collect();
        let a = poly(&poles).iter().map(|c| c.re).collect();

        let filter = Butterworth { b, a };
        debug!("Designed low-pass order {} cutoff {}: {:?}", order, cutoff, filter);
        Ok(filter)
    }

    /// Numerator coefficients.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Denominator coefficients.
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Number of coefficients in the longer of the two polynomials.
    pub fn len(&self) -> usize {
        self.a.len().max(self.b.len())
    }

    /// Whether the filter has no coefficients at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run the filter once over `x` in direct form II transposed, starting
    /// from the delay line state `zi`.
    pub fn lfilter(&self, x: &[f64], zi: &[f64]) -> Vec<f64> {
        let n = self.len();
        let a0 = self.a[0];
        let b: Vec<f64> = (0..n).map(|i| self.b.get(i).copied().unwrap_or(0.0) / a0).collect();
        let a: Vec<f64> = (0..n).map(|i| self.a.get(i).copied().unwrap_or(0.0) / a0).collect();

        let mut z = zi.to_vec();
        z.resize(n.saturating_sub(1), 0.0);

        x.iter()
            .map(|&xi| {
                let y = b[0] * xi + z.first().copied().unwrap_or(0.0);
                for k in 1..n {
                    let next = z.get(k).copied().unwrap_or(0.0);
                    z[k - 1] = b[k] * xi + next - a[k] * y;
                }
                y
            })
            .collect()
    }

    /// The delay line state for which the filter output is already at steady
    /// state for a unit step input.
    pub fn lfilter_zi(&self) -> Vec<f64> {
        let n = self.len();
        let a0 = self.a[0];
        let coef = |v: &[f64], i: usize| v.get(i).copied().unwrap_or(0.0) / a0;

        let dc_gain = (0..n).map(|i| coef(&self.b, i)).sum::<f64>()
            / (0..n).map(|i| coef(&self.a, i)).sum::<f64>();

        let mut zi = Vec::with_capacity(n.saturating_sub(1));
        let mut state = dc_gain - coef(&self.b, 0);
        for k in 1..n {
            zi.push(state);
            state = state - coef(&self.b, k) + coef(&self.a, k) * dc_gain;
        }
        zi
    }

    /// Filter `x` forwards and backwards so the output has no phase shift.
    ///
    /// The series is extended by `padlen` copies of its first and last sample
    /// before filtering, and each pass starts from the steady state for its
    /// first sample, which keeps the ends of the output from ringing.
    pub fn filtfilt(&self, x: &[f64], padlen: usize) -> Result<Vec<f64>, FilterError> {
        if x.len() <= padlen || x.is_empty() {
            return Err(FilterError::TooShort {
                len: x.len(),
                padlen,
            });
        }

        let first = x[0];
        let last = x[x.len() - 1];
        let mut ext = Vec::with_capacity(x.len() + 2 * padlen);
        ext.extend(std::iter::repeat(first).take(padlen));
        ext.extend_from_slice(x);
        ext.extend(std::iter::repeat(last).take(padlen));

        let zi = self.lfilter_zi();
        let scaled = |s: f64| zi.iter().map(|z| z * s).collect::<Vec<_>>();

        let forward = self.lfilter(&ext, &scaled(ext[0]));
        let mut reversed: Vec<f64> = forward.into_iter().rev().collect();
        let start = reversed[0];
        let backward = self.lfilter(&reversed, &scaled(start));
        reversed = backward.into_iter().rev().collect();

        Ok(reversed[padlen..padlen + x.len()].to_vec())
    }
}

/// Expand the roots of a polynomial into its coefficients, highest power
/// first.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }
    coeffs
}
