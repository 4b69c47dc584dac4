//! The smoothed trend and the spread bands drawn around it.
//!
//! Besides the smoothed average, two bands show how far the measurements
//! stray from it:
//!
//! - the inner band smooths each side separately, replacing samples on the
//!   other side of the average with the average itself;
//! - the outer band only keeps the samples on one side, joins them with
//!   straight lines, and smooths that envelope.

use crate::filter::{FilterError, Smoothing};

use log::debug;
use std::{borrow::Cow, fmt};

/// Minimum number of measurements needed to compute a trend.
pub const MIN_POINTS: usize = 2;

/// Things that can go wrong while computing a trend.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendError {
    /// Returned when there are fewer than [MIN_POINTS] measurements.
    TooFewPoints(usize),

    /// Returned when smoothing one of the curves fails.
    Filter(FilterError),
}

impl fmt::Display for TrendError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            TrendError::TooFewPoints(n) => Cow::from(format!(
                "at least {} data points required for plotting, have {}",
                MIN_POINTS, n
            )),
            TrendError::Filter(error) => Cow::from(format!("filter error: {}", error)),
        };

        write!(f, "{}", msg)
    }
}

impl std::error::Error for TrendError {}

impl From<FilterError> for TrendError {
    fn from(value: FilterError) -> Self {
        Self::Filter(value)
    }
}

/// A lower and an upper curve, one value per measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    /// The lower edge of the band
    pub lower: Vec<f64>,
    /// The upper edge of the band
    pub upper: Vec<f64>,
}

/// Everything the chart draws, derived from the raw series.
#[derive(Debug, Clone, PartialEq)]
pub struct Trend {
    /// The measurements as recorded
    pub raw: Vec<f64>,
    /// The smoothed series
    pub average: Vec<f64>,
    /// Spread of the measurements, clipped at the average
    pub inner: Band,
    /// Envelope of the measurements on either side of the average
    pub outer: Band,
}

impl Trend {
    /// Compute the trend of `raw` with the given smoothing.
    pub fn compute(raw: &[f64], smoothing: &Smoothing) -> Result<Self, TrendError> {
        if raw.len() < MIN_POINTS {
            return Err(TrendError::TooFewPoints(raw.len()));
        }

        let average = smoothing.smooth(raw)?;

        let clipped_below: Vec<f64> = raw.iter().zip(&average).map(|(&x, &m)| x.min(m)).collect();
        let clipped_above: Vec<f64> = raw.iter().zip(&average).map(|(&x, &m)| x.max(m)).collect();
        let inner = Band {
            lower: smoothing.smooth(&clipped_below)?,
            upper: smoothing.smooth(&clipped_above)?,
        };

        let below: Vec<usize> = (0..raw.len()).filter(|&i| raw[i] < average[i]).collect();
        let above: Vec<usize> = (0..raw.len()).filter(|&i| raw[i] > average[i]).collect();
        debug!(
            "{} samples below and {} above the average",
            below.len(),
            above.len()
        );

        let envelope = |known: &[usize], fallback: &[f64]| -> Result<Vec<f64>, TrendError> {
            match interp_at(raw.len(), known, raw) {
                Some(line) => Ok(smoothing.smooth(&line)?),
                None => Ok(fallback.to_vec()),
            }
        };
        let outer = Band {
            lower: envelope(&below, &inner.lower)?,
            upper: envelope(&above, &inner.upper)?,
        };

        Ok(Trend {
            raw: raw.to_vec(),
            average,
            inner,
            outer,
        })
    }

    /// Number of measurements.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the trend holds no measurements.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Smallest and largest value over the raw measurements.
    pub fn raw_range(&self) -> (f64, f64) {
        self.raw
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            })
    }
}

/// Linearly interpolate `values` at every index `0..len`, using only the
/// samples at the sorted indices in `known`. Indices before the first or after
/// the last known sample take that sample's value. Returns `None` if nothing
/// is known.
pub fn interp_at(len: usize, known: &[usize], values: &[f64]) -> Option<Vec<f64>> {
    let (&first, &last) = (known.first()?, known.last()?);

    let mut out = Vec::with_capacity(len);
    let mut seg = 0;
    for i in 0..len {
        let v = if i <= first {
            values[first]
        } else if i >= last {
            values[last]
        } else {
            while known[seg + 1] < i {
                seg += 1;
            }
            let (x0, x1) = (known[seg], known[seg + 1]);
            let t = (i - x0) as f64 / (x1 - x0) as f64;
            values[x0] + t * (values[x1] - values[x0])
        };
        out.push(v);
    }
    Some(out)
}
