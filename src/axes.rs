//! Axis bounds and tick placement for the weight chart.

/// Spacing of the major weight ticks, in kilograms.
pub const MAJOR_STEP: f64 = 5.0;

/// The chart aims for about this many date ticks along the x axis.
pub const TARGET_DATE_TICKS: usize = 12;

/// Width reserved for one date label, including the gap to its neighbour.
pub const DATE_LABEL_WIDTH: u16 = 12;

/// Most minor ticks the weight axis will lay out, whatever the range.
pub const MAX_MINOR_TICKS: usize = 200;

/// Bounds and ticks of the weight axis.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightAxis {
    /// Lower bound, the measured minimum rounded down to a tick
    pub min: f64,
    /// Upper bound, the measured maximum rounded up to a tick
    pub max: f64,
    /// Evenly spaced ticks from the lower to the upper bound, one per whole
    /// kilogram unless the range is too wide for that
    pub minor: Vec<f64>,
    /// Ticks on multiples of [MAJOR_STEP] minor steps covering the measured
    /// range
    pub major: Vec<f64>,
    step: f64,
}

/// The smallest of 1, 2, 5, 10, 20, 50, ... kilograms that splits `span`
/// into at most [MAX_MINOR_TICKS] steps.
pub fn minor_step(span: f64) -> f64 {
    let mut scale = 1.0;
    for _ in 0..=f64::MAX_10_EXP {
        for m in [1.0, 2.0, 5.0] {
            let step = m * scale;
            if span / step <= MAX_MINOR_TICKS as f64 {
                return step;
            }
        }
        scale *= 10.0;
    }
    f64::MAX
}

fn ticks(from: f64, to: f64, step: f64) -> Vec<f64> {
    let count = ((to - from) / step).round();
    let count = if count.is_finite() && count > 0.0 {
        (count as usize).min(MAX_MINOR_TICKS)
    } else {
        0
    };
    (0..=count).map(|i| from + i as f64 * step).collect()
}

impl WeightAxis {
    /// Lay out the axis for measurements between `lo` and `hi`.
    pub fn for_range(lo: f64, hi: f64) -> Self {
        let step = minor_step(hi - lo);
        let min = (lo / step).floor() * step;
        let mut max = (hi / step).ceil() * step;
        if max <= min {
            max = min + step;
        }
        let minor = ticks(min, max, step);

        let major_step = MAJOR_STEP * step;
        let major_min = (lo / major_step).floor() * major_step;
        let major_max = (hi / major_step).ceil() * major_step;
        let major = ticks(major_min, major_max, major_step);

        WeightAxis {
            min,
            max,
            minor,
            major,
            step,
        }
    }

    /// Distance between minor ticks.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Major ticks that fall within the bounds.
    pub fn visible_major(&self) -> impl Iterator<Item = f64> + '_ {
        self.major
            .iter()
            .copied()
            .filter(|&m| m >= self.min && m <= self.max)
    }

    /// One label slot per minor tick from the lower to the upper bound. When
    /// there are more ticks than `rows`, only the major ticks keep their text,
    /// or every n-th tick if even those would not fit, so that no more than
    /// `rows` labels are shown.
    pub fn labels(&self, rows: u16) -> Vec<String> {
        let rows = (rows as usize).max(1);
        let len = self.minor.len();
        let major_step = MAJOR_STEP * self.step;
        let is_major = |v: f64| ((v / major_step).round() * major_step - v).abs() < self.step / 2.0;
        let majors = self.minor.iter().filter(|&&v| is_major(v)).count();
        let stride = (len + rows - 1) / rows;

        self.minor
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let shown = if len <= rows {
                    true
                } else if majors > 0 && majors <= rows {
                    is_major(v)
                } else {
                    i % stride == 0
                };
                if shown {
                    format!("{:.0}", v)
                } else {
                    String::new()
                }
            })
            .collect()
    }
}

/// Distance between date ticks for a series of `n` measurements.
pub fn date_tick_step(n: usize) -> usize {
    (n / TARGET_DATE_TICKS).max(1)
}

/// Indices of the measurements that get a date tick.
pub fn date_ticks(n: usize) -> Vec<usize> {
    (0..n).step_by(date_tick_step(n)).collect()
}

/// Indices of the dates to label when labels are spread evenly over an axis
/// `width` cells wide. Uses as many labels as [date_ticks] would, or fewer if
/// they do not fit.
pub fn date_label_indices(n: usize, width: u16) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let fit = (width / DATE_LABEL_WIDTH).max(2) as usize;
    let count = date_ticks(n).len().min(fit).min(n);
    if count < 2 {
        return vec![0];
    }
    (0..count)
        .map(|i| ((i * (n - 1)) as f64 / (count - 1) as f64).round() as usize)
        .collect()
}
