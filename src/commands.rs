//! The three things the tool can do with the weight log.

use crate::{
    error::WeightError, filter::Smoothing, gui,
    log_format::{Entry, DATE_FORMAT},
    store::WeightLog,
    trend::Trend,
};

use chrono::{Local, NaiveDate};
use log::info;
use std::io::Write;

/// Record `text` as the weight measured on `date`.
pub fn add(log: &WeightLog, text: &str, date: NaiveDate) -> Result<Entry, WeightError> {
    let entry = Entry::new(date, text).ok_or_else(|| WeightError::NotAWeight(text.to_owned()))?;
    log.append(&entry)?;
    Ok(entry)
}

/// Record `text` as today's weight.
pub fn add_today(log: &WeightLog, text: &str) -> Result<Entry, WeightError> {
    add(log, text, Local::now().date_naive())
}

/// Write the last `count` weights to `out`, oldest first, after a `...`
/// marker. With `dates` each weight is preceded by its date.
pub fn cat(
    log: &WeightLog,
    count: usize,
    dates: bool,
    out: &mut impl Write,
) -> Result<(), WeightError> {
    writeln!(out, "...")?;
    for entry in log.tail(count)? {
        if dates {
            writeln!(out, "{} {:?}", entry.date.format(DATE_FORMAT), entry.weight)?;
        } else {
            writeln!(out, "{:?}", entry.weight)?;
        }
    }
    Ok(())
}

/// Read the whole log and compute its trend, returning the dates alongside.
pub fn trend(
    log: &WeightLog,
    smoothing: &Smoothing,
) -> Result<(Trend, Vec<NaiveDate>), WeightError> {
    let entries = log.read()?;
    let weights: Vec<f64> = entries.iter().map(|e| e.weight).collect();
    let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
    let trend = Trend::compute(&weights, smoothing)?;
    info!("Computed trend over {} entries", trend.len());
    Ok((trend, dates))
}

/// Chart the trend in the interactive viewer.
pub fn plot(log: &WeightLog, smoothing: &Smoothing) -> Result<(), WeightError> {
    let (trend, dates) = trend(log, smoothing)?;
    gui::show_chart(&trend, &dates)?;
    Ok(())
}

/// Render one frame of the chart as text to `out`.
pub fn plot_snapshot(
    log: &WeightLog,
    smoothing: &Smoothing,
    width: u16,
    height: u16,
    out: &mut impl Write,
) -> Result<(), WeightError> {
    let (trend, dates) = trend(log, smoothing)?;
    write!(out, "{}", gui::render_to_string(&trend, &dates, width, height))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::TrendError;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn temp_log() -> (tempfile::TempDir, WeightLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = WeightLog::open(dir.path().join("weight.dat"));
        (dir, log)
    }

    #[test]
    fn add_writes_a_line() {
        let (_dir, log) = temp_log();
        let entry = add(&log, "75.2", day(3)).unwrap();
        assert_eq!(entry.weight, 75.2);
        assert_eq!(
            std::fs::read_to_string(log.path()).unwrap(),
            "03.02.2024 75.2\n"
        );
    }

    #[test]
    fn add_rejects_garbage() {
        let (_dir, log) = temp_log();
        match add(&log, "heavy", day(3)) {
            Err(WeightError::NotAWeight(text)) => assert_eq!(text, "heavy"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(!log.path().exists());
    }

    #[test]
    fn add_today_uses_local_date() {
        let (_dir, log) = temp_log();
        let entry = add_today(&log, "80").unwrap();
        assert_eq!(entry.date, Local::now().date_naive());
    }

    #[test]
    fn cat_prints_recent_weights() {
        let (_dir, log) = temp_log();
        for (d, w) in [(1, "80"), (2, "79.5"), (3, "79.25")] {
            add(&log, w, day(d)).unwrap();
        }

        let mut out = Vec::new();
        cat(&log, 2, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "...\n79.5\n79.25\n");

        let mut out = Vec::new();
        cat(&log, 30, true, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "...\n01.02.2024 80.0\n02.02.2024 79.5\n03.02.2024 79.25\n"
        );
    }

    #[test]
    fn cat_on_empty_log() {
        let (_dir, log) = temp_log();
        let mut out = Vec::new();
        cat(&log, 30, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "...\n");
    }

    #[test]
    fn plot_needs_two_points() {
        let (_dir, log) = temp_log();
        add(&log, "80", day(1)).unwrap();
        let mut out = Vec::new();
        match plot_snapshot(&log, &Smoothing::default(), 80, 24, &mut out) {
            Err(WeightError::Trend(TrendError::TooFewPoints(1))) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn snapshot_renders() {
        let (_dir, log) = temp_log();
        for d in 1..=20 {
            add(&log, &format!("{:.1}", 82.0 - 0.1 * d as f64), day(d)).unwrap();
        }
        let mut out = Vec::new();
        plot_snapshot(&log, &Smoothing::default(), 90, 25, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 25);
        assert!(text.contains("Weight trend"));
    }
}
