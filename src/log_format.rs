//! Parsing and formatting of a single line of the weight log.
//!
//! Each line holds one measurement:
//!
//! ```text
//! 17.03.2024 75.2
//! ```
//!
//! The date is written as `DD.MM.YYYY` and the weight is kept as the exact
//! text the user typed, so a line that was appended reads back identically.

use chrono::NaiveDate;
use nom::{
    bytes::complete::{take_till1, take_while_m_n},
    character::complete::{char, multispace0, u32},
    combinator::{eof, map_opt, map_res},
    error::Error,
    sequence::{pair, separated_pair, terminated, tuple},
    Finish, IResult,
};

use std::{fmt, str::FromStr};

/// The `strftime` pattern used when writing dates.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// One dated measurement from the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// The day the measurement was taken
    pub date: NaiveDate,
    /// The measured weight in kilograms
    pub weight: f64,
    text: String,
}

impl Entry {
    /// Builds an entry from user supplied text, returning `None` unless the
    /// text is a finite number.
    pub fn new(date: NaiveDate, text: &str) -> Option<Self> {
        let text = text.trim();
        let weight = parse_weight_text(text)?;
        Some(Entry {
            date,
            weight,
            text: text.to_owned(),
        })
    }

    /// The weight exactly as it was entered.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format(DATE_FORMAT), self.text)
    }
}

fn parse_weight_text(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|w| w.is_finite())
}

fn parse_year(s: &str) -> IResult<&str, i32> {
    map_res(
        take_while_m_n(4, 4, |c: char| c.is_ascii_digit()),
        |digits: &str| digits.parse::<i32>(),
    )(s)
}

fn parse_date(s: &str) -> IResult<&str, NaiveDate> {
    map_opt(
        tuple((
            terminated(u32, char('.')),
            terminated(u32, char('.')),
            parse_year,
        )),
        |(day, month, year)| NaiveDate::from_ymd_opt(year, month, day),
    )(s)
}

fn parse_weight(s: &str) -> IResult<&str, (&str, f64)> {
    map_res(take_till1(|c: char| c.is_whitespace()), |t: &str| {
        parse_weight_text(t).map(|w| (t, w)).ok_or(())
    })(s)
}

fn parse_entry(s: &str) -> IResult<&str, Entry> {
    terminated(
        separated_pair(parse_date, char(' '), parse_weight),
        pair(multispace0, eof),
    )(s)
    .map(|(rest, (date, (text, weight)))| {
        (
            rest,
            Entry {
                date,
                weight,
                text: text.to_owned(),
            },
        )
    })
}

impl FromStr for Entry {
    type Err = Error<String>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_entry(s).finish() {
            Ok((_remaining, entry)) => Ok(entry),
            Err(Error { input, code }) => Err(Error {
                input: input.to_string(),
                code,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_line() {
        let (leftover, entry) = parse_entry("17.03.2024 75.2").unwrap();

        assert_eq!(leftover, "");
        assert_eq!(entry.date, date(2024, 3, 17));
        assert_eq!(entry.weight, 75.2);
        assert_eq!(entry.text(), "75.2");
    }

    #[test]
    fn tolerates_line_endings() {
        let entry: Entry = "01.01.2023 80\r\n".parse().unwrap();
        assert_eq!(entry.weight, 80.0);
        assert_eq!(entry.text(), "80");
    }

    #[test]
    fn rejects_impossible_date() {
        assert!("31.02.2024 75.0".parse::<Entry>().is_err());
        assert!("00.01.2024 75.0".parse::<Entry>().is_err());
    }

    #[test]
    fn year_has_four_digits() {
        assert!("17.03.24 75.2".parse::<Entry>().is_err());
        assert!("17.03.-2024 75.2".parse::<Entry>().is_err());
        assert!("17.03.20245 75.2".parse::<Entry>().is_err());
        assert_eq!(
            "17.03.0999 75.2".parse::<Entry>().unwrap().date,
            date(999, 3, 17)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!("17.03.2024".parse::<Entry>().is_err());
        assert!("17.03.2024 heavy".parse::<Entry>().is_err());
        assert!("17.03.2024 75.2 extra".parse::<Entry>().is_err());
        assert!("17-03-2024 75.2".parse::<Entry>().is_err());
        assert!("17.03.2024 nan".parse::<Entry>().is_err());
    }

    #[test]
    fn display_reproduces_line() {
        let entry = Entry::new(date(2024, 3, 7), " 75.20 ").unwrap();
        assert_eq!(entry.to_string(), "07.03.2024 75.20");
        assert_eq!(entry.to_string().parse::<Entry>().unwrap(), entry);
    }

    #[test]
    fn new_rejects_non_numbers() {
        assert!(Entry::new(date(2024, 3, 7), "seventy").is_none());
        assert!(Entry::new(date(2024, 3, 7), "inf").is_none());
        assert!(Entry::new(date(2024, 3, 7), "").is_none());
    }
}
