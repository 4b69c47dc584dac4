//! The error type returned by the weight commands.

use crate::{
    config::ConfigError, gui::GuiError, store::LogError, trend::TrendError,
};

use std::{borrow::Cow, fmt, io};

/// Anything that can stop a command from completing.
#[derive(Debug)]
pub enum WeightError {
    /// Returned when the text given to `add` is not a number.
    NotAWeight(String),

    /// Returned when the log cannot be read or written.
    Log(LogError),

    /// Returned when the configuration cannot be loaded.
    Config(ConfigError),

    /// Returned when the trend cannot be computed.
    Trend(TrendError),

    /// Returned when the terminal misbehaves while showing the chart.
    Gui(GuiError),

    /// Returned when writing to the output fails.
    IoError(io::Error),
}

impl fmt::Display for WeightError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use WeightError as WE;
        let msg = match self {
            WE::NotAWeight(text) => Cow::from(format!("can't convert `{}` to a weight", text)),
            WE::Log(error) => Cow::from(format!("weight log: {}", error)),
            WE::Config(error) => Cow::from(format!("config: {}", error)),
            WE::Trend(error) => Cow::from(error.to_string()),
            WE::Gui(error) => Cow::from(error.to_string()),
            WE::IoError(error) => Cow::from(format!("io error: {}", error)),
        };

        write!(f, "{}", msg)
    }
}

impl std::error::Error for WeightError {}

impl From<LogError> for WeightError {
    fn from(value: LogError) -> Self {
        Self::Log(value)
    }
}

impl From<ConfigError> for WeightError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TrendError> for WeightError {
    fn from(value: TrendError) -> Self {
        Self::Trend(value)
    }
}

impl From<GuiError> for WeightError {
    fn from(value: GuiError) -> Self {
        Self::Gui(value)
    }
}

impl From<io::Error> for WeightError {
    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}
