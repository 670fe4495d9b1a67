//! Run configuration.
//!
//! The command line only takes the input and output paths, so the slide
//! layout is chosen through the `LOTTERY_SLIDES_LAYOUT` environment variable.
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Environment variable selecting the body slide layout.
pub const LAYOUT_ENV: &str = "LOTTERY_SLIDES_LAYOUT";

/// Body slide layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One table per slide, eight students each
    #[default]
    Table,
    /// Bulleted text, six students per slide
    Bullets,
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Layout::Table),
            "bullets" | "bulleted" | "text" => Ok(Layout::Bullets),
            other => Err(Error::InvalidConfig(format!(
                "unknown layout '{}' (expected 'table' or 'bullets')",
                other
            ))),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Table => write!(f, "table"),
            Layout::Bullets => write!(f, "bullets"),
        }
    }
}

/// Settings for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub layout: Layout,
}

impl Config {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset or blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let layout = match lookup(LAYOUT_ENV) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => Layout::default(),
        };
        Ok(Self { layout })
    }
}
