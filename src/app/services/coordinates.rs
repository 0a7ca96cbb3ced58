//! Degree/minute coordinate conversion
//!
//! Logbooks report positions as `33º 51.21588' S`. This module converts such
//! tokens into signed decimal degrees rounded to six places. Tokens that do not
//! match the grammar produce `None` rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::COORDINATE_DECIMALS;

static DEGREE_MINUTE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*[°º]\s*(\d+(?:\.\d*)?)\s*['’´`]?\s*([NSEW])")
        .expect("valid coordinate pattern")
});

/// Compass hemisphere of a coordinate token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter.to_ascii_uppercase().as_str() {
            "N" => Some(Hemisphere::North),
            "S" => Some(Hemisphere::South),
            "E" => Some(Hemisphere::East),
            "W" => Some(Hemisphere::West),
            _ => None,
        }
    }

    fn sign(&self) -> f64 {
        match self {
            Hemisphere::South | Hemisphere::West => -1.0,
            Hemisphere::North | Hemisphere::East => 1.0,
        }
    }

    /// Largest magnitude allowed for this axis
    fn limit(&self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::South => 90.0,
            Hemisphere::East | Hemisphere::West => 180.0,
        }
    }
}

/// A parsed degree/minute token before conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeMinutes {
    pub degrees: f64,
    pub minutes: f64,
    pub hemisphere: Hemisphere,
}

impl DegreeMinutes {
    /// Parse the first degree/minute token found in `text`
    pub fn parse(text: &str) -> Option<Self> {
        let captures = DEGREE_MINUTE_PATTERN.captures(text)?;
        let degrees = captures.get(1)?.as_str().parse::<f64>().ok()?;
        let minutes = captures.get(2)?.as_str().parse::<f64>().ok()?;
        let hemisphere = Hemisphere::from_letter(captures.get(3)?.as_str())?;

        Some(Self {
            degrees,
            minutes,
            hemisphere,
        })
    }

    /// Signed decimal degrees rounded to six places; `None` when out of range
    pub fn to_decimal(&self) -> Option<f64> {
        let magnitude = self.degrees + self.minutes / 60.0;
        if magnitude > self.hemisphere.limit() {
            return None;
        }
        Some(round_to(magnitude * self.hemisphere.sign(), COORDINATE_DECIMALS))
    }
}

/// Convert a coordinate token such as `35º 2.15939' S` to decimal degrees
pub fn convert_coordinate(text: &str) -> Option<f64> {
    DegreeMinutes::parse(text)?.to_decimal()
}

/// True when the cell plausibly holds a degree/minute token
pub fn looks_like_coordinate(text: &str) -> bool {
    DEGREE_MINUTE_PATTERN.is_match(text)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
