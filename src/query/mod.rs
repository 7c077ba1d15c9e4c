//! Categorical search filters
//!
//! Provider-agnostic values for the style, orientation and color filters.
//! Each provider adapter maps these onto its own parameters, or drops the
//! ones it has no equivalent for.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Error returned when a filter value is not part of its vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue(pub String);

/// Parse an optional filter where the empty string means "no filter"
pub fn parse_optional<T: FromStr<Err = UnknownValue>>(
    raw: Option<&str>,
) -> Result<Option<T>, UnknownValue> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

/// Image style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Realistic,
    Illustration,
    #[serde(rename = "3d")]
    ThreeD,
    Flat,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Realistic => "realistic",
            Self::Illustration => "illustration",
            Self::ThreeD => "3d",
            Self::Flat => "flat",
        }
    }
}

impl FromStr for Style {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "realistic" => Ok(Self::Realistic),
            "illustration" => Ok(Self::Illustration),
            "3d" => Ok(Self::ThreeD),
            "flat" => Ok(Self::Flat),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

/// Image orientation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
    Square,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Square => "square",
        }
    }
}

impl FromStr for Orientation {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            "square" => Ok(Self::Square),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

/// Dominant color
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Black,
    White,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

impl FromStr for Color {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "purple" => Ok(Self::Purple),
            "orange" => Ok(Self::Orange),
            "black" => Ok(Self::Black),
            "white" => Ok(Self::White),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
