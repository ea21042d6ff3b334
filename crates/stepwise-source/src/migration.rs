//! Migration records and the filename parser
//!
//! A migration file is named `<version>_<identifier>.<up|down>.<extension>`,
//! for example `003_create_users.up.sql`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Accepted filename convention
pub const FILENAME_PATTERN: &str = r"^([0-9]+)_(.*)\.(down|up)\.(.*)$";

static FILENAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(FILENAME_PATTERN).expect("filename pattern is a valid regex"));

/// Which half of a migration a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Apply the migration
    Up,
    /// Revert the migration
    Down,
}

impl Direction {
    /// Token used in filenames
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(ParseError::UnknownDirection(other.to_string())),
        }
    }
}

/// One migration file, located but never read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Migration {
    /// Ordering key
    pub version: u64,
    /// Human-readable label, e.g. `create_users`
    pub identifier: String,
    /// Up or down
    pub direction: Direction,
    /// Original filename, used to reopen the content
    pub raw: String,
}

impl Migration {
    /// Parse a filename into a migration record
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let captures = FILENAME_REGEX
            .captures(raw)
            .ok_or_else(|| ParseError::NoMatch(raw.to_string()))?;

        let version = captures[1]
            .parse::<u64>()
            .map_err(|_| ParseError::VersionOutOfRange(raw.to_string()))?;
        let direction = captures[3].parse::<Direction>()?;

        Ok(Self {
            version,
            identifier: captures[2].to_string(),
            direction,
            raw: raw.to_string(),
        })
    }
}

impl fmt::Display for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.version, self.direction, self.identifier)
    }
}

/// Parse a filename into a migration record
pub fn parse(raw: &str) -> Result<Migration, ParseError> {
    Migration::parse(raw)
}
