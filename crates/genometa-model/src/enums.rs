//! Type-safe enumerations for categorical metadata fields.
//!
//! Raw input carries these as free text. Parsing is case-insensitive and
//! ignores surrounding whitespace; the canonical form is uppercase.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Sequencing platform of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Illumina,
    Nanopore,
    Pacbio,
    IonTorrent,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Illumina,
        Platform::Nanopore,
        Platform::Pacbio,
        Platform::IonTorrent,
    ];

    /// Canonical values, in declaration order.
    pub const VALUES: &'static [&'static str] = &["ILLUMINA", "NANOPORE", "PACBIO", "ION_TORRENT"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Illumina => "ILLUMINA",
            Platform::Nanopore => "NANOPORE",
            Platform::Pacbio => "PACBIO",
            Platform::IonTorrent => "ION_TORRENT",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownValue {
                field: "platform",
                value: s.to_string(),
            })
    }
}

/// Library layout of a sequencing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LibraryLayout {
    Single,
    Paired,
}

impl LibraryLayout {
    pub const VALUES: &'static [&'static str] = &["SINGLE", "PAIRED"];

    pub fn as_str(&self) -> &'static str {
        match self {
            LibraryLayout::Single => "SINGLE",
            LibraryLayout::Paired => "PAIRED",
        }
    }
}

impl fmt::Display for LibraryLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryLayout {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SINGLE" => Ok(LibraryLayout::Single),
            "PAIRED" => Ok(LibraryLayout::Paired),
            _ => Err(ModelError::UnknownValue {
                field: "library_layout",
                value: s.to_string(),
            }),
        }
    }
}

/// How the pipeline reacts to validation violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EtlMode {
    /// Any violation aborts the run; no curated output is produced.
    #[default]
    Strict,
    /// Rows with violations are set aside; the rest continue.
    Quarantine,
}

impl EtlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EtlMode::Strict => "strict",
            EtlMode::Quarantine => "quarantine",
        }
    }
}

impl fmt::Display for EtlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EtlMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(EtlMode::Strict),
            "quarantine" => Ok(EtlMode::Quarantine),
            _ => Err(ModelError::UnknownValue {
                field: "mode",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_case_insensitively() {
        assert_eq!(" illumina ".parse::<Platform>().unwrap(), Platform::Illumina);
        assert_eq!("Ion_Torrent".parse::<Platform>().unwrap(), Platform::IonTorrent);
        assert!("MINION".parse::<Platform>().is_err());
    }

    #[test]
    fn platform_values_match_variants() {
        let rendered: Vec<&str> = Platform::ALL.iter().map(Platform::as_str).collect();
        assert_eq!(rendered, Platform::VALUES);
    }

    #[test]
    fn layout_and_mode_parse() {
        assert_eq!("paired".parse::<LibraryLayout>().unwrap(), LibraryLayout::Paired);
        assert_eq!("QUARANTINE".parse::<EtlMode>().unwrap(), EtlMode::Quarantine);
        assert!("lenient".parse::<EtlMode>().is_err());
    }
}
