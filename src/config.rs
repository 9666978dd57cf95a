//! Configuration for the command-line runner
//!
//! Loaded from an explicit path or from the user's config directory, with
//! every field falling back to a default when absent.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Instructions to execute before stopping (0 = no limit)
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,

    /// Log a trace line before every instruction
    #[serde(default)]
    pub trace: bool,

    /// Memory windows to hex-dump after the run
    #[serde(default)]
    pub dump: Vec<DumpRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpRange {
    pub start: u16,
    pub len: u16,
}

fn default_max_steps() -> u64 {
    1_000_000
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            trace: false,
            dump: Vec::new(),
        }
    }
}

impl RunnerConfig {
    /// Default configuration file path
    pub fn config_path() -> PathBuf {
        match dirs::config_dir() {
            Some(config_dir) => config_dir.join("nesium").join("runner.toml"),
            None => PathBuf::from("runner.toml"),
        }
    }

    /// Load from `path`, or from `config_path()` when `None`. A missing
    /// default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        if !explicit && !path.exists() {
            log::info!("Using default runner configuration");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config = Self::from_toml(&contents)?;
        log::info!("Loaded runner configuration from: {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

impl std::str::FromStr for DumpRange {
    type Err = String;

    /// `START:LEN`, both hexadecimal, with an optional `$` or `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, len) = s
            .split_once(':')
            .ok_or_else(|| format!("expected START:LEN, got '{}'", s))?;
        Ok(Self {
            start: parse_hex(start)?,
            len: parse_hex(len)?,
        })
    }
}

fn parse_hex(s: &str) -> Result<u16, String> {
    let digits = s
        .trim()
        .trim_start_matches('$')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|e| format!("bad hex value '{}': {}", s, e))
}
