//! Roll Log Loading
//!
//! Reads a CSV roll log with a `roll` column (the face shown) and a `charged`
//! column (whether the die was charged before the roll). Header names are
//! matched case-insensitively and extra columns are ignored.

use anyhow::{Context, bail};
use rollcheck_stats::Sample;
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// A single recorded roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Roll {
    /// Face shown
    #[serde(rename = "roll")]
    pub value: i64,
    /// Whether the die was charged beforehand
    #[serde(deserialize_with = "deserialize_charged")]
    pub charged: bool,
}

/// All rolls of one log, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollLog {
    rolls: Vec<Roll>,
}

impl RollLog {
    /// Wrap already parsed rolls
    pub fn new(rolls: Vec<Roll>) -> Self {
        Self { rolls }
    }

    /// Load a roll log from a CSV file
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open roll log {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Load a roll log from any CSV source
    pub fn from_reader<R: std::io::Read>(source: R) -> anyhow::Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(source);

        let headers: csv::StringRecord = reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|h| h.to_ascii_lowercase())
            .collect();
        for required in ["roll", "charged"] {
            if !headers.iter().any(|h| h == required) {
                bail!("Missing required column '{}'", required);
            }
        }
        reader.set_headers(headers.clone());

        let mut rolls = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            // Header is line 1
            let line = idx + 2;
            let record = record.with_context(|| format!("Malformed CSV at line {}", line))?;
            let roll: Roll = record
                .deserialize(Some(&headers))
                .with_context(|| format!("Invalid roll at line {}", line))?;
            rolls.push(roll);
        }

        tracing::debug!(rolls = rolls.len(), "roll log parsed");
        Ok(Self { rolls })
    }

    /// Recorded rolls
    pub fn rolls(&self) -> &[Roll] {
        &self.rolls
    }

    /// Number of rolls
    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    /// Whether the log holds no rolls
    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    /// Number of charged rolls
    pub fn charged_count(&self) -> usize {
        self.rolls.iter().filter(|r| r.charged).count()
    }

    /// Every roll as one sample
    pub fn all(&self) -> anyhow::Result<Sample> {
        self.sample_where("all", |_| true)
    }

    /// Rolls made after charging
    pub fn charged(&self) -> anyhow::Result<Sample> {
        self.sample_where("charged", |r| r.charged)
    }

    /// Rolls made without charging
    pub fn uncharged(&self) -> anyhow::Result<Sample> {
        self.sample_where("uncharged", |r| !r.charged)
    }

    fn sample_where(&self, group: &str, keep: impl Fn(&Roll) -> bool) -> anyhow::Result<Sample> {
        let values: Vec<f64> = self
            .rolls
            .iter()
            .filter(|r| keep(r))
            .map(|r| r.value as f64)
            .collect();
        Sample::new(values).with_context(|| format!("No usable rolls in group '{}'", group))
    }
}

impl FromIterator<Roll> for RollLog {
    fn from_iter<I: IntoIterator<Item = Roll>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Parse a charge flag: yes/no, true/false, y/n (case-insensitive)
pub fn parse_charged(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Some(true),
        "no" | "n" | "false" => Some(false),
        _ => None,
    }
}

fn deserialize_charged<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_charged(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "expected Yes/No for 'charged', got '{}'",
            raw
        ))
    })
}
