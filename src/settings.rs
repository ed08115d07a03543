use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Character set of the listings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEncoding {
    #[default]
    Latin1,
    Utf8,
}

/// Tunables for loading and ranking.  Every field has a default, so a
/// settings file only needs the keys it changes:
///
/// ```json
/// { "conversion_rate": 88.5, "result_limit": 20 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Multiplier from the source currency into the displayed one.
    pub conversion_rate: f64,
    /// Label of the displayed currency.
    pub target_currency: String,
    /// Source price column; `None` picks the first `Price_*` header.
    pub price_column: Option<String>,
    /// Maximum number of rows in a result.
    pub result_limit: usize,
    pub encoding: SourceEncoding,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            conversion_rate: 90.0,
            target_currency: "INR".to_string(),
            price_column: None,
            result_limit: 10,
            encoding: SourceEncoding::Latin1,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text).context("parsing settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.conversion_rate.is_finite() || self.conversion_rate <= 0.0 {
            bail!("conversion_rate must be a positive number, got {}", self.conversion_rate);
        }
        if self.result_limit == 0 {
            bail!("result_limit must be at least 1");
        }
        Ok(())
    }
}
