use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::constants::THOUSANDS_SEPARATOR;

/// How the raw `Value` text of a dataset is turned into `Value_Clean`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleaningRule {
    /// Strip thousands separators, then parse. Anything else non-numeric is fatal.
    CommaStripped,
    /// Parse as-is; unparseable text becomes the missing marker.
    Coercive,
}

impl CleaningRule {
    /// Clean a single raw value.
    ///
    /// `Ok(None)` is the missing marker. `Err` carries the reason the text was
    /// rejected and is only produced by [`CleaningRule::CommaStripped`].
    /// Empty cells are missing under both rules.
    pub fn clean(&self, raw: &str) -> std::result::Result<Option<f64>, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        match self {
            CleaningRule::CommaStripped => {
                let stripped: String = trimmed
                    .chars()
                    .filter(|c| *c != THOUSANDS_SEPARATOR)
                    .collect();

                match stripped.trim().parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(Some(value)),
                    Ok(_) => Err("is not a finite number".to_string()),
                    Err(_) => Err("is not numeric after removing thousands separators".to_string()),
                }
            }
            CleaningRule::Coercive => Ok(trimmed.parse::<f64>().ok().filter(|v| v.is_finite())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CleaningRule::CommaStripped => "comma-stripped",
            CleaningRule::Coercive => "coercive",
        }
    }
}

impl fmt::Display for CleaningRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CleaningRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comma" | "comma-stripped" => Ok(CleaningRule::CommaStripped),
            "coerce" | "coercive" => Ok(CleaningRule::Coercive),
            other => Err(format!(
                "unknown cleaning rule '{}' (expected 'comma' or 'coerce')",
                other
            )),
        }
    }
}
