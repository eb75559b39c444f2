use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which excursions may initiate a trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Positive spikes only (`+`)
    Positive,
    /// Negative spikes, compared by absolute magnitude (`-`)
    Negative,
    /// Either direction (`+-`)
    #[default]
    Both,
}

impl Polarity {
    /// Whether raw positive values are considered.
    pub fn includes_positive(self) -> bool {
        matches!(self, Polarity::Positive | Polarity::Both)
    }

    /// Whether absolute magnitudes are considered.
    pub fn includes_negative(self) -> bool {
        matches!(self, Polarity::Negative | Polarity::Both)
    }

    /// Accepted spellings.
    pub fn variants() -> &'static [&'static str] {
        &["+", "-", "+-", "positive", "negative", "both"]
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => write!(f, "+"),
            Polarity::Negative => write!(f, "-"),
            Polarity::Both => write!(f, "+-"),
        }
    }
}

impl FromStr for Polarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "+" | "positive" | "pos" => Ok(Polarity::Positive),
            "-" | "negative" | "neg" => Ok(Polarity::Negative),
            "+-" | "-+" | "both" => Ok(Polarity::Both),
            _ => Err(format!(
                "Unknown polarity '{}'. Valid options: {}",
                s,
                Polarity::variants().join(", ")
            )),
        }
    }
}
