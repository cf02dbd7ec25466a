//! Boundary evaluation method selector

use serde::{Deserialize, Serialize};

/// Which stability boundary strategy to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMethod {
    /// Closed-form zero-order approximation
    Zoa,
    /// Harmonic-matching approximation (illustrative, not physically rigorous)
    #[default]
    Empirical,
}

impl BoundaryMethod {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Zoa => "ZOA closed form",
            Self::Empirical => "Empirical harmonic matching (illustrative)",
        }
    }
}

impl std::fmt::Display for BoundaryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Zoa => "zoa",
            Self::Empirical => "empirical",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for BoundaryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zoa" => Ok(Self::Zoa),
            "empirical" => Ok(Self::Empirical),
            other => Err(format!("unknown method '{}', expected 'zoa' or 'empirical'", other)),
        }
    }
}
