//! Per-session configuration

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::str::FromStr;

/// Whether a session allows moving back to already answered questions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Navigation {
    /// Forward only, every question is visited exactly once
    Linear,
    /// Forward and backward, answers are remembered per question id
    #[default]
    Bidirectional,
}

impl FromStr for Navigation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Navigation::Linear),
            "bidirectional" => Ok(Navigation::Bidirectional),
            other => Err(format!("Unknown navigation mode: {}", other)),
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigation::Linear => f.write_str("linear"),
            Navigation::Bidirectional => f.write_str("bidirectional"),
        }
    }
}

/// Session construction options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub navigation: Navigation,
    /// Fixed seed for every shuffle; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn with_navigation(mut self, navigation: Navigation) -> Self {
        self.navigation = navigation;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the random source for a session
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
