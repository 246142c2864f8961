use crate::error::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the customer rated the service, which determines the tip added on top
/// of the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipSelection {
    #[default]
    None,
    Good,
    Excellent,
    Awesome,
}

impl TipSelection {
    pub const ALL: [TipSelection; 4] = [
        TipSelection::None,
        TipSelection::Good,
        TipSelection::Excellent,
        TipSelection::Awesome,
    ];

    pub fn percent(&self) -> u32 {
        match self {
            TipSelection::None => 0,
            TipSelection::Good => 5,
            TipSelection::Excellent => 10,
            TipSelection::Awesome => 20,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TipSelection::None => "none",
            TipSelection::Good => "good",
            TipSelection::Excellent => "excellent",
            TipSelection::Awesome => "awesome",
        }
    }
}

impl TryFrom<u32> for TipSelection {
    type Error = OrderError;

    fn try_from(percent: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|tip| tip.percent() == percent)
            .ok_or_else(|| OrderError::InvalidTip(format!("{percent}%")))
    }
}

/// Accepts either the level name or its percentage, as a tip dropdown would
/// submit it.
impl FromStr for TipSelection {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(percent) = s.parse::<u32>() {
            return Self::try_from(percent);
        }
        Self::ALL
            .into_iter()
            .find(|tip| tip.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OrderError::InvalidTip(s.to_string()))
    }
}

impl fmt::Display for TipSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
