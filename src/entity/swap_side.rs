use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entity::Asset;

/// Direction of a swap between the base asset and the stable asset.
///
/// `Buy` spends the base asset to receive the stable asset, `Sell` spends the
/// stable asset to receive the base asset.
#[derive(Serialize, Deserialize, Default, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum SwapSide {
    #[default]
    Buy,
    Sell,
}

impl SwapSide {
    /// Asset the user spends on this side.
    pub fn input_asset<'a>(&self, base: &'a Asset, stable: &'a Asset) -> &'a Asset {
        match self {
            SwapSide::Buy => base,
            SwapSide::Sell => stable,
        }
    }

    /// Asset the user receives on this side.
    pub fn output_asset<'a>(&self, base: &'a Asset, stable: &'a Asset) -> &'a Asset {
        match self {
            SwapSide::Buy => stable,
            SwapSide::Sell => base,
        }
    }
}

impl FromStr for SwapSide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(anyhow!("Parse SwapSide error: Invalid value '{}'", s)),
        }
    }
}

impl fmt::Display for SwapSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}
