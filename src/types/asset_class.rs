use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use clap::ValueEnum;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AssetClass {
    Forex,
    Crypto,
    Equity,
    Commodity,
    Index,
    IndexOtc,
    Otc,
}

impl AssetClass {
    pub fn is_otc(self) -> bool {
        matches!(self, Self::IndexOtc | Self::Otc)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forex => write!(f, "forex"),
            Self::Crypto => write!(f, "crypto"),
            Self::Equity => write!(f, "equity"),
            Self::Commodity => write!(f, "commodity"),
            Self::Index => write!(f, "index"),
            Self::IndexOtc => write!(f, "index-otc"),
            Self::Otc => write!(f, "otc"),
        }
    }
}

impl FromStr for AssetClass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "forex" | "fx" => Ok(Self::Forex),
            "crypto" => Ok(Self::Crypto),
            "equity" | "equities" => Ok(Self::Equity),
            "commodity" | "commodities" => Ok(Self::Commodity),
            "index" | "indices" => Ok(Self::Index),
            "index-otc" => Ok(Self::IndexOtc),
            "otc" => Ok(Self::Otc),
            other => Err(anyhow!("unknown asset class: {other}")),
        }
    }
}
