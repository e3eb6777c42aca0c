use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(PromotionId);
id_newtype!(ProductId);

/// Categories the promotions service accepts. The admin page does not enforce
/// this list; it is offered to the operator as a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionCategory {
    /// Percentage off.
    Discount,
    /// Buy N get one free.
    #[serde(rename = "BOGOF")]
    Bogof,
    Unknown,
}

impl PromotionCategory {
    pub const ALL: [PromotionCategory; 3] = [Self::Discount, Self::Bogof, Self::Unknown];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Discount => "Discount",
            Self::Bogof => "BOGOF",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PromotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown promotion category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for PromotionCategory {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}
