use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column name of the optional capital band in the remote `leads` table.
pub const CAPITAL_COLUMN: &str = "capital";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadField {
    Name,
    Email,
    Phone,
}

impl LeadField {
    pub fn label(&self) -> &'static str {
        match self {
            LeadField::Name => "Full name",
            LeadField::Email => "Best e-mail",
            LeadField::Phone => "WhatsApp",
        }
    }
}

/// Fixed menu of available-capital ranges offered by the extended form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapitalBand {
    #[serde(rename = "up_to_50k")]
    UpTo50k,
    #[serde(rename = "50k_to_200k")]
    From50kTo200k,
    #[serde(rename = "200k_to_1m")]
    From200kTo1m,
    #[serde(rename = "over_1m")]
    Over1m,
}

impl CapitalBand {
    pub const ALL: [CapitalBand; 4] = [
        CapitalBand::UpTo50k,
        CapitalBand::From50kTo200k,
        CapitalBand::From200kTo1m,
        CapitalBand::Over1m,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CapitalBand::UpTo50k => "up_to_50k",
            CapitalBand::From50kTo200k => "50k_to_200k",
            CapitalBand::From200kTo1m => "200k_to_1m",
            CapitalBand::Over1m => "over_1m",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CapitalBand::UpTo50k => "Up to 50k",
            CapitalBand::From50kTo200k => "50k to 200k",
            CapitalBand::From200kTo1m => "200k to 1M",
            CapitalBand::Over1m => "Over 1M",
        }
    }
}

impl fmt::Display for CapitalBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapitalBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CapitalBand::ALL
            .iter()
            .copied()
            .find(|band| band.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = CapitalBand::ALL.iter().map(|b| b.as_str()).collect();
                format!("unknown capital band '{}' (expected one of {})", s, valid.join(", "))
            })
    }
}

/// A lead as written to the remote table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "capital", skip_serializing_if = "Option::is_none", default)]
    pub capital_band: Option<CapitalBand>,
}

impl Lead {
    /// The same lead reduced to the three columns every schema revision knows.
    pub fn baseline(&self) -> Lead {
        Lead {
            capital_band: None,
            ..self.clone()
        }
    }

    pub fn field_count(&self) -> usize {
        3 + usize::from(self.capital_band.is_some())
    }
}

/// Row returned by the store after a successful insert.
///
/// Tables differ in key type (serial or uuid) and timestamp flavour, so both
/// are kept as the store sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub capital: Option<String>,
}

impl LeadRecord {
    /// `created_at` as UTC. A `timestamp` column without zone is read as UTC.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|t| t.and_utc())
            })
    }
}

pub type RecordSet = Vec<LeadRecord>;
