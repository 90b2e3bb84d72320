//! Plain records supplied by the persistence layer.
//!
//! Records arrive already filtered by permission and reporting period.
//! Timestamps are kept as the raw strings the store produced; the engine
//! parses them when it needs a calendar position, so an unreadable value
//! surfaces as [`crate::RemError::InvalidInput`] instead of being dropped at
//! load time.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::{BirthType, Presentation, Resuscitation};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mother {
    pub id: String,
    pub age: Option<u32>,
    pub created_at: Option<String>,
}

/// A delivery, with the newborns it produced embedded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Birth {
    pub id: String,
    pub mother_id: Option<String>,
    pub birth_at: Option<String>,
    pub created_at: Option<String>,
    /// Mother's age in completed years at delivery.
    pub mother_age: Option<u32>,
    /// Number of previous deliveries.
    pub parity: Option<u32>,
    pub gestational_weeks: Option<u32>,
    pub presentation: Option<Presentation>,
    pub birth_type: Option<BirthType>,
    /// Whether the mother had a companion during labour.
    pub companion: Option<bool>,
    #[serde(default)]
    pub newborns: Vec<Newborn>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Newborn {
    pub id: String,
    pub born_at: Option<String>,
    pub created_at: Option<String>,
    pub sex: Option<String>,
    pub weight_grams: Option<f64>,
    pub apgar1: Option<u8>,
    pub apgar5: Option<u8>,
    pub congenital_anomaly: Option<bool>,
    pub vitamin_k: Option<bool>,
    pub ocular_prophylaxis: Option<bool>,
    pub resuscitation: Option<Resuscitation>,
    pub severe_encephalopathy: Option<bool>,
    pub mother_hbsag_positive: Option<bool>,
    pub hepatitis_b_vaccine: Option<bool>,
    pub hepatitis_b_immunoglobulin: Option<bool>,
    /// Breastfed within the first 60 minutes of life.
    pub breastfed_first_hour: Option<bool>,
}

/// An admission episode, either maternal or in the neonatal unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub unit: Option<String>,
    pub admitted_at: Option<String>,
    pub discharged_at: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    pub id: String,
    pub kind: Option<String>,
    pub performed_at: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attention {
    pub id: String,
    pub kind: Option<String>,
    pub attended_at: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DischargeReport {
    pub id: String,
    pub condition: Option<String>,
    pub discharged_at: Option<String>,
    pub exclusive_breastfeeding: Option<bool>,
    pub created_at: Option<String>,
}

/// Every record domain the engine reads, as one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordSet {
    pub mothers: Vec<Mother>,
    pub births: Vec<Birth>,
    pub newborns: Vec<Newborn>,
    pub neonatal_episodes: Vec<Episode>,
    pub maternal_episodes: Vec<Episode>,
    pub controls: Vec<Control>,
    pub attentions: Vec<Attention>,
    pub discharge_reports: Vec<DischargeReport>,
}

impl RecordSet {
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a record set from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn is_empty(&self) -> bool {
        self.mothers.is_empty()
            && self.births.is_empty()
            && self.newborns.is_empty()
            && self.neonatal_episodes.is_empty()
            && self.maternal_episodes.is_empty()
            && self.controls.is_empty()
            && self.attentions.is_empty()
            && self.discharge_reports.is_empty()
    }
}
