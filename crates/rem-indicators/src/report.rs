//! Indicators dashboard output.
//!
//! Field names are the JSON keys consumed by the dashboard front end.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use rem_model::{RemError, ReportPeriod};

use crate::distribution::CategoryShare;
use crate::rate::RateResult;
use crate::series::{DualSeriesPoint, SeriesPoint};

pub const DOMAIN_MOTHERS: &str = "madres";
pub const DOMAIN_BIRTHS: &str = "partos";
pub const DOMAIN_NEWBORNS: &str = "recienNacidos";
pub const DOMAIN_NEONATAL_EPISODES: &str = "hospitalizacionesNeonatales";
pub const DOMAIN_MATERNAL_EPISODES: &str = "hospitalizacionesMaternas";
pub const DOMAIN_CONTROLS: &str = "controles";
pub const DOMAIN_ATTENTIONS: &str = "atenciones";
pub const DOMAIN_DISCHARGES: &str = "altas";
pub const RECENT_ACTIVITY: &str = "actividadReciente";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Evolution {
    Single(Vec<SeriesPoint>),
    Dual(Vec<DualSeriesPoint>),
}

impl Default for Evolution {
    fn default() -> Self {
        Evolution::Single(Vec::new())
    }
}

impl Evolution {
    pub fn len(&self) -> usize {
        match self {
            Evolution::Single(points) => points.len(),
            Evolution::Dual(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Indicators for one record domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomainSection {
    pub total: usize,
    #[serde(rename = "porCategoria")]
    pub by_category: Vec<CategoryShare>,
    #[serde(rename = "evolucion")]
    pub evolution: Evolution,
    #[serde(rename = "promedios", skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    /// Averages of individual fields, one decimal. Fields without any
    /// value are left out.
    #[serde(rename = "promediosPorCampo", skip_serializing_if = "BTreeMap::is_empty")]
    pub averages: BTreeMap<String, f64>,
    #[serde(rename = "distribuciones", skip_serializing_if = "BTreeMap::is_empty")]
    pub distributions: BTreeMap<String, Vec<CategoryShare>>,
    #[serde(rename = "tasas", skip_serializing_if = "BTreeMap::is_empty")]
    pub rates: BTreeMap<String, RateResult>,
}

/// Record counts keyed by domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DomainCounts {
    #[serde(rename = "madres")]
    pub mothers: usize,
    #[serde(rename = "partos")]
    pub births: usize,
    #[serde(rename = "recienNacidos")]
    pub newborns: usize,
    #[serde(rename = "hospitalizacionesNeonatales")]
    pub neonatal_episodes: usize,
    #[serde(rename = "hospitalizacionesMaternas")]
    pub maternal_episodes: usize,
    #[serde(rename = "controles")]
    pub controls: usize,
    #[serde(rename = "atenciones")]
    pub attentions: usize,
    #[serde(rename = "altas")]
    pub discharges: usize,
}

impl DomainCounts {
    pub fn sum(&self) -> usize {
        self.mothers
            + self.births
            + self.newborns
            + self.neonatal_episodes
            + self.maternal_episodes
            + self.controls
            + self.attentions
            + self.discharges
    }
}

/// Records created inside the trailing window `(from, to]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentActivity {
    #[serde(rename = "ventanaDias")]
    pub window_days: u32,
    #[serde(rename = "desde")]
    pub from: NaiveDateTime,
    #[serde(rename = "hasta")]
    pub to: NaiveDateTime,
    #[serde(rename = "conteos")]
    pub counts: DomainCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operational {
    #[serde(rename = "totales")]
    pub totals: DomainCounts,
    #[serde(rename = "actividadReciente")]
    pub recent_activity: RecentActivity,
}

/// A section that could not be computed and was left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainFailure {
    #[serde(rename = "dominio")]
    pub domain: String,
    pub error: String,
}

impl DomainFailure {
    pub fn new(domain: impl Into<String>, error: &RemError) -> Self {
        Self {
            domain: domain.into(),
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorsReport {
    #[serde(rename = "periodo")]
    pub period: ReportPeriod,
    #[serde(rename = "partos")]
    pub births: DomainSection,
    #[serde(rename = "recienNacidos")]
    pub newborns: DomainSection,
    #[serde(rename = "hospitalizacionesNeonatales")]
    pub neonatal_episodes: DomainSection,
    #[serde(rename = "hospitalizacionesMaternas")]
    pub maternal_episodes: DomainSection,
    #[serde(rename = "controles")]
    pub controls: DomainSection,
    #[serde(rename = "atenciones")]
    pub attentions: DomainSection,
    #[serde(rename = "altas")]
    pub discharges: DomainSection,
    #[serde(rename = "operacionales")]
    pub operational: Operational,
    #[serde(rename = "fallos")]
    pub failures: Vec<DomainFailure>,
}

impl IndicatorsReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Sections in display order, paired with their domain key.
    pub fn sections(&self) -> [(&'static str, &DomainSection); 7] {
        [
            (DOMAIN_BIRTHS, &self.births),
            (DOMAIN_NEWBORNS, &self.newborns),
            (DOMAIN_NEONATAL_EPISODES, &self.neonatal_episodes),
            (DOMAIN_MATERNAL_EPISODES, &self.maternal_episodes),
            (DOMAIN_CONTROLS, &self.controls),
            (DOMAIN_ATTENTIONS, &self.attentions),
            (DOMAIN_DISCHARGES, &self.discharges),
        ]
    }
}
