use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tracing::{info, info_span};

use rem_indicators::datetime::parse_timestamp;
use rem_indicators::{IndicatorsReport, build_indicators};
use rem_model::{Granularity, RecordSet, ReportOptions};
use rem_report::{RegulatoryReport, build_regulatory_report};

use crate::cli::{IndicatorsArgs, RemArgs};

pub fn load_records(path: &Path) -> Result<RecordSet> {
    let records = RecordSet::from_path(path)
        .with_context(|| format!("load record set from {}", path.display()))?;
    info!(
        births = records.births.len(),
        newborns = records.newborns.len(),
        neonatal_episodes = records.neonatal_episodes.len(),
        maternal_episodes = records.maternal_episodes.len(),
        "record set loaded"
    );
    Ok(records)
}

/// Reference instant from `--as-of`, or the local clock.
pub fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDateTime> {
    match as_of {
        Some(value) => parse_timestamp("asOf", value).context("parse --as-of"),
        None => Ok(Local::now().naive_local()),
    }
}

pub fn run_indicators(args: &IndicatorsArgs) -> Result<IndicatorsReport> {
    let span = info_span!("indicators", file = %args.records.display());
    let _guard = span.enter();

    let records = load_records(&args.records)?;
    let period = args.period.to_period(args.group_by.into());
    let mut options = ReportOptions::new(period, resolve_as_of(args.as_of.as_deref())?);
    if let Some(days) = args.recent_days {
        options = options.with_recent_window_days(days);
    }

    Ok(build_indicators(&records, &options))
}

pub fn run_rem(args: &RemArgs) -> Result<RegulatoryReport> {
    let span = info_span!("rem", file = %args.records.display());
    let _guard = span.enter();

    let records = load_records(&args.records)?;
    let period = args.period.to_period(Granularity::default());
    let report = build_regulatory_report(&records.births, &period);
    info!(
        births = report.sections.birth_characteristics.total,
        newborns = report.sections.live_births.total,
        "rem report built"
    );
    Ok(report)
}

pub fn print_json<T: serde::Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    println!("{json}");
    Ok(())
}
