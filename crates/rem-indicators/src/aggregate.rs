//! Dashboard assembly across all record domains.
//!
//! Each section is computed on its own. A section that fails (an unreadable
//! timestamp, typically) is replaced by an empty section and listed in
//! `fallos`; the remaining sections are unaffected.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, TimeDelta};
use tracing::{debug, info, info_span, warn};

use rem_model::{
    Attention, Birth, Control, DischargeReport, Episode, Newborn, NullPolicy, RecordSet,
    ReportOptions, Result,
};

use crate::datetime::parse_optional;
use crate::distribution::{BucketDefinition, average, category_breakdown, distribution};
use crate::rate::rate;
use crate::report::{
    DOMAIN_ATTENTIONS, DOMAIN_BIRTHS, DOMAIN_CONTROLS, DOMAIN_DISCHARGES,
    DOMAIN_MATERNAL_EPISODES, DOMAIN_MOTHERS, DOMAIN_NEONATAL_EPISODES, DOMAIN_NEWBORNS,
    DomainCounts, DomainFailure, DomainSection, Evolution, IndicatorsReport, Operational,
    RECENT_ACTIVITY, RecentActivity,
};
use crate::series::{dual_series, series};

const SECONDS_PER_DAY: i64 = 86_400;

/// Build the indicators dashboard for a record snapshot.
///
/// Pure function of its inputs: the recent-activity window is measured from
/// `options.as_of`, never from the system clock.
pub fn build_indicators(records: &RecordSet, options: &ReportOptions) -> IndicatorsReport {
    let span = info_span!("build_indicators", group_by = %options.period.group_by);
    let _guard = span.enter();

    let mut failures = Vec::new();
    let births = settle(
        DOMAIN_BIRTHS,
        births_section(&records.births, options),
        &mut failures,
    );
    let newborns = settle(
        DOMAIN_NEWBORNS,
        newborns_section(&records.newborns, options),
        &mut failures,
    );
    let neonatal_episodes = settle(
        DOMAIN_NEONATAL_EPISODES,
        episodes_section(&records.neonatal_episodes, options),
        &mut failures,
    );
    let maternal_episodes = settle(
        DOMAIN_MATERNAL_EPISODES,
        episodes_section(&records.maternal_episodes, options),
        &mut failures,
    );
    let controls = settle(
        DOMAIN_CONTROLS,
        controls_section(&records.controls, options),
        &mut failures,
    );
    let attentions = settle(
        DOMAIN_ATTENTIONS,
        attentions_section(&records.attentions, options),
        &mut failures,
    );
    let discharges = settle(
        DOMAIN_DISCHARGES,
        discharges_section(&records.discharge_reports, options),
        &mut failures,
    );

    let operational = Operational {
        totals: totals(records),
        recent_activity: recent_activity(records, options, &mut failures),
    };

    info!(
        records = operational.totals.sum(),
        failures = failures.len(),
        "indicators built"
    );

    IndicatorsReport {
        period: options.period.clone(),
        births,
        newborns,
        neonatal_episodes,
        maternal_episodes,
        controls,
        attentions,
        discharges,
        operational,
        failures,
    }
}

/// Keep a built section, or record the failure and fall back to an empty one.
fn settle(
    domain: &'static str,
    result: Result<DomainSection>,
    failures: &mut Vec<DomainFailure>,
) -> DomainSection {
    match result {
        Ok(section) => {
            debug!(domain, total = section.total, "section built");
            section
        }
        Err(error) => {
            let error = error.in_domain(domain);
            warn!(%error, "section left empty");
            failures.push(DomainFailure::new(domain, &error));
            DomainSection::default()
        }
    }
}

fn births_section(births: &[Birth], options: &ReportOptions) -> Result<DomainSection> {
    let policy = options.null_policy;
    let mut distributions = BTreeMap::new();
    distributions.insert(
        "edadGestacional".to_string(),
        distribution(
            births,
            |b| b.gestational_weeks.map(f64::from),
            &BucketDefinition::gestational_age(),
            policy,
        )
        .buckets,
    );
    distributions.insert(
        "edadMaterna".to_string(),
        distribution(
            births,
            |b| b.mother_age.map(f64::from),
            &BucketDefinition::maternal_age(),
            policy,
        )
        .buckets,
    );

    let gestational_weeks = average(births, |b| b.gestational_weeks.map(f64::from), policy);
    let averages = [
        ("edadGestacional", gestational_weeks),
        ("edadMaterna", average(births, |b| b.mother_age.map(f64::from), policy)),
    ]
    .into_iter()
    .filter_map(|(name, value)| Some((name.to_string(), value?)))
    .collect();

    let mut rates = BTreeMap::new();
    rates.insert("acompanamiento".to_string(), rate(births, |b| b.companion));

    Ok(DomainSection {
        total: births.len(),
        by_category: category_breakdown(births, |b| b.birth_type.map(|t| t.as_str())),
        evolution: Evolution::Single(series(
            births,
            "birthAt",
            |b| b.birth_at.as_deref(),
            options.period.group_by,
        )?),
        average: gestational_weeks,
        averages,
        distributions,
        rates,
    })
}

fn newborns_section(newborns: &[Newborn], options: &ReportOptions) -> Result<DomainSection> {
    let policy = options.null_policy;
    let apgar = BucketDefinition::apgar();
    let mut distributions = BTreeMap::new();
    distributions.insert(
        "peso".to_string(),
        distribution(
            newborns,
            |n| n.weight_grams,
            &BucketDefinition::weight(),
            policy,
        )
        .buckets,
    );
    distributions.insert(
        "apgar1".to_string(),
        distribution(newborns, |n| n.apgar1.map(f64::from), &apgar, policy).buckets,
    );
    distributions.insert(
        "apgar5".to_string(),
        distribution(newborns, |n| n.apgar5.map(f64::from), &apgar, policy).buckets,
    );

    let mut rates = BTreeMap::new();
    rates.insert(
        "lactanciaPrimeraHora".to_string(),
        rate(newborns, |n| n.breastfed_first_hour),
    );
    rates.insert(
        "anomaliaCongenita".to_string(),
        rate(newborns, |n| n.congenital_anomaly),
    );

    Ok(DomainSection {
        total: newborns.len(),
        by_category: category_breakdown(newborns, |n| n.sex.as_deref()),
        evolution: Evolution::Single(series(
            newborns,
            "bornAt",
            |n| n.born_at.as_deref(),
            options.period.group_by,
        )?),
        average: average(newborns, |n| n.weight_grams, policy),
        distributions,
        rates,
        ..DomainSection::default()
    })
}

fn episodes_section(episodes: &[Episode], options: &ReportOptions) -> Result<DomainSection> {
    let evolution = dual_series(
        episodes,
        ("admittedAt", "dischargedAt"),
        |e| e.admitted_at.as_deref(),
        |e| e.discharged_at.as_deref(),
        options.period.group_by,
    )?;

    let mut stays = Vec::new();
    for episode in episodes {
        let admitted = parse_optional("admittedAt", episode.admitted_at.as_deref())?;
        let discharged = parse_optional("dischargedAt", episode.discharged_at.as_deref())?;
        if let (Some(admitted), Some(discharged)) = (admitted, discharged) {
            stays.push(stay_length_days(admitted, discharged) as f64);
        }
    }

    Ok(DomainSection {
        total: episodes.len(),
        by_category: category_breakdown(episodes, |e| e.unit.as_deref()),
        evolution: Evolution::Dual(evolution),
        average: average(&stays, |days| Some(*days), NullPolicy::Exclude),
        ..DomainSection::default()
    })
}

fn controls_section(controls: &[Control], options: &ReportOptions) -> Result<DomainSection> {
    Ok(DomainSection {
        total: controls.len(),
        by_category: category_breakdown(controls, |c| c.kind.as_deref()),
        evolution: Evolution::Single(series(
            controls,
            "performedAt",
            |c| c.performed_at.as_deref(),
            options.period.group_by,
        )?),
        ..DomainSection::default()
    })
}

fn attentions_section(attentions: &[Attention], options: &ReportOptions) -> Result<DomainSection> {
    Ok(DomainSection {
        total: attentions.len(),
        by_category: category_breakdown(attentions, |a| a.kind.as_deref()),
        evolution: Evolution::Single(series(
            attentions,
            "attendedAt",
            |a| a.attended_at.as_deref(),
            options.period.group_by,
        )?),
        ..DomainSection::default()
    })
}

fn discharges_section(
    discharges: &[DischargeReport],
    options: &ReportOptions,
) -> Result<DomainSection> {
    let mut rates = BTreeMap::new();
    rates.insert(
        "lactanciaExclusiva".to_string(),
        rate(discharges, |d| d.exclusive_breastfeeding),
    );

    Ok(DomainSection {
        total: discharges.len(),
        by_category: category_breakdown(discharges, |d| d.condition.as_deref()),
        evolution: Evolution::Single(series(
            discharges,
            "dischargedAt",
            |d| d.discharged_at.as_deref(),
            options.period.group_by,
        )?),
        rates,
        ..DomainSection::default()
    })
}

/// Length of stay in whole days, rounded up: `ceil((discharge - admission) / 1 day)`.
pub fn stay_length_days(admitted: NaiveDateTime, discharged: NaiveDateTime) -> i64 {
    let seconds = (discharged - admitted).num_seconds();
    seconds.div_euclid(SECONDS_PER_DAY) + i64::from(seconds.rem_euclid(SECONDS_PER_DAY) != 0)
}

fn totals(records: &RecordSet) -> DomainCounts {
    DomainCounts {
        mothers: records.mothers.len(),
        births: records.births.len(),
        newborns: records.newborns.len(),
        neonatal_episodes: records.neonatal_episodes.len(),
        maternal_episodes: records.maternal_episodes.len(),
        controls: records.controls.len(),
        attentions: records.attentions.len(),
        discharges: records.discharge_reports.len(),
    }
}

fn recent_activity(
    records: &RecordSet,
    options: &ReportOptions,
    failures: &mut Vec<DomainFailure>,
) -> RecentActivity {
    let to = options.as_of;
    let from = window_start(to, options.recent_window_days);
    let window = (from, to);

    let mut count = |domain: &'static str, result: Result<usize>| match result {
        Ok(count) => count,
        Err(error) => {
            let error = error.in_domain(domain);
            warn!(%error, "recent activity count left at zero");
            failures.push(DomainFailure::new(
                format!("{RECENT_ACTIVITY}.{domain}"),
                &error,
            ));
            0
        }
    };

    let counts = DomainCounts {
        mothers: count(
            DOMAIN_MOTHERS,
            created_within(&records.mothers, |r| r.created_at.as_deref(), window),
        ),
        births: count(
            DOMAIN_BIRTHS,
            created_within(&records.births, |r| r.created_at.as_deref(), window),
        ),
        newborns: count(
            DOMAIN_NEWBORNS,
            created_within(&records.newborns, |r| r.created_at.as_deref(), window),
        ),
        neonatal_episodes: count(
            DOMAIN_NEONATAL_EPISODES,
            created_within(&records.neonatal_episodes, |r| r.created_at.as_deref(), window),
        ),
        maternal_episodes: count(
            DOMAIN_MATERNAL_EPISODES,
            created_within(&records.maternal_episodes, |r| r.created_at.as_deref(), window),
        ),
        controls: count(
            DOMAIN_CONTROLS,
            created_within(&records.controls, |r| r.created_at.as_deref(), window),
        ),
        attentions: count(
            DOMAIN_ATTENTIONS,
            created_within(&records.attentions, |r| r.created_at.as_deref(), window),
        ),
        discharges: count(
            DOMAIN_DISCHARGES,
            created_within(&records.discharge_reports, |r| r.created_at.as_deref(), window),
        ),
    };

    RecentActivity {
        window_days: options.recent_window_days,
        from,
        to,
        counts,
    }
}

/// Start of a trailing window of `days` ending at `to`, clamped to the
/// earliest representable instant.
fn window_start(to: NaiveDateTime, days: u32) -> NaiveDateTime {
    TimeDelta::try_days(i64::from(days))
        .and_then(|window| to.checked_sub_signed(window))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Records whose creation timestamp lies in `(from, to]`.
fn created_within<T, F>(
    records: &[T],
    created_at: F,
    (from, to): (NaiveDateTime, NaiveDateTime),
) -> Result<usize>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut count = 0;
    for record in records {
        if let Some(ts) = parse_optional("createdAt", created_at(record))?
            && ts > from
            && ts <= to
        {
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn stay_length_rounds_up() {
        assert_eq!(stay_length_days(at(2025, 1, 5, 0), at(2025, 1, 9, 0)), 4);
        assert_eq!(stay_length_days(at(2025, 1, 5, 10), at(2025, 1, 6, 9)), 1);
        assert_eq!(stay_length_days(at(2025, 1, 5, 10), at(2025, 1, 7, 11)), 3);
        assert_eq!(stay_length_days(at(2025, 1, 5, 10), at(2025, 1, 5, 10)), 0);
    }

    #[test]
    fn oversized_window_clamps_to_earliest_instant() {
        let to = at(2025, 3, 1, 12);
        assert_eq!(window_start(to, 30), at(2025, 1, 30, 12));
        assert_eq!(window_start(to, u32::MAX), NaiveDateTime::MIN);
    }

    #[test]
    fn created_within_is_half_open() {
        let created = [
            Some("2025-03-01T00:00:00"),
            Some("2025-01-30T00:00:00"),
            Some("2025-01-30T00:00:01"),
            None,
        ];
        let window = (at(2025, 1, 30, 0), at(2025, 3, 1, 0));
        assert_eq!(created_within(&created, |c| *c, window).unwrap(), 2);
    }
}
