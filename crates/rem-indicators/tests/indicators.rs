//! Tests for the indicators dashboard.

use chrono::{NaiveDate, NaiveDateTime};
use rem_indicators::{Evolution, build_indicators};
use rem_model::{
    BirthType, Birth, Control, DischargeReport, Episode, Granularity, Mother, Newborn,
    RecordSet, ReportOptions, ReportPeriod,
};

fn as_of() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn options(group_by: Granularity) -> ReportOptions {
    ReportOptions::new(ReportPeriod::new(group_by), as_of())
}

fn birth(id: &str, at: &str, birth_type: BirthType, weeks: u32) -> Birth {
    Birth {
        id: id.to_string(),
        birth_at: Some(at.to_string()),
        created_at: Some(at.to_string()),
        birth_type: Some(birth_type),
        gestational_weeks: Some(weeks),
        mother_age: Some(28),
        companion: Some(true),
        ..Default::default()
    }
}

fn newborn(id: &str, weight: f64, apgar1: u8) -> Newborn {
    Newborn {
        id: id.to_string(),
        born_at: Some("2025-02-10T04:00:00".to_string()),
        created_at: Some("2025-02-10T05:00:00".to_string()),
        sex: Some("F".to_string()),
        weight_grams: Some(weight),
        apgar1: Some(apgar1),
        breastfed_first_hour: Some(true),
        ..Default::default()
    }
}

fn episode(id: &str, admitted: &str, discharged: Option<&str>) -> Episode {
    Episode {
        id: id.to_string(),
        unit: Some("uci".to_string()),
        admitted_at: Some(admitted.to_string()),
        discharged_at: discharged.map(str::to_string),
        created_at: Some(admitted.to_string()),
    }
}

fn sample_records() -> RecordSet {
    RecordSet {
        mothers: vec![Mother {
            id: "M-1".to_string(),
            age: Some(28),
            created_at: Some("2024-12-01".to_string()),
        }],
        births: vec![
            birth("P-1", "2025-01-05T10:00:00", BirthType::Spontaneous, 39),
            birth("P-2", "2025-02-10T03:00:00", BirthType::EmergencyCesarean, 34),
            birth("P-3", "2025-02-20T08:00:00", BirthType::Spontaneous, 40),
        ],
        newborns: vec![newborn("RN-1", 3200.0, 9), newborn("RN-2", 2100.0, 5)],
        neonatal_episodes: vec![
            episode("E-1", "2025-01-30T10:00:00", Some("2025-02-02T09:00:00")),
            episode("E-2", "2025-02-05T10:00:00", None),
        ],
        controls: vec![Control {
            id: "C-1".to_string(),
            kind: Some("prenatal".to_string()),
            performed_at: Some("2025-02-15".to_string()),
            created_at: Some("2025-02-15".to_string()),
        }],
        discharge_reports: vec![DischargeReport {
            id: "A-1".to_string(),
            condition: Some("vivo".to_string()),
            discharged_at: Some("2025-02-03".to_string()),
            exclusive_breastfeeding: Some(false),
            created_at: Some("2025-02-03".to_string()),
        }],
        ..Default::default()
    }
}

#[test]
fn births_section_counts_and_evolution() {
    let report = build_indicators(&sample_records(), &options(Granularity::Month));

    assert_eq!(report.births.total, 3);
    assert_eq!(report.births.by_category[0].label, "normal");
    assert_eq!(report.births.by_category[0].count, 2);
    assert_eq!(report.births.by_category[0].percentage, 67);
    assert_eq!(report.births.average, Some(37.7));
    match &report.births.evolution {
        Evolution::Single(points) => {
            let keys: Vec<_> = points.iter().map(|p| (p.period_key.as_str(), p.count)).collect();
            assert_eq!(keys, vec![("2025-01", 1), ("2025-02", 2)]);
        }
        other => panic!("expected single series, got {other:?}"),
    }
    assert_eq!(report.births.rates["acompanamiento"].rate, "100.0");
}

#[test]
fn births_section_averages_maternal_and_gestational_age() {
    let mut records = sample_records();
    records.births[0].mother_age = None;
    records.births[2].mother_age = Some(35);

    let report = build_indicators(&records, &options(Granularity::Month));

    // Missing ages are excluded: (28 + 35) / 2.
    assert_eq!(report.births.averages["edadMaterna"], 31.5);
    assert_eq!(report.births.averages["edadGestacional"], 37.7);
    assert_eq!(report.births.average, Some(37.7));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["partos"]["promediosPorCampo"]["edadMaterna"], 31.5);
    assert!(json["controles"].get("promediosPorCampo").is_none());
}

#[test]
fn newborn_distributions_use_reference_buckets() {
    let report = build_indicators(&sample_records(), &options(Granularity::Month));
    let weights = &report.newborns.distributions["peso"];
    assert_eq!(weights.len(), 8);
    let populated: Vec<_> = weights
        .iter()
        .filter(|b| b.count > 0)
        .map(|b| b.label.as_str())
        .collect();
    assert_eq!(populated, vec!["2000-2499", "3000-3999"]);

    let apgar1 = &report.newborns.distributions["apgar1"];
    assert_eq!(apgar1[0].label, "low");
    assert_eq!(apgar1[0].count, 1);
    assert_eq!(report.newborns.average, Some(2650.0));
}

#[test]
fn episodes_use_dual_series_and_mean_stay() {
    let report = build_indicators(&sample_records(), &options(Granularity::Month));
    let section = &report.neonatal_episodes;

    // 2025-01-30T10:00 -> 2025-02-02T09:00 is 2 days 23 hours: 3 days.
    assert_eq!(section.average, Some(3.0));
    match &section.evolution {
        Evolution::Dual(points) => {
            let keys: Vec<_> = points
                .iter()
                .map(|p| (p.period_key.as_str(), p.started, p.ended))
                .collect();
            assert_eq!(keys, vec![("2025-01", 1, 0), ("2025-02", 1, 1)]);
        }
        other => panic!("expected dual series, got {other:?}"),
    }
    assert!(report.maternal_episodes.evolution.is_empty());
    assert_eq!(report.maternal_episodes.average, None);
}

#[test]
fn recent_activity_uses_creation_timestamps() {
    let report = build_indicators(&sample_records(), &options(Granularity::Day));
    let recent = &report.operational.recent_activity;

    assert_eq!(recent.window_days, 30);
    // Window is (2025-01-30T12:00, 2025-03-01T12:00].
    assert_eq!(recent.counts.births, 2);
    assert_eq!(recent.counts.newborns, 2);
    assert_eq!(recent.counts.mothers, 0);
    assert_eq!(recent.counts.neonatal_episodes, 1);
    assert_eq!(recent.counts.controls, 1);
    assert_eq!(recent.counts.discharges, 1);

    assert_eq!(report.operational.totals.births, 3);
    assert_eq!(report.operational.totals.sum(), 10);
}

#[test]
fn failing_domain_does_not_abort_others() {
    let mut records = sample_records();
    records.births[1].birth_at = Some("10/02/2025".to_string());

    let report = build_indicators(&records, &options(Granularity::Month));

    assert_eq!(report.births.total, 0);
    assert!(report.births.evolution.is_empty());
    assert_eq!(report.newborns.total, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].domain, "partos");
    assert!(report.failures[0].error.contains("birthAt"));
    assert!(report.has_failures());
}

#[test]
fn unreadable_creation_timestamp_is_reported() {
    let mut records = sample_records();
    records.controls[0].created_at = Some("ayer".to_string());

    let report = build_indicators(&records, &options(Granularity::Month));

    assert_eq!(report.controls.total, 1);
    assert_eq!(report.operational.recent_activity.counts.controls, 0);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].domain, "actividadReciente.controles");
}

#[test]
fn empty_records_yield_zeroed_report() {
    let report = build_indicators(&RecordSet::default(), &options(Granularity::Week));

    for (_, section) in report.sections() {
        assert_eq!(section.total, 0);
        assert!(section.by_category.is_empty());
        assert!(section.evolution.is_empty());
        assert_eq!(section.average, None);
        assert!(section.averages.is_empty());
    }
    assert_eq!(report.births.rates["acompanamiento"].rate, "0.0");
    assert_eq!(report.operational.totals.sum(), 0);
    assert!(!report.has_failures());
}

#[test]
fn oversized_recent_window_does_not_panic() {
    let options = options(Granularity::Month).with_recent_window_days(u32::MAX);
    let report = build_indicators(&sample_records(), &options);

    let recent = &report.operational.recent_activity;
    assert_eq!(recent.window_days, u32::MAX);
    assert_eq!(recent.from, NaiveDateTime::MIN);
    assert_eq!(recent.counts.births, 3);
    assert!(!report.has_failures());

    let empty = build_indicators(&RecordSet::default(), &options);
    assert_eq!(empty.operational.recent_activity.counts.sum(), 0);
}

#[test]
fn building_twice_is_identical() {
    let records = sample_records();
    let options = options(Granularity::Week);
    let first = serde_json::to_string(&build_indicators(&records, &options)).unwrap();
    let second = serde_json::to_string(&build_indicators(&records, &options)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn serialized_keys_match_dashboard_contract() {
    let report = build_indicators(&sample_records(), &options(Granularity::Month));
    let json = serde_json::to_value(&report).unwrap();

    let births = &json["partos"];
    assert!(births["porCategoria"][0]["cantidad"].is_number());
    assert!(births["porCategoria"][0]["porcentaje"].is_number());
    assert_eq!(births["evolucion"][0]["periodKey"], "2025-01");
    assert_eq!(births["evolucion"][0]["cantidad"], 1);
    assert_eq!(json["hospitalizacionesNeonatales"]["evolucion"][0]["started"], 1);
    assert!(json["controles"].get("promedios").is_none());
    assert_eq!(json["operacionales"]["actividadReciente"]["ventanaDias"], 30);
    assert_eq!(json["periodo"]["groupBy"], "month");
    assert!(json["fallos"].as_array().unwrap().is_empty());
}
