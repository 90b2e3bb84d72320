//! Single-pass fold of births and their newborns into the REM counters.
//!
//! Each birth is classified on its own and counters are only ever added
//! to, so the result does not depend on record order and partial results
//! can be combined with [`RemAccumulator::merge`].

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::{debug, info_span, trace};

use rem_indicators::{GESTATIONAL_AGE_BUCKETS, MATERNAL_AGE_BUCKETS, WEIGHT_BUCKETS, bucket_index};
use rem_model::{
    Birth, BirthType, DeliveryRoute, Newborn, Presentation, ReportPeriod, Resuscitation,
};

use crate::sections::{GestationalAgeCounts, MaternalAgeCounts, RemAccumulator, WeightCounts};

/// First-minute Apgar at or below this score is critical.
pub const APGAR_1_CRITICAL_MAX: u8 = 3;

/// Five-minute Apgar scores reported as depressed.
pub const APGAR_5_DEPRESSED: RangeInclusive<u8> = 5..=6;

/// Minimum weight for the early-breastfeeding subgroup, in grams.
pub const BREASTFEEDING_MIN_WEIGHT_GRAMS: f64 = 2500.0;

/// Previous deliveries from which a mother counts as grand multiparous.
pub const GRAND_MULTIPARITY_MIN: u32 = 5;

/// The REM report for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegulatoryReport {
    #[serde(rename = "periodo")]
    pub period: ReportPeriod,
    #[serde(flatten)]
    pub sections: RemAccumulator,
}

/// Fold `births` (with their embedded newborns) into the REM report.
pub fn build_regulatory_report(births: &[Birth], period: &ReportPeriod) -> RegulatoryReport {
    let span = info_span!("build_regulatory_report", births = births.len());
    let _guard = span.enter();

    let sections = births
        .iter()
        .fold(RemAccumulator::default(), RemAccumulator::with_birth);

    debug!(
        births = sections.birth_characteristics.total,
        newborns = sections.live_births.total,
        "regulatory report built"
    );

    RegulatoryReport {
        period: period.clone(),
        sections,
    }
}

impl RemAccumulator {
    /// Count one birth and each of its newborns.
    #[must_use]
    pub fn with_birth(mut self, birth: &Birth) -> Self {
        trace!(birth = %birth.id, newborns = birth.newborns.len(), "folding birth");
        self.count_birth(birth);
        let route = birth.birth_type.map(|t| t.route());
        for newborn in &birth.newborns {
            self.count_newborn(newborn, route);
        }
        self
    }

    fn count_birth(&mut self, birth: &Birth) {
        let counts = &mut self.birth_characteristics;
        counts.total += 1;

        *counts.maternal_age.bracket(
            birth
                .mother_age
                .and_then(|years| bucket_index(f64::from(years), MATERNAL_AGE_BUCKETS)),
        ) += 1;

        let parity = &mut counts.parity;
        *match birth.parity {
            Some(0) => &mut parity.primiparous,
            Some(n) if n < GRAND_MULTIPARITY_MIN => &mut parity.multiparous,
            Some(_) => &mut parity.grand_multiparous,
            None => &mut parity.unknown,
        } += 1;

        *counts.gestational_age.bracket(
            birth
                .gestational_weeks
                .and_then(|weeks| bucket_index(f64::from(weeks), GESTATIONAL_AGE_BUCKETS)),
        ) += 1;

        let presentation = &mut counts.presentation;
        *match birth.presentation {
            Some(Presentation::Cephalic) => &mut presentation.cephalic,
            Some(Presentation::Breech) => &mut presentation.breech,
            Some(Presentation::Transverse) => &mut presentation.transverse,
            None => &mut presentation.unknown,
        } += 1;

        let types = &mut counts.birth_type;
        *match birth.birth_type {
            Some(BirthType::Spontaneous) => &mut types.spontaneous,
            Some(BirthType::Dystocic) => &mut types.dystocic,
            Some(BirthType::ElectiveCesarean) => &mut types.elective_cesarean,
            Some(BirthType::EmergencyCesarean) => &mut types.emergency_cesarean,
            None => &mut types.unknown,
        } += 1;
    }

    fn count_newborn(&mut self, newborn: &Newborn, route: Option<DeliveryRoute>) {
        let live = &mut self.live_births;
        live.total += 1;
        *live.weight.bracket(
            newborn
                .weight_grams
                .and_then(|grams| bucket_index(grams, WEIGHT_BUCKETS)),
        ) += 1;
        if newborn.congenital_anomaly == Some(true) {
            live.congenital_anomalies += 1;
        }

        let care = &mut self.immediate_care;
        if newborn.vitamin_k == Some(true) {
            care.vitamin_k += 1;
        }
        *match route {
            Some(DeliveryRoute::Vaginal) => &mut care.by_route.vaginal,
            Some(DeliveryRoute::Cesarea) => &mut care.by_route.cesarean,
            None => &mut care.by_route.unknown,
        } += 1;
        if newborn.apgar1.is_some_and(|score| score <= APGAR_1_CRITICAL_MAX) {
            care.apgar.first_minute_critical += 1;
        }
        if newborn
            .apgar5
            .is_some_and(|score| APGAR_5_DEPRESSED.contains(&score))
        {
            care.apgar.fifth_minute_depressed += 1;
        }
        match newborn.resuscitation {
            Some(Resuscitation::Basic) => care.resuscitation.basic += 1,
            Some(Resuscitation::Advanced) => care.resuscitation.advanced += 1,
            None => {}
        }
        if newborn.severe_encephalopathy == Some(true) {
            care.severe_encephalopathy += 1;
        }

        if newborn.ocular_prophylaxis == Some(true) {
            let ocular = &mut self.ocular_prophylaxis;
            ocular.total += 1;
            match route {
                Some(DeliveryRoute::Vaginal) => ocular.vaginal += 1,
                Some(DeliveryRoute::Cesarea) => ocular.cesarean += 1,
                None => {}
            }
        }

        if newborn.mother_hbsag_positive == Some(true) {
            let hepatitis = &mut self.hepatitis_b;
            let vaccinated = newborn.hepatitis_b_vaccine == Some(true);
            let immunoglobulin = newborn.hepatitis_b_immunoglobulin == Some(true);
            hepatitis.exposed += 1;
            hepatitis.vaccinated += usize::from(vaccinated);
            hepatitis.immunoglobulin += usize::from(immunoglobulin);
            hepatitis.complete += usize::from(vaccinated && immunoglobulin);
        }

        if newborn.breastfed_first_hour == Some(true) {
            let breastfeeding = &mut self.breastfeeding;
            breastfeeding.first_hour += 1;
            if newborn
                .weight_grams
                .is_some_and(|grams| grams >= BREASTFEEDING_MIN_WEIGHT_GRAMS)
            {
                breastfeeding.first_hour_2500_or_more += 1;
            }
        }
    }
}

// Bracket counters are addressed by position in the shared reference tables.
const _: () = assert!(MATERNAL_AGE_BUCKETS.len() == 4);
const _: () = assert!(GESTATIONAL_AGE_BUCKETS.len() == 5);
const _: () = assert!(WEIGHT_BUCKETS.len() == 8);

impl MaternalAgeCounts {
    fn bracket(&mut self, index: Option<usize>) -> &mut usize {
        match index {
            Some(0) => &mut self.under_15,
            Some(1) => &mut self.from_15_to_19,
            Some(2) => &mut self.from_20_to_34,
            Some(3) => &mut self.from_35,
            _ => &mut self.unknown,
        }
    }
}

impl GestationalAgeCounts {
    fn bracket(&mut self, index: Option<usize>) -> &mut usize {
        match index {
            Some(0) => &mut self.under_28,
            Some(1) => &mut self.from_28_to_31,
            Some(2) => &mut self.from_32_to_36,
            Some(3) => &mut self.from_37_to_41,
            Some(4) => &mut self.from_42,
            _ => &mut self.unknown,
        }
    }
}

impl WeightCounts {
    fn bracket(&mut self, index: Option<usize>) -> &mut usize {
        match index {
            Some(0) => &mut self.under_500,
            Some(1) => &mut self.from_500_to_999,
            Some(2) => &mut self.from_1000_to_1499,
            Some(3) => &mut self.from_1500_to_1999,
            Some(4) => &mut self.from_2000_to_2499,
            Some(5) => &mut self.from_2500_to_2999,
            Some(6) => &mut self.from_3000_to_3999,
            Some(7) => &mut self.from_4000,
            _ => &mut self.unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newborn(apgar1: u8, apgar5: u8) -> Newborn {
        Newborn {
            id: "RN".to_string(),
            apgar1: Some(apgar1),
            apgar5: Some(apgar5),
            ..Default::default()
        }
    }

    fn fold(newborns: Vec<Newborn>) -> RemAccumulator {
        let birth = Birth {
            id: "P".to_string(),
            birth_type: Some(BirthType::Spontaneous),
            newborns,
            ..Default::default()
        };
        RemAccumulator::default().with_birth(&birth)
    }

    #[test]
    fn apgar_critical_thresholds() {
        let acc = fold(vec![
            newborn(3, 7),
            newborn(4, 6),
            newborn(2, 5),
            newborn(8, 4),
            newborn(9, 9),
        ]);
        assert_eq!(acc.immediate_care.apgar.first_minute_critical, 2);
        assert_eq!(acc.immediate_care.apgar.fifth_minute_depressed, 2);
    }

    fn fold_births(births: impl IntoIterator<Item = Birth>) -> RemAccumulator {
        births
            .into_iter()
            .fold(RemAccumulator::default(), |acc, birth| acc.with_birth(&birth))
    }

    #[test]
    fn bracket_boundaries_follow_reference_tables() {
        let acc = fold_births([14, 15, 19, 20, 34, 35].map(|age| Birth {
            id: "P".to_string(),
            mother_age: Some(age),
            gestational_weeks: Some(age + 8),
            ..Default::default()
        }));
        let age = acc.birth_characteristics.maternal_age;
        assert_eq!(
            (age.under_15, age.from_15_to_19, age.from_20_to_34, age.from_35, age.unknown),
            (1, 2, 2, 1, 0)
        );
        // Weeks 22, 23, 27, 28, 42, 43.
        let weeks = acc.birth_characteristics.gestational_age;
        assert_eq!(
            (weeks.under_28, weeks.from_28_to_31, weeks.from_42, weeks.unknown),
            (3, 1, 2, 0)
        );

        let weights = [499.9, 500.0, 1499.0, 1500.0, 2499.0, 2500.0, 3999.0, 4000.0, -1.0];
        let acc = fold(
            weights
                .iter()
                .map(|&grams| Newborn {
                    id: "RN".to_string(),
                    weight_grams: Some(grams),
                    ..Default::default()
                })
                .collect(),
        );
        let weight = acc.live_births.weight;
        assert_eq!(weight.under_500, 1);
        assert_eq!(weight.from_500_to_999, 1);
        assert_eq!(weight.from_1000_to_1499, 1);
        assert_eq!(weight.from_1500_to_1999, 1);
        assert_eq!(weight.from_2000_to_2499, 1);
        assert_eq!(weight.from_2500_to_2999, 1);
        assert_eq!(weight.from_3000_to_3999, 1);
        assert_eq!(weight.from_4000, 1);
        assert_eq!(weight.unknown, 1);
    }

    #[test]
    fn parity_brackets() {
        let parities = [Some(0), Some(1), Some(4), Some(5), Some(9), None];
        let acc = parities.iter().fold(RemAccumulator::default(), |acc, &parity| {
            acc.with_birth(&Birth {
                id: "P".to_string(),
                parity,
                ..Default::default()
            })
        });
        let counts = acc.birth_characteristics.parity;
        assert_eq!(counts.primiparous, 1);
        assert_eq!(counts.multiparous, 2);
        assert_eq!(counts.grand_multiparous, 2);
        assert_eq!(counts.unknown, 1);
    }

    #[test]
    fn birth_without_newborns_only_counts_birth() {
        let acc = fold(Vec::new());
        assert_eq!(acc.birth_characteristics.total, 1);
        assert_eq!(acc.birth_characteristics.birth_type.spontaneous, 1);
        assert_eq!(acc.live_births.total, 0);
    }

    #[test]
    fn hepatitis_b_only_counts_exposed_newborns() {
        let exposed = Newborn {
            id: "RN-1".to_string(),
            mother_hbsag_positive: Some(true),
            hepatitis_b_vaccine: Some(true),
            hepatitis_b_immunoglobulin: Some(true),
            ..Default::default()
        };
        let partial = Newborn {
            id: "RN-2".to_string(),
            mother_hbsag_positive: Some(true),
            hepatitis_b_vaccine: Some(true),
            ..Default::default()
        };
        let unexposed = Newborn {
            id: "RN-3".to_string(),
            hepatitis_b_vaccine: Some(true),
            ..Default::default()
        };
        let acc = fold(vec![exposed, partial, unexposed]);
        assert_eq!(acc.hepatitis_b.exposed, 2);
        assert_eq!(acc.hepatitis_b.vaccinated, 2);
        assert_eq!(acc.hepatitis_b.immunoglobulin, 1);
        assert_eq!(acc.hepatitis_b.complete, 1);
    }
}
