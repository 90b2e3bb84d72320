//! Fixed layout of the REM report.
//!
//! Serialized field names are the labels expected by the receiving
//! regulatory system and must not change.

use serde::Serialize;

macro_rules! counter_group {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident => $key:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
        pub struct $name {
            $(
                #[serde(rename = $key)]
                pub $field: usize,
            )+
        }

        impl $name {
            /// Field-wise sum of two tallies.
            #[must_use]
            pub fn merge(self, other: Self) -> Self {
                Self {
                    $($field: self.$field + other.$field,)+
                }
            }
        }
    };
}

counter_group! {
    /// Mother's age at delivery, in completed years.
    MaternalAgeCounts {
        under_15 => "menor15",
        from_15_to_19 => "de15a19",
        from_20_to_34 => "de20a34",
        from_35 => "de35aMas",
        unknown => "sinDato",
    }
}

counter_group! {
    /// Previous deliveries: none, 1 to 4, 5 or more.
    ParityCounts {
        primiparous => "primipara",
        multiparous => "multipara",
        grand_multiparous => "granMultipara",
        unknown => "sinDato",
    }
}

counter_group! {
    /// Completed weeks of gestation.
    GestationalAgeCounts {
        under_28 => "menor28",
        from_28_to_31 => "de28a31",
        from_32_to_36 => "de32a36",
        from_37_to_41 => "de37a41",
        from_42 => "de42aMas",
        unknown => "sinDato",
    }
}

counter_group! {
    PresentationCounts {
        cephalic => "cefalica",
        breech => "podalica",
        transverse => "transversa",
        unknown => "sinDato",
    }
}

counter_group! {
    BirthTypeCounts {
        spontaneous => "normal",
        dystocic => "distocico",
        elective_cesarean => "cesareaElectiva",
        emergency_cesarean => "cesareaUrgencia",
        unknown => "sinDato",
    }
}

counter_group! {
    /// Birth weight in grams.
    WeightCounts {
        under_500 => "menor500",
        from_500_to_999 => "de500a999",
        from_1000_to_1499 => "de1000a1499",
        from_1500_to_1999 => "de1500a1999",
        from_2000_to_2499 => "de2000a2499",
        from_2500_to_2999 => "de2500a2999",
        from_3000_to_3999 => "de3000a3999",
        from_4000 => "de4000aMas",
        unknown => "sinDato",
    }
}

counter_group! {
    /// Newborns by route of delivery.
    RouteCounts {
        vaginal => "vaginal",
        cesarean => "cesarea",
        unknown => "sinDato",
    }
}

counter_group! {
    ApgarCriticalCounts {
        first_minute_critical => "minuto1MenorIgual3",
        fifth_minute_depressed => "minuto5Entre5y6",
    }
}

counter_group! {
    ResuscitationCounts {
        basic => "basica",
        advanced => "avanzada",
    }
}

counter_group! {
    OcularProphylaxis {
        vaginal => "partoVaginal",
        cesarean => "cesarea",
        total => "total",
    }
}

counter_group! {
    /// Vertical-transmission prophylaxis for newborns of HBsAg-positive mothers.
    HepatitisBProphylaxis {
        exposed => "hijosMadreHbsagPositiva",
        vaccinated => "vacunaAplicada",
        immunoglobulin => "inmunoglobulinaAplicada",
        complete => "profilaxisCompleta",
    }
}

counter_group! {
    /// Breastfeeding within the first 60 minutes of life.
    Breastfeeding {
        first_hour => "primeraHora",
        first_hour_2500_or_more => "primeraHoraPeso2500OMas",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BirthCharacteristics {
    #[serde(rename = "totalPartos")]
    pub total: usize,
    #[serde(rename = "edadMaterna")]
    pub maternal_age: MaternalAgeCounts,
    #[serde(rename = "paridad")]
    pub parity: ParityCounts,
    #[serde(rename = "edadGestacional")]
    pub gestational_age: GestationalAgeCounts,
    #[serde(rename = "presentacion")]
    pub presentation: PresentationCounts,
    #[serde(rename = "tipoParto")]
    pub birth_type: BirthTypeCounts,
}

impl BirthCharacteristics {
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            maternal_age: self.maternal_age.merge(other.maternal_age),
            parity: self.parity.merge(other.parity),
            gestational_age: self.gestational_age.merge(other.gestational_age),
            presentation: self.presentation.merge(other.presentation),
            birth_type: self.birth_type.merge(other.birth_type),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LiveBirths {
    pub total: usize,
    #[serde(rename = "pesoAlNacer")]
    pub weight: WeightCounts,
    #[serde(rename = "anomaliasCongenitas")]
    pub congenital_anomalies: usize,
}

impl LiveBirths {
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            total: self.total + other.total,
            weight: self.weight.merge(other.weight),
            congenital_anomalies: self.congenital_anomalies + other.congenital_anomalies,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImmediateCare {
    #[serde(rename = "profilaxisVitaminaK")]
    pub vitamin_k: usize,
    #[serde(rename = "porViaParto")]
    pub by_route: RouteCounts,
    pub apgar: ApgarCriticalCounts,
    #[serde(rename = "reanimacion")]
    pub resuscitation: ResuscitationCounts,
    #[serde(rename = "encefalopatiaSevera")]
    pub severe_encephalopathy: usize,
}

impl ImmediateCare {
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            vitamin_k: self.vitamin_k + other.vitamin_k,
            by_route: self.by_route.merge(other.by_route),
            apgar: self.apgar.merge(other.apgar),
            resuscitation: self.resuscitation.merge(other.resuscitation),
            severe_encephalopathy: self.severe_encephalopathy + other.severe_encephalopathy,
        }
    }
}

/// Every counter of the report, built by folding births with
/// [`RemAccumulator::with_birth`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemAccumulator {
    #[serde(rename = "caracteristicasParto")]
    pub birth_characteristics: BirthCharacteristics,
    #[serde(rename = "recienNacidosVivos")]
    pub live_births: LiveBirths,
    #[serde(rename = "atencionInmediata")]
    pub immediate_care: ImmediateCare,
    #[serde(rename = "profilaxisOcular")]
    pub ocular_prophylaxis: OcularProphylaxis,
    #[serde(rename = "profilaxisHepatitisB")]
    pub hepatitis_b: HepatitisBProphylaxis,
    #[serde(rename = "lactanciaMaterna")]
    pub breastfeeding: Breastfeeding,
}

impl RemAccumulator {
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            birth_characteristics: self
                .birth_characteristics
                .merge(other.birth_characteristics),
            live_births: self.live_births.merge(other.live_births),
            immediate_care: self.immediate_care.merge(other.immediate_care),
            ocular_prophylaxis: self.ocular_prophylaxis.merge(other.ocular_prophylaxis),
            hepatitis_b: self.hepatitis_b.merge(other.hepatitis_b),
            breastfeeding: self.breastfeeding.merge(other.breastfeeding),
        }
    }
}
