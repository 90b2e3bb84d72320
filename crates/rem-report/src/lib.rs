//! REM regulatory report for births and newborns.
//!
//! - **sections**: the fixed counter layout of the report
//! - **builder**: folds births into those counters
//!
//! Counters only ever grow, so partial reports built over disjoint slices
//! of births can be combined with [`RemAccumulator::merge`].

pub mod builder;
pub mod sections;

pub use builder::{
    APGAR_1_CRITICAL_MAX, APGAR_5_DEPRESSED, BREASTFEEDING_MIN_WEIGHT_GRAMS,
    GRAND_MULTIPARITY_MIN, RegulatoryReport, build_regulatory_report,
};
pub use sections::{
    ApgarCriticalCounts, BirthCharacteristics, BirthTypeCounts, Breastfeeding,
    GestationalAgeCounts, HepatitisBProphylaxis, ImmediateCare, LiveBirths, MaternalAgeCounts,
    OcularProphylaxis, ParityCounts, PresentationCounts, RemAccumulator, ResuscitationCounts,
    RouteCounts, WeightCounts,
};
