//! Record types and reporting options for maternity indicators.
//!
//! - **records**: plain records supplied by the persistence layer
//! - **enums**: categorical codes (presentation, birth type, resuscitation)
//! - **options**: reporting period, grouping and null-handling policy
//! - **error**: error taxonomy shared by the report builders

pub mod enums;
pub mod error;
pub mod options;
pub mod records;

pub use enums::{BirthType, DeliveryRoute, Presentation, Resuscitation};
pub use error::{RemError, Result};
pub use options::{
    DEFAULT_RECENT_WINDOW_DAYS, Granularity, NullPolicy, ReportOptions, ReportPeriod,
};
pub use records::{
    Attention, Birth, Control, DischargeReport, Episode, Mother, Newborn, RecordSet,
};
