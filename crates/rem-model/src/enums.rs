//! Categorical codes carried by maternity records.
//!
//! The string forms are the codes stored by the clinical records system and
//! reused verbatim as category labels in reports.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fetal presentation at delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Presentation {
    #[serde(rename = "cefalica")]
    Cephalic,
    #[serde(rename = "podalica")]
    Breech,
    #[serde(rename = "transversa")]
    Transverse,
}

impl Presentation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Presentation::Cephalic => "cefalica",
            Presentation::Breech => "podalica",
            Presentation::Transverse => "transversa",
        }
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Presentation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cefalica" => Ok(Presentation::Cephalic),
            "podalica" => Ok(Presentation::Breech),
            "transversa" => Ok(Presentation::Transverse),
            _ => Err(format!("Unknown presentation: {s}")),
        }
    }
}

/// Route of delivery, derived from [`BirthType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryRoute {
    Vaginal,
    Cesarea,
}

/// Type of birth as recorded in the delivery room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BirthType {
    /// Spontaneous vaginal delivery.
    #[serde(rename = "normal")]
    Spontaneous,
    /// Vaginal delivery with complications (instrumental or otherwise).
    #[serde(rename = "distocico")]
    Dystocic,
    #[serde(rename = "cesareaElectiva")]
    ElectiveCesarean,
    #[serde(rename = "cesareaUrgencia")]
    EmergencyCesarean,
}

impl BirthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BirthType::Spontaneous => "normal",
            BirthType::Dystocic => "distocico",
            BirthType::ElectiveCesarean => "cesareaElectiva",
            BirthType::EmergencyCesarean => "cesareaUrgencia",
        }
    }

    pub fn route(&self) -> DeliveryRoute {
        match self {
            BirthType::Spontaneous | BirthType::Dystocic => DeliveryRoute::Vaginal,
            BirthType::ElectiveCesarean | BirthType::EmergencyCesarean => DeliveryRoute::Cesarea,
        }
    }
}

impl fmt::Display for BirthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BirthType {
    type Err = String;

    /// Parse a birth type code (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(BirthType::Spontaneous),
            "distocico" => Ok(BirthType::Dystocic),
            "cesareaelectiva" => Ok(BirthType::ElectiveCesarean),
            "cesareaurgencia" => Ok(BirthType::EmergencyCesarean),
            _ => Err(format!("Unknown birth type: {s}")),
        }
    }
}

/// Level of neonatal resuscitation performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resuscitation {
    #[serde(rename = "basica")]
    Basic,
    #[serde(rename = "avanzada")]
    Advanced,
}

impl Resuscitation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resuscitation::Basic => "basica",
            Resuscitation::Advanced => "avanzada",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birth_type_routes() {
        assert_eq!(BirthType::Spontaneous.route(), DeliveryRoute::Vaginal);
        assert_eq!(BirthType::Dystocic.route(), DeliveryRoute::Vaginal);
        assert_eq!(BirthType::ElectiveCesarean.route(), DeliveryRoute::Cesarea);
        assert_eq!(BirthType::EmergencyCesarean.route(), DeliveryRoute::Cesarea);
    }

    #[test]
    fn birth_type_parses_codes() {
        assert_eq!(
            "cesareaUrgencia".parse::<BirthType>(),
            Ok(BirthType::EmergencyCesarean)
        );
        assert_eq!(" NORMAL ".parse::<BirthType>(), Ok(BirthType::Spontaneous));
        assert!("forceps".parse::<BirthType>().is_err());
    }

    #[test]
    fn presentation_round_trips_code() {
        for value in [
            Presentation::Cephalic,
            Presentation::Breech,
            Presentation::Transverse,
        ] {
            assert_eq!(value.as_str().parse::<Presentation>(), Ok(value));
        }
    }
}
