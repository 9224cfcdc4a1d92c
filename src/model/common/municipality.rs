use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Municipalities where voters can be registered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Municipality {
    Bogota,
    Medellin,
    Cali,
    Barranquilla,
}

impl Municipality {
    pub const ALL: [Municipality; 4] = [
        Municipality::Bogota,
        Municipality::Medellin,
        Municipality::Cali,
        Municipality::Barranquilla,
    ];

    /// The stored and accepted textual form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bogota => "bogota",
            Self::Medellin => "medellin",
            Self::Cali => "cali",
            Self::Barranquilla => "barranquilla",
        }
    }
}

impl Display for Municipality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Municipality {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|municipality| municipality.as_str() == s)
            .ok_or_else(|| ValidationError::Municipality(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::common::Gender;

    #[test]
    fn textual_forms_agree_with_serde() {
        for municipality in Municipality::ALL {
            let json = serde_json::to_string(&municipality).unwrap();
            assert_eq!(json, format!("\"{municipality}\""));
            assert_eq!(municipality.as_str().parse::<Municipality>(), Ok(municipality));
        }
        for gender in Gender::ALL {
            let json = serde_json::to_string(&gender).unwrap();
            assert_eq!(json, format!("\"{gender}\""));
            assert_eq!(gender.as_str().parse::<Gender>(), Ok(gender));
        }
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert_eq!(
            "Bogotá".parse::<Municipality>(),
            Err(ValidationError::Municipality("Bogotá".to_string()))
        );
        assert_eq!(
            "".parse::<Gender>(),
            Err(ValidationError::Gender(String::new()))
        );
    }
}
