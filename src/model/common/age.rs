use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Minimum age at which a citizen may register to vote.
pub const VOTING_AGE: i32 = 18;

/// Age in whole years on the given day. A birthday later in the year has not
/// happened yet, so it doesn't count.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Age in whole years as of today (UTC).
pub fn age_today(birth_date: NaiveDate) -> i32 {
    age_on(birth_date, Utc::now().date_naive())
}

/// Fixed age ranges used to break down the electorate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "18-25")]
    From18To25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-45")]
    From36To45,
    #[serde(rename = "46-55")]
    From46To55,
    #[serde(rename = "56+")]
    From56,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::From18To25,
        AgeBucket::From26To35,
        AgeBucket::From36To45,
        AgeBucket::From46To55,
        AgeBucket::From56,
    ];

    /// The bucket a given age falls in, if any. Nobody under voting age has one.
    pub fn for_age(age: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.contains(age))
    }

    /// Does this bucket contain the given age? Bounds are inclusive.
    pub fn contains(&self, age: i32) -> bool {
        match self {
            Self::From18To25 => (18..=25).contains(&age),
            Self::From26To35 => (26..=35).contains(&age),
            Self::From36To45 => (36..=45).contains(&age),
            Self::From46To55 => (46..=55).contains(&age),
            Self::From56 => age >= 56,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::From18To25 => "18-25",
            Self::From26To35 => "26-35",
            Self::From36To45 => "36-45",
            Self::From46To55 => "46-55",
            Self::From56 => "56+",
        }
    }
}

impl Display for AgeBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeBucket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == s)
            .ok_or_else(|| ValidationError::AgeRange(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_rounds_down_before_birthday() {
        let birth = date(2000, 6, 15);
        assert_eq!(age_on(birth, date(2018, 6, 14)), 17);
        assert_eq!(age_on(birth, date(2018, 6, 15)), 18);
        assert_eq!(age_on(birth, date(2018, 5, 30)), 17);
        assert_eq!(age_on(birth, date(2018, 7, 1)), 18);
        assert_eq!(age_on(birth, date(2018, 12, 31)), 18);
    }

    #[test]
    fn leap_day_birthdays() {
        let birth = date(2004, 2, 29);
        assert_eq!(age_on(birth, date(2022, 2, 28)), 17);
        assert_eq!(age_on(birth, date(2022, 3, 1)), 18);
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(AgeBucket::for_age(17), None);
        assert_eq!(AgeBucket::for_age(18), Some(AgeBucket::From18To25));
        assert_eq!(AgeBucket::for_age(25), Some(AgeBucket::From18To25));
        assert_eq!(AgeBucket::for_age(26), Some(AgeBucket::From26To35));
        assert_eq!(AgeBucket::for_age(45), Some(AgeBucket::From36To45));
        assert_eq!(AgeBucket::for_age(55), Some(AgeBucket::From46To55));
        assert_eq!(AgeBucket::for_age(56), Some(AgeBucket::From56));
        assert_eq!(AgeBucket::for_age(104), Some(AgeBucket::From56));
    }

    #[test]
    fn parses_range_labels() {
        assert_eq!("56+".parse(), Ok(AgeBucket::From56));
        assert_eq!("26-35".parse(), Ok(AgeBucket::From26To35));
        assert_eq!(
            "18 - 25".parse::<AgeBucket>(),
            Err(ValidationError::AgeRange("18 - 25".to_string()))
        );
        assert_eq!(
            serde_json::to_string(&AgeBucket::From46To55).unwrap(),
            "\"46-55\""
        );
    }
}
