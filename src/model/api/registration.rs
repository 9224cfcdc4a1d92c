use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::model::common::{age_on, Gender, Municipality, VoterId, VOTING_AGE};
use crate::model::db::{hash_password, Voter, VoterCore};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// A registration form, exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterProfile {
    pub first_name: String,
    pub last_name: String,
    pub cedula: String,
    pub email: String,
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    pub gender: String,
    pub municipality: String,
    pub password: String,
    pub password_confirmation: String,
}

impl VoterProfile {
    /// Check every field, in form order, as of the given day.
    pub fn validate(&self, today: NaiveDate) -> std::result::Result<NewVoter, ValidationError> {
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("cedula", &self.cedula),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Blank(field));
            }
        }

        if !email_regex().is_match(&self.email) {
            return Err(ValidationError::Email(self.email.clone()));
        }

        let birth_date = NaiveDate::parse_from_str(&self.birth_date, "%Y-%m-%d")
            .map_err(|_| ValidationError::BirthDate(self.birth_date.clone()))?;
        let age = age_on(birth_date, today);
        if age < VOTING_AGE {
            return Err(ValidationError::Underage(age));
        }

        let gender = self.gender.parse::<Gender>()?;
        let municipality = self.municipality.parse::<Municipality>()?;

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        if self.password != self.password_confirmation {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(NewVoter {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            cedula: self.cedula.clone(),
            email: self.email.clone(),
            birth_date,
            gender,
            municipality,
            password: self.password.clone(),
        })
    }
}

/// A validated registration, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoter {
    pub first_name: String,
    pub last_name: String,
    pub cedula: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub municipality: Municipality,
    password: String, // Only ever leaves as a hash.
}

impl NewVoter {
    /// Hash the password and build the stored voter.
    pub fn into_voter(self, id: VoterId, now: DateTime<Utc>) -> Result<Voter> {
        Ok(Voter {
            id,
            voter: VoterCore {
                password_hash: hash_password(&self.password)?,
                first_name: self.first_name,
                last_name: self.last_name,
                cedula: self.cedula,
                email: self.email,
                birth_date: self.birth_date,
                gender: self.gender,
                municipality: self.municipality,
                has_voted: false,
                created_at: now,
                updated_at: now,
            },
        })
    }
}

#[cfg(test)]
mod examples {
    use chrono::Datelike;

    use super::*;

    /// A birth date on which someone is exactly `age` today.
    pub fn born_years_ago(age: i32) -> String {
        format!("{}-01-01", Utc::now().year() - age)
    }

    impl VoterProfile {
        pub const EXAMPLE_CEDULA: &'static str = "1001";
        pub const EXAMPLE_PASSWORD: &'static str = "contraseña segura";

        /// A 30 year old woman from Cali.
        pub fn example() -> Self {
            Self {
                first_name: "Ana".to_string(),
                last_name: "Gómez".to_string(),
                cedula: Self::EXAMPLE_CEDULA.to_string(),
                email: "ana.gomez@example.com".to_string(),
                birth_date: born_years_ago(30),
                gender: "femenino".to_string(),
                municipality: "cali".to_string(),
                password: Self::EXAMPLE_PASSWORD.to_string(),
                password_confirmation: Self::EXAMPLE_PASSWORD.to_string(),
            }
        }

        /// A 50 year old man from Medellín.
        pub fn example2() -> Self {
            Self {
                first_name: "Luis".to_string(),
                last_name: "Restrepo".to_string(),
                cedula: "2002".to_string(),
                email: "luis.restrepo@example.com".to_string(),
                birth_date: born_years_ago(50),
                gender: "masculino".to_string(),
                municipality: "medellin".to_string(),
                password: "otra contraseña".to_string(),
                password_confirmation: "otra contraseña".to_string(),
            }
        }

        /// A 22 year old from Bogotá.
        pub fn example3() -> Self {
            Self {
                first_name: "Sam".to_string(),
                last_name: "Ortiz".to_string(),
                cedula: "3003".to_string(),
                email: "sam.ortiz@example.com".to_string(),
                birth_date: born_years_ago(22),
                gender: "otro".to_string(),
                municipality: "bogota".to_string(),
                password: "tercera contraseña".to_string(),
                password_confirmation: "tercera contraseña".to_string(),
            }
        }

        /// The example voter, aged `age` today.
        pub fn example_aged(age: i32) -> Self {
            Self {
                birth_date: born_years_ago(age),
                ..Self::example()
            }
        }
    }
}
