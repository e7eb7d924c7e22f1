use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::modules::auth::application::domain::entities::Sex;
use crate::modules::auth::application::ports::outgoing::ProfileChanges;
use crate::shared::api::FieldErrors;

pub const MAX_WEIGHT_KG: f64 = 500.0;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("valid regex"));

/// 10 to 15 digits with an optional leading `+`.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Raw profile edit. The outer `Option` marks presence, the inner one an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileEdit {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub sex: Option<Option<String>>,
    pub birth_date: Option<Option<String>>,
    pub experience: Option<Option<String>>,
    pub weight: Option<Option<f64>>,
}

impl ProfileEdit {
    /// Checks every present field and turns the edit into repository changes.
    pub fn validate(self) -> Result<ProfileChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut fail = |field: &str, msg: &str| {
            errors
                .entry(field.to_string())
                .or_default()
                .push(msg.to_string());
        };

        let name = self.name.map(|n| n.trim().to_string());
        if name.as_deref() == Some("") {
            fail("name", "Name cannot be empty");
        }
        let surname = self.surname.map(|s| s.trim().to_string());
        if surname.as_deref() == Some("") {
            fail("surname", "Surname cannot be empty");
        }

        let phone_number = self
            .phone_number
            .map(|p| p.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()));
        if let Some(Some(phone)) = &phone_number {
            if !is_valid_phone(phone) {
                fail("phoneNumber", "Invalid phone number");
            }
        }

        let sex = match self.sex {
            Some(Some(raw)) => match raw.parse::<Sex>() {
                Ok(sex) => Some(Some(sex)),
                Err(msg) => {
                    fail("sex", &msg);
                    None
                }
            },
            Some(None) => Some(None),
            None => None,
        };

        let birth_date = match self.birth_date {
            Some(Some(raw)) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(date) => Some(Some(date)),
                Err(_) => {
                    fail("birthDate", "Birth date must be YYYY-MM-DD");
                    None
                }
            },
            Some(None) => Some(None),
            None => None,
        };

        let experience = self
            .experience
            .map(|e| e.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()));

        if let Some(Some(weight)) = self.weight {
            if !(weight > 0.0 && weight < MAX_WEIGHT_KG) {
                fail("weight", "Weight must be between 0 and 500 kg");
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ProfileChanges {
            name,
            surname,
            phone_number,
            sex,
            birth_date,
            experience,
            weight: self.weight,
        })
    }
}
