use async_trait::async_trait;
use chrono::NaiveDate;
use email_address::EmailAddress;

use crate::modules::auth::application::domain::entities::Sex;
use crate::shared::api::FieldErrors;

use super::auth_session::AuthSession;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 64;

/// Raw registration input, validated by [`RegisterUserCommand::new`].
#[derive(Debug, Clone, Default)]
pub struct RegisterUserInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub phone_number: Option<String>,
    pub sex: String,
    pub birth_date: String,
    pub experience: String,
}

#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    email: String,
    password: String,
    name: String,
    surname: String,
    phone_number: Option<String>,
    sex: Sex,
    birth_date: NaiveDate,
    experience: String,
}

impl RegisterUserCommand {
    /// Validates every field and reports all failures at once.
    pub fn new(input: RegisterUserInput) -> Result<Self, RegisterUserError> {
        let mut errors = FieldErrors::new();
        let mut push = |field: &str, msg: &str| {
            errors
                .entry(field.to_string())
                .or_default()
                .push(msg.to_string());
        };

        let email = input.email.trim().to_lowercase();
        if !EmailAddress::is_valid(&email) {
            push("email", "Invalid email format");
        }

        let password_len = input.password.chars().count();
        if password_len < PASSWORD_MIN_LEN {
            push("password", "Password must be at least 8 characters");
        } else if password_len > PASSWORD_MAX_LEN {
            push("password", "Password must be at most 64 characters");
        }

        let name = input.name.trim().to_string();
        if name.is_empty() {
            push("name", "Name is required");
        }
        let surname = input.surname.trim().to_string();
        if surname.is_empty() {
            push("surname", "Surname is required");
        }

        let phone_number = input
            .phone_number
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        if let Some(phone) = &phone_number {
            if !crate::modules::user::application::domain::is_valid_phone(phone) {
                push("phoneNumber", "Invalid phone number");
            }
        }

        let sex = input.sex.parse::<Sex>().map_err(|e| push("sex", &e)).ok();

        let birth_date = NaiveDate::parse_from_str(input.birth_date.trim(), "%Y-%m-%d")
            .map_err(|_| push("birthDate", "Birth date must be YYYY-MM-DD"))
            .ok();

        let experience = input.experience.trim().to_string();
        if experience.is_empty() {
            push("experience", "Experience is required");
        }

        match (sex, birth_date) {
            (Some(sex), Some(birth_date)) if errors.is_empty() => Ok(Self {
                email,
                password: input.password,
                name,
                surname,
                phone_number,
                sex,
                birth_date,
                experience,
            }),
            _ => Err(RegisterUserError::Validation(errors)),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn password(&self) -> &str {
        &self.password
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn surname(&self) -> &str {
        &self.surname
    }
    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }
    pub fn sex(&self) -> Sex {
        self.sex
    }
    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }
    pub fn experience(&self) -> &str {
        &self.experience
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum RegisterUserError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait RegisterUserUseCase: Send + Sync {
    async fn execute(&self, command: RegisterUserCommand)
        -> Result<AuthSession, RegisterUserError>;
}
