use std::env;

use crate::config::{parsed, required, ConfigError};

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub access_token_expiry: i64,  // seconds
    pub refresh_token_expiry: i64, // seconds
    pub reset_token_expiry: i64,   // seconds
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret_key = required("JWT_SECRET")?;

        // HS256 needs at least 32 bytes of key material
        if secret_key.len() < 32 {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: "must be at least 32 characters long".to_string(),
            });
        }

        let access_token_expiry = parsed::<i64>("JWT_ACCESS_EXPIRY", "900")?;
        let refresh_token_expiry = parsed::<i64>("JWT_REFRESH_EXPIRY", "604800")?;
        let reset_token_expiry = parsed::<i64>("JWT_RESET_EXPIRY", "3600")?;

        if access_token_expiry <= 0 || access_token_expiry > 86400 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                reason: "must be between 1 and 86400 seconds".to_string(),
            });
        }

        if refresh_token_expiry <= access_token_expiry {
            return Err(ConfigError::Invalid {
                key: "JWT_REFRESH_EXPIRY",
                reason: "must be greater than JWT_ACCESS_EXPIRY".to_string(),
            });
        }

        if reset_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_RESET_EXPIRY",
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            secret_key,
            access_token_expiry,
            refresh_token_expiry,
            reset_token_expiry,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            secret_key: env::var("TEST_JWT_SECRET")
                .unwrap_or_else(|_| "test_secret_key_for_testing_only_0123456789".to_string()),
            access_token_expiry: 3600,
            refresh_token_expiry: 86400,
            reset_token_expiry: 3600,
        }
    }
}
