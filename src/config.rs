use config::{Config, ConfigError, Environment};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::metrics::{DEFAULT_GOAL_AMOUNT, DEFAULT_PER_PERSON_TARGET, FundraisingTargets};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(default = "default_goal_amount")]
    pub goal_amount: Decimal,
    #[serde(default = "default_per_person_target")]
    pub per_person_target: Decimal,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_max_connections() -> u32 {
    5
}

fn default_goal_amount() -> Decimal {
    Decimal::from(DEFAULT_GOAL_AMOUNT)
}

fn default_per_person_target() -> Decimal {
    Decimal::from(DEFAULT_PER_PERSON_TARGET)
}

impl AppConfig {
    /// Reads the process environment. `DATABASE_URL` is mandatory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    pub fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        if config.database_url.trim().is_empty() {
            return Err(ConfigError::Message(
                "DATABASE_URL is not set. Add it to your .env file.".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn targets(&self) -> FundraisingTargets {
        FundraisingTargets {
            goal_amount: self.goal_amount,
            per_person_target: self.per_person_target,
        }
    }
}
