pub mod error;
pub mod fixtures;
pub mod password;
pub mod profile;
pub mod view;

use password::PasswordStrategy;

use entrait::entrait_export as entrait;

///
/// Mockable system abstraction
///
#[entrait(mock_api=SystemMock)]
pub trait System {
    fn get_current_time(&self) -> time::OffsetDateTime;
}

///
/// Mockable config accessor
///
#[entrait(mock_api=GetConfigMock)]
pub trait GetConfig {
    fn get_generation_settings(&self) -> GenerationSettings;
}

/// Knobs for the password generator, shared by the backend and the CLI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationSettings {
    pub passwords_per_profile: usize,
    pub strategy: PasswordStrategy,
    pub seed: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            passwords_per_profile: password::DEFAULT_PASSWORDS_PER_PROFILE,
            strategy: PasswordStrategy::Keyword,
            seed: None,
        }
    }
}

pub mod test {
    use super::*;

    use time::macros::datetime;
    use unimock::*;

    pub fn mock_system() -> impl Clause {
        SystemMock::get_current_time
            .each_call(matching!())
            .returns(datetime!(2025-03-01 12:00 UTC))
    }

    pub fn mock_config() -> impl Clause {
        GetConfigMock::get_generation_settings
            .each_call(matching!())
            .returns(GenerationSettings {
                seed: Some(42),
                ..Default::default()
            })
    }
}
