pub mod repo;

use crate::error::*;
use crate::password::{generate_password_set, PasswordSet};
use crate::profile::generate::{generate_profiles, ProfileRequest};
use crate::profile::Profile;
use crate::{GetConfig, System};
use repo::FixtureRepo;

use entrait::entrait_export as entrait;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const PROFILES_FILE: &str = "generated_profiles.json";
pub const PASSWORDS_FILE: &str = "clean_passwords.json";

/// The two published documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Profiles,
    Passwords,
}

impl Resource {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Profiles => PROFILES_FILE,
            Self::Passwords => PASSWORDS_FILE,
        }
    }

    /// Absolute URL path the resource is served under.
    pub fn path(self) -> String {
        format!("/{}", self.file_name())
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profiles => f.write_str("profiles"),
            Self::Passwords => f.write_str("passwords"),
        }
    }
}

pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[entrait(pub FixtureApi, mock_api=FixtureApiMock)]
pub mod api {
    use super::*;

    pub async fn published_profiles(deps: &impl FixtureRepo) -> GpResult<Vec<Profile>> {
        deps.load_profiles().await
    }

    pub async fn published_passwords(deps: &impl FixtureRepo) -> GpResult<PasswordSet> {
        deps.load_passwords().await
    }

    /// Regenerate the password document from the published profiles.
    pub async fn run_passwords(deps: &(impl FixtureRepo + GetConfig)) -> GpResult<PasswordSet> {
        let settings = deps.get_generation_settings();
        let profiles = deps.load_profiles().await?;

        if profiles.is_empty() {
            return Err(GpError::NotEnoughProfiles {
                required: 1,
                found: 0,
            });
        }

        let passwords = generate_password_set(
            &profiles,
            settings.passwords_per_profile,
            settings.strategy,
            &mut seeded_rng(settings.seed),
        );

        deps.store_passwords(&passwords).await?;

        tracing::info!(
            profiles = profiles.len(),
            strategy = %settings.strategy,
            "generated password fixture"
        );

        Ok(passwords)
    }

    /// Regenerate the profile document.
    pub async fn run_profiles(
        deps: &(impl FixtureRepo + System),
        request: ProfileRequest,
    ) -> GpResult<Vec<Profile>> {
        let current_year = deps.get_current_time().year();
        let profiles = generate_profiles(
            request.count,
            request.start_id,
            current_year,
            &mut seeded_rng(request.seed),
        )?;

        deps.store_profiles(&profiles).await?;

        tracing::info!(count = profiles.len(), "generated profile fixture");

        Ok(profiles)
    }
}
