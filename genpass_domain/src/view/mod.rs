//! The demo view: state owned by a single view, mutated only through its two actions.
//!
//! Each action is split into a synchronous `begin_*` step, the awaited fetch, and a
//! synchronous `settle_*` step. `begin_*` hands out a ticket stamped with a generation
//! number; settling a ticket from an older generation is a no-op, so a late response
//! can never overwrite the result of a newer request.

pub mod render;

use crate::error::GpResult;
use crate::password::PasswordSet;
use crate::profile::Profile;

use entrait::entrait_export as entrait;

/// Where the view gets its data from.
#[entrait(mock_api=DemoSourceMock)]
pub trait DemoSource {
    async fn fetch_profiles(&self) -> GpResult<Vec<Profile>>;

    async fn fetch_passwords(&self) -> GpResult<PasswordSet>;
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ViewState {
    pub profiles: Option<Vec<Profile>>,
    pub passwords: Option<PasswordSet>,
    pub loading_profiles: bool,
    pub loading_passwords: bool,
}

#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct ProfilesTicket {
    generation: u64,
}

#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct PasswordsTicket {
    generation: u64,
}

/// What happened to a settled fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// A newer request of the same kind was started after this one.
    Discarded,
}

#[derive(Debug, Default)]
pub struct DemoView {
    state: ViewState,
    profiles_generation: u64,
    passwords_generation: u64,
}

impl DemoView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    /// Whether the "load profiles" control is enabled.
    pub fn can_load_profiles(&self) -> bool {
        !self.state.loading_profiles
    }

    /// Whether the "generate passwords" control is shown and enabled.
    pub fn can_load_passwords(&self) -> bool {
        self.state.profiles.is_some()
            && !self.state.loading_profiles
            && !self.state.loading_passwords
    }

    /// Press the "load profiles" control. `None` while the control is disabled.
    pub fn trigger_load_profiles(&mut self) -> Option<ProfilesTicket> {
        self.can_load_profiles()
            .then(|| self.begin_load_profiles())
    }

    /// Press the "generate passwords" control. `None` while the control is hidden or
    /// disabled.
    pub fn trigger_load_passwords(&mut self) -> Option<PasswordsTicket> {
        self.can_load_passwords()
            .then(|| self.begin_load_passwords())
    }

    /// Start a profile load.
    ///
    /// Clears the password mapping right away, and invalidates an in-flight password
    /// load so that it cannot attach passwords to the new profile set.
    pub fn begin_load_profiles(&mut self) -> ProfilesTicket {
        self.profiles_generation += 1;
        self.passwords_generation += 1;

        self.state.loading_profiles = true;
        self.state.passwords = None;
        self.state.loading_passwords = false;

        ProfilesTicket {
            generation: self.profiles_generation,
        }
    }

    pub fn begin_load_passwords(&mut self) -> PasswordsTicket {
        self.passwords_generation += 1;
        self.state.loading_passwords = true;

        PasswordsTicket {
            generation: self.passwords_generation,
        }
    }

    /// Settle a profile load. On failure `profiles` keeps its prior value and the
    /// error is logged and returned.
    pub fn settle_profiles(
        &mut self,
        ticket: ProfilesTicket,
        result: GpResult<Vec<Profile>>,
    ) -> GpResult<Settlement> {
        if ticket.generation != self.profiles_generation {
            tracing::debug!(
                generation = ticket.generation,
                current = self.profiles_generation,
                "discarding stale profile response"
            );
            return Ok(Settlement::Discarded);
        }

        self.state.loading_profiles = false;

        match result {
            Ok(profiles) => {
                tracing::info!(count = profiles.len(), "loaded profiles");
                self.state.profiles = Some(profiles);
                Ok(Settlement::Applied)
            }
            Err(e) => {
                tracing::error!("Error loading profiles: {}", e);
                Err(e)
            }
        }
    }

    pub fn settle_passwords(
        &mut self,
        ticket: PasswordsTicket,
        result: GpResult<PasswordSet>,
    ) -> GpResult<Settlement> {
        if ticket.generation != self.passwords_generation {
            tracing::debug!(
                generation = ticket.generation,
                current = self.passwords_generation,
                "discarding stale password response"
            );
            return Ok(Settlement::Discarded);
        }

        self.state.loading_passwords = false;

        match result {
            Ok(passwords) => {
                tracing::info!(count = passwords.len(), "loaded passwords");
                self.state.passwords = Some(passwords);
                Ok(Settlement::Applied)
            }
            Err(e) => {
                tracing::error!("Error loading passwords: {}", e);
                Err(e)
            }
        }
    }

    pub async fn load_profiles(&mut self, source: &impl DemoSource) -> GpResult<Settlement> {
        let ticket = self.begin_load_profiles();
        let result = source.fetch_profiles().await;
        self.settle_profiles(ticket, result)
    }

    pub async fn load_passwords(&mut self, source: &impl DemoSource) -> GpResult<Settlement> {
        let ticket = self.begin_load_passwords();
        let result = source.fetch_passwords().await;
        self.settle_passwords(ticket, result)
    }
}
