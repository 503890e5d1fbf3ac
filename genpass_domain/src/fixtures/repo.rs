use entrait::entrait_export as entrait;

use crate::error::GpResult;
use crate::password::PasswordSet;
use crate::profile::Profile;

/// Persistent home of the two published JSON documents.
#[entrait(FixtureRepoImpl, delegate_by = DelegateFixtureRepo, mock_api = FixtureRepoMock)]
pub trait FixtureRepo {
    async fn load_profiles(&self) -> GpResult<Vec<Profile>>;

    async fn store_profiles(&self, profiles: &[Profile]) -> GpResult<()>;

    async fn load_passwords(&self) -> GpResult<PasswordSet>;

    async fn store_passwords(&self, passwords: &PasswordSet) -> GpResult<()>;

    /// Write every profile to `<prefix>_<n>.json` in `dir`, `n` counting from 1.
    async fn export_profiles(
        &self,
        profiles: &[Profile],
        dir: &std::path::Path,
        prefix: &str,
    ) -> GpResult<Vec<std::path::PathBuf>>;
}
