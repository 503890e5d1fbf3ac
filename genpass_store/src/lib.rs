use anyhow::Context;
use genpass_domain::fixtures::Resource;
use std::path::{Path, PathBuf};

pub mod fixture;

pub use fixture::FsFixtureRepo;

/// The directory holding the published fixtures.
#[derive(Clone, Debug)]
pub struct Store {
    pub root: PathBuf,
}

impl Store {
    pub async fn init(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("could not create fixtures dir {}", root.display()))?;

        tracing::debug!("fixtures dir: {}", root.display());

        Ok(Self { root })
    }

    /// Refer to `root` without touching the filesystem.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, resource: Resource) -> PathBuf {
        self.root.join(resource.file_name())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

pub trait GetStore {
    fn get_store(&self) -> &Store;
}

impl GetStore for Store {
    fn get_store(&self) -> &Store {
        self
    }
}

impl<T: GetStore> GetStore for entrait::Impl<T> {
    fn get_store(&self) -> &Store {
        (**self).get_store()
    }
}

impl genpass_domain::fixtures::repo::DelegateFixtureRepo<Self> for Store {
    type Target = FsFixtureRepo;
}

#[cfg(test)]
async fn create_test_store() -> (tempdir::TempDir, entrait::Impl<Store>) {
    let dir = tempdir::TempDir::new("genpass-store").unwrap();
    let store = Store::init(dir.path().join("fixtures")).await.unwrap();

    (dir, entrait::Impl::new(store))
}
