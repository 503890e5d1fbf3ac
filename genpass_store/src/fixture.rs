use crate::GetStore;

use genpass_domain::error::{GpError, GpResult};
use genpass_domain::fixtures::Resource;
use genpass_domain::password::PasswordSet;
use genpass_domain::profile::generate::profiles_to_json;
use genpass_domain::profile::Profile;

use anyhow::Context;
use entrait::*;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

pub struct FsFixtureRepo;

#[entrait]
impl genpass_domain::fixtures::repo::FixtureRepoImpl for FsFixtureRepo {
    pub async fn load_profiles(deps: &impl GetStore) -> GpResult<Vec<Profile>> {
        read_fixture(deps, Resource::Profiles).await
    }

    pub async fn store_profiles(deps: &impl GetStore, profiles: &[Profile]) -> GpResult<()> {
        let json = serde_json::to_vec_pretty(profiles).context("failed to serialize profiles")?;
        write_file(&deps.get_store().path_of(Resource::Profiles), &json).await
    }

    pub async fn load_passwords(deps: &impl GetStore) -> GpResult<PasswordSet> {
        read_fixture(deps, Resource::Passwords).await
    }

    pub async fn store_passwords(deps: &impl GetStore, passwords: &PasswordSet) -> GpResult<()> {
        let json =
            serde_json::to_vec_pretty(passwords).context("failed to serialize passwords")?;
        write_file(&deps.get_store().path_of(Resource::Passwords), &json).await
    }

    pub async fn export_profiles(
        _deps: &impl GetStore,
        profiles: &[Profile],
        dir: &Path,
        prefix: &str,
    ) -> GpResult<Vec<PathBuf>> {
        let mut paths = Vec::with_capacity(profiles.len());

        for (i, json) in profiles_to_json(profiles)?.into_iter().enumerate() {
            let path = dir.join(format!("{prefix}_{}.json", i + 1));
            write_file(&path, json.as_bytes()).await?;
            paths.push(path);
        }

        tracing::info!("exported {} profiles to {}", paths.len(), dir.display());

        Ok(paths)
    }
}

async fn read_fixture<T: DeserializeOwned>(
    deps: &impl GetStore,
    resource: Resource,
) -> GpResult<T> {
    let path = deps.get_store().path_of(resource);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(GpError::FixtureNotFound(resource))
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("failed to read {}", path.display()))
                .into())
        }
    };

    serde_json::from_slice(&bytes).map_err(|e| GpError::MalformedFixture {
        resource,
        reason: e.to_string(),
    })
}

/// Write through a sibling temp file so that readers never observe a partial document.
async fn write_file(path: &Path, contents: &[u8]) -> GpResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, contents)
        .await
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("failed to replace {}", path.display()))?;

    tracing::debug!("wrote {}", path.display());

    Ok(())
}

/// A sibling of `path` that no other write in this process or another one will pick.
fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);

    path.with_file_name(format!(".{file_name}.{}.{seq}.tmp", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_test_store;

    use assert_matches::*;
    use genpass_domain::fixtures::repo::FixtureRepo;

    fn profile(student_id: &str) -> Profile {
        Profile {
            student_id: student_id.into(),
            name: "Riley Chen".to_string(),
            age: 19,
            school: "Northfield College".to_string(),
            major: "Biology".to_string(),
            graduation_year: 2026,
            gpa: 3.87,
            email: "riley.chen@northfieldcollege.edu".to_string(),
            city: "Fairview".to_string(),
            state: "CA".to_string(),
            interests: vec!["hiking".to_string(), "chess".to_string()],
        }
    }

    #[tokio::test]
    async fn should_store_then_load_profiles() -> GpResult<()> {
        let (_dir, store) = create_test_store().await;
        let profiles = vec![profile("S2"), profile("S1")];

        store.store_profiles(&profiles).await?;

        assert_eq!(profiles, store.load_profiles().await?);
        Ok(())
    }

    #[tokio::test]
    async fn should_keep_password_key_order_on_disk() -> GpResult<()> {
        let (_dir, store) = create_test_store().await;
        let passwords: PasswordSet = [
            ("S9".into(), vec!["Zz9!abcdefgh".to_string()]),
            ("S1".into(), vec![]),
        ]
        .into_iter()
        .collect();

        store.store_passwords(&passwords).await?;

        let raw = std::fs::read_to_string(store.path_of(Resource::Passwords)).unwrap();
        assert!(raw.find("S9").unwrap() < raw.find("S1").unwrap());
        assert_eq!(passwords, store.load_passwords().await?);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_stores_all_succeed() {
        let (_dir, store) = create_test_store().await;
        let store = std::sync::Arc::new(store);

        let writers = (0..4)
            .map(|writer| {
                let store = store.clone();
                tokio::spawn(async move {
                    for round in 0..50 {
                        let passwords: PasswordSet =
                            [(format!("S{writer}").into(), vec![format!("pw{round}")])]
                                .into_iter()
                                .collect();
                        store.store_passwords(&passwords).await?;
                    }
                    GpResult::<()>::Ok(())
                })
            })
            .collect::<Vec<_>>();

        for writer in writers {
            writer.await.unwrap().unwrap();
        }

        assert_matches!(store.load_passwords().await, Ok(set) if set.len() == 1);
        let leftovers = std::fs::read_dir(store.root())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect::<Vec<_>>();
        assert_eq!(vec![std::ffi::OsString::from("clean_passwords.json")], leftovers);
    }

    #[test]
    fn temp_paths_are_unique_siblings() {
        let target = Path::new("/fixtures/clean_passwords.json");

        let first = temp_path(target);
        let second = temp_path(target);

        assert_ne!(first, second);
        assert_eq!(Some(Path::new("/fixtures")), first.parent());
    }

    #[tokio::test]
    async fn missing_fixture_is_not_found() {
        let (_dir, store) = create_test_store().await;

        assert_matches!(
            store.load_profiles().await,
            Err(GpError::FixtureNotFound(Resource::Profiles))
        );
        assert_matches!(
            store.load_passwords().await,
            Err(GpError::FixtureNotFound(Resource::Passwords))
        );
    }

    #[tokio::test]
    async fn wrong_shape_is_malformed() {
        let (_dir, store) = create_test_store().await;
        std::fs::write(store.path_of(Resource::Profiles), r#"{"S1": []}"#).unwrap();

        assert_matches!(
            store.load_profiles().await,
            Err(GpError::MalformedFixture {
                resource: Resource::Profiles,
                ..
            })
        );
    }

    #[tokio::test]
    async fn profile_missing_a_field_is_malformed() {
        let (_dir, store) = create_test_store().await;
        std::fs::write(
            store.path_of(Resource::Profiles),
            r#"[{"student_id": "S1", "name": "Riley Chen"}]"#,
        )
        .unwrap();

        assert_matches!(
            store.load_profiles().await,
            Err(GpError::MalformedFixture { .. })
        );
    }

    #[tokio::test]
    async fn should_export_one_file_per_profile() -> GpResult<()> {
        let (dir, store) = create_test_store().await;
        let split_dir = dir.path().join("split");

        let paths = store
            .export_profiles(&[profile("S1"), profile("S2")], &split_dir, "profile")
            .await?;

        assert_eq!(
            vec![
                split_dir.join("profile_1.json"),
                split_dir.join("profile_2.json")
            ],
            paths
        );
        let second: Profile =
            serde_json::from_str(&std::fs::read_to_string(&paths[1]).unwrap()).unwrap();
        assert_eq!(profile("S2"), second);
        Ok(())
    }
}
