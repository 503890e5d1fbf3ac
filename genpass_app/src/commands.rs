//! One-shot subcommands of the `genpass` binary.

use crate::config::ProfileArgs;

use genpass_domain::error::GpResult;
use genpass_domain::fixtures::repo::FixtureRepo;
use genpass_domain::fixtures::FixtureApi;
use genpass_domain::view::render::{render, RenderFormat};
use genpass_domain::view::{DemoSource, DemoView};

use anyhow::Context;
use std::io::Write;

pub async fn generate_profiles(
    deps: &(impl FixtureApi + FixtureRepo),
    args: &ProfileArgs,
) -> GpResult<String> {
    let profiles = deps.run_profiles(args.request()).await?;

    if let Some(dir) = &args.split_dir {
        deps.export_profiles(&profiles, dir, &args.split_prefix)
            .await?;
    }

    Ok(format!("Generated {} profiles.", profiles.len()))
}

pub async fn generate_passwords(deps: &impl FixtureApi) -> GpResult<String> {
    let passwords = deps.run_passwords().await?;

    Ok(format!(
        "Generated passwords for {} profiles.",
        passwords.len()
    ))
}

/// Walk the demo view through both actions, writing a frame after every state change.
///
/// A failed fetch does not stop the walk. The last failure is returned once every
/// frame has been written.
pub async fn run_demo(
    source: &impl DemoSource,
    format: RenderFormat,
    out: &mut impl Write,
) -> GpResult<()> {
    let mut view = DemoView::new();
    let mut outcome = Ok(());

    write_frame(&view, format, out)?;

    if let Some(ticket) = view.trigger_load_profiles() {
        write_frame(&view, format, out)?;
        let result = source.fetch_profiles().await;
        if let Err(e) = view.settle_profiles(ticket, result) {
            outcome = Err(e);
        }
        write_frame(&view, format, out)?;
    }

    if let Some(ticket) = view.trigger_load_passwords() {
        write_frame(&view, format, out)?;
        let result = source.fetch_passwords().await;
        if let Err(e) = view.settle_passwords(ticket, result) {
            outcome = Err(e);
        }
        write_frame(&view, format, out)?;
    }

    outcome
}

fn write_frame(view: &DemoView, format: RenderFormat, out: &mut impl Write) -> GpResult<()> {
    let frame = render(view.state(), format)?;
    writeln!(out, "{frame}").context("failed to write frame")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::test_profile;

    use genpass_domain::error::GpError;
    use genpass_domain::fixtures::api::FixtureApiMock;
    use genpass_domain::fixtures::repo::FixtureRepoMock;
    use genpass_domain::fixtures::Resource;
    use genpass_domain::password::PasswordSet;
    use genpass_domain::profile::generate::ProfileRequest;
    use genpass_domain::view::DemoSourceMock;

    use assert_matches::*;
    use std::path::PathBuf;
    use unimock::*;

    fn profile_args(split_dir: Option<PathBuf>) -> ProfileArgs {
        ProfileArgs {
            count: 2,
            start_id: 1,
            seed: Some(3),
            split_dir,
            split_prefix: "student".to_string(),
        }
    }

    fn passwords() -> PasswordSet {
        [("S1".into(), vec!["Avewes4!kPq2".to_string()])]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn generate_profiles_without_split() {
        let deps = Unimock::new(
            FixtureApiMock::run_profiles
                .next_call(matching!(ProfileRequest {
                    count: 2,
                    start_id: 1,
                    seed: Some(3)
                }))
                .returns(Ok(vec![test_profile("S1"), test_profile("S2")])),
        );

        assert_eq!(
            "Generated 2 profiles.",
            generate_profiles(&deps, &profile_args(None)).await.unwrap()
        );
    }

    #[tokio::test]
    async fn generate_profiles_with_split_exports() {
        let deps = Unimock::new((
            FixtureApiMock::run_profiles
                .next_call(matching!(_))
                .returns(Ok(vec![test_profile("S1")])),
            FixtureRepoMock::export_profiles
                .next_call(matching!(_, _, "student"))
                .returns(Ok(vec![PathBuf::from("out/student_1.json")])),
        ));

        generate_profiles(&deps, &profile_args(Some(PathBuf::from("out"))))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn generate_passwords_reports_count() {
        let deps = Unimock::new(
            FixtureApiMock::run_passwords
                .next_call(matching!())
                .returns(Ok(passwords())),
        );

        assert_eq!(
            "Generated passwords for 1 profiles.",
            generate_passwords(&deps).await.unwrap()
        );
    }

    #[tokio::test]
    async fn demo_writes_a_frame_per_state_change() {
        let deps = Unimock::new((
            DemoSourceMock::fetch_profiles
                .next_call(matching!())
                .returns(Ok(vec![test_profile("S1")])),
            DemoSourceMock::fetch_passwords
                .next_call(matching!())
                .returns(Ok(passwords())),
        ));
        let mut out = vec![];

        run_demo(&deps, RenderFormat::Text, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(5, text.matches("Generate Passwords Demo").count());
        assert!(text.contains("[ Loading... ] (disabled)"));
        assert!(text.contains("[ Generating... ] (disabled)"));
        assert!(text.contains("+ Jordan Patel"));
        assert!(text.ends_with("+ S1\n|   - Avewes4!kPq2\n\n"));
    }

    #[tokio::test]
    async fn demo_stops_before_passwords_when_profiles_fail() {
        let deps = Unimock::new(
            DemoSourceMock::fetch_profiles
                .next_call(matching!())
                .returns(Err(GpError::fetch_or_parse(
                    Resource::Profiles,
                    "connection refused",
                ))),
        );
        let mut out = vec![];

        assert_matches!(
            run_demo(&deps, RenderFormat::Json, &mut out).await,
            Err(GpError::FetchOrParse {
                resource: Resource::Profiles,
                ..
            })
        );

        let text = String::from_utf8(out).unwrap();
        assert_eq!(3, text.matches("\"loading_profiles\"").count());
        assert!(!text.contains("Generated Passwords"));
    }
}
