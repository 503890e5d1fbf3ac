use genpass_domain::password::{PasswordStrategy, DEFAULT_PASSWORDS_PER_PROFILE};
use genpass_domain::profile::generate::{ProfileRequest, DEFAULT_PROFILE_COUNT, DEFAULT_START_ID};
use genpass_domain::view::render::RenderFormat;
use genpass_domain::GenerationSettings;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(clap::Parser, Debug)]
#[command(name = "genpass", version, about = "Synthetic student profiles and password candidates")]
pub struct Cli {
    /// Directory holding generated_profiles.json and clean_passwords.json.
    #[arg(long, env, default_value = "./fixtures", global = true)]
    pub fixtures_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP backend.
    Serve(ServeArgs),
    /// Drive the demo view against a running backend and print every frame.
    Demo(DemoArgs),
    /// Write a new profile fixture.
    GenerateProfiles(ProfileArgs),
    /// Write a new password fixture from the current profile fixture.
    GeneratePasswords(PasswordArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:5001")]
    pub bind: SocketAddr,

    /// Settings used by /run-passwords.
    #[command(flatten)]
    pub passwords: PasswordArgs,
}

#[derive(clap::Args, Debug)]
pub struct DemoArgs {
    #[arg(long, env = "DEMO_BASE_URL", default_value = "http://localhost:5001")]
    pub base_url: url::Url,

    #[arg(long, default_value = "text")]
    pub format: RenderFormat,

    /// Pause before fetching passwords, standing in for generation time.
    #[arg(long, default_value_t = 1000)]
    pub generation_delay_ms: u64,
}

#[derive(clap::Args, Debug)]
pub struct ProfileArgs {
    #[arg(long, default_value_t = DEFAULT_PROFILE_COUNT)]
    pub count: usize,

    #[arg(long, default_value_t = DEFAULT_START_ID)]
    pub start_id: u32,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write every profile to its own file in this directory.
    #[arg(long)]
    pub split_dir: Option<PathBuf>,

    #[arg(long, default_value = "profile")]
    pub split_prefix: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PasswordArgs {
    /// Candidates per profile.
    #[arg(long = "count", env = "PASSWORDS_PER_PROFILE", default_value_t = DEFAULT_PASSWORDS_PER_PROFILE)]
    pub passwords_per_profile: usize,

    #[arg(long, env = "PASSWORD_STRATEGY", default_value_t = PasswordStrategy::Keyword)]
    pub strategy: PasswordStrategy,

    #[arg(long, env = "PASSWORD_SEED")]
    pub seed: Option<u64>,
}

impl ProfileArgs {
    pub fn request(&self) -> ProfileRequest {
        ProfileRequest {
            count: self.count,
            start_id: self.start_id,
            seed: self.seed,
        }
    }
}

impl From<&PasswordArgs> for GenerationSettings {
    fn from(args: &PasswordArgs) -> Self {
        Self {
            passwords_per_profile: args.passwords_per_profile,
            strategy: args.strategy,
            seed: args.seed,
        }
    }
}

/// Everything [crate::app::App] needs at runtime.
#[derive(Clone, Debug)]
pub struct Config {
    pub generation: GenerationSettings,
    /// Backend the demo view fetches from. Only the demo command has one.
    pub base_url: Option<url::Url>,
    pub generation_delay: Duration,
}

impl Config {
    pub fn for_demo(args: &DemoArgs) -> Self {
        Self {
            generation: GenerationSettings::default(),
            base_url: Some(args.base_url.clone()),
            generation_delay: Duration::from_millis(args.generation_delay_ms),
        }
    }

    pub fn for_generation(generation: GenerationSettings) -> Self {
        Self {
            generation,
            base_url: None,
            generation_delay: Duration::ZERO,
        }
    }
}
