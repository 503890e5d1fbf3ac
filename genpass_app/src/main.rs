use genpass_app::app::App;
use genpass_app::commands;
use genpass_app::config::{Cli, Command, Config};
use genpass_domain::GenerationSettings;

use clap::Parser;
use entrait::Impl;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let store = genpass_app::store_for(&cli).await?;

    match cli.command {
        Command::Serve(args) => {
            let config = Config::for_generation(GenerationSettings::from(&args.passwords));
            genpass_app::serve(App::new(config, store)?, args.bind).await?;
        }
        Command::Demo(args) => {
            let app = App::new(Config::for_demo(&args), store)?;
            commands::run_demo(&app, args.format, &mut std::io::stdout().lock()).await?;
        }
        Command::GenerateProfiles(args) => {
            let app = Impl::new(App::new(
                Config::for_generation(GenerationSettings::default()),
                store,
            )?);
            println!("{}", commands::generate_profiles(&app, &args).await?);
        }
        Command::GeneratePasswords(args) => {
            let config = Config::for_generation(GenerationSettings::from(&args));
            let app = Impl::new(App::new(config, store)?);
            println!("{}", commands::generate_passwords(&app).await?);
        }
    }

    Ok(())
}
