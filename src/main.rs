use clap::Parser;
use color_eyre::eyre::Result;

use releasify::{cli, command};

fn initialize_logger(debug: bool) -> releasify::Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("releasify")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    match cli_args.command {
        cli::Command::Package => command::package::execute(&cli_args)?,
        cli::Command::Upload => command::upload::execute(&cli_args).await?,
        cli::Command::Release => command::release::execute(&cli_args).await?,
        cli::Command::Update => command::update::execute(&cli_args).await?,
        cli::Command::Latest => command::latest::execute(&cli_args).await?,
    }

    Ok(())
}
