use clap::Parser;

mod game;
mod settings;
mod timer;

fn main() -> anyhow::Result<()> {
    let args = settings::Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = args.game_config()?;
    log::debug!("config: {:?}", config);

    game::run(&config, args.json)
}
