use clap::Parser;

use ffcmd::cli::{self, Cli};

fn main() {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Err(err) = cli::execute(&args.ffmpeg, args.command) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
