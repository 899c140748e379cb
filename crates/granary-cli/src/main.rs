mod cli;
mod commands;

use cli::{GenerateParams, build_cli};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("generate", m)) => {
            let params = GenerateParams::from_matches(m);
            commands::generate::run(params.into());
        }
        Some(("langs", _)) => {
            commands::langs::run();
        }
        _ => unreachable!("clap should have caught this"),
    }
}
