// src/bin/cli.rs
use icfes_scores::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = log::init() {
        eprintln!("Warning: debug log disabled ({e})");
    }
    cli::run()
}
