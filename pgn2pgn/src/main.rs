mod summary;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use pgn_game::reader::DEFAULT_MAX_PLIES;
use pgn_game::{read_pgn_file, StandardBoard};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PGN file
    file: String,

    /// Path of the normalized PGN file (if not specified, same as the PGN file
    /// with the extension changed)
    #[arg(short, long)]
    output: Option<String>,

    /// Maximum number of plies read from each game
    #[arg(long, default_value_t = DEFAULT_MAX_PLIES)]
    max_plies: usize,

    /// Also write the games that were cut short by a malformed item
    #[arg(long)]
    keep_partial: bool,

    /// Path of a YAML summary of the games read
    #[arg(long)]
    yaml: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let pgn_path = PathBuf::from(cli.file);

    let games = read_pgn_file::<StandardBoard>(&pgn_path, cli.max_plies)
        .context("Unable to parse PGN file")?;

    let output_path = cli.output.map_or_else(
        || {
            let mut path = pgn_path.clone();
            path.set_extension("out.pgn");
            path
        },
        PathBuf::from,
    );
    println!("Writing PGN file to {}", output_path.to_string_lossy());

    let mut written = 0usize;
    for (index, game) in games.iter().enumerate() {
        if !game.is_complete() && !cli.keep_partial {
            warn!(
                "Skipping game {} ({} - {}): {}",
                index + 1,
                game.record.white_player,
                game.record.black_player,
                summary::termination_name(&game.termination)
            );
            continue;
        }

        game.record
            .append_to_file::<StandardBoard>(&output_path)
            .context(format!("Cannot write game {}", index + 1))?;
        written += 1;
    }

    info!("{} of {} games written", written, games.len());

    if let Some(yaml_path) = cli.yaml {
        let yaml_path = PathBuf::from(yaml_path);
        println!("Writing YAML file to {}", yaml_path.to_string_lossy());
        summary::write_yaml(&yaml_path, &games)?;
    }

    Ok(())
}
