use anyhow::{Context, Result};
use pgn_game::{Board, ParsedGame, StandardBoard, Termination};
use serde::ser::SerializeMap;
use serde::Serialize;
use std::path::PathBuf;

type StandardMove = <StandardBoard as Board>::Move;

pub struct FullMove {
    white: String,
    black: Option<String>,
}

#[derive(Serialize)]
pub struct GameSummary {
    white: String,
    black: String,
    result: String,
    termination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fen: Option<String>,
    moves: SerializedMoveList,
}

pub struct SerializedMoveList(Vec<FullMove>);

impl Serialize for FullMove {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let Some(black) = &self.black {
            let mut map = serializer.serialize_map(Some(2))?;

            map.serialize_entry("white", &self.white)?;
            map.serialize_entry("black", black)?;

            map.end()
        } else {
            let mut map = serializer.serialize_map(Some(1))?;

            map.serialize_entry("white", &self.white)?;

            map.end()
        }
    }
}

impl Serialize for SerializedMoveList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (index, mv) in self.0.iter().enumerate() {
            let move_number = index + 1;
            map.serialize_entry(&move_number, mv)?;
        }

        map.end()
    }
}

pub fn termination_name(termination: &Termination) -> String {
    match termination {
        Termination::Marker => "termination marker".to_string(),
        Termination::EndOfStream => "end of file".to_string(),
        Termination::PlyLimit => "ply limit".to_string(),
        Termination::Aborted(err) => format!("aborted: {}", err),
    }
}

fn full_moves(names: Vec<String>) -> Vec<FullMove> {
    let mut moves: Vec<FullMove> = Vec::with_capacity(names.len() / 2 + 1);
    for name in names {
        match moves.last_mut() {
            Some(last_move) if last_move.black.is_none() => last_move.black = Some(name),
            _ => moves.push(FullMove {
                white: name,
                black: None,
            }),
        }
    }
    moves
}

pub fn summarize(game: &ParsedGame<StandardMove>) -> Result<GameSummary> {
    let record = &game.record;
    let header = record.variant_header();
    let names = record
        .san_moves::<StandardBoard>()
        .context("Cannot replay the moves of the game")?;

    Ok(GameSummary {
        white: record.white_player.clone(),
        black: record.black_player.clone(),
        result: record.result.to_string(),
        termination: termination_name(&game.termination),
        fen: header.use_fen.then(|| record.starting_fen.clone()),
        moves: SerializedMoveList(full_moves(names)),
    })
}

pub fn write_yaml(yaml_path: &PathBuf, games: &[ParsedGame<StandardMove>]) -> Result<()> {
    let summaries = games.iter().map(summarize).collect::<Result<Vec<_>>>()?;

    let output = std::fs::File::create(yaml_path).context(format!(
        "Could not open file {} for writing",
        yaml_path.to_string_lossy()
    ))?;

    serde_yaml::to_writer(output, &summaries).context(format!(
        "Error writing YAML data to {}",
        yaml_path.to_string_lossy()
    ))
}
