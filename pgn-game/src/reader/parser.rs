use super::lexer::{read_item, ItemError, PgnItem};
use super::stream::PgnStream;
use crate::board::{Board, Variant};
use crate::record::GameRecord;
use anyhow::{Context, Result};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::Path;

pub const DEFAULT_MAX_PLIES: usize = 2048;

/// What stopped the reading of a game.
#[derive(Clone, Debug, PartialEq)]
pub enum Termination {
    /// A termination marker was read
    Marker,
    EndOfStream,
    PlyLimit,
    Aborted(ItemError),
}

#[derive(Clone, Debug)]
pub struct ParsedGame<M> {
    pub record: GameRecord<M>,
    pub termination: Termination,
}

impl<M> ParsedGame<M> {
    /// False if the game was cut short by a malformed item. A game that
    /// simply runs into the next one is complete.
    pub fn is_complete(&self) -> bool {
        match &self.termination {
            Termination::Aborted(err) => *err == ItemError::NextRecord,
            _ => true,
        }
    }
}

/// Reads one game from the stream, stopping after at most `max_plies` moves.
pub fn read_game<R, B>(stream: &mut PgnStream<R>, max_plies: usize) -> Result<ParsedGame<B::Move>>
where
    R: BufRead,
    B: Board,
{
    let mut board = B::with_variant(Variant::Standard, false)?;
    let mut record = GameRecord::new();
    record.starting_fen = board.fen_string();

    let termination = loop {
        if record.moves.len() >= max_plies {
            break Termination::PlyLimit;
        }
        // Trailing blank lines end the game like the end of the file does
        stream.skip_whitespace()?;
        if stream.is_at_end()? {
            break Termination::EndOfStream;
        }

        match read_item(stream, &mut board, &mut record)? {
            PgnItem::Error(err) => break Termination::Aborted(err),
            PgnItem::Tag { .. } => record.mark_non_empty(),
            PgnItem::Result(_) => break Termination::Marker,
            _ => (),
        }
    };

    Ok(ParsedGame {
        record,
        termination,
    })
}

/// Iterates over the games of a stream.
///
/// Each game gets a fresh board. Stretches of text where no tag is found
/// are skipped.
pub struct PgnReader<R, B> {
    stream: PgnStream<R>,
    max_plies: usize,
    done: bool,
    board: PhantomData<B>,
}

impl<R: BufRead, B: Board> PgnReader<R, B> {
    pub fn new(reader: R) -> PgnReader<R, B> {
        PgnReader {
            stream: PgnStream::new(reader),
            max_plies: DEFAULT_MAX_PLIES,
            done: false,
            board: PhantomData,
        }
    }

    pub fn with_max_plies(mut self, max_plies: usize) -> Self {
        // A cap of zero would never consume anything
        self.max_plies = max_plies.max(1);
        self
    }

    fn next_game(&mut self) -> Result<Option<ParsedGame<B::Move>>> {
        while !self.stream.is_at_end()? {
            let game = read_game::<R, B>(&mut self.stream, self.max_plies)?;
            if game.record.is_empty() {
                debug!(
                    "Skipping text without tags (line {}): {:?}",
                    self.stream.line_number(),
                    game.termination
                );
                continue;
            }
            return Ok(Some(game));
        }
        Ok(None)
    }
}

impl<R: BufRead, B: Board> Iterator for PgnReader<R, B> {
    type Item = Result<ParsedGame<B::Move>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_game() {
            Ok(Some(game)) => Some(Ok(game)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

pub fn read_pgn_file<B: Board>(
    path: &Path,
    max_plies: usize,
) -> Result<Vec<ParsedGame<B::Move>>> {
    let file =
        File::open(path).context(format!("Could not open file {}", path.to_string_lossy()))?;

    PgnReader::<_, B>::new(BufReader::new(file))
        .with_max_plies(max_plies)
        .collect()
}
