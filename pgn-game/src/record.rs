use crate::board::{Board, Variant};
use crate::result::GameResult;

/// A game as read from, or written to, PGN.
#[derive(Clone, Debug, PartialEq)]
pub struct GameRecord<M> {
    pub white_player: String,
    pub black_player: String,
    pub moves: Vec<M>,
    pub starting_fen: String,
    pub variant: Variant,
    pub is_random_variant: bool,
    pub result: GameResult,
    pub round: u32,
    empty: bool,
}

impl<M> GameRecord<M> {
    pub fn new() -> GameRecord<M> {
        GameRecord {
            white_player: String::new(),
            black_player: String::new(),
            moves: Vec::new(),
            starting_fen: Variant::Standard.default_fen().to_string(),
            variant: Variant::Standard,
            is_random_variant: false,
            result: GameResult::NoResult,
            round: 0,
            empty: true,
        }
    }

    /// Copies a finished game so it can be written out.
    pub fn from_game<B>(white: &str, black: &str, board: &B, result: GameResult) -> GameRecord<M>
    where
        B: Board<Move = M>,
        M: Clone,
    {
        GameRecord {
            white_player: white.to_string(),
            black_player: black.to_string(),
            moves: board.move_history().to_vec(),
            starting_fen: board.starting_fen().to_string(),
            variant: board.variant(),
            is_random_variant: board.is_random_variant(),
            result,
            round: 0,
            empty: false,
        }
    }

    /// No tag has been read into this record.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub(crate) fn mark_non_empty(&mut self) {
        self.empty = false;
    }
}

impl<M> Default for GameRecord<M> {
    fn default() -> Self {
        GameRecord::new()
    }
}
