mod lexer;
mod parser;
mod stream;


pub use self::lexer::{read_item, ItemError, PgnItem};
pub use self::parser::{read_game, ParsedGame, PgnReader, Termination, DEFAULT_MAX_PLIES};
pub use self::stream::PgnStream;

use crate::board::Board;
use anyhow::Result;
use std::path::Path;

pub fn read_pgn_file<B: Board>(
    pgn_file_path: &Path,
    max_plies: usize,
) -> Result<Vec<ParsedGame<B::Move>>> {
    parser::read_pgn_file::<B>(pgn_file_path, max_plies)
}
