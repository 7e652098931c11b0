pub mod board;
pub mod reader;
pub mod record;
pub mod result;
pub mod writer;

pub use board::{Board, NotationStyle, StandardBoard, Variant};
pub use reader::{
    read_pgn_file, ItemError, ParsedGame, PgnItem, PgnReader, PgnStream, Termination,
};
pub use record::GameRecord;
pub use result::{DrawReason, GameResult, WinReason};
