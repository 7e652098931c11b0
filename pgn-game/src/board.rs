// Board collaborators
mod standard;
#[cfg(test)]
pub(crate) mod stub;

pub use standard::StandardBoard;

use anyhow::Result;
use std::fmt;

pub const STANDARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const CAPABLANCA_FEN: &str =
    "rnabqkbcnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNABQKBCNR w KQkq - 0 1";
pub const GOTHIC_FEN: &str =
    "rnbqckabnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNBQCKABNR w KQkq - 0 1";

#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Variant {
    #[default]
    Standard,
    /// 10x8 board with archbishops and chancellors
    Capablanca,
}

impl Variant {
    pub fn default_fen(&self) -> &'static str {
        match self {
            Variant::Standard => STANDARD_FEN,
            Variant::Capablanca => CAPABLANCA_FEN,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                Variant::Standard => "standard",
                Variant::Capablanca => "capablanca",
            }
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NotationStyle {
    /// Short algebraic notation, e.g. `Nf3`
    StandardAlgebraic,
    /// Coordinate notation, e.g. `g1f3`
    LongAlgebraic,
}

/// Rules engine consumed by the reader and the writer.
///
/// The PGN code never looks inside a move: it only resolves tokens into
/// moves, checks them, plays them and renders them back to text.
pub trait Board
where
    Self: Sized,
{
    type Move: Clone + PartialEq + fmt::Debug;

    /// A board at the standard initial position of `variant`.
    fn with_variant(variant: Variant, random: bool) -> Result<Self>;

    /// Replaces the position; returns `false` if the FEN is rejected.
    fn set_board(&mut self, fen: &str) -> bool;

    /// Resolves a textual move in the current position.
    fn move_from_str(&self, token: &str) -> Option<Self::Move>;
    fn is_legal_move(&self, mv: &Self::Move) -> bool;
    fn make_move(&mut self, mv: &Self::Move);
    fn move_string(&self, mv: &Self::Move, style: NotationStyle) -> String;

    fn fen_string(&self) -> String;
    fn starting_fen(&self) -> &str;
    fn variant(&self) -> Variant;
    fn is_random_variant(&self) -> bool;
    fn move_history(&self) -> &[Self::Move];
}
