use super::{Board, NotationStyle, Variant};
use anyhow::Result;

/// Rule-free board for tests.
///
/// Any token starting with a letter resolves to a move; moves starting with
/// `X` are illegal. A FEN is accepted when it has six fields, and the
/// position never changes.
#[derive(Clone, Debug)]
pub(crate) struct StubBoard {
    variant: Variant,
    random: bool,
    starting_fen: String,
    history: Vec<String>,
}

impl Board for StubBoard {
    type Move = String;

    fn with_variant(variant: Variant, random: bool) -> Result<Self> {
        Ok(StubBoard {
            variant,
            random,
            starting_fen: variant.default_fen().to_string(),
            history: Vec::new(),
        })
    }

    fn set_board(&mut self, fen: &str) -> bool {
        if fen.split_whitespace().count() != 6 {
            return false;
        }
        self.starting_fen = fen.to_string();
        self.history.clear();
        true
    }

    fn move_from_str(&self, token: &str) -> Option<String> {
        token
            .starts_with(|c: char| c.is_ascii_alphabetic())
            .then(|| token.to_string())
    }

    fn is_legal_move(&self, mv: &String) -> bool {
        !mv.starts_with('X')
    }

    fn make_move(&mut self, mv: &String) {
        self.history.push(mv.clone());
    }

    fn move_string(&self, mv: &String, style: NotationStyle) -> String {
        match style {
            NotationStyle::StandardAlgebraic => mv.clone(),
            NotationStyle::LongAlgebraic => format!("long:{}", mv),
        }
    }

    fn fen_string(&self) -> String {
        self.starting_fen.clone()
    }

    fn starting_fen(&self) -> &str {
        &self.starting_fen
    }

    fn variant(&self) -> Variant {
        self.variant
    }

    fn is_random_variant(&self) -> bool {
        self.random
    }

    fn move_history(&self) -> &[String] {
        &self.history
    }
}
