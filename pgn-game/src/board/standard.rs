use super::{Board, NotationStyle, Variant};
use anyhow::{bail, Result};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position};

/// Standard chess (and its shuffled start) on top of shakmaty.
#[derive(Clone, Debug)]
pub struct StandardBoard {
    position: Chess,
    mode: CastlingMode,
    starting_fen: String,
    history: Vec<Move>,
}

fn fen_of(position: &Chess) -> String {
    Fen::from_position(position.clone(), EnPassantMode::Legal).to_string()
}

impl StandardBoard {
    pub fn new() -> StandardBoard {
        let position = Chess::default();
        StandardBoard {
            starting_fen: fen_of(&position),
            position,
            mode: CastlingMode::Standard,
            history: Vec::new(),
        }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }
}

impl Default for StandardBoard {
    fn default() -> Self {
        StandardBoard::new()
    }
}

impl Board for StandardBoard {
    type Move = Move;

    fn with_variant(variant: Variant, random: bool) -> Result<Self> {
        if variant != Variant::Standard {
            bail!("Variant {} is not supported by the standard board", variant);
        }

        let mut board = StandardBoard::new();
        if random {
            board.mode = CastlingMode::Chess960;
        }
        Ok(board)
    }

    fn set_board(&mut self, fen: &str) -> bool {
        let Ok(parsed) = fen.parse::<Fen>() else {
            return false;
        };
        match parsed.into_position::<Chess>(self.mode) {
            Ok(position) => {
                self.position = position;
                self.starting_fen = fen.to_string();
                self.history.clear();
                true
            }
            Err(_) => false,
        }
    }

    fn move_from_str(&self, token: &str) -> Option<Move> {
        if let Ok(san) = token.parse::<SanPlus>() {
            if let Ok(mv) = san.san.to_move(&self.position) {
                return Some(mv);
            }
        }

        // Coordinate notation, e.g. "e2e4" or "e7e8q"
        let uci = token.parse::<UciMove>().ok()?;
        uci.to_move(&self.position).ok()
    }

    fn is_legal_move(&self, mv: &Move) -> bool {
        self.position.is_legal(mv)
    }

    fn make_move(&mut self, mv: &Move) {
        self.position.play_unchecked(mv);
        self.history.push(mv.clone());
    }

    fn move_string(&self, mv: &Move, style: NotationStyle) -> String {
        match style {
            NotationStyle::StandardAlgebraic => {
                SanPlus::from_move(self.position.clone(), mv).to_string()
            }
            NotationStyle::LongAlgebraic => UciMove::from_move(mv, self.mode).to_string(),
        }
    }

    fn fen_string(&self) -> String {
        fen_of(&self.position)
    }

    fn starting_fen(&self) -> &str {
        &self.starting_fen
    }

    fn variant(&self) -> Variant {
        Variant::Standard
    }

    fn is_random_variant(&self) -> bool {
        self.mode == CastlingMode::Chess960
    }

    fn move_history(&self) -> &[Move] {
        &self.history
    }
}
