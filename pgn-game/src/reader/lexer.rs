use super::stream::PgnStream;
use crate::board::Board;
use crate::record::GameRecord;
use crate::result::GameResult;
use anyhow::Result;
use log::{debug, warn};
use nom::bytes::complete::take_till;
use nom::character::complete::char;
use nom::combinator::{opt, rest};
use nom::sequence::{preceded, tuple};
use nom::IResult;
use std::fmt;
use std::io::BufRead;

/// One semantic unit of PGN text.
#[derive(Clone, Debug, PartialEq)]
pub enum PgnItem {
    Tag { name: String, value: String },
    Move(String),
    MoveNumber(String),
    Comment(String),
    Nag(u8),
    Result(GameResult),
    Error(ItemError),
}

/// Why an item could not be read. All of them end the current game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ItemError {
    /// A tag after the moves: the stream was rewound onto its `[`, which
    /// starts the next game.
    NextRecord,
    EmptyItem,
    InvalidFen(String),
    IllegalMove(String),
    InvalidNag(String),
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ItemError::NextRecord => write!(f, "No termination marker"),
            ItemError::EmptyItem => write!(f, "Empty item"),
            ItemError::InvalidFen(fen) => write!(f, "Invalid FEN: {}", fen),
            ItemError::IllegalMove(mv) => write!(f, "Illegal move: {}", mv),
            ItemError::InvalidNag(nag) => write!(f, "Invalid NAG: {}", nag),
        }
    }
}

impl std::error::Error for ItemError {}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ItemKind {
    Move,
    MoveNumber,
    Nag,
    Tag,
    Comment,
}

#[derive(Copy, Clone, Debug)]
enum ScanState {
    /// No bracket open yet
    Open(ItemKind),
    Bracketed {
        kind: ItemKind,
        open: char,
        close: char,
        level: u32,
    },
}

impl ScanState {
    fn kind(&self) -> ItemKind {
        match self {
            ScanState::Open(kind) => *kind,
            ScanState::Bracketed { kind, .. } => *kind,
        }
    }
}

fn opening_bracket(c: char) -> Option<(ItemKind, char)> {
    match c {
        '[' => Some((ItemKind::Tag, ']')),
        '(' => Some((ItemKind::Comment, ')')),
        '{' => Some((ItemKind::Comment, '}')),
        _ => None,
    }
}

/// Tag name up to the first space, then everything else.
fn tag_body(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    tuple((take_till(|c: char| c == ' '), opt(preceded(char(' '), rest))))(input)
}

/// Reads the next item, updating the board and the record on the way.
pub fn read_item<R, B>(
    stream: &mut PgnStream<R>,
    board: &mut B,
    record: &mut GameRecord<B::Move>,
) -> Result<PgnItem>
where
    R: BufRead,
    B: Board,
{
    stream.skip_whitespace()?;

    let mut state = ScanState::Open(ItemKind::Move);
    let mut text = String::new();

    while let Some(c) = stream.next_char()? {
        // Anything before the first tag is noise
        if record.is_empty() && state.kind() != ItemKind::Tag && c != '[' {
            continue;
        }
        if (c == '\n' || c == '\r') && state.kind() != ItemKind::Comment {
            break;
        }

        if let ScanState::Open(kind) = state {
            if text.is_empty() {
                match c {
                    // Rest of the line comment
                    ';' => {
                        state = ScanState::Open(ItemKind::Comment);
                        text = stream.read_line()?;
                        break;
                    }
                    // Escape mechanism, skip the line
                    '%' => {
                        stream.read_line()?;
                        continue;
                    }
                    '.' => {
                        stream.skip_whitespace()?;
                        continue;
                    }
                    '$' => {
                        state = ScanState::Open(ItemKind::Nag);
                        continue;
                    }
                    _ if c.is_ascii_digit() && kind == ItemKind::Move => {
                        state = ScanState::Open(ItemKind::MoveNumber);
                    }
                    _ => (),
                }
            }

            if let Some((kind, close)) = opening_bracket(c) {
                if kind == ItemKind::Tag && !record.moves.is_empty() {
                    stream.unread();
                    debug!("No termination marker (line {})", stream.line_number());
                    return Ok(PgnItem::Error(ItemError::NextRecord));
                }

                state = ScanState::Bracketed {
                    kind,
                    open: c,
                    close,
                    level: 0,
                };
            }
        }

        match &mut state {
            ScanState::Bracketed {
                open, close, level, ..
            } => {
                if c == *open {
                    *level += 1;
                } else if c == *close {
                    *level -= 1;
                    if *level == 0 {
                        break;
                    }
                } else {
                    text.push(c);
                }
            }
            ScanState::Open(kind) => {
                let ends_token = match kind {
                    ItemKind::Move | ItemKind::Nag => c.is_whitespace(),
                    ItemKind::MoveNumber => c.is_whitespace() || c == '.',
                    _ => false,
                };
                if ends_token {
                    break;
                }
                text.push(c);
            }
        }
    }

    let text = text.trim();
    if text.is_empty() {
        return Ok(PgnItem::Error(ItemError::EmptyItem));
    }

    let kind = state.kind();
    if (kind == ItemKind::Move || kind == ItemKind::MoveNumber) && GameResult::is_marker(text) {
        let result = GameResult::from_marker(text);
        if record.result != GameResult::NoResult && result != record.result {
            warn!(
                "The termination marker {} is different from the result tag {}",
                result, record.result
            );
        }
        record.result = result;
        return Ok(PgnItem::Result(result));
    }

    match kind {
        ItemKind::Tag => read_tag(text, board, record),
        ItemKind::Move => read_move(text, board, record),
        ItemKind::MoveNumber => Ok(PgnItem::MoveNumber(text.to_string())),
        ItemKind::Comment => Ok(PgnItem::Comment(text.to_string())),
        ItemKind::Nag => match text.parse::<u8>() {
            Ok(nag) => Ok(PgnItem::Nag(nag)),
            Err(_) => {
                warn!("Invalid NAG: {}", text);
                Ok(PgnItem::Error(ItemError::InvalidNag(text.to_string())))
            }
        },
    }
}

fn read_tag<B: Board>(
    text: &str,
    board: &mut B,
    record: &mut GameRecord<B::Move>,
) -> Result<PgnItem> {
    let (name, value) = match tag_body(text) {
        Ok((_, (name, value))) => (name, value.unwrap_or_default().replace('"', "")),
        Err(_) => (text, String::new()),
    };

    match name {
        "White" => record.white_player = value.clone(),
        "Black" => record.black_player = value.clone(),
        "Result" => {
            record.result = GameResult::from_marker(&value);
            if record.result == GameResult::Error {
                warn!("Invalid result: {}", value);
            }
        }
        "FEN" => {
            record.starting_fen = value.clone();
            if !board.set_board(&value) {
                warn!("Invalid FEN: {}", value);
                return Ok(PgnItem::Error(ItemError::InvalidFen(value)));
            }
        }
        _ => (),
    }

    Ok(PgnItem::Tag {
        name: name.to_string(),
        value,
    })
}

/// Only reached once a tag was read, any text before it is skipped as noise.
fn read_move<B: Board>(
    text: &str,
    board: &mut B,
    record: &mut GameRecord<B::Move>,
) -> Result<PgnItem> {
    match board.move_from_str(text) {
        Some(mv) if board.is_legal_move(&mv) => {
            board.make_move(&mv);
            record.moves.push(mv);
            Ok(PgnItem::Move(text.to_string()))
        }
        _ => {
            warn!("Illegal move: {}", text);
            Ok(PgnItem::Error(ItemError::IllegalMove(text.to_string())))
        }
    }
}
