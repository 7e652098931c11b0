use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::all_consuming;
use nom::IResult;
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WinReason {
    Checkmate,
    Resignation,
    /// Read from a termination marker, which does not say why
    Unspecified,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    Repetition,
    FiftyMoves,
    Agreement,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum GameResult {
    #[default]
    NoResult,
    WhiteWins(WinReason),
    BlackWins(WinReason),
    Draw(DrawReason),
    /// A result tag that could not be parsed
    Error,
}

fn termination_marker(input: &str) -> IResult<&str, &str> {
    alt((tag("1-0"), tag("0-1"), tag("1/2-1/2"), tag("*")))(input)
}

impl GameResult {
    pub fn from_marker(marker: &str) -> GameResult {
        match all_consuming(termination_marker)(marker) {
            Ok((_, "*")) => GameResult::NoResult,
            Ok((_, "1-0")) => GameResult::WhiteWins(WinReason::Unspecified),
            Ok((_, "0-1")) => GameResult::BlackWins(WinReason::Unspecified),
            Ok((_, "1/2-1/2")) => GameResult::Draw(DrawReason::Agreement),
            _ => GameResult::Error,
        }
    }

    pub fn is_marker(token: &str) -> bool {
        all_consuming(termination_marker)(token).is_ok()
    }

    pub fn marker(&self) -> &'static str {
        match self {
            GameResult::WhiteWins(_) => "1-0",
            GameResult::BlackWins(_) => "0-1",
            GameResult::Draw(_) => "1/2-1/2",
            GameResult::NoResult | GameResult::Error => "*",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}
