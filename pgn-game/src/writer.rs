use crate::board::{Board, NotationStyle, Variant, CAPABLANCA_FEN, GOTHIC_FEN};
use crate::record::GameRecord;
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Tags describing the starting position: an optional `Variant` label, and
/// whether the `FEN` tag must be written.
#[derive(Debug, PartialEq)]
pub struct VariantHeader {
    pub label: Option<&'static str>,
    pub use_fen: bool,
}

impl<M> GameRecord<M> {
    pub fn variant_header(&self) -> VariantHeader {
        let mut header = VariantHeader {
            label: None,
            use_fen: false,
        };

        match self.variant {
            Variant::Standard => {
                if self.starting_fen != Variant::Standard.default_fen() {
                    header.use_fen = true;
                }
                if self.is_random_variant {
                    header.label = Some("Fischerandom");
                }
            }
            Variant::Capablanca => {
                if self.starting_fen == CAPABLANCA_FEN {
                    header.label = Some("Capablanca");
                } else if self.starting_fen == GOTHIC_FEN {
                    header.label = Some("Gothic");
                } else {
                    header.use_fen = true;
                }
                if self.is_random_variant {
                    header.label = Some("Capablancarandom");
                }
            }
        }

        header
    }

    /// Replays the moves from the starting position, rendering each one in
    /// standard algebraic notation.
    pub fn san_moves<B>(&self) -> Result<Vec<String>>
    where
        B: Board<Move = M>,
    {
        let mut board = B::with_variant(self.variant, self.is_random_variant)?;
        if !board.set_board(&self.starting_fen) {
            bail!("Invalid starting position {}", self.starting_fen);
        }

        let mut names = Vec::with_capacity(self.moves.len());
        for mv in &self.moves {
            names.push(board.move_string(mv, NotationStyle::StandardAlgebraic));
            board.make_move(mv);
        }
        Ok(names)
    }

    /// Writes the game as PGN, dated `date`. Empty records write nothing.
    pub fn write_pgn<B, W>(&self, out: &mut W, date: NaiveDate) -> Result<()>
    where
        B: Board<Move = M>,
        W: Write,
    {
        if self.is_empty() {
            return Ok(());
        }

        let header = self.variant_header();
        let result = self.result.marker();
        let moves = self.san_moves::<B>()?;

        writeln!(out, "[Date \"{}\"]", date.format("%Y.%m.%d"))?;
        writeln!(out, "[White \"{}\"]", self.white_player)?;
        writeln!(out, "[Black \"{}\"]", self.black_player)?;
        writeln!(out, "[Result \"{}\"]", result)?;
        if let Some(label) = header.label {
            writeln!(out, "[Variant \"{}\"]", label)?;
        }
        if header.use_fen {
            writeln!(out, "[FEN \"{}\"]", self.starting_fen)?;
        }

        for (index, name) in moves.iter().enumerate() {
            if index % 8 == 0 {
                writeln!(out)?;
            }
            if index % 2 == 0 {
                write!(out, "{}. ", index / 2 + 1)?;
            }
            write!(out, "{} ", name)?;
        }
        write!(out, "{}\n\n", result)?;

        Ok(())
    }

    /// Appends the game to a PGN file, dated today.
    pub fn append_to_file<B>(&self, path: &Path) -> Result<()>
    where
        B: Board<Move = M>,
    {
        if self.is_empty() {
            return Ok(());
        }

        // Render first so that a failed replay leaves the file untouched
        let mut pgn = Vec::new();
        self.write_pgn::<B, _>(&mut pgn, Local::now().date_naive())?;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .context(format!(
                "Could not open file {} for appending",
                path.to_string_lossy()
            ))?;

        file.write_all(&pgn).context(format!(
            "Error writing PGN data to {}",
            path.to_string_lossy()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::stub::StubBoard;
    use crate::board::{StandardBoard, STANDARD_FEN};
    use crate::reader::{read_game, PgnStream};
    use crate::result::{GameResult, WinReason};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn stub_record(moves: usize) -> GameRecord<String> {
        let mut record = GameRecord::new();
        record.mark_non_empty();
        record.white_player = "Alice".to_string();
        record.black_player = "Bob".to_string();
        record.moves = (0..moves).map(|i| format!("m{}", i)).collect();
        record
    }

    fn written<B: Board>(record: &GameRecord<B::Move>) -> String {
        let mut out = Vec::new();
        record.write_pgn::<B, _>(&mut out, date()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_record_writes_nothing() {
        let record = GameRecord::<String>::new();
        assert_eq!(written::<StubBoard>(&record), "");
    }

    #[test]
    fn headers_without_moves() {
        let mut record = stub_record(0);
        record.result = GameResult::BlackWins(WinReason::Resignation);
        assert_eq!(
            written::<StubBoard>(&record),
            "[Date \"2024.03.09\"]\n\
             [White \"Alice\"]\n\
             [Black \"Bob\"]\n\
             [Result \"0-1\"]\n\
             0-1\n\n"
        );
    }

    #[test]
    fn movetext_wraps_every_eight_plies() {
        let record = stub_record(20);
        let text = written::<StubBoard>(&record);
        assert!(text.ends_with(
            "[Result \"*\"]\n\
             \n1. m0 m1 2. m2 m3 3. m4 m5 4. m6 m7 \
             \n5. m8 m9 6. m10 m11 7. m12 m13 8. m14 m15 \
             \n9. m16 m17 10. m18 m19 *\n\n"
        ));
    }

    #[test]
    fn odd_number_of_plies() {
        let record = stub_record(3);
        assert!(written::<StubBoard>(&record).ends_with("\n1. m0 m1 2. m2 *\n\n"));
    }

    #[test]
    fn standard_variant_headers() {
        let mut record = stub_record(0);
        assert_eq!(
            record.variant_header(),
            VariantHeader {
                label: None,
                use_fen: false
            }
        );

        record.starting_fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1".to_string();
        assert_eq!(
            record.variant_header(),
            VariantHeader {
                label: None,
                use_fen: true
            }
        );
        let text = written::<StubBoard>(&record);
        assert!(text.contains("[FEN \"4k3/8/8/8/8/8/4P3/4K3 w - - 0 1\"]\n"));
        assert!(!text.contains("[Variant"));

        record.starting_fen = STANDARD_FEN.to_string();
        record.is_random_variant = true;
        assert_eq!(
            record.variant_header(),
            VariantHeader {
                label: Some("Fischerandom"),
                use_fen: false
            }
        );
        let text = written::<StubBoard>(&record);
        assert!(text.contains("[Result \"*\"]\n[Variant \"Fischerandom\"]\n"));
        assert!(!text.contains("[FEN"));
    }

    #[test]
    fn capablanca_variant_headers() {
        let mut record = stub_record(0);
        record.variant = Variant::Capablanca;

        let header = |record: &GameRecord<String>| record.variant_header();

        record.starting_fen = CAPABLANCA_FEN.to_string();
        assert_eq!(header(&record).label, Some("Capablanca"));
        assert!(!header(&record).use_fen);

        record.starting_fen = GOTHIC_FEN.to_string();
        assert_eq!(header(&record).label, Some("Gothic"));
        assert!(!header(&record).use_fen);

        record.starting_fen = STANDARD_FEN.to_string();
        assert_eq!(header(&record).label, None);
        assert!(header(&record).use_fen);

        record.is_random_variant = true;
        assert_eq!(header(&record).label, Some("Capablancarandom"));
        assert!(header(&record).use_fen);

        record.starting_fen = GOTHIC_FEN.to_string();
        assert_eq!(header(&record).label, Some("Capablancarandom"));
        let text = written::<StubBoard>(&record);
        assert!(text.contains("[Variant \"Capablancarandom\"]\n"));
        assert!(!text.contains("[FEN"));
    }

    #[test]
    fn unsupported_variant_is_an_error() {
        let mut record = GameRecord::<shakmaty::Move>::new();
        record.mark_non_empty();
        record.variant = Variant::Capablanca;
        let mut out = Vec::new();
        assert!(record
            .write_pgn::<StandardBoard, _>(&mut out, date())
            .is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn standard_moves_in_algebraic_notation() {
        let mut board = StandardBoard::new();
        for token in ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"] {
            let mv = board.move_from_str(token).unwrap();
            board.make_move(&mv);
        }
        let record = GameRecord::from_game("A", "B", &board, GameResult::NoResult);

        assert_eq!(
            record.san_moves::<StandardBoard>().unwrap(),
            vec!["e4", "e5", "Nf3", "Nc6", "Bb5"]
        );
    }

    #[test]
    fn round_trip() {
        let original = "[White \"A\"]\n[Black \"B\"]\n[Result \"0-1\"]\n\
            1. f3 e5 2. g4 Qh4# 0-1";

        let mut stream = PgnStream::new(original.as_bytes());
        let parsed = read_game::<_, StandardBoard>(&mut stream, 100).unwrap().record;
        assert_eq!(parsed.moves.len(), 4);

        let text = written::<StandardBoard>(&parsed);
        assert_eq!(
            text,
            "[Date \"2024.03.09\"]\n\
             [White \"A\"]\n\
             [Black \"B\"]\n\
             [Result \"0-1\"]\n\
             \n1. f3 e5 2. g4 Qh4# 0-1\n\n"
        );

        let mut stream = PgnStream::new(text.as_bytes());
        let reparsed = read_game::<_, StandardBoard>(&mut stream, 100).unwrap().record;
        assert_eq!(reparsed.moves, parsed.moves);
        assert_eq!(reparsed.result, parsed.result);
        assert_eq!(reparsed.white_player, "A");
        assert_eq!(reparsed.black_player, "B");
    }

    #[test]
    fn append_never_truncates() {
        let path =
            std::env::temp_dir().join(format!("pgn-game-append-{}.pgn", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let record = stub_record(2);
        record.append_to_file::<StubBoard>(&path).unwrap();
        record.append_to_file::<StubBoard>(&path).unwrap();
        GameRecord::<String>::new()
            .append_to_file::<StubBoard>(&path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(content.matches("[White \"Alice\"]").count(), 2);
        assert!(content.ends_with("\n1. m0 m1 *\n\n"));
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let path = std::env::temp_dir()
            .join("pgn-game-missing-directory")
            .join("game.pgn");
        assert!(stub_record(1).append_to_file::<StubBoard>(&path).is_err());
    }
}
