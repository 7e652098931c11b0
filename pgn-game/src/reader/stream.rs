use anyhow::Result;
use std::io::BufRead;

/// Character source for the lexer, buffered one line at a time.
///
/// The last character read can always be pushed back with [`unread`],
/// since it belongs to the line in the buffer.
///
/// [`unread`]: PgnStream::unread
pub struct PgnStream<R> {
    reader: R,
    line: Vec<char>,
    pos: usize,
    line_number: u32,
    eof: bool,
}

impl<R: BufRead> PgnStream<R> {
    pub fn new(reader: R) -> PgnStream<R> {
        PgnStream {
            reader,
            line: Vec::new(),
            pos: 0,
            line_number: 0,
            eof: false,
        }
    }

    fn fill(&mut self) -> Result<bool> {
        while self.pos >= self.line.len() {
            if self.eof {
                return Ok(false);
            }

            let mut bytes = Vec::new();
            if self.reader.read_until(b'\n', &mut bytes)? == 0 {
                self.eof = true;
                return Ok(false);
            }

            self.line = String::from_utf8_lossy(&bytes).chars().collect();
            self.pos = 0;
            self.line_number += 1;
        }
        Ok(true)
    }

    pub fn next_char(&mut self) -> Result<Option<char>> {
        if !self.fill()? {
            return Ok(None);
        }
        let c = self.line[self.pos];
        self.pos += 1;
        Ok(Some(c))
    }

    pub fn peek_char(&mut self) -> Result<Option<char>> {
        if !self.fill()? {
            return Ok(None);
        }
        Ok(Some(self.line[self.pos]))
    }

    /// Steps back over the last character read.
    pub fn unread(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    pub fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(c) = self.peek_char()? {
            if !c.is_whitespace() {
                break;
            }
            self.pos += 1;
        }
        Ok(())
    }

    /// Rest of the current line, without its terminator.
    pub fn read_line(&mut self) -> Result<String> {
        let rest: String = self.line[self.pos.min(self.line.len())..].iter().collect();
        self.pos = self.line.len();
        Ok(rest.trim_end_matches(['\n', '\r']).to_string())
    }

    pub fn is_at_end(&mut self) -> Result<bool> {
        Ok(!self.fill()?)
    }

    /// Number of the buffered line, starting at 1.
    pub fn line_number(&self) -> u32 {
        self.line_number
    }
}
