//! Splits a command line into words.
//!
//! Words are separated by blanks. Single quotes keep their content verbatim.
//! Double quotes honor `\"`, `\\`, `\n` (line feed) and `\t` (tab); any other
//! backslash stays as typed. Outside quotes a backslash escapes the next
//! character. Quotes may appear in the middle of a word (`a"b c"d` is the
//! single word `ab cd`).

use thiserror::Error;

/// Errors that can occur while splitting a line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexingError {
    /// A closing quote (single or double) was not found.
    #[error("unfinished quote")]
    UnfinishedQuote,
    /// The line ended right after a backslash.
    #[error("dangling escape at end of line")]
    DanglingEscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexingState {
    Start,
    ReadingWord,
    ReadingSingleQuote,
    ReadingDoubleQuote,
}

struct LexingFSM<'a> {
    input: std::str::Chars<'a>,
    state: LexingState,
    // `""` is a word even though nothing gets buffered.
    in_word: bool,
    buffer: String,
}

impl<'a> LexingFSM<'a> {
    fn new(line: &'a str) -> Self {
        LexingFSM {
            input: line.chars(),
            state: LexingState::Start,
            in_word: false,
            buffer: String::new(),
        }
    }

    fn make_words(mut self) -> Result<Vec<String>, LexingError> {
        let mut out = Vec::new();

        while let Some(ch) = self.input.next() {
            match self.state {
                LexingState::Start | LexingState::ReadingWord => self.handle_word(ch, &mut out)?,
                LexingState::ReadingSingleQuote => self.handle_single_quote(ch),
                LexingState::ReadingDoubleQuote => self.handle_double_quote(ch)?,
            }
        }

        match self.state {
            LexingState::ReadingSingleQuote | LexingState::ReadingDoubleQuote => {
                return Err(LexingError::UnfinishedQuote);
            }
            _ => {}
        }

        self.finish_word(&mut out);
        Ok(out)
    }

    fn finish_word(&mut self, out: &mut Vec<String>) {
        if self.in_word {
            out.push(std::mem::take(&mut self.buffer));
            self.in_word = false;
        }
    }

    fn escaped(&mut self) -> Result<char, LexingError> {
        self.input.next().ok_or(LexingError::DanglingEscape)
    }

    fn handle_word(&mut self, ch: char, out: &mut Vec<String>) -> Result<(), LexingError> {
        match ch {
            ' ' | '\t' => {
                self.finish_word(out);
                self.state = LexingState::Start;
                return Ok(());
            }
            '\'' => self.state = LexingState::ReadingSingleQuote,
            '"' => self.state = LexingState::ReadingDoubleQuote,
            '\\' => {
                let c = self.escaped()?;
                self.buffer.push(c);
                self.state = LexingState::ReadingWord;
            }
            c => {
                self.buffer.push(c);
                self.state = LexingState::ReadingWord;
            }
        }
        self.in_word = true;
        Ok(())
    }

    fn handle_single_quote(&mut self, ch: char) {
        match ch {
            '\'' => self.state = LexingState::ReadingWord,
            c => self.buffer.push(c),
        }
    }

    fn handle_double_quote(&mut self, ch: char) -> Result<(), LexingError> {
        match ch {
            '"' => self.state = LexingState::ReadingWord,
            '\\' => {
                match self.escaped()? {
                    'n' => self.buffer.push('\n'),
                    't' => self.buffer.push('\t'),
                    c @ ('"' | '\\') => self.buffer.push(c),
                    c => {
                        self.buffer.push('\\');
                        self.buffer.push(c);
                    }
                }
            }
            c => self.buffer.push(c),
        }
        Ok(())
    }
}

/// Splits `line` into words, resolving quotes and escapes.
pub fn split_into_words(line: &str) -> Result<Vec<String>, LexingError> {
    LexingFSM::new(line).make_words()
}
