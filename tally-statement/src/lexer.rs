//! Token stream over a transaction chunk.
//!
//! A chunk is the text between two glyph delimiters, whitespace-collapsed.
//! The lexer surfaces the heuristic patterns (dates, dollar amounts) as typed
//! lexemes with byte spans so the assembly pass can slice merchant text out
//! of the raw chunk instead of re-matching.

use anyhow::Result;
use regex::Regex;

/// What a lexeme is, plus its parsed payload where there is one.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// MM/DD/YY as printed.
    Date(String),
    /// Dollar amount with `$` and thousands separators stripped.
    Amount(f64),
    /// Any run of text between recognized patterns.
    Text,
}

/// A token with its byte span in the collapsed chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

/// Chunk lexer with its patterns compiled once per extraction run.
pub struct Lexer {
    date_re: Regex,
    amount_re: Regex,
}

impl Lexer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            date_re: Regex::new(r"\d{2}/\d{2}/\d{2}")?,
            // Exactly two decimals; earlier digits may carry commas.
            amount_re: Regex::new(r"\$([0-9,]+\.[0-9]{2})")?,
        })
    }

    /// Lex one whitespace-collapsed chunk into an ordered lexeme stream.
    pub fn lex(&self, chunk: &str) -> Vec<Lexeme> {
        let mut marks: Vec<Lexeme> = Vec::new();

        for m in self.date_re.find_iter(chunk) {
            marks.push(Lexeme {
                kind: TokenKind::Date(m.as_str().to_string()),
                start: m.start(),
                end: m.end(),
            });
        }
        for caps in self.amount_re.captures_iter(chunk) {
            let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Ok(value) = digits.as_str().replace(',', "").parse::<f64>() else {
                continue;
            };
            marks.push(Lexeme {
                kind: TokenKind::Amount(value),
                start: whole.start(),
                end: whole.end(),
            });
        }

        marks.sort_by_key(|l| l.start);

        // Fill the gaps with text lexemes.
        let mut out = Vec::with_capacity(marks.len() * 2 + 1);
        let mut pos = 0;
        for mark in marks {
            if pos < mark.start {
                out.push(Lexeme {
                    kind: TokenKind::Text,
                    start: pos,
                    end: mark.start,
                });
            }
            pos = pos.max(mark.end);
            out.push(mark);
        }
        if pos < chunk.len() {
            out.push(Lexeme {
                kind: TokenKind::Text,
                start: pos,
                end: chunk.len(),
            });
        }
        out
    }
}
