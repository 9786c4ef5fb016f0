//! tally-statement: statement-text analysis — period anchor, cardholder
//! sections, fuzzy name resolution, and transaction extraction.

pub mod extract;
pub mod lexer;
pub mod period;
pub mod sections;

pub use extract::extract_transactions;
pub use lexer::{Lexeme, Lexer, TokenKind};
pub use period::statement_period;
pub use sections::{locate_sections, resolve_name};
