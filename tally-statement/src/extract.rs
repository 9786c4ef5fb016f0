//! Transaction extraction for one cardholder's section.
//!
//! Section text after PDF-to-text looks like:
//!   JANET SMITH Card Ending 4-56789
//!   ◊ 02/20/24 COFFEE HOUSE AUSTIN TX $4.50 ◊ 02/22/24 GROCERY MART $52.10
//!
//! Transactions are glyph-delimited rather than line-delimited, and a chunk
//! may carry sub-total amounts before the real one, so the last amount in a
//! chunk wins.

use anyhow::Result;
use regex::Regex;

use crate::lexer::{Lexeme, Lexer, TokenKind};
use tally_core::{CardholderSection, StatementTransaction};

/// Lines starting with one of these end the transaction run of a section.
const SUMMARY_MARKERS: &[&str] = &[
    "FEES",
    "INTEREST CHARGED",
    "ACCOUNT SUMMARY",
    "PAYMENT INFORMATION",
    "LATE FEE",
    "TOTAL CREDIT",
    "TOTAL DEBIT",
    "ABOUT TRAILING INTEREST",
];

// Bullet/diamond glyphs separating transactions in extracted text, plus '|'.
const DELIMITER_CLASS: &str =
    "[\u{25CA}\u{2B27}\u{2B25}\u{25C6}\u{25C7}\u{29EB}\u{2B26}\u{2B29}|]+";

/// Extract transactions from the named cardholder's section, in chunk order.
///
/// The section runs from its anchor to the earliest of: the next section
/// anchor, the first summary-marker line after the anchor, or end of text.
/// Chunks without both a date and an amount are dropped silently.
pub fn extract_transactions(
    text: &str,
    target_name: &str,
    sections: &[CardholderSection],
) -> Result<Vec<StatementTransaction>> {
    let Some(target) = sections.iter().find(|s| s.name == target_name) else {
        return Ok(Vec::new());
    };

    let end = section_end(text, target.offset, sections)?;
    let section_text = &text[target.offset..end];

    let delimiter_re = Regex::new(DELIMITER_CLASS)?;
    let lexer = Lexer::new()?;

    let mut out = Vec::new();
    for chunk in delimiter_re.split(section_text) {
        if let Some(txn) = assemble(&lexer, chunk) {
            out.push(txn);
        }
    }
    Ok(out)
}

/// Earliest boundary after `start`: next section anchor, summary-marker line,
/// or end of text.
fn section_end(text: &str, start: usize, sections: &[CardholderSection]) -> Result<usize> {
    let next_section = sections
        .iter()
        .map(|s| s.offset)
        .filter(|&o| o > start)
        .min();

    let marker_re = Regex::new(&format!(
        r"(?im)^\s*(?:{})",
        SUMMARY_MARKERS.join("|")
    ))?;
    // The anchor itself can begin with a marker keyword ("FEESER JOHN ...");
    // only a marker strictly after the section start is a boundary.
    let marker = marker_re
        .find_iter(&text[start..])
        .map(|m| start + m.start())
        .find(|&p| p > start);

    Ok([next_section, marker]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(text.len()))
}

/// Assemble one transaction from a chunk's lexeme stream.
///
/// Needs the first date and the last amount; the merchant is the raw text
/// strictly between them. Chunks whose merchant text starts with
/// "CARD ENDING" are section-header fragments, not transactions.
fn assemble(lexer: &Lexer, chunk: &str) -> Option<StatementTransaction> {
    let collapsed = chunk.split_whitespace().collect::<Vec<_>>().join(" ");
    let lexemes = lexer.lex(&collapsed);

    let date = lexemes
        .iter()
        .find(|l| matches!(l.kind, TokenKind::Date(_)))?;
    let amount = lexemes
        .iter()
        .rev()
        .find(|l| matches!(l.kind, TokenKind::Amount(_)))?;

    let merchant = merchant_between(&collapsed, date, amount);
    if merchant.to_uppercase().starts_with("CARD ENDING") {
        return None;
    }

    let TokenKind::Date(ref date_str) = date.kind else {
        return None;
    };
    let TokenKind::Amount(value) = amount.kind else {
        return None;
    };

    Some(StatementTransaction {
        date: date_str.clone(),
        merchant,
        amount: value,
    })
}

fn merchant_between(collapsed: &str, date: &Lexeme, amount: &Lexeme) -> String {
    if amount.start > date.end {
        collapsed[date.end..amount.start].trim().to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::locate_sections;

    const TEXT: &str = "\
Statement of Account Closing Date 03/15/24
JANET SMITH Card Ending 4-56789
\u{25CA} 02/20/24 COFFEE HOUSE AUSTIN TX $4.50 \
\u{25CA} 02/22/24 GROCERY MART #104 $52.10 \
\u{25CA} 03/01/24 HOTEL LODGING $80.00 resort fee $12.00 $92.00 \
\u{25CA} broken line without patterns
FEES
\u{25CA} 03/02/24 LATE PAYMENT FEE $35.00
CARLOS DIAZ Card Ending 9-87654
\u{25CA} 03/05/24 TACO STAND $9.75
";

    fn extract(target: &str) -> Vec<StatementTransaction> {
        let sections = locate_sections(TEXT).unwrap();
        extract_transactions(TEXT, target, &sections).unwrap()
    }

    #[test]
    fn test_extracts_dated_amount_chunks_in_order() {
        let txns = extract("JANET SMITH");
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].date, "02/20/24");
        assert_eq!(txns[0].merchant, "COFFEE HOUSE AUSTIN TX");
        assert_eq!(txns[0].amount, 4.50);
        assert_eq!(txns[1].merchant, "GROCERY MART #104");
    }

    #[test]
    fn test_last_amount_wins_over_subtotals() {
        let txns = extract("JANET SMITH");
        assert_eq!(txns[2].amount, 92.00);
        assert_eq!(txns[2].merchant, "HOTEL LODGING $80.00 resort fee $12.00");
    }

    #[test]
    fn test_summary_marker_truncates_before_next_cardholder() {
        // The FEES line sits before CARLOS DIAZ's anchor, so the late fee
        // and Carlos's transactions are both out of Janet's section.
        let txns = extract("JANET SMITH");
        assert!(txns.iter().all(|t| t.amount != 35.00));
        assert!(txns.iter().all(|t| t.merchant != "TACO STAND"));
    }

    #[test]
    fn test_next_section_bounds_when_no_marker_intervenes() {
        let text = "\
Closing Date 03/15/24
JANET SMITH Card Ending 4-56789
\u{25CA} 02/20/24 COFFEE HOUSE $4.50
CARLOS DIAZ Card Ending 9-87654
\u{25CA} 03/05/24 TACO STAND $9.75
";
        let sections = locate_sections(text).unwrap();
        let txns = extract_transactions(text, "JANET SMITH", &sections).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].merchant, "COFFEE HOUSE");
    }

    #[test]
    fn test_chunks_missing_date_or_amount_are_dropped() {
        let txns = extract("JANET SMITH");
        assert!(txns.iter().all(|t| !t.merchant.contains("broken")));
    }

    #[test]
    fn test_card_ending_fragment_is_not_a_transaction() {
        // Delimiter boundary falling inside a header: date and amount with
        // the header text between them.
        let text = "\
Closing Date 03/15/24
JANET SMITH Card Ending 4-56789
\u{25CA} 02/19/24 Card Ending summary row $10.00
\u{25CA} 02/20/24 COFFEE HOUSE $4.50
";
        let sections = locate_sections(text).unwrap();
        let txns = extract_transactions(text, "JANET SMITH", &sections).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].merchant, "COFFEE HOUSE");
    }

    #[test]
    fn test_marker_prefixed_name_does_not_truncate_own_section() {
        // "FEESER" starts with the FEES keyword; the marker scan must not
        // treat the section's own anchor as its end.
        let text = "\
Closing Date 03/15/24
FEESER JOHN Card Ending 4-56789
\u{25CA} 02/20/24 COFFEE HOUSE $4.50 \
\u{25CA} 03/01/24 GROCERY MART $52.10
FEES
TOTAL FEES FOR THIS PERIOD $35.00
";
        let sections = locate_sections(text).unwrap();
        assert_eq!(sections[0].name, "FEESER JOHN");
        let txns = extract_transactions(text, "FEESER JOHN", &sections).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[1].merchant, "GROCERY MART");
    }

    #[test]
    fn test_unknown_target_extracts_nothing() {
        assert!(extract("NOBODY HERE").is_empty());
    }

    #[test]
    fn test_second_cardholder_section_runs_to_document_end() {
        let txns = extract("CARLOS DIAZ");
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].merchant, "TACO STAND");
        assert_eq!(txns[0].amount, 9.75);
    }
}
