//! Cardholder section anchors and fuzzy name resolution.
//!
//! Section anchors look like:
//!   JANET SMITH Card Ending 4-56789
//!
//! The target name comes from an expense-file filename, so it arrives noisy:
//! concatenated initials, camelCase splits, leftover keywords. Resolution is
//! score-based rather than dictionary-based.

use anyhow::Result;
use regex::Regex;
use std::collections::HashSet;

use tally_core::CardholderSection;

/// Scan the full text for cardholder anchors, ascending by offset.
///
/// An empty result is valid here; the pipeline caller decides whether zero
/// sections is fatal.
pub fn locate_sections(text: &str) -> Result<Vec<CardholderSection>> {
    let re = Regex::new(r"([A-Z][A-Z ]{1,80}?)\s+Card Ending")?;
    let mut sections = Vec::new();
    for caps in re.captures_iter(text) {
        if let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) {
            sections.push(CardholderSection {
                name: name.as_str().trim().to_string(),
                offset: whole.start(),
            });
        }
    }
    sections.sort_by_key(|s| s.offset);
    Ok(sections)
}

/// Pick the section name best matching the target.
///
/// Exact match (after case/whitespace normalization) dominates all scoring.
/// Otherwise: +10 per token shared between target and candidate, +5 if either
/// normalized string contains the other, +2 per token pair where one token is
/// a prefix of the other. Highest score wins, ties to the earliest candidate
/// in document order; if nothing scores above zero the first section is the
/// fallback. `None` only when `sections` is empty.
pub fn resolve_name<'a>(target: &str, sections: &'a [CardholderSection]) -> Option<&'a str> {
    let target_norm = normalize(target);
    let target_tokens: HashSet<&str> = target_norm.split_whitespace().collect();

    for section in sections {
        if normalize(&section.name) == target_norm {
            return Some(&section.name);
        }
    }

    let mut best: Option<(u32, &str)> = None;
    for section in sections {
        let name_norm = normalize(&section.name);
        let name_tokens: HashSet<&str> = name_norm.split_whitespace().collect();

        let mut score = 0u32;
        score += 10 * target_tokens.intersection(&name_tokens).count() as u32;
        if target_norm.contains(&name_norm) || name_norm.contains(&target_norm) {
            score += 5;
        }
        for t in &target_tokens {
            for n in &name_tokens {
                if t.starts_with(n) || n.starts_with(t) {
                    score += 2;
                }
            }
        }

        // Strict > keeps the earliest candidate on ties.
        if score > 0 && best.is_none_or(|(s, _)| score > s) {
            best = Some((score, &section.name));
        }
    }

    best.map(|(_, name)| name)
        .or_else(|| sections.first().map(|s| s.name.as_str()))
}

fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}
