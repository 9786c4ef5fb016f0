//! Derive a person name from an expense-file filename.
//!
//! Upload pipelines prepend timestamps and users name files however they
//! like ("20251021_122023_JanetS_Expenses.xlsx"), so this is a heuristic
//! cleanup chain, not a parse.

use anyhow::Result;
use regex::Regex;

/// Reduce a filename to the person name embedded in it.
pub fn derive_name_from_filename(filename: &str) -> Result<String> {
    // Timestamp prefix from the upload layer, e.g. "20251021_122023_".
    let name = Regex::new(r"^\d{8}_\d{6}_")?.replace(filename, "");
    let name = Regex::new(r"(?i)\.(xlsx|xls|csv)$")?.replace(&name, "");
    // camelCase boundary: "JanetS" -> "Janet S".
    let name = Regex::new(r"([a-z])([A-Z])")?.replace_all(&name, "$1 $2");
    let name = name.replace(['_', '-'], " ");
    let name = Regex::new(r"(?i)\s*\b(Expenses|Report)\b\s*")?.replace_all(&name, " ");
    let name = Regex::new(r"[^a-zA-Z0-9\s]")?.replace_all(&name, "");
    Ok(name.split_whitespace().collect::<Vec<_>>().join(" "))
}
