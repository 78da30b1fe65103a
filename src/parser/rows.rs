use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Zone;
use crate::parser::strike::StrikeIndicators;

// A row opens at a line whose leading token is a rank: an integer,
// optionally extended with a hyphenated sub-entry number ("3", "2-1").
static ROW_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}(?:-\d{1,3})?)(?:\s+(.*))?$").unwrap());

/// One segmented row: rank token, cleaned text, and whether strike markup
/// was present in the raw fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub rank: String,
    pub text: String,
    pub cancelled: bool,
}

/// Splits a zone span into a prelude (caption lines before the first rank
/// token, which the sale-listing linker still needs) and its rows. Lines
/// are assigned once and never move across row boundaries.
pub fn segment_rows(lines: &[String], strikes: &StrikeIndicators) -> (String, Vec<RawRow>) {
    let mut prelude: Vec<&str> = Vec::new();
    let mut rows: Vec<RawRow> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(caps) = ROW_START_RE.captures(trimmed) {
            if let Some((rank, body)) = current.take() {
                rows.push(finish_row(rank, body, strikes));
            }
            let rest = caps.get(2).map(|m| m.as_str().to_string());
            current = Some((caps[1].to_string(), rest.into_iter().collect()));
            continue;
        }
        match current.as_mut() {
            Some((_, body)) => body.push(trimmed.to_string()),
            None => prelude.push(trimmed),
        }
    }
    if let Some((rank, body)) = current.take() {
        rows.push(finish_row(rank, body, strikes));
    }

    (prelude.join("\n"), rows)
}

fn finish_row(rank: String, body: Vec<String>, strikes: &StrikeIndicators) -> RawRow {
    let raw = body.join(" ");
    let (text, cancelled) = strikes.apply(&raw);
    RawRow { rank, text, cancelled }
}

/// Per-zone dictionary of field labels. Aliases are written space-free;
/// matching compacts the row text, so any source spacing inside a label is
/// tolerated. Table order is the fixed priority for equal-length ties.
pub struct LabelTable {
    pub zone: Zone,
    pub aliases: &'static [(&'static str, &'static str)],
}

/// Result of the label scan over one row.
#[derive(Debug, Default)]
pub struct ScannedRow {
    /// Text before the first recognized label (positional columns live here).
    pub leading: String,
    /// `(field key, value)` in source order; one label may repeat.
    pub fields: Vec<(&'static str, String)>,
    /// Labels that tied at equal length with a different field; first table
    /// entry won.
    pub ambiguous: Vec<String>,
}

impl ScannedRow {
    /// First non-empty value for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, v)| *k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.fields
            .iter()
            .filter(move |(k, v)| *k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }
}

/// Greedy longest-alias scan. Fields in a row carry no fixed order and no
/// column grid; every label occurrence opens a field whose value runs to
/// the next label (or row end). A label with nothing after it yields an
/// empty value, which readers treat as absent.
pub fn scan_fields(text: &str, table: &LabelTable) -> ScannedRow {
    // Compact view with a map back to byte offsets in `text`.
    let chars: Vec<(usize, char)> = text
        .char_indices()
        .filter(|(_, c)| !c.is_whitespace())
        .collect();

    let mut scanned = ScannedRow::default();
    let mut matches: Vec<(usize, usize, &'static str)> = Vec::new(); // compact start/end, key
    let mut i = 0;
    while i < chars.len() {
        let mut best: Option<(usize, &'static str, &'static str)> = None; // len, key, alias
        for (alias, key) in table.aliases {
            let len = alias.chars().count();
            if i + len > chars.len() {
                continue;
            }
            let here = chars[i..i + len].iter().map(|(_, c)| *c).eq(alias.chars());
            if !here {
                continue;
            }
            match best {
                None => best = Some((len, key, alias)),
                Some((blen, bkey, _)) => {
                    if len > blen {
                        best = Some((len, key, alias));
                    } else if len == blen && *key != bkey {
                        // Equal-length tie between different fields: keep the
                        // earlier table entry, record the loser.
                        scanned.ambiguous.push(alias.to_string());
                    }
                }
            }
        }
        if let Some((len, key, _)) = best {
            matches.push((i, i + len, key));
            i += len;
        } else {
            i += 1;
        }
    }

    let byte_at = |compact_idx: usize| -> usize {
        if compact_idx < chars.len() {
            chars[compact_idx].0
        } else {
            text.len()
        }
    };

    scanned.leading = match matches.first() {
        Some(&(start, _, _)) => text[..byte_at(start)].trim().to_string(),
        None => text.trim().to_string(),
    };
    for (idx, &(_, end, key)) in matches.iter().enumerate() {
        let value_start = byte_at(end);
        let value_end = match matches.get(idx + 1) {
            Some(&(next_start, _, _)) => byte_at(next_start),
            None => text.len(),
        };
        let value = text[value_start..value_end]
            .trim()
            .trim_start_matches(':')
            .trim()
            .to_string();
        scanned.fields.push((key, value));
    }
    scanned
}

// ── Tests ──
