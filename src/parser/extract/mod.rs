pub mod encumbrance;
pub mod header;
pub mod ownership;
pub mod sale_listing;
pub mod title;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::diagnostics::{Diagnostic, Zone};
use crate::parser::fields::{DateMatch, DateResult};
use crate::parser::sections::Sections;
use crate::parser::strike::StrikeIndicators;
use crate::record::DocumentRecord;

static BUILDING_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("단독주택|아파트|연립주택|다세대주택|오피스텔|상가").unwrap()
});

/// Composes the final record from the split zones. Every schema field not
/// populated during parsing stays `None`; a document with no 을구 or no
/// 매매목록 is a complete, valid output.
pub fn assemble(
    normalized: &str,
    sections: &Sections,
    strikes: &StrikeIndicators,
) -> (DocumentRecord, Vec<Diagnostic>) {
    let mut diags = Vec::new();

    let head = header::extract(&sections.header);
    let title_rows = title::extract(&sections.title, strikes, &mut diags);
    let ownership_rows = ownership::extract(&sections.ownership, strikes, &mut diags);
    let encumbrance_rows = encumbrance::extract(&sections.encumbrance, strikes, &mut diags);

    let ranks: HashSet<&str> = ownership_rows.iter().map(|r| r.rank.as_str()).collect();
    let sale = sale_listing::extract(&sections.sale_listing, strikes, &ranks, &mut diags);

    let record = DocumentRecord {
        title: head.title,
        subtitle: head.subtitle,
        registry_number: head.registry_number,
        address: head.address,
        building_type: BUILDING_TYPE_RE
            .find(normalized)
            .map(|m| m.as_str().to_string()),
        title_rows,
        ownership_rows,
        encumbrance_rows,
        sale_listing: sale,
    };
    (record, diags)
}

/// Converts a date outcome into the stored field, downgrading malformed
/// tokens to `None` plus a diagnostic. The row and document proceed
/// unaffected.
pub(super) fn resolve_date(
    result: Option<DateResult>,
    zone: Zone,
    rank: &str,
    field: &'static str,
    diags: &mut Vec<Diagnostic>,
) -> Option<String> {
    match result {
        Some(DateResult::Parsed(d)) => Some(d),
        Some(DateResult::Malformed(raw)) => {
            warn!(zone = zone.korean(), rank, field, raw, "unparseable date kept as null");
            diags.push(Diagnostic::FieldFormat {
                zone,
                rank: rank.to_string(),
                field,
                raw,
            });
            None
        }
        None => None,
    }
}

/// `text` with the matched date spans removed and spacing re-collapsed.
pub(super) fn without_dates(text: &str, dates: &[DateMatch]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for m in dates {
        out.push_str(&text[cursor..m.range.start]);
        cursor = m.range.end;
    }
    out.push_str(&text[cursor..]);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(super) fn push_clean(parts: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}

// ── Tests ──
