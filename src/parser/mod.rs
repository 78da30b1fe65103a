pub mod extract;
pub mod fields;
pub mod normalize;
pub mod rows;
pub mod sections;
pub mod strike;

use tracing::debug;

use crate::diagnostics::{Diagnostic, StructureError};
use crate::record::DocumentRecord;
use strike::StrikeIndicators;

/// Outcome of a successful parse. Recoverable problems do not abort the
/// run; they accumulate here next to the record they describe.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub record: DocumentRecord,
    pub diagnostics: Vec<Diagnostic>,
}

/// Four-pass pipeline: raw text → normalized lines → zone spans → rows →
/// assembled record.
pub fn parse_certificate(text: &str) -> Result<Parsed, StructureError> {
    parse_certificate_with(text, &StrikeIndicators::default())
}

pub fn parse_certificate_with(
    text: &str,
    strikes: &StrikeIndicators,
) -> Result<Parsed, StructureError> {
    let normalized = normalize::normalize(text);
    let split = sections::split_sections(&normalized)?;
    debug!(
        title_lines = split.title.len(),
        ownership_lines = split.ownership.len(),
        encumbrance_lines = split.encumbrance.len(),
        sale_listing_lines = split.sale_listing.len(),
        "zones split"
    );
    let (record, diagnostics) = extract::assemble(&normalized, &split, strikes);
    debug!(
        ownership_rows = record.ownership_rows.len(),
        encumbrance_rows = record.encumbrance_rows.len(),
        diagnostics = diagnostics.len(),
        "record assembled"
    );
    Ok(Parsed { record, diagnostics })
}

// ── Tests ──
