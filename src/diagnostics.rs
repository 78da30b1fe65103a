use serde::Serialize;
use thiserror::Error;

/// Fatal parse failures. Anything less than this is recovered locally and
/// reported as a [`Diagnostic`] next to the assembled record.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("no 등기사항전부증명서 title line found; input is not a recognizable certificate")]
    TitleNotFound,
    #[error("title present but none of 표제부/갑구/을구/매매목록 was found")]
    NoSections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Title,
    Ownership,
    Encumbrance,
    SaleListing,
}

impl Zone {
    pub fn korean(self) -> &'static str {
        match self {
            Zone::Title => "표제부",
            Zone::Ownership => "갑구",
            Zone::Encumbrance => "을구",
            Zone::SaleListing => "매매목록",
        }
    }
}

/// Recoverable anomalies observed during a parse. These never abort the
/// document; the affected field is set to `None` (or kept verbatim) and the
/// anomaly is recorded here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A single field failed to normalize (e.g. two-digit year).
    FieldFormat {
        zone: Zone,
        rank: String,
        field: &'static str,
        raw: String,
    },
    /// A 매매목록 entry references an ownership rank that was not parsed.
    UnresolvedReference { seq: u32, rank_ref: String },
    /// Two different field labels matched the same spot at equal length;
    /// resolved by table order.
    AmbiguousLabel {
        zone: Zone,
        rank: String,
        label: String,
    },
}
