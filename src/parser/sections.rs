use strsim::levenshtein;
use tracing::debug;

use crate::diagnostics::StructureError;

/// The four document zones plus the leading header block, as line spans.
/// A zone that never appears keeps an empty span; repeated occurrences of
/// one header (page breaks) are concatenated in source order.
#[derive(Debug, Default)]
pub struct Sections {
    pub header: Vec<String>,
    pub title: Vec<String>,
    pub ownership: Vec<String>,
    pub encumbrance: Vec<String>,
    pub sale_listing: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoneKind {
    Title,
    Ownership,
    Encumbrance,
    SaleListing,
}

const ZONE_NAMES: &[(&str, ZoneKind)] = &[
    ("표제부", ZoneKind::Title),
    ("갑구", ZoneKind::Ownership),
    ("을구", ZoneKind::Encumbrance),
    ("매매목록", ZoneKind::SaleListing),
];

/// Partitions normalized text into zones. Fatal only when the title line is
/// unrecognizable, or when the title exists but not a single zone header
/// does — everything else degrades to empty spans.
pub fn split_sections(normalized: &str) -> Result<Sections, StructureError> {
    let mut sections = Sections::default();
    let mut current: Option<ZoneKind> = None;
    let mut any_zone = false;
    let mut title_found = false;

    for line in normalized.lines() {
        if let Some(kind) = zone_header(line) {
            debug!(header = line, "zone header matched");
            current = Some(kind);
            any_zone = true;
            continue;
        }
        match current {
            None => {
                if !title_found && is_title_line(line) {
                    title_found = true;
                }
                sections.header.push(line.to_string());
            }
            Some(ZoneKind::Title) => sections.title.push(line.to_string()),
            Some(ZoneKind::Ownership) => sections.ownership.push(line.to_string()),
            Some(ZoneKind::Encumbrance) => sections.encumbrance.push(line.to_string()),
            Some(ZoneKind::SaleListing) => sections.sale_listing.push(line.to_string()),
        }
    }

    if !title_found {
        return Err(StructureError::TitleNotFound);
    }
    if !any_zone {
        return Err(StructureError::NoSections);
    }
    Ok(sections)
}

/// Header lines look like `【 표 제 부 】 (건물의 표시)`; brackets and
/// spacing vary with the extractor, and OCR may corrupt a glyph. Matching
/// strips decoration and tolerates edit distance 1 on names of three or
/// more syllables (two-syllable 갑구/을구 must match exactly).
fn zone_header(line: &str) -> Option<ZoneKind> {
    let compact = compact(line);
    if compact.is_empty() {
        return None;
    }
    let decorated = line.contains('【') || line.contains('】');
    for (name, kind) in ZONE_NAMES {
        let want_len = name.chars().count();
        let head: String = compact.chars().take(want_len).collect();
        if head.chars().count() < want_len {
            continue;
        }
        let max = if want_len > 2 { 1 } else { 0 };
        if levenshtein(&head, name) > max {
            continue;
        }
        // A body line that merely mentions a zone ("갑구 3번…") is not a
        // header; require bracket decoration or a short caption-like line.
        if decorated || compact.chars().count() <= want_len + 12 {
            return Some(*kind);
        }
    }
    None
}

pub(crate) fn is_title_line(line: &str) -> bool {
    let compact = compact(line);
    fuzzy_contains(&compact, "등기사항전부증명서", 1)
        || fuzzy_contains(&compact, "등기사항일부증명서", 1)
}

fn compact(line: &str) -> String {
    line.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '【' | '】' | '[' | ']' | '(' | ')'))
        .collect()
}

fn fuzzy_contains(haystack: &str, needle: &str, max_dist: usize) -> bool {
    if haystack.contains(needle) {
        return true;
    }
    let h: Vec<char> = haystack.chars().collect();
    let n = needle.chars().count();
    if h.len() < n {
        return false;
    }
    (0..=h.len() - n).any(|i| {
        let window: String = h[i..i + n].iter().collect();
        levenshtein(&window, needle) <= max_dist
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "등기사항전부증명서(말소사항 포함) - 건물\n고유번호 1146-2021-004352\n【 표 제 부 】 (건물의 표시)\n1 건물내역 벽돌조\n【 갑 구 】 (소유권에 관한 사항)\n1 소유권보존\n2 소유권이전\n【 을 구 】\n1 근저당권설정\n매매목록\n목록번호 제2020-15호\n";

    #[test]
    fn four_zones_split() {
        let s = split_sections(DOC).unwrap();
        assert_eq!(s.header.len(), 2);
        assert_eq!(s.title, vec!["1 건물내역 벽돌조"]);
        assert_eq!(s.ownership, vec!["1 소유권보존", "2 소유권이전"]);
        assert_eq!(s.encumbrance, vec!["1 근저당권설정"]);
        assert_eq!(s.sale_listing, vec!["목록번호 제2020-15호"]);
    }

    #[test]
    fn missing_zones_yield_empty_spans() {
        let doc = "등기사항전부증명서 - 건물\n【 갑 구 】\n1 소유권보존\n";
        let s = split_sections(doc).unwrap();
        assert!(s.title.is_empty());
        assert!(s.encumbrance.is_empty());
        assert!(s.sale_listing.is_empty());
        assert_eq!(s.ownership.len(), 1);
    }

    #[test]
    fn repeated_zone_concatenated_in_order() {
        let doc = "등기사항전부증명서\n【 을 구 】\n1 근저당권설정\n【 을 구 】\n2 전세권설정\n";
        let s = split_sections(doc).unwrap();
        assert_eq!(s.encumbrance, vec!["1 근저당권설정", "2 전세권설정"]);
    }

    #[test]
    fn spaced_headers_match() {
        assert_eq!(zone_header("【 표 제 부 】 (1동의 건물의 표시)"), Some(ZoneKind::Title));
        assert_eq!(zone_header("매 매 목 록"), Some(ZoneKind::SaleListing));
    }

    #[test]
    fn fuzzy_header_tolerates_one_edit() {
        // OCR corrupted a syllable of a 3+ char name.
        assert_eq!(zone_header("【 표제브 】"), Some(ZoneKind::Title));
        // Two-char names must be exact.
        assert_eq!(zone_header("【 감구 】"), None);
    }

    #[test]
    fn body_mention_is_not_a_header() {
        assert_eq!(
            zone_header("갑구 3번 가압류등기의 말소로 인하여 순위가 승진함을 통지함"),
            None
        );
    }

    #[test]
    fn missing_title_is_fatal() {
        let err = split_sections("아무 제목 없는 문서\n【 갑 구 】\n1 소유권보존\n").unwrap_err();
        assert!(matches!(err, StructureError::TitleNotFound));
    }

    #[test]
    fn title_without_any_zone_is_fatal() {
        let err = split_sections("등기사항전부증명서 - 건물\n고유번호 123\n").unwrap_err();
        assert!(matches!(err, StructureError::NoSections));
    }
}
