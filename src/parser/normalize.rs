use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// Page artifacts injected by the extraction stage: "- 3 -", "3/7".
static PAGE_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-\s*\d+\s*-|\d+\s*/\s*\d+)$").unwrap());

// Per-page footer lines carry no registry content.
const FOOTER_PREFIXES: &[&str] = &["열람일시", "출력일시", "발행번호", "수수료", "문서하단"];

/// Canonicalizes raw extracted text before structural parsing. Pure and
/// total: unrecognized text passes through unchanged.
///
/// - composes decomposed Hangul jamo (NFC),
/// - folds full-width digits/punctuation and ideographic space to ASCII,
/// - collapses runs of spaces/tabs within a line, keeping newlines,
/// - drops page numbers, per-page footers, 이하여백 filler and repeated
///   per-page copies of the certificate title line.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfc().collect();
    let mut out = String::with_capacity(composed.len());
    let mut title_seen = false;

    for raw_line in composed.lines() {
        let folded: String = raw_line.chars().map(fold_width).collect();
        let line = collapse_spaces(folded.trim());

        if is_artifact(&line) {
            continue;
        }
        let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.contains("등기사항전부증명서") || compact.contains("등기사항일부증명서") {
            if title_seen {
                // Boilerplate repeated on every page; keep the first only.
                continue;
            }
            title_seen = true;
        }

        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn fold_width(c: char) -> char {
    match c {
        '\u{3000}' => ' ',
        // Full-width ASCII block: ！..～ → !..~
        '\u{FF01}'..='\u{FF5E}' => {
            char::from_u32(c as u32 - 0xFF01 + 0x21).unwrap_or(c)
        }
        _ => c,
    }
}

fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_gap = false;
    for c in line.chars() {
        if c == ' ' || c == '\t' {
            if !in_gap {
                out.push(' ');
            }
            in_gap = true;
        } else {
            out.push(c);
            in_gap = false;
        }
    }
    out
}

fn is_artifact(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    if PAGE_NO_RE.is_match(line) {
        return true;
    }
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.contains("이하여백") {
        return true;
    }
    FOOTER_PREFIXES.iter().any(|p| compact.starts_with(p))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullwidth_folded() {
        assert_eq!(normalize("１２３（갑구）"), "123(갑구)\n");
    }

    #[test]
    fn spaces_collapsed_newlines_kept() {
        assert_eq!(normalize("갑  구\n을\t\t구"), "갑 구\n을 구\n");
    }

    #[test]
    fn page_numbers_dropped() {
        assert_eq!(normalize("소유권이전\n- 2 -\n3/7\n해제"), "소유권이전\n해제\n");
    }

    #[test]
    fn footer_lines_dropped() {
        let out = normalize("열람일시 : 2021년10월05일 14시30분\n수수료 1,000원\n소유자 홍길동");
        assert_eq!(out, "소유자 홍길동\n");
    }

    #[test]
    fn filler_dropped() {
        assert_eq!(normalize("이 하 여 백\n기록"), "기록\n");
    }

    #[test]
    fn repeated_title_line_kept_once() {
        let out = normalize("등기사항전부증명서 - 건물\n갑구\n등기사항전부증명서 - 건물\n을구");
        assert_eq!(out, "등기사항전부증명서 - 건물\n갑구\n을구\n");
    }

    #[test]
    fn decomposed_jamo_composed() {
        // 갑 written as conjoining jamo ᄀ+ᅡ+ᆸ
        let decomposed = "\u{1100}\u{1161}\u{11B8}구";
        assert_eq!(normalize(decomposed), "갑구\n");
    }

    #[test]
    fn unrecognized_text_passes_through() {
        assert_eq!(normalize("~!@# unknown ◇◆"), "~!@# unknown ◇◆\n");
    }
}
