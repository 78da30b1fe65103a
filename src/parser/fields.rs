use std::ops::Range;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static KOREAN_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,4})\s?년\s?(\d{1,2})\s?월\s?(\d{1,2})\s?일").unwrap());
static DOTTED_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{2,4})\.\s?(\d{1,2})\.\s?(\d{1,2})\b").unwrap());
static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"금\s?[\d,]+\s?원").unwrap());
static MASKED_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9*]{6}-[0-9*]{7}").unwrap());
static RANK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(-\d+)?$").unwrap());
// Court case numbers: "2021카단3456". The year must be followed by a run of
// at least two Hangul (excludes 년/월/일 date text, where a digit follows 년).
static CASE_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}[가-힣]{2,3}\d{1,6}").unwrap());

/// Outcome of normalizing one date-bearing fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateResult {
    /// Zero-padded "YYYY-MM-DD".
    Parsed(String),
    /// A date-shaped token that failed validation (two-digit year,
    /// impossible calendar date). The raw token is kept for diagnostics.
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateMatch {
    pub range: Range<usize>,
    pub result: DateResult,
}

/// All date tokens in `text`, in source order. Overlapping matches from the
/// different notations are resolved in favor of the earliest start.
pub fn find_dates(text: &str) -> Vec<DateMatch> {
    let mut found: Vec<DateMatch> = Vec::new();
    for re in [&*KOREAN_DATE_RE, &*DOTTED_DATE_RE, &*ISO_DATE_RE] {
        for caps in re.captures_iter(text) {
            let whole = caps.get(0).unwrap();
            found.push(DateMatch {
                range: whole.range(),
                result: validate_date(&caps[1], &caps[2], &caps[3], whole.as_str()),
            });
        }
    }
    found.sort_by_key(|m| (m.range.start, m.range.end));
    let mut merged: Vec<DateMatch> = Vec::new();
    for m in found {
        if merged.last().map_or(true, |prev| m.range.start >= prev.range.end) {
            merged.push(m);
        }
    }
    merged
}

/// First date in `text`, if any. No token at all is simply `None`, not an
/// anomaly; a malformed token surfaces as [`DateResult::Malformed`].
pub fn parse_date(text: &str) -> Option<DateResult> {
    find_dates(text).into_iter().next().map(|m| m.result)
}

fn validate_date(y: &str, m: &str, d: &str, raw: &str) -> DateResult {
    let year: i32 = match y.parse() {
        Ok(v) => v,
        Err(_) => return DateResult::Malformed(raw.to_string()),
    };
    if year < 100 {
        // Two-digit years are ambiguous across centuries; rejected outright.
        return DateResult::Malformed(raw.to_string());
    }
    let (month, day) = match (m.parse::<u32>(), d.parse::<u32>()) {
        (Ok(mo), Ok(da)) => (mo, da),
        _ => return DateResult::Malformed(raw.to_string()),
    };
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(_) => DateResult::Parsed(format!("{year:04}-{month:02}-{day:02}")),
        None => DateResult::Malformed(raw.to_string()),
    }
}

/// The `금…원` amount substring, verbatim. Commas and unit text are part of
/// the compatibility contract and are never coerced to a number.
pub fn extract_amount(text: &str) -> Option<String> {
    AMOUNT_RE.find(text).map(|m| m.as_str().to_string())
}

/// A masked personal identifier ("750123-*******"), verbatim. Never
/// attempts to unmask.
pub fn find_masked_id(text: &str) -> Option<String> {
    MASKED_ID_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|s| s.contains('*'))
        .map(str::to_string)
}

/// An unmasked corporate/registry number pair ("110111-2365321").
pub fn find_registry_no(text: &str) -> Option<String> {
    MASKED_ID_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|s| !s.contains('*'))
        .map(str::to_string)
}

/// A court case number embedded in cause text ("2021카단3456").
pub fn find_case_no(text: &str) -> Option<String> {
    CASE_NO_RE.find(text).map(|m| m.as_str().to_string())
}

/// Normalizes a rank token: "N" or "N-M" with stray spacing removed, the
/// hyphenated compound form retained. Non-numeric input is rejected; the
/// caller keeps the raw text as the rank so no row is silently dropped.
pub fn parse_rank(token: &str) -> Option<String> {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    RANK_RE.is_match(&compact).then_some(compact)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(s: &str) -> DateResult {
        DateResult::Parsed(s.to_string())
    }

    #[test]
    fn date_notations_agree() {
        for src in ["2021년 3월 5일", "2021년3월5일", "2021.3.5", "2021-03-05", "2021-3-5"] {
            assert_eq!(parse_date(src), Some(parsed("2021-03-05")), "source: {src}");
        }
    }

    #[test]
    fn date_zero_padded_source() {
        assert_eq!(parse_date("2021년10월05일"), Some(parsed("2021-10-05")));
    }

    #[test]
    fn two_digit_year_is_malformed() {
        assert_eq!(
            parse_date("96년 11월 20일"),
            Some(DateResult::Malformed("96년 11월 20일".to_string()))
        );
    }

    #[test]
    fn impossible_date_is_malformed() {
        assert!(matches!(parse_date("2021년 2월 30일"), Some(DateResult::Malformed(_))));
    }

    #[test]
    fn no_date_is_none() {
        assert_eq!(parse_date("소유권이전"), None);
        assert_eq!(parse_date("도면 제2018-55호"), None);
        assert_eq!(parse_date("84.97㎡"), None);
    }

    #[test]
    fn dates_in_source_order() {
        let dates = find_dates("접수 2020년1월10일 원인 2019년12월20일 매매");
        let vals: Vec<_> = dates.into_iter().map(|m| m.result).collect();
        assert_eq!(vals, vec![parsed("2020-01-10"), parsed("2019-12-20")]);
    }

    #[test]
    fn amount_verbatim() {
        assert_eq!(
            extract_amount("거래가액 금850,000,000원 매매목록"),
            Some("금850,000,000원".to_string())
        );
        assert_eq!(extract_amount("채권최고액 없음"), None);
    }

    #[test]
    fn masked_id_passthrough() {
        assert_eq!(
            find_masked_id("홍길동 750123-******* 서울특별시"),
            Some("750123-*******".to_string())
        );
        // Unmasked pairs are registry numbers, not personal IDs.
        assert_eq!(find_masked_id("주식회사국민은행 110111-2365321"), None);
        assert_eq!(
            find_registry_no("주식회사국민은행 110111-2365321"),
            Some("110111-2365321".to_string())
        );
    }

    #[test]
    fn case_no_found_but_not_dates() {
        assert_eq!(
            find_case_no("서울중앙지방법원의 가압류결정(2021카단3456)"),
            Some("2021카단3456".to_string())
        );
        assert_eq!(find_case_no("2019년12월20일 매매"), None);
    }

    #[test]
    fn rank_simple_and_compound() {
        assert_eq!(parse_rank("3"), Some("3".to_string()));
        assert_eq!(parse_rank("2-1"), Some("2-1".to_string()));
        assert_eq!(parse_rank("2 - 1"), Some("2-1".to_string()));
        assert_eq!(parse_rank("갑"), None);
        assert_eq!(parse_rank("3a"), None);
    }
}
