use std::collections::HashSet;

use tracing::warn;

use crate::diagnostics::{Diagnostic, Zone};
use crate::parser::fields::{extract_amount, find_dates, parse_rank};
use crate::parser::rows::{scan_fields, segment_rows, LabelTable, RawRow};
use crate::parser::strike::StrikeIndicators;
use crate::record::{SaleListing, SaleListingEntry};

use super::{resolve_date, without_dates};

const LABELS: LabelTable = LabelTable {
    zone: Zone::SaleListing,
    aliases: &[
        ("부동산에관한권리의표시", "property"),
        ("부동산의표시", "property"),
        ("목록번호", "list_no"),
        ("일련번호", "seq"),
        ("순위번호", "rank_ref"),
        ("등기원인", "cause"),
        ("거래가액", "amount"),
        ("예비란", "reserve"),
    ],
};

/// Parses the 매매목록 span and cross-checks each entry's rank reference
/// against the ownership ranks parsed earlier. A dangling reference stays
/// in the output verbatim and is surfaced as a diagnostic; it never fails
/// the document.
pub fn extract(
    span: &[String],
    strikes: &StrikeIndicators,
    ownership_ranks: &HashSet<&str>,
    diags: &mut Vec<Diagnostic>,
) -> Option<SaleListing> {
    if span.iter().all(|l| l.trim().is_empty()) {
        return None;
    }
    let (prelude, raw_rows) = segment_rows(span, strikes);

    let head = scan_fields(&prelude, &LABELS);
    let list_no = head
        .first("list_no")
        .and_then(|v| v.split_whitespace().next())
        .map(str::to_string);
    let amount = head
        .first("amount")
        .map(|v| extract_amount(v).unwrap_or_else(|| v.to_string()));

    let mut entries = Vec::new();
    for row in raw_rows {
        if let Some(entry) = build_entry(row, diags) {
            if !ownership_ranks.contains(entry.rank_ref.as_str()) {
                warn!(seq = entry.seq, rank_ref = entry.rank_ref, "매매목록 references unknown ownership rank");
                diags.push(Diagnostic::UnresolvedReference {
                    seq: entry.seq,
                    rank_ref: entry.rank_ref.clone(),
                });
            }
            entries.push(entry);
        }
    }

    Some(SaleListing { list_no, amount, entries })
}

fn build_entry(row: RawRow, diags: &mut Vec<Diagnostic>) -> Option<SaleListingEntry> {
    let seq: u32 = match row.rank.parse() {
        Ok(n) => n,
        Err(_) => {
            // Sequence numbers are plain positive integers; anything else
            // is not a listing entry.
            diags.push(Diagnostic::FieldFormat {
                zone: Zone::SaleListing,
                rank: row.rank.clone(),
                field: "seq",
                raw: row.text.clone(),
            });
            return None;
        }
    };

    let scan = scan_fields(&row.text, &LABELS);
    let lead_dates = find_dates(&scan.leading);
    let mut lead = without_dates(&scan.leading, &lead_dates);

    let rank_ref = match scan.first("rank_ref").and_then(|v| v.split_whitespace().next()) {
        Some(r) => r.to_string(),
        // Columnar form: the rank is the last rank-shaped token of the
        // entry text, after the property description.
        None => match take_trailing_rank(&mut lead) {
            Some(r) => r,
            None => String::new(),
        },
    };

    let property = match scan.first("property") {
        Some(v) => v.to_string(),
        None => lead,
    };

    let cause_value = scan.first("cause").map(str::to_string);
    let cause_date = match cause_value {
        Some(v) => resolve_date(
            find_dates(&v).into_iter().next().map(|m| m.result),
            Zone::SaleListing,
            &row.rank,
            "cause_date",
            diags,
        ),
        None => resolve_date(
            lead_dates.into_iter().next().map(|m| m.result),
            Zone::SaleListing,
            &row.rank,
            "cause_date",
            diags,
        ),
    };

    Some(SaleListingEntry { seq, property, rank_ref, cause_date })
}

/// Pops the last rank-shaped token off `text`, returning it. Tokens that
/// follow it (cause wording like 매매) are dropped from the description.
fn take_trailing_rank(text: &mut String) -> Option<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let at = tokens.iter().rposition(|t| parse_rank(t).is_some())?;
    // The first token of an address is often digit-shaped too; require the
    // candidate to sit past the halfway point of the entry text.
    if at < tokens.len() / 2 {
        return None;
    }
    let rank = tokens[at].to_string();
    *text = tokens[..at].join(" ");
    Some(rank)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    fn ranks<'a>(src: &'a [&'a str]) -> HashSet<&'a str> {
        src.iter().copied().collect()
    }

    #[test]
    fn empty_span_is_none() {
        let mut diags = Vec::new();
        let out = extract(&[], &StrikeIndicators::default(), &ranks(&[]), &mut diags);
        assert!(out.is_none());
        assert!(diags.is_empty());
    }

    #[test]
    fn labeled_listing() {
        let mut diags = Vec::new();
        let span = lines(&[
            "목록번호 제2020-15호",
            "거래가액 금850,000,000원",
            "일련번호 부동산의 표시 순위번호 등기원인",
            "1 부동산의 표시 [집합건물] 서울특별시 강남구 역삼동 735-3 제5층 제501호 순위번호 2 등기원인 2019년12월20일 매매",
        ]);
        let out = extract(&span, &StrikeIndicators::default(), &ranks(&["1", "2"]), &mut diags)
            .unwrap();
        assert_eq!(out.list_no.as_deref(), Some("제2020-15호"));
        assert_eq!(out.amount.as_deref(), Some("금850,000,000원"));
        assert_eq!(out.entries.len(), 1);
        let e = &out.entries[0];
        assert_eq!(e.seq, 1);
        assert_eq!(e.rank_ref, "2");
        assert_eq!(e.cause_date.as_deref(), Some("2019-12-20"));
        assert!(e.property.contains("역삼동 735-3"));
        assert!(diags.is_empty());
    }

    #[test]
    fn columnar_entry_rank_before_date() {
        let mut diags = Vec::new();
        let span = lines(&["1 [건물] 서울특별시 마포구 합정동 377-1 2 2019년12월20일 매매"]);
        let out = extract(&span, &StrikeIndicators::default(), &ranks(&["2"]), &mut diags)
            .unwrap();
        let e = &out.entries[0];
        assert_eq!(e.rank_ref, "2");
        assert_eq!(e.cause_date.as_deref(), Some("2019-12-20"));
        assert_eq!(e.property, "[건물] 서울특별시 마포구 합정동 377-1");
        assert!(diags.is_empty());
    }

    #[test]
    fn dangling_reference_kept_and_diagnosed() {
        let mut diags = Vec::new();
        let span = lines(&["1 [건물] 서울특별시 마포구 합정동 377-1 순위번호 99"]);
        let out = extract(&span, &StrikeIndicators::default(), &ranks(&["1", "2"]), &mut diags)
            .unwrap();
        assert_eq!(out.entries[0].rank_ref, "99");
        assert_eq!(
            diags,
            vec![Diagnostic::UnresolvedReference { seq: 1, rank_ref: "99".to_string() }]
        );
    }

    #[test]
    fn entries_keep_source_order() {
        let mut diags = Vec::new();
        let span = lines(&[
            "2 [건물] 부산광역시 해운대구 우동 100 순위번호 3",
            "1 [건물] 서울특별시 마포구 합정동 377-1 순위번호 2",
        ]);
        let out = extract(&span, &StrikeIndicators::default(), &ranks(&["2", "3"]), &mut diags)
            .unwrap();
        let seqs: Vec<u32> = out.entries.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![2, 1]);
    }
}
