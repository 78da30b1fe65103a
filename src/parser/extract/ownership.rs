use crate::diagnostics::{Diagnostic, Zone};
use crate::parser::fields::{find_case_no, find_dates, find_masked_id, find_registry_no};
use crate::parser::rows::{scan_fields, segment_rows, LabelTable, RawRow};
use crate::parser::strike::StrikeIndicators;
use crate::record::OwnershipRow;

use super::{push_clean, resolve_date, without_dates};

const LABELS: LabelTable = LabelTable {
    zone: Zone::Ownership,
    aliases: &[
        ("권리자및기타사항", "rights"),
        ("매매목록번호", "sale_no"),
        ("등기목적", "purpose"),
        ("접수일자", "receipt"),
        ("접수", "receipt"),
        ("등기원인", "cause"),
        ("원인일자", "cause"),
        ("매매목록", "sale_no"),
        ("사건번호", "case_no"),
        ("거래가액", "amount"),
        ("소유자", "owner"),
        ("공유자", "owner"),
    ],
};

pub fn extract(
    span: &[String],
    strikes: &StrikeIndicators,
    diags: &mut Vec<Diagnostic>,
) -> Vec<OwnershipRow> {
    let (_, raw_rows) = segment_rows(span, strikes);
    raw_rows.into_iter().map(|r| build_row(r, diags)).collect()
}

fn build_row(row: RawRow, diags: &mut Vec<Diagnostic>) -> OwnershipRow {
    let scan = scan_fields(&row.text, &LABELS);
    for label in &scan.ambiguous {
        diags.push(Diagnostic::AmbiguousLabel {
            zone: Zone::Ownership,
            rank: row.rank.clone(),
            label: label.clone(),
        });
    }

    let mut remarks: Vec<String> = Vec::new();

    // Positional columns: purpose is the leading unlabeled text; the first
    // two unlabeled dates are receipt and cause, in that order.
    let lead_dates = find_dates(&scan.leading);
    let purpose = match scan.first("purpose") {
        Some(v) => {
            push_clean(&mut remarks, &without_dates(&scan.leading, &lead_dates));
            v.to_string()
        }
        None => without_dates(&scan.leading, &lead_dates),
    };
    let mut lead_results = lead_dates.into_iter().map(|m| m.result);

    let receipt_date = match scan.first("receipt") {
        Some(v) => {
            let dates = find_dates(v);
            push_clean(&mut remarks, &without_dates(v, &dates));
            resolve_date(
                dates.into_iter().next().map(|m| m.result),
                Zone::Ownership,
                &row.rank,
                "receipt_date",
                diags,
            )
        }
        None => resolve_date(lead_results.next(), Zone::Ownership, &row.rank, "receipt_date", diags),
    };
    let cause_date = match scan.first("cause") {
        Some(v) => {
            let dates = find_dates(v);
            push_clean(&mut remarks, &without_dates(v, &dates));
            resolve_date(
                dates.into_iter().next().map(|m| m.result),
                Zone::Ownership,
                &row.rank,
                "cause_date",
                diags,
            )
        }
        None => resolve_date(lead_results.next(), Zone::Ownership, &row.rank, "cause_date", diags),
    };

    // Owner block: "<name> <masked id> <address>"; extra 공유자 entries are
    // kept in remarks so nothing printed is lost.
    let mut owner_name = None;
    let mut owner_national_id = None;
    let mut owner_registry_no = None;
    let mut owner_address = None;
    for (i, value) in scan.all("owner").enumerate() {
        if i == 0 {
            let parts = split_owner(value);
            owner_name = parts.name;
            owner_national_id = parts.national_id;
            owner_registry_no = parts.registry_no;
            owner_address = parts.address;
            push_clean(&mut remarks, &parts.leftover);
        } else {
            push_clean(&mut remarks, value);
        }
    }

    let sale_listing_no = scan
        .first("sale_no")
        .and_then(|v| v.split_whitespace().next())
        .map(str::to_string);
    let case_no = scan
        .first("case_no")
        .map(str::to_string)
        .or_else(|| find_case_no(&row.text));

    if let Some(v) = scan.first("rights") {
        push_clean(&mut remarks, v);
    }
    if let Some(v) = scan.first("amount") {
        push_clean(&mut remarks, &format!("거래가액 {v}"));
    }

    OwnershipRow {
        rank: row.rank,
        purpose,
        receipt_date,
        cause_date,
        sale_listing_no,
        owner_name,
        owner_national_id,
        owner_registry_no,
        owner_address,
        remarks: if remarks.is_empty() { None } else { Some(remarks.join(" ")) },
        case_no,
        cancelled: row.cancelled,
    }
}

#[derive(Debug, Default)]
struct OwnerParts {
    name: Option<String>,
    national_id: Option<String>,
    registry_no: Option<String>,
    address: Option<String>,
    leftover: String,
}

fn split_owner(value: &str) -> OwnerParts {
    let value = value.trim();
    if value.is_empty() {
        return OwnerParts::default();
    }

    let id = find_masked_id(value);
    let regno = if id.is_none() { find_registry_no(value) } else { None };
    let marker = id.as_deref().or(regno.as_deref());

    let mut parts = OwnerParts {
        national_id: id.clone(),
        registry_no: regno.clone(),
        ..OwnerParts::default()
    };
    match marker.and_then(|m| value.find(m).map(|at| (at, m.len()))) {
        Some((at, len)) => {
            let prefix = value[..at].trim();
            // Share prefixes ("지분 2분의 1 홍길동") keep the name last.
            match prefix.rsplit_once(' ') {
                Some((rest, name)) => {
                    parts.name = Some(name.to_string());
                    parts.leftover = rest.trim().to_string();
                }
                None => parts.name = (!prefix.is_empty()).then(|| prefix.to_string()),
            }
            let suffix = value[at + len..].trim();
            parts.address = (!suffix.is_empty()).then(|| suffix.to_string());
        }
        None => {
            let mut tokens = value.splitn(2, ' ');
            parts.name = tokens.next().map(str::to_string);
            parts.address = tokens.next().map(|s| s.trim().to_string());
        }
    }
    parts
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    fn one_row(line: &str) -> (OwnershipRow, Vec<Diagnostic>) {
        let mut diags = Vec::new();
        let rows = extract(&lines(&[line]), &StrikeIndicators::default(), &mut diags);
        assert_eq!(rows.len(), 1);
        (rows.into_iter().next().unwrap(), diags)
    }

    #[test]
    fn positional_row_without_labels() {
        let (row, diags) = one_row("3 소유권이전 2020년 1월 10일 2019년 12월 20일 소유자 홍길동 750123-******* 서울특별시 강남구 테헤란로 152");
        assert_eq!(row.rank, "3");
        assert_eq!(row.purpose, "소유권이전");
        assert_eq!(row.receipt_date.as_deref(), Some("2020-01-10"));
        assert_eq!(row.cause_date.as_deref(), Some("2019-12-20"));
        assert_eq!(row.owner_name.as_deref(), Some("홍길동"));
        assert_eq!(row.owner_national_id.as_deref(), Some("750123-*******"));
        assert_eq!(row.owner_address.as_deref(), Some("서울특별시 강남구 테헤란로 152"));
        assert!(!row.cancelled);
        assert!(diags.is_empty());
    }

    #[test]
    fn struck_twin_differs_only_in_flag() {
        let plain = "3 소유권이전 2020년1월10일 2019년12월20일 소유자 홍길동 750123-******* 서울특별시";
        let struck = format!("{plain} [말소]");
        let (a, _) = one_row(plain);
        let (b, _) = one_row(&struck);
        assert!(!a.cancelled);
        assert!(b.cancelled);
        let mut b2 = b.clone();
        b2.cancelled = false;
        assert_eq!(a, b2);
    }

    #[test]
    fn labeled_row_with_sale_listing_and_amount() {
        let (row, _) = one_row("2 소유권이전 접수 2020년1월10일 제3456호 등기원인 2019년12월20일 매매 소유자 홍길동 750123-******* 서울특별시 강남구 테헤란로 152 거래가액 금850,000,000원 매매목록 제2020-15호");
        assert_eq!(row.purpose, "소유권이전");
        assert_eq!(row.receipt_date.as_deref(), Some("2020-01-10"));
        assert_eq!(row.cause_date.as_deref(), Some("2019-12-20"));
        assert_eq!(row.sale_listing_no.as_deref(), Some("제2020-15호"));
        let remarks = row.remarks.unwrap();
        assert!(remarks.contains("제3456호"));
        assert!(remarks.contains("매매"));
        assert!(remarks.contains("거래가액 금850,000,000원"));
    }

    #[test]
    fn case_number_from_cause_text() {
        let (row, _) = one_row("3 가압류 접수 2021년5월3일 제8891호 등기원인 2021년5월2일 서울중앙지방법원의 가압류결정(2021카단3456)");
        assert_eq!(row.case_no.as_deref(), Some("2021카단3456"));
        assert_eq!(row.cause_date.as_deref(), Some("2021-05-02"));
    }

    #[test]
    fn corporate_owner_registry_number() {
        let (row, _) = one_row("1 소유권보존 소유자 주식회사한빛건설 110111-2365321 서울특별시 영등포구 국제금융로 26");
        assert_eq!(row.owner_name.as_deref(), Some("주식회사한빛건설"));
        assert_eq!(row.owner_national_id, None);
        assert_eq!(row.owner_registry_no.as_deref(), Some("110111-2365321"));
    }

    #[test]
    fn malformed_date_recovered_with_diagnostic() {
        let (row, diags) = one_row("1 소유권보존 접수 96년 11월 20일");
        assert_eq!(row.receipt_date, None);
        assert_eq!(diags.len(), 1);
        assert!(matches!(
            &diags[0],
            Diagnostic::FieldFormat { zone: Zone::Ownership, field: "receipt_date", .. }
        ));
    }

    #[test]
    fn label_with_no_value_is_null() {
        let (row, diags) = one_row("2 소유권이전 접수 등기원인");
        assert_eq!(row.receipt_date, None);
        assert_eq!(row.cause_date, None);
        assert!(diags.is_empty());
    }

    #[test]
    fn share_prefix_goes_to_remarks() {
        let (row, _) = one_row("2 소유권일부이전 공유자 지분 2분의 1 김철수 680412-******* 서울특별시 서초구 반포대로 45");
        assert_eq!(row.owner_name.as_deref(), Some("김철수"));
        assert!(row.remarks.unwrap().contains("지분 2분의 1"));
    }
}
