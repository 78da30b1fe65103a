use crate::diagnostics::{Diagnostic, Zone};
use crate::parser::fields::{extract_amount, find_dates, find_registry_no};
use crate::parser::rows::{scan_fields, segment_rows, LabelTable, RawRow};
use crate::parser::strike::StrikeIndicators;
use crate::record::EncumbranceRow;

use super::{push_clean, resolve_date, without_dates};

const LABELS: LabelTable = LabelTable {
    zone: Zone::Encumbrance,
    aliases: &[
        ("권리자및기타사항", "rights"),
        ("등기용등록번호", "registry_no"),
        ("법인등록번호", "registry_no"),
        ("채권최고액", "max_claim"),
        ("근저당권자", "lien_holder"),
        ("저당권자", "lien_holder"),
        ("전세권자", "lien_holder"),
        ("임차권자", "lien_holder"),
        ("공동담보", "joint_collateral"),
        ("등기목적", "purpose"),
        ("접수일자", "receipt"),
        ("접수", "receipt"),
        ("등기원인", "cause"),
        ("전세금", "max_claim"),
        ("임차보증금", "max_claim"),
        ("채무자", "debtor"),
    ],
};

pub fn extract(
    span: &[String],
    strikes: &StrikeIndicators,
    diags: &mut Vec<Diagnostic>,
) -> Vec<EncumbranceRow> {
    let (_, raw_rows) = segment_rows(span, strikes);
    raw_rows.into_iter().map(|r| build_row(r, diags)).collect()
}

fn build_row(row: RawRow, diags: &mut Vec<Diagnostic>) -> EncumbranceRow {
    let scan = scan_fields(&row.text, &LABELS);
    for label in &scan.ambiguous {
        diags.push(Diagnostic::AmbiguousLabel {
            zone: Zone::Encumbrance,
            rank: row.rank.clone(),
            label: label.clone(),
        });
    }

    let mut remarks: Vec<String> = Vec::new();

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
                Zone::Encumbrance,
                &row.rank,
                "receipt_date",
                diags,
            )
        }
        None => {
            resolve_date(lead_results.next(), Zone::Encumbrance, &row.rank, "receipt_date", diags)
        }
    };
    // 설정계약 dates arrive under 등기원인; the cause wording itself is
    // preserved in remarks.
    let contract_date = match scan.first("cause") {
        Some(v) => {
            let dates = find_dates(v);
            push_clean(&mut remarks, &without_dates(v, &dates));
            resolve_date(
                dates.into_iter().next().map(|m| m.result),
                Zone::Encumbrance,
                &row.rank,
                "contract_date",
                diags,
            )
        }
        None => {
            resolve_date(lead_results.next(), Zone::Encumbrance, &row.rank, "contract_date", diags)
        }
    };

    let max_claim_amount = scan
        .first("max_claim")
        .map(|v| extract_amount(v).unwrap_or_else(|| v.to_string()));
    let debtor = scan.first("debtor").map(str::to_string);
    let lien_holder = scan.first("lien_holder").map(str::to_string);
    let registry_no = scan
        .first("registry_no")
        .map(str::to_string)
        .or_else(|| lien_holder.as_deref().and_then(find_registry_no));
    let joint_collateral = scan.first("joint_collateral").map(str::to_string);

    if let Some(v) = scan.first("rights") {
        push_clean(&mut remarks, v);
    }

    EncumbranceRow {
        rank: row.rank,
        purpose,
        receipt_date,
        contract_date,
        max_claim_amount,
        registry_no,
        debtor,
        lien_holder,
        joint_collateral,
        remarks: if remarks.is_empty() { None } else { Some(remarks.join(" ")) },
        cancelled: row.cancelled,
    }
}

// ── Tests ──
