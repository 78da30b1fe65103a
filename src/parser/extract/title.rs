use crate::diagnostics::{Diagnostic, Zone};
use crate::parser::fields::find_dates;
use crate::parser::rows::{scan_fields, segment_rows, LabelTable, RawRow};
use crate::parser::strike::StrikeIndicators;
use crate::record::TitleRow;

use super::{push_clean, resolve_date, without_dates};

const LABELS: LabelTable = LabelTable {
    zone: Zone::Title,
    aliases: &[
        ("등기원인및기타사항", "remarks"),
        ("소재지번,건물명칭및번호", "location"),
        ("소재지번및건물번호", "location"),
        ("건물명칭및번호", "location"),
        ("소재지번", "location"),
        ("건물내역", "building"),
        ("접수일자", "receipt"),
        ("접수", "receipt"),
        ("기타사항", "remarks"),
    ],
};

pub fn extract(
    span: &[String],
    strikes: &StrikeIndicators,
    diags: &mut Vec<Diagnostic>,
) -> Vec<TitleRow> {
    let (_, raw_rows) = segment_rows(span, strikes);
    raw_rows.into_iter().map(|r| build_row(r, diags)).collect()
}

fn build_row(row: RawRow, diags: &mut Vec<Diagnostic>) -> TitleRow {
    let scan = scan_fields(&row.text, &LABELS);
    for label in &scan.ambiguous {
        diags.push(Diagnostic::AmbiguousLabel {
            zone: Zone::Title,
            rank: row.rank.clone(),
            label: label.clone(),
        });
    }

    let mut extra: Vec<String> = Vec::new();

    let lead_dates = find_dates(&scan.leading);
    let receipt_date = match scan.first("receipt") {
        Some(v) => {
            let dates = find_dates(v);
            push_clean(&mut extra, &without_dates(v, &dates));
            resolve_date(
                dates.into_iter().next().map(|m| m.result),
                Zone::Title,
                &row.rank,
                "receipt_date",
                diags,
            )
        }
        None => resolve_date(
            lead_dates.first().map(|m| m.result.clone()),
            Zone::Title,
            &row.rank,
            "receipt_date",
            diags,
        ),
    };

    let lead = without_dates(&scan.leading, &lead_dates);
    let mut location = scan.first("location").map(str::to_string);
    let mut building_description = scan.first("building").map(str::to_string);
    if location.is_none() && building_description.is_none() {
        // No labels survived linearization: split the leading text where the
        // structure/area wording starts.
        let (loc, bld) = split_location_building(&lead);
        location = loc;
        building_description = bld;
    } else {
        push_clean(&mut extra, &lead);
    }

    let mut remarks = scan.first("remarks").map(str::to_string);
    if !extra.is_empty() {
        let joined = extra.join(" ");
        remarks = Some(match remarks {
            Some(r) => format!("{r} {joined}"),
            None => joined,
        });
    }

    TitleRow { rank: row.rank, receipt_date, location, building_description, remarks }
}

fn split_location_building(text: &str) -> (Option<String>, Option<String>) {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return (None, None);
    }
    let at = tokens
        .iter()
        .position(|t| t.ends_with('조') || t.contains("구조") || t.contains('㎡'));
    match at {
        Some(0) => (None, Some(tokens.join(" "))),
        Some(i) => (Some(tokens[..i].join(" ")), Some(tokens[i..].join(" "))),
        None => (Some(tokens.join(" ")), None),
    }
}

// ── Tests ──
