use serde::{Deserialize, Serialize};

/// One structured certificate. Built in a single parse pass, immutable after.
///
/// Absent fields are `None` and serialize as JSON `null`; dates are
/// zero-padded "YYYY-MM-DD"; identifier and amount fields keep the source
/// text verbatim (masking stars, 금/원 units, commas).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// The 등기사항전부증명서 heading line, as printed.
    pub title: String,
    /// Registration kind (건물, 집합건물, 토지) or the title's parenthetical.
    pub subtitle: Option<String>,
    /// 고유번호.
    pub registry_number: Option<String>,
    /// The bracketed property address line from the header, verbatim.
    pub address: Option<String>,
    /// First match among the fixed building vocabulary (단독주택, 아파트, ...).
    pub building_type: Option<String>,
    pub title_rows: Vec<TitleRow>,
    pub ownership_rows: Vec<OwnershipRow>,
    pub encumbrance_rows: Vec<EncumbranceRow>,
    pub sale_listing: Option<SaleListing>,
}

/// 표제부 entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleRow {
    pub rank: String,
    pub receipt_date: Option<String>,
    pub location: Option<String>,
    pub building_description: Option<String>,
    pub remarks: Option<String>,
}

/// 갑구 entry. `cancelled` is set when strike markup is detected in the
/// source fragment; all other fields are stored as printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipRow {
    pub rank: String,
    pub purpose: String,
    pub receipt_date: Option<String>,
    pub cause_date: Option<String>,
    pub sale_listing_no: Option<String>,
    pub owner_name: Option<String>,
    pub owner_national_id: Option<String>,
    pub owner_registry_no: Option<String>,
    pub owner_address: Option<String>,
    pub remarks: Option<String>,
    pub case_no: Option<String>,
    pub cancelled: bool,
}

/// 을구 entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncumbranceRow {
    pub rank: String,
    pub purpose: String,
    pub receipt_date: Option<String>,
    pub contract_date: Option<String>,
    pub max_claim_amount: Option<String>,
    pub registry_no: Option<String>,
    pub debtor: Option<String>,
    pub lien_holder: Option<String>,
    pub joint_collateral: Option<String>,
    pub remarks: Option<String>,
    pub cancelled: bool,
}

/// 매매목록 block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleListing {
    pub list_no: Option<String>,
    pub amount: Option<String>,
    pub entries: Vec<SaleListingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleListingEntry {
    pub seq: u32,
    pub property: String,
    /// References an OwnershipRow rank. Kept verbatim even when no such
    /// rank exists; the mismatch surfaces as a diagnostic instead.
    pub rank_ref: String,
    pub cause_date: Option<String>,
}
