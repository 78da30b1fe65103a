pub mod diagnostics;
pub mod parser;
pub mod record;

pub use diagnostics::{Diagnostic, StructureError, Zone};
pub use parser::strike::StrikeIndicators;
pub use parser::{parse_certificate, parse_certificate_with, Parsed};
pub use record::{
    DocumentRecord, EncumbranceRow, OwnershipRow, SaleListing, SaleListingEntry, TitleRow,
};
