use std::sync::LazyLock;

use regex::Regex;

use crate::parser::sections;

static ADDRESS_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(건물|집합건물|토지|임야)\]\s*(.+)$").unwrap());
static REGISTRY_NO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"고유번호\s*:?\s*(\S+)").unwrap());
static TITLE_PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]+)\)").unwrap());

/// Fields parsed from the block above the first zone header.
#[derive(Debug, Default)]
pub struct Header {
    pub title: String,
    pub subtitle: Option<String>,
    pub registry_number: Option<String>,
    pub address: Option<String>,
    pub address_kind: Option<String>,
}

pub fn extract(lines: &[String]) -> Header {
    let mut header = Header::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if header.title.is_empty() && sections::is_title_line(line) {
            header.title = line.to_string();
            continue;
        }
        if let Some(caps) = ADDRESS_LINE_RE.captures(line) {
            if header.address.is_none() {
                header.address_kind = Some(caps[1].to_string());
                header.address = Some(caps[2].trim().to_string());
            }
            continue;
        }
        if header.registry_number.is_none() {
            if let Some(caps) = REGISTRY_NO_RE.captures(line) {
                header.registry_number = Some(caps[1].to_string());
            }
        }
    }

    // Registration kind: the title's "- 집합건물" suffix, else the bracket
    // kind of the address line, else the title's parenthetical.
    header.subtitle = title_suffix(&header.title)
        .or_else(|| header.address_kind.clone())
        .or_else(|| {
            TITLE_PAREN_RE
                .captures(&header.title)
                .map(|c| c[1].trim().to_string())
        });

    header
}

fn title_suffix(title: &str) -> Option<String> {
    title
        .rsplit_once('-')
        .map(|(_, kind)| kind.trim())
        .filter(|k| !k.is_empty() && k.chars().all(|c| !c.is_ascii_digit()))
        .map(str::to_string)
}

// ── Tests ──
