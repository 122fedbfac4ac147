//! SAP field dictionary and table classification.
//!
//! Column names are matched exactly (case-insensitive) against a fixed set of
//! SAP FI field names. Table types are recognised by required-column
//! signatures tested in a fixed priority order.

use std::collections::{HashMap, HashSet};
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SapPattern {
    CompanyCode,
    DocumentNumber,
    FiscalYear,
    DocumentType,
    PostingDate,
    Currency,
    VendorNumber,
    CustomerNumber,
    GlAccount,
    DebitCreditIndicator,
    LocalAmount,
    DocumentAmount,
}

/// ABAP dictionary type a field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SapDataType {
    Char,
    Numc,
    Cuky,
    Dats,
    Curr,
}

impl SapDataType {
    /// Character-like types hold codes, even when every code happens to be digits.
    pub fn is_character(&self) -> bool {
        matches!(self, SapDataType::Char | SapDataType::Numc | SapDataType::Cuky)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SapField {
    pub pattern: SapPattern,
    pub declared: SapDataType,
}

const FIELDS: &[(&str, SapPattern, SapDataType)] = &[
    ("BUKRS", SapPattern::CompanyCode, SapDataType::Char),
    ("BELNR", SapPattern::DocumentNumber, SapDataType::Char),
    ("GJAHR", SapPattern::FiscalYear, SapDataType::Numc),
    ("BLART", SapPattern::DocumentType, SapDataType::Char),
    ("BUDAT", SapPattern::PostingDate, SapDataType::Dats),
    ("WAERS", SapPattern::Currency, SapDataType::Cuky),
    ("LIFNR", SapPattern::VendorNumber, SapDataType::Char),
    ("KUNNR", SapPattern::CustomerNumber, SapDataType::Char),
    ("KONTO", SapPattern::GlAccount, SapDataType::Char),
    ("SHKZG", SapPattern::DebitCreditIndicator, SapDataType::Char),
    ("DMBTR", SapPattern::LocalAmount, SapDataType::Curr),
    ("WRBTR", SapPattern::DocumentAmount, SapDataType::Curr),
];

static FIELD_LOOKUP: Lazy<HashMap<&'static str, SapField>> = Lazy::new(|| {
    FIELDS
        .iter()
        .map(|&(name, pattern, declared)| (name, SapField { pattern, declared }))
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SapTableType {
    Bkpf,
    Bseg,
    Lfa1,
    Kna1,
    Skat,
    Unknown,
}

impl SapTableType {
    pub const KNOWN: [SapTableType; 5] = [
        SapTableType::Bkpf,
        SapTableType::Bseg,
        SapTableType::Lfa1,
        SapTableType::Kna1,
        SapTableType::Skat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SapTableType::Bkpf => "BKPF",
            SapTableType::Bseg => "BSEG",
            SapTableType::Lfa1 => "LFA1",
            SapTableType::Kna1 => "KNA1",
            SapTableType::Skat => "SKAT",
            SapTableType::Unknown => "UNKNOWN",
        }
    }

    /// Parses a table name, case-insensitive. `UNKNOWN` is not a table.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_uppercase();
        Self::KNOWN.into_iter().find(|table| table.as_str() == upper)
    }
}

impl fmt::Display for SapTableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Required columns per table type, in priority order.
const SIGNATURES: &[(SapTableType, &[&str])] = &[
    (SapTableType::Bkpf, &["BUKRS", "BELNR", "GJAHR", "BLART"]),
    (SapTableType::Bseg, &["BUKRS", "BELNR", "GJAHR", "BUZEI", "KOART"]),
    (SapTableType::Lfa1, &["LIFNR", "NAME1"]),
    (SapTableType::Kna1, &["KUNNR", "NAME1"]),
    (SapTableType::Skat, &["KTOPL", "SAKNR"]),
];

pub fn lookup_field(column_name: &str) -> Option<SapField> {
    FIELD_LOOKUP.get(column_name.to_uppercase().as_str()).copied()
}

pub fn match_column(column_name: &str) -> Option<SapPattern> {
    lookup_field(column_name).map(|field| field.pattern)
}

pub fn infer_table_type<'a, I>(column_names: I) -> SapTableType
where
    I: IntoIterator<Item = &'a str>,
{
    let present: HashSet<String> = column_names
        .into_iter()
        .map(|name| name.trim().to_uppercase())
        .collect();

    SIGNATURES
        .iter()
        .find(|(_, required)| required.iter().all(|column| present.contains(*column)))
        .map(|(table, _)| *table)
        .unwrap_or(SapTableType::Unknown)
}
