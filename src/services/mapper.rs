//! Plain-language descriptions of SAP FI columns.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::services::schema::SapTableType;

const BKPF: &[(&str, &str)] = &[
    ("BUKRS", "Company Code - 4-digit code representing legal entity or department"),
    ("BELNR", "Document Number - Unique accounting document identifier"),
    ("GJAHR", "Fiscal Year - Year of the accounting document"),
    ("BLART", "Document Type - Type of accounting document (K1=Customer Invoice, S1=Vendor Invoice, etc.)"),
    ("BUDAT", "Posting Date - Date when document was posted to the system"),
    ("WAERS", "Currency - Document currency code (USD, EUR, etc.)"),
    ("BKTXT", "Document Header Text - Description or reference text"),
    ("USNAM", "User Name - User who posted the document"),
    ("TCODE", "Transaction Code - SAP transaction used to create document"),
    ("CPUDT", "CPU Date - System date when document was created"),
    ("CPUTM", "CPU Time - System time when document was created"),
    ("XBLNR", "Reference Document Number - External reference number"),
    ("AWKEY", "Object Key - Internal system key for the document"),
    ("XREVERSED", "Reversed Document - Flag indicating if document was reversed"),
];

const BSEG: &[(&str, &str)] = &[
    ("BUKRS", "Company Code - 4-digit code representing legal entity"),
    ("BELNR", "Document Number - Unique accounting document identifier"),
    ("GJAHR", "Fiscal Year - Year of the accounting document"),
    ("BUZEI", "Line Item - Sequential number within the document"),
    ("KOART", "Account Type - Type of account (D=Customer, K=Vendor, S=G/L Account)"),
    ("KONTO", "Account Number - G/L account, customer, or vendor number"),
    ("SHKZG", "Debit/Credit Indicator - S=Debit, H=Credit"),
    ("DMBTR", "Amount in Local Currency - Transaction amount in company code currency"),
    ("WRBTR", "Amount in Document Currency - Transaction amount in document currency"),
    ("LIFNR", "Vendor Number - Vendor account number (if vendor transaction)"),
    ("KUNNR", "Customer Number - Customer account number (if customer transaction)"),
    ("KOSTL", "Cost Center - Cost center for cost allocation"),
    ("AUFNR", "Order Number - Internal order or project number"),
    ("SAKNR", "G/L Account Number - General ledger account"),
    ("ZUONR", "Assignment Number - Reference number for line item"),
    ("SGTXT", "Line Item Text - Description text for the line item"),
    ("ZFBDT", "Baseline Date - Payment baseline date"),
    ("ZTERM", "Payment Terms - Payment terms code"),
    ("MWSKZ", "Tax Code - Tax code for the transaction"),
];

const LFA1: &[(&str, &str)] = &[
    ("LIFNR", "Vendor Number - Unique vendor identifier"),
    ("NAME1", "Vendor Name - Primary name of the vendor"),
    ("NAME2", "Vendor Name 2 - Secondary name line"),
    ("ORT01", "City - City where vendor is located"),
    ("LAND1", "Country - Country code for vendor location"),
    ("SPERR", "Accounting Block - Accounting blocking indicator"),
    ("LOEVM", "Deletion Flag - Deletion indicator"),
    ("STRAS", "Street Address - Street address of vendor"),
    ("PSTLZ", "Postal Code - Postal code for vendor address"),
    ("REGIO", "Region - State or region code"),
    ("TELF1", "Telephone - Primary telephone number"),
    ("SPERM", "Purchasing Block - Purchasing blocking indicator"),
];

const KNA1: &[(&str, &str)] = &[
    ("KUNNR", "Customer Number - Unique customer identifier"),
    ("NAME1", "Customer Name - Primary name of the customer"),
    ("NAME2", "Customer Name 2 - Secondary name line"),
    ("ORT01", "City - City where customer is located"),
    ("LAND1", "Country - Country code for customer location"),
    ("SPERR", "Accounting Block - Accounting blocking indicator"),
    ("LOEVM", "Deletion Flag - Deletion indicator"),
    ("STRAS", "Street Address - Street address of customer"),
    ("PSTLZ", "Postal Code - Postal code for customer address"),
    ("REGIO", "Region - State or region code"),
    ("TELF1", "Telephone - Primary telephone number"),
    ("SPERM", "Sales Block - Sales blocking indicator"),
];

const SKAT: &[(&str, &str)] = &[
    ("KTOPL", "Chart of Accounts - Chart of accounts identifier"),
    ("SAKNR", "G/L Account Number - General ledger account number"),
    ("TXT50", "Account Description - Description of the G/L account"),
    ("XLOEV", "Deletion Flag - Flag indicating if account is marked for deletion"),
    ("SPERR", "Blocked - Blocking indicator for account"),
    ("KTOKS", "Account Group - Account group classification"),
    ("XSPEA", "Special G/L Account - Flag for special G/L account"),
];

fn columns_of(table: SapTableType) -> &'static [(&'static str, &'static str)] {
    match table {
        SapTableType::Bkpf => BKPF,
        SapTableType::Bseg => BSEG,
        SapTableType::Lfa1 => LFA1,
        SapTableType::Kna1 => KNA1,
        SapTableType::Skat => SKAT,
        SapTableType::Unknown => &[],
    }
}

fn important_columns(table: SapTableType) -> &'static [&'static str] {
    match table {
        SapTableType::Bkpf => &["BUKRS", "BELNR", "GJAHR", "BLART", "BUDAT"],
        SapTableType::Bseg => &["BUKRS", "BELNR", "GJAHR", "BUZEI", "KOART", "KONTO"],
        _ => &[],
    }
}

pub fn table_description(table: SapTableType) -> &'static str {
    match table {
        SapTableType::Bkpf => "Accounting Document Header",
        SapTableType::Bseg => "Accounting Document Segment",
        SapTableType::Lfa1 => "Vendor Master Data",
        SapTableType::Kna1 => "Customer Master Data",
        SapTableType::Skat => "G/L Account Master Data",
        SapTableType::Unknown => "Unknown SAP Table",
    }
}

pub fn column_description(table: SapTableType, column: &str) -> Option<&'static str> {
    let upper = column.trim().to_uppercase();
    columns_of(table)
        .iter()
        .find(|(name, _)| *name == upper)
        .map(|(_, description)| *description)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaCoverage {
    pub is_valid: bool,
    pub coverage: f64,
    pub covered_columns: Vec<String>,
    pub missing_important: Vec<String>,
    pub extra_columns: Vec<String>,
}

/// How much of the documented layout of `table` the given columns cover.
pub fn schema_coverage<'a, I>(table: SapTableType, columns: I) -> SchemaCoverage
where
    I: IntoIterator<Item = &'a str>,
{
    let actual: BTreeSet<String> = columns
        .into_iter()
        .map(|column| column.trim().to_uppercase())
        .collect();
    let documented: BTreeSet<String> = columns_of(table)
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();

    let covered_columns: Vec<String> = documented.intersection(&actual).cloned().collect();
    let extra_columns: Vec<String> = actual.difference(&documented).cloned().collect();
    let coverage = if documented.is_empty() {
        0.0
    } else {
        covered_columns.len() as f64 / documented.len() as f64
    };
    let missing_important: Vec<String> = important_columns(table)
        .iter()
        .filter(|column| !actual.contains(**column))
        .map(|column| column.to_string())
        .collect();

    SchemaCoverage {
        is_valid: coverage >= 0.5 && missing_important.is_empty(),
        coverage,
        covered_columns,
        missing_important,
        extra_columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_known_columns() {
        assert_eq!(
            column_description(SapTableType::Bseg, "shkzg"),
            Some("Debit/Credit Indicator - S=Debit, H=Credit")
        );
        assert!(column_description(SapTableType::Lfa1, "NAME1").unwrap().starts_with("Vendor Name"));
        assert!(column_description(SapTableType::Kna1, "NAME1").unwrap().starts_with("Customer Name"));
        assert_eq!(column_description(SapTableType::Bkpf, "NOPE"), None);
        assert_eq!(column_description(SapTableType::Unknown, "BUKRS"), None);
    }

    #[test]
    fn coverage_of_mock_header_table() {
        let columns = ["BUKRS", "BELNR", "GJAHR", "BLART", "BUDAT", "WAERS", "BKTXT"];
        let coverage = schema_coverage(SapTableType::Bkpf, columns);
        assert_eq!(coverage.coverage, 0.5);
        assert!(coverage.missing_important.is_empty());
        assert!(coverage.is_valid);
        assert!(coverage.extra_columns.is_empty());
    }

    #[test]
    fn coverage_reports_missing_and_extra() {
        let coverage = schema_coverage(SapTableType::Bseg, ["BUKRS", "BELNR", "custom"]);
        assert!(!coverage.is_valid);
        assert_eq!(coverage.missing_important, vec!["GJAHR", "BUZEI", "KOART", "KONTO"]);
        assert_eq!(coverage.extra_columns, vec!["CUSTOM"]);
        assert_eq!(coverage.covered_columns, vec!["BELNR", "BUKRS"]);
    }

    #[test]
    fn unknown_tables_have_no_coverage() {
        let coverage = schema_coverage(SapTableType::Unknown, ["A"]);
        assert_eq!(coverage.coverage, 0.0);
        assert!(!coverage.is_valid);
    }
}
