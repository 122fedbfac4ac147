//! Demo SAP FI tables written as CSV files.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::AppError;
use crate::services::schema::SapTableType;

struct MockTable {
    table: SapTableType,
    headers: &'static [&'static str],
    rows: &'static [&'static [&'static str]],
}

const TABLES: &[MockTable] = &[
    MockTable {
        table: SapTableType::Bkpf,
        headers: &["BUKRS", "BELNR", "GJAHR", "BLART", "BUDAT", "WAERS", "BKTXT"],
        rows: &[
            &["1000", "1000000001", "2024", "K1", "2024-01-15", "USD", "Customer Invoice"],
            &["1000", "1000000002", "2024", "S1", "2024-01-16", "USD", "Vendor Invoice"],
            &["1000", "1000000003", "2024", "K2", "2024-01-17", "USD", "Customer Payment"],
            &["1000", "1000000004", "2024", "S2", "2024-01-18", "USD", "Vendor Payment"],
            &["1000", "1000000005", "2024", "K1", "2024-01-19", "USD", "Customer Invoice"],
        ],
    },
    MockTable {
        table: SapTableType::Bseg,
        headers: &[
            "BUKRS", "BELNR", "GJAHR", "BUZEI", "KOART", "KONTO", "SHKZG", "DMBTR", "WRBTR", "LIFNR", "KUNNR",
        ],
        rows: &[
            &["1000", "1000000001", "2024", "1", "D", "120000", "S", "5000.0", "5000.0", "", "C001"],
            &["1000", "1000000001", "2024", "2", "S", "400000", "H", "5000.0", "5000.0", "", ""],
            &["1000", "1000000002", "2024", "1", "K", "200000", "H", "2500.0", "2500.0", "V001", ""],
            &["1000", "1000000002", "2024", "2", "S", "400000", "S", "2500.0", "2500.0", "", ""],
            &["1000", "1000000003", "2024", "1", "D", "120000", "H", "3000.0", "3000.0", "", "C001"],
            &["1000", "1000000003", "2024", "2", "S", "100000", "S", "3000.0", "3000.0", "", ""],
            &["1000", "1000000004", "2024", "1", "K", "200000", "S", "1500.0", "1500.0", "V002", ""],
            &["1000", "1000000004", "2024", "2", "S", "100000", "H", "1500.0", "1500.0", "", ""],
        ],
    },
    MockTable {
        table: SapTableType::Lfa1,
        headers: &["LIFNR", "NAME1", "ORT01", "LAND1", "SPERR", "LOEVM"],
        rows: &[
            &["V001", "ABC Supplies Inc", "New York", "US", "", ""],
            &["V002", "XYZ Manufacturing", "Chicago", "US", "", ""],
            &["V003", "Tech Solutions Ltd", "Los Angeles", "US", "", ""],
        ],
    },
    MockTable {
        table: SapTableType::Kna1,
        headers: &["KUNNR", "NAME1", "ORT01", "LAND1", "SPERR", "LOEVM"],
        rows: &[
            &["C001", "Global Corp", "Boston", "US", "", ""],
            &["C002", "Local Business", "Seattle", "US", "", ""],
            &["C003", "Startup Inc", "Austin", "US", "", ""],
        ],
    },
    MockTable {
        table: SapTableType::Skat,
        headers: &["KTOPL", "SAKNR", "TXT50", "XLOEV", "SPERR"],
        rows: &[
            &["INT1", "100000", "Cash", "", ""],
            &["INT1", "120000", "Accounts Receivable", "", ""],
            &["INT1", "200000", "Accounts Payable", "", ""],
            &["INT1", "400000", "Revenue", "", ""],
        ],
    },
];

pub fn table_path(data_dir: &Path, table: SapTableType) -> PathBuf {
    data_dir.join(format!("{}.csv", table))
}

/// Writes the demo tables into `data_dir` unless `BKPF.csv` already exists.
///
/// Returns the path of every mock table, whether written now or before.
pub fn ensure_mock_data(data_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let paths: Vec<PathBuf> = TABLES
        .iter()
        .map(|mock| table_path(data_dir, mock.table))
        .collect();

    if table_path(data_dir, SapTableType::Bkpf).exists() {
        info!("Using existing mock SAP data in {}", data_dir.display());
        return Ok(paths);
    }

    std::fs::create_dir_all(data_dir)?;
    for (mock, path) in TABLES.iter().zip(&paths) {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(mock.headers)?;
        for row in mock.rows {
            writer.write_record(*row)?;
        }
        writer.flush()?;
    }

    info!("Created sample SAP data in {}", data_dir.display());
    Ok(paths)
}
