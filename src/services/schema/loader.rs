use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use super::utils::{clean_column_name, is_null};
use crate::error::AppError;

/// A CSV file held column-major, with null tokens already normalised to `None`.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<Option<String>>>,
    pub row_count: usize,
}

impl LoadedTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// The rows of a table chosen for type inference and cardinality estimates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularSample {
    pub indices: Vec<usize>,
}

impl TabularSample {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn values<'a>(&'a self, column: &'a [Option<String>]) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.indices
            .iter()
            .map(move |&idx| column.get(idx).and_then(|value| value.as_deref()))
    }
}

pub fn load_csv(path: &Path) -> Result<LoadedTable, AppError> {
    let file = File::open(path)?;
    read_csv(file)
}

pub fn read_csv<R: Read>(reader: R) -> Result<LoadedTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut existing_names = HashSet::new();
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, name)| clean_column_name(name, idx, &mut existing_names))
        .collect();

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    let mut row_count = 0;

    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(AppError::Parse(format!(
                "Row {} has {} fields, expected at most {}",
                row_idx + 1,
                record.len(),
                headers.len()
            )));
        }

        // Short rows are padded with nulls
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let value = record
                .get(col_idx)
                .filter(|value| !is_null(value))
                .map(|value| value.to_string());
            column.push(value);
        }
        row_count += 1;
    }

    debug!("Loaded {} rows x {} columns", row_count, headers.len());

    Ok(LoadedTable {
        headers,
        columns,
        row_count,
    })
}

/// Uniform sample without replacement; the whole table when it fits.
pub fn sample_rows(total_rows: usize, sample_size: usize, seed: u64) -> TabularSample {
    if total_rows <= sample_size {
        return TabularSample {
            indices: (0..total_rows).collect(),
        };
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices = rand::seq::index::sample(&mut rng, total_rows, sample_size).into_vec();
    indices.sort_unstable();
    TabularSample { indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_pads_short_rows() {
        let data = "BUKRS,BELNR,DMBTR\n1000,1000000001,5.0\n1000,1000000002\n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["BUKRS", "BELNR", "DMBTR"]);
        assert_eq!(table.row_count, 2);
        assert_eq!(table.columns[2], vec![Some("5.0".to_string()), None]);
    }

    #[test]
    fn rejects_rows_wider_than_header() {
        let data = "A,B\n1,2,3\n";
        assert!(matches!(read_csv(data.as_bytes()), Err(AppError::Parse(_))));
    }

    #[test]
    fn empty_input_has_no_columns() {
        let table = read_csv("".as_bytes()).unwrap();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count, 0);
    }

    #[test]
    fn null_tokens_become_none() {
        let data = "A\nNA\n\"\"\n x \n";
        let table = read_csv(data.as_bytes()).unwrap();
        assert_eq!(table.columns[0], vec![None, None, Some(" x ".to_string())]);
    }

    #[test]
    fn small_tables_are_not_sampled() {
        let sample = sample_rows(10, 5000, 42);
        assert_eq!(sample.indices, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn sampling_is_seeded_and_without_replacement() {
        let first = sample_rows(10_000, 500, 42);
        let second = sample_rows(10_000, 500, 42);
        assert_eq!(first, second);
        assert_eq!(first.len(), 500);

        let unique: HashSet<_> = first.indices.iter().collect();
        assert_eq!(unique.len(), 500);
        assert!(first.indices.iter().all(|&idx| idx < 10_000));

        let other_seed = sample_rows(10_000, 500, 7);
        assert_ne!(first, other_seed);
    }
}
