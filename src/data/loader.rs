use std::io::Read;

use anyhow::{Context, Result};

use super::model::{Field, Row};
use crate::error::LoadError;

/// Status text shown when the dataset could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load dataset";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Result of one load attempt. A failed load still yields a (empty) row set
/// so everything downstream keeps working.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    pub rows: Vec<Row>,
    /// User-facing status message when the load failed.
    pub error: Option<String>,
}

/// Load the dataset from `source`, absorbing any failure.
///
/// Supported sources:
/// * `http://…` / `https://…` – fetched with caching disabled
/// * anything else            – read from the filesystem
pub fn load_dataset(source: &str) -> LoadOutcome {
    match fetch_rows(source) {
        Ok(rows) => {
            log::info!("Loaded {} rows from {source}", rows.len());
            LoadOutcome { rows, error: None }
        }
        Err(e) => {
            log::error!("Failed to load dataset from {source}: {e}");
            LoadOutcome {
                rows: Vec::new(),
                error: Some(LOAD_FAILED_MESSAGE.to_string()),
            }
        }
    }
}

/// Fetch and parse, propagating the failure. Every call goes back to the
/// source; nothing is cached between loads.
///
/// Bytes that are not valid UTF-8 become U+FFFD instead of failing the load.
pub fn fetch_rows(source: &str) -> Result<Vec<Row>, LoadError> {
    let bytes = if is_url(source) {
        fetch_http(source)?
    } else {
        std::fs::read(source)?
    };
    let text = String::from_utf8_lossy(&bytes);
    parse_rows(&text).map_err(LoadError::Csv)
}

fn is_url(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn fetch_http(url: &str) -> Result<Vec<u8>, LoadError> {
    let response = ureq::get(url)
        .set("Cache-Control", "no-cache, no-store")
        .set("Pragma", "no-cache")
        .call()
        .map_err(|e| LoadError::Http(e.to_string()))?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| LoadError::Http(e.to_string()))?;
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout: header row naming the columns, one vehicle per line.
/// Recognised columns are `name`, `company`, `year`, `kms_driven` and
/// `fuel_type`; anything else (price, index columns) is ignored. Short lines
/// leave their trailing fields empty; blank lines are skipped.
pub fn parse_rows(text: &str) -> Result<Vec<Row>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let columns = ColumnMap::new(&headers);

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(columns.row(&record));
    }
    Ok(rows)
}

/// Position of each recognised column within the header row.
struct ColumnMap {
    name: Option<usize>,
    company: Option<usize>,
    year: Option<usize>,
    kms_driven: Option<usize>,
    fuel_type: Option<usize>,
}

impl ColumnMap {
    fn new(headers: &[String]) -> Self {
        let find = |field: Field| {
            let idx = headers.iter().position(|h| h == field.column());
            if idx.is_none() {
                log::warn!("Dataset has no '{}' column", field.column());
            }
            idx
        };
        Self {
            name: find(Field::Model),
            company: find(Field::Company),
            year: find(Field::Year),
            kms_driven: find(Field::KmsDriven),
            fuel_type: find(Field::FuelType),
        }
    }

    fn row(&self, record: &csv::StringRecord) -> Row {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };
        Row {
            name: cell(self.name),
            company: cell(self.company),
            year: cell(self.year),
            kms_driven: cell(self.kms_driven),
            fuel_type: cell(self.fuel_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
,name,company,year,Price,kms_driven,fuel_type
0,Hyundai Santro Xing,Hyundai,2007,80000,45000,Petrol
1,Mahindra Jeep CL550,Mahindra,2006,425000,40,Diesel

2,Maruti Suzuki Alto,Maruti,2018,325000,22000,Petrol
";

    #[test]
    fn parses_rows_by_header_and_skips_blank_lines() {
        let rows = parse_rows(SAMPLE).expect("valid CSV");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Hyundai Santro Xing");
        assert_eq!(rows[1].company, "Mahindra");
        assert_eq!(rows[1].kms_driven, "40");
        assert_eq!(rows[2].year(), Some(2018));
        assert_eq!(rows[2].fuel_type, "Petrol");
    }

    #[test]
    fn short_lines_leave_missing_fields_empty() {
        let text = "name,company,year,kms_driven,fuel_type\nSwift,Maruti,2015\n";
        let rows = parse_rows(text).expect("short rows are tolerated");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company, "Maruti");
        assert_eq!(rows[0].kms_driven, "");
        assert_eq!(rows[0].fuel_type, "");
    }

    #[test]
    fn invalid_utf8_keeps_every_row() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"name,company,year,kms_driven,fuel_type\n").expect("header");
        file.write_all(b"Swift,Maruti,2015,45000,Petrol\n").expect("row");
        file.write_all(b"Octavia,\x8Akoda,2016,30000,Diesel\n").expect("latin-1 row");
        file.write_all(b"City,Honda,2018,12000,Petrol\n").expect("row");

        let outcome = load_dataset(&file.path().to_string_lossy());
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.rows.len(), 3);
        assert_eq!(outcome.rows[1].company, "\u{fffd}koda");
        assert_eq!(outcome.rows[1].name, "Octavia");
        assert_eq!(outcome.rows[2].company, "Honda");
    }

    #[test]
    fn header_order_and_padding_do_not_matter() {
        let text = "\u{feff}fuel_type , year,company ,name\nDiesel,2018,Honda,City\n";
        let rows = parse_rows(text).expect("valid CSV");
        assert_eq!(
            rows,
            vec![Row {
                name: "City".into(),
                company: "Honda".into(),
                year: "2018".into(),
                kms_driven: String::new(),
                fuel_type: "Diesel".into(),
            }]
        );
    }

    #[test]
    fn loads_from_file_on_every_call() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{SAMPLE}").expect("write CSV");
        let path = file.path().to_string_lossy().into_owned();

        let first = load_dataset(&path);
        assert_eq!(first.error, None);
        assert_eq!(first.rows.len(), 3);

        writeln!(file, "3,Honda City,Honda,2019,900000,12000,Petrol").expect("append row");
        let second = load_dataset(&path);
        assert_eq!(second.rows.len(), 4);
    }

    #[test]
    fn missing_file_yields_empty_rows_and_status() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope.csv");

        let outcome = load_dataset(&path.to_string_lossy());
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    }

    #[test]
    fn fetch_rows_reports_io_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope.csv");
        assert!(matches!(
            fetch_rows(&path.to_string_lossy()),
            Err(LoadError::Io(_))
        ));
    }

    #[test]
    fn recognises_url_sources() {
        assert!(is_url("http://localhost:5173/Cleaned_Car_data.csv"));
        assert!(is_url("HTTPS://example.org/data.csv"));
        assert!(!is_url("public/Cleaned_Car_data.csv"));
    }
}
