use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::Sheet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// CSV reader options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Whether to use type inference when reading
    pub infer_types: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
            infer_types: true,
        }
    }
}

impl CsvOptions {
    /// Create options for TSV (tab-separated values)
    #[must_use]
    pub fn tsv() -> Self {
        CsvOptions {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to infer types
    #[must_use]
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }
}

impl Sheet {
    /// Load a sheet from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_csv_with_options(path, CsvOptions::default())
    }

    /// Load a sheet from a CSV file with custom options
    pub fn from_csv_with_options<P: AsRef<Path>>(path: P, options: CsvOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        Self::from_csv_reader(reader, options)
    }

    /// Load a sheet from a CSV string
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_str_with_options(content, CsvOptions::default())
    }

    /// Load a sheet from a CSV string with custom options
    pub fn from_csv_str_with_options(content: &str, options: CsvOptions) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes(), options)
    }

    /// Load a sheet from a reader
    ///
    /// Every record becomes a row, the header line included; records may
    /// have differing lengths.
    pub fn from_csv_reader<R: Read>(reader: R, options: CsvOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut data: Vec<Vec<CellValue>> = Vec::new();

        for result in csv_reader.records() {
            let record = result?;
            let row: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    if options.infer_types {
                        CellValue::parse(field)
                    } else if field.is_empty() {
                        CellValue::Null
                    } else {
                        CellValue::String(field.to_string())
                    }
                })
                .collect();
            data.push(row);
        }

        let mut sheet = Sheet::with_name("Sheet1");
        *sheet.data_mut() = data;

        Ok(sheet)
    }
}
