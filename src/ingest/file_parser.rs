// ==========================================
// Hệ thống mẻ thép - file parsers
// ==========================================
// Excel (.xlsx/.xls) and CSV readers fulfilling the pipeline's input
// contract: an ordered grid of typed cells, first row = headers, first
// sheet only. The parsers do no validation beyond file structure; the
// pipeline classifies the content.
// ==========================================

use crate::domain::heat::CellValue;
use crate::ingest::error::{IngestError, IngestResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

// ==========================================
// FileParser trait
// ==========================================
pub trait FileParser {
    fn parse_to_grid(&self, file_path: &Path) -> IngestResult<Vec<Vec<CellValue>>>;
}

// ==========================================
// CSV parser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_grid(&self, file_path: &Path) -> IngestResult<Vec<Vec<CellValue>>> {
        if !file_path.exists() {
            return Err(IngestError::FileNotFound(file_path.display().to_string()));
        }
        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(IngestError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false) // the grid keeps the header row
            .flexible(true)
            .from_reader(file);

        let mut grid = Vec::new();
        for result in reader.records() {
            let record = result?;
            grid.push(
                record
                    .iter()
                    .map(|value| CellValue::Text(value.to_string()))
                    .collect(),
            );
        }

        debug!(rows = grid.len(), path = %file_path.display(), "CSV parsed");
        Ok(grid)
    }
}

// ==========================================
// Excel parser
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_grid(&self, file_path: &Path) -> IngestResult<Vec<Vec<CellValue>>> {
        if !file_path.exists() {
            return Err(IngestError::FileNotFound(file_path.display().to_string()));
        }
        let ext = file_path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(IngestError::UnsupportedFormat(ext.to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| IngestError::ExcelParseError(e.to_string()))?;

        // First sheet only
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| IngestError::ExcelParseError("workbook has no sheets".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| IngestError::ExcelParseError(e.to_string()))?;

        let grid: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(Self::cell_value).collect())
            .collect();

        debug!(rows = grid.len(), sheet = %sheet_name, "Excel parsed");
        Ok(grid)
    }
}

impl ExcelParser {
    // Date/time cells surface as serial numbers; the pipeline's cell
    // coercer owns the serial → string conversion.
    fn cell_value(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::Empty,
        }
    }
}

// ==========================================
// Universal parser (extension dispatch)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> IngestResult<Vec<Vec<CellValue>>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_grid(path),
            "xlsx" | "xls" => ExcelParser.parse_to_grid(path),
            _ => Err(IngestError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_csv_parser_keeps_header_row() {
        let mut temp = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp, "heat_id,unit,start_time,end_time").unwrap();
        writeln!(temp, "D7090,BOF1,08:00,09:00").unwrap();

        let grid = CsvParser.parse_to_grid(temp.path()).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0][0], CellValue::Text("heat_id".to_string()));
        assert_eq!(grid[1][1], CellValue::Text("BOF1".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_grid(Path::new("missing.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_rejects_wrong_extension() {
        let temp = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = CsvParser.parse_to_grid(temp.path());
        assert!(matches!(result, Err(IngestError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_excel_parser_file_not_found() {
        let result = ExcelParser.parse_to_grid(Path::new("missing.xlsx"));
        assert!(matches!(result, Err(IngestError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_unknown_extension() {
        let result = UniversalFileParser.parse("report.pdf");
        assert!(matches!(result, Err(IngestError::UnsupportedFormat(_))));
    }
}
