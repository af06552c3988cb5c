//! CSV writer

use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvWriteOptions;
use crate::BOM;
use snapsheet_core::{format_number, resolve_for, CanonicalValue, ExportTarget, Grid, Resolved};

/// Delimited text writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a grid to a file
    pub fn write_file<P: AsRef<Path>>(
        grid: &Grid,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(grid, file, options)
    }

    /// Write a grid to a writer as UTF-8
    pub fn write<W: Write>(grid: &Grid, mut writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let text = Self::render(grid, options)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Render a grid to a string
    ///
    /// Every row of the grid is written, blank or not; trimming trailing
    /// blank rows is up to the caller.
    pub fn render(grid: &Grid, options: &CsvWriteOptions) -> CsvResult<String> {
        let delimiter = options.delimiter;
        if matches!(delimiter, '"' | '\r' | '\n') {
            return Err(CsvError::InvalidDelimiter(delimiter));
        }

        let terminator = options.line_terminator.as_str();
        let mut out = String::new();
        if options.bom {
            out.push(BOM);
        }

        for (i, row) in grid.rows().enumerate() {
            if i > 0 {
                out.push_str(terminator);
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    out.push(delimiter);
                }
                let field = match resolve_for(cell, ExportTarget::DelimitedText) {
                    Resolved::Formula(text) => quote_field(text, delimiter),
                    Resolved::Value { value, .. } => encode_value(value, delimiter),
                };
                out.push_str(&field);
            }
        }

        log::debug!(
            "csv: wrote {} rows x {} columns",
            grid.row_count(),
            grid.column_count()
        );
        Ok(out)
    }
}

/// Render a grid as delimited text with a BOM and CRLF row separators
pub fn to_delimited_text(grid: &Grid, delimiter: char) -> CsvResult<String> {
    CsvWriter::render(grid, &CsvWriteOptions::default().with_delimiter(delimiter))
}

fn encode_value(value: CanonicalValue<'_>, delimiter: char) -> Cow<'_, str> {
    match value {
        CanonicalValue::Null => Cow::Borrowed(""),
        CanonicalValue::Number(n) => Cow::Owned(format_number(n)),
        CanonicalValue::Boolean(true) => Cow::Borrowed("true"),
        CanonicalValue::Boolean(false) => Cow::Borrowed("false"),
        CanonicalValue::String(s) => quote_field(s, delimiter),
    }
}

fn needs_quotes(s: &str, delimiter: char) -> bool {
    s.contains(|c: char| c == '"' || c == '\n' || c == '\r' || c == delimiter) || s.trim() != s
}

fn quote_field(s: &str, delimiter: char) -> Cow<'_, str> {
    if needs_quotes(s, delimiter) {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LineTerminator;
    use pretty_assertions::assert_eq;
    use snapsheet_core::{CellSnapshot, CellValue};

    fn grid(rows: Vec<Vec<CellSnapshot>>) -> Grid {
        Grid::from_rows(rows)
    }

    fn parse(text: &str, delimiter: u8) -> Vec<Vec<String>> {
        let body = text.strip_prefix(BOM).unwrap();
        csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(body.as_bytes())
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_literals_unquoted() {
        let g = grid(vec![vec![
            CellSnapshot::value(5),
            CellSnapshot::value(-1.25),
            CellSnapshot::value(true),
            CellSnapshot::value(false),
            CellSnapshot::blank(),
        ]]);
        assert_eq!(to_delimited_text(&g, ',').unwrap(), "\u{FEFF}5,-1.25,true,false,");
    }

    #[test]
    fn test_rows_joined_with_crlf() {
        let g = grid(vec![
            vec![CellSnapshot::value("a"), CellSnapshot::value("b")],
            vec![CellSnapshot::value(1), CellSnapshot::value(2)],
        ]);
        assert_eq!(to_delimited_text(&g, ',').unwrap(), "\u{FEFF}a,b\r\n1,2");
    }

    #[test]
    fn test_quoting_rules() {
        let g = grid(vec![vec![
            CellSnapshot::value("plain"),
            CellSnapshot::value("a,b"),
            CellSnapshot::value("say \"hi\""),
            CellSnapshot::value("two\nlines"),
            CellSnapshot::value("cr\rhere"),
            CellSnapshot {
                display_value: CellValue::string("  padded"),
                formula: None,
            },
        ]]);
        assert_eq!(
            to_delimited_text(&g, ',').unwrap(),
            "\u{FEFF}plain,\"a,b\",\"say \"\"hi\"\"\",\"two\nlines\",\"cr\rhere\",\"  padded\""
        );
    }

    #[test]
    fn test_tab_delimiter_changes_quoting() {
        let g = grid(vec![vec![
            CellSnapshot::value("a,b"),
            CellSnapshot::value("tab\there"),
        ]]);
        assert_eq!(
            to_delimited_text(&g, '\t').unwrap(),
            "\u{FEFF}a,b\t\"tab\there\""
        );
    }

    #[test]
    fn test_formula_text_preferred() {
        let g = grid(vec![vec![
            CellSnapshot::formula("=A1*2", 100.0),
            CellSnapshot::formula("=SUM(A1,B1)", 3.0),
        ]]);
        assert_eq!(
            to_delimited_text(&g, ',').unwrap(),
            "\u{FEFF}=A1*2,\"=SUM(A1,B1)\""
        );
    }

    #[test]
    fn test_non_finite_and_whitespace_blank() {
        let g = grid(vec![vec![
            CellSnapshot::value(f64::NAN),
            CellSnapshot::value(f64::INFINITY),
            CellSnapshot {
                display_value: CellValue::string("   "),
                formula: None,
            },
        ]]);
        assert_eq!(to_delimited_text(&g, ',').unwrap(), "\u{FEFF},,");
    }

    #[test]
    fn test_blank_rows_kept() {
        let mut g = Grid::new(3, 2);
        g.set(0, 0, CellSnapshot::value("x")).unwrap();
        assert_eq!(to_delimited_text(&g, ',').unwrap(), "\u{FEFF}x,\r\n,\r\n,");
    }

    #[test]
    fn test_empty_grid() {
        assert_eq!(to_delimited_text(&Grid::default(), ',').unwrap(), "\u{FEFF}");
    }

    #[test]
    fn test_options() {
        let g = grid(vec![vec![CellSnapshot::value(1)], vec![CellSnapshot::value(2)]]);
        let options = CsvWriteOptions {
            bom: false,
            line_terminator: LineTerminator::LF,
            ..CsvWriteOptions::tsv()
        };
        assert_eq!(CsvWriter::render(&g, &options).unwrap(), "1\n2");
    }

    #[test]
    fn test_invalid_delimiter() {
        let g = Grid::new(1, 1);
        assert!(matches!(
            to_delimited_text(&g, '"'),
            Err(CsvError::InvalidDelimiter('"'))
        ));
    }

    #[test]
    fn test_parses_back_with_csv_reader() {
        let g = grid(vec![
            vec![
                CellSnapshot::value("Name, full"),
                CellSnapshot::value("He said \"no\""),
                CellSnapshot::value(42),
            ],
            vec![
                CellSnapshot::value("multi\nline"),
                CellSnapshot::formula("=A1&B1", "x"),
                CellSnapshot::value(true),
            ],
        ]);
        let text = to_delimited_text(&g, ',').unwrap();
        assert_eq!(
            parse(&text, b','),
            vec![
                vec!["Name, full", "He said \"no\"", "42"],
                vec!["multi\nline", "=A1&B1", "true"],
            ]
        );
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let g = grid(vec![vec![CellSnapshot::value("a"), CellSnapshot::value(1)]]);
        CsvWriter::write_file(&g, &path, &CsvWriteOptions::tsv()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, "\u{FEFF}a\t1".as_bytes());
    }

    proptest::proptest! {
        #[test]
        fn prop_numbers_and_booleans_round_trip(
            numbers in proptest::collection::vec(-1e12f64..1e12, 1..6),
            flags in proptest::collection::vec(proptest::bool::ANY, 1..6),
        ) {
            let mut row: Vec<CellSnapshot> = numbers.iter().map(|&n| CellSnapshot::value(n)).collect();
            row.extend(flags.iter().map(|&b| CellSnapshot::value(b)));
            let g = grid(vec![row]);
            let text = to_delimited_text(&g, ',').unwrap();
            let fields = parse(&text, b',').remove(0);

            for (field, n) in fields.iter().zip(&numbers) {
                proptest::prop_assert!(!field.starts_with('"'));
                proptest::prop_assert_eq!(field.parse::<f64>().unwrap(), *n);
            }
            for (field, b) in fields[numbers.len()..].iter().zip(&flags) {
                proptest::prop_assert_eq!(field.parse::<bool>().unwrap(), *b);
            }
        }
    }
}
