//! XLSX writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use quick_xml::escape::escape;
use snapsheet_core::{
    format_number, resolve_for, CanonicalValue, CellAddress, CellRange, ExportTarget, Grid,
    Resolved,
};
use snapsheet_zip::{build_zip_archive, ZipEntry};

use crate::error::{XlsxError, XlsxResult};
use crate::styles::styles_xml;
use crate::MAX_SHEET_NAME_LEN;

/// Options for writing XLSX packages
#[derive(Debug, Clone)]
pub struct XlsxOptions {
    /// Name of the single worksheet (default: "Sheet1")
    pub sheet_name: String,
}

impl Default for XlsxOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
        }
    }
}

/// XLSX package writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a grid to a file path
    pub fn write_file<P: AsRef<Path>>(grid: &Grid, path: P, options: &XlsxOptions) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(grid, file, options)
    }

    /// Write a grid to a writer
    pub fn write<W: Write>(grid: &Grid, mut writer: W, options: &XlsxOptions) -> XlsxResult<()> {
        let bytes = Self::to_bytes(grid, options)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Build the package in memory
    pub fn to_bytes(grid: &Grid, options: &XlsxOptions) -> XlsxResult<Vec<u8>> {
        let bytes = build_zip_archive(Self::parts(grid, options)?)?;
        log::debug!(
            "xlsx: wrote {} rows x {} columns ({} bytes)",
            grid.row_count(),
            grid.column_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// The six package parts, in archive order
    pub fn parts(grid: &Grid, options: &XlsxOptions) -> XlsxResult<Vec<ZipEntry>> {
        validate_sheet_name(&options.sheet_name)?;

        Ok(vec![
            ZipEntry::new("[Content_Types].xml", Self::content_types_xml()),
            ZipEntry::new("_rels/.rels", Self::root_rels_xml()),
            ZipEntry::new("xl/workbook.xml", Self::workbook_xml(&options.sheet_name)),
            ZipEntry::new("xl/_rels/workbook.xml.rels", Self::workbook_rels_xml()),
            ZipEntry::new("xl/styles.xml", styles_xml()),
            ZipEntry::new("xl/worksheets/sheet1.xml", Self::worksheet_xml(grid)),
        ])
    }

    fn content_types_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#
    }

    fn root_rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#
    }

    fn workbook_xml(sheet_name: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="{}" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#,
            escape(sheet_name)
        )
    }

    fn workbook_rels_xml() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#
    }

    fn worksheet_xml(grid: &Grid) -> String {
        let mut rows = String::new();
        let mut extent: Option<CellRange> = None;

        // Sparse: only rows and cells with content are written
        for (row_idx, row) in grid.rows().enumerate() {
            let mut cells = String::new();

            for (col_idx, cell) in row.iter().enumerate() {
                let addr = CellAddress::new(row_idx, col_idx);
                let Some(xml) = cell_xml(&addr.to_a1_string(), resolve_for(cell, ExportTarget::Ooxml))
                else {
                    continue;
                };
                cells.push_str("\n            ");
                cells.push_str(&xml);
                match extent.as_mut() {
                    Some(range) => range.extend(addr),
                    None => extent = Some(CellRange::single(addr)),
                }
            }

            if !cells.is_empty() {
                rows.push_str(&format!("\n        <row r=\"{}\">", row_idx + 1));
                rows.push_str(&cells);
                rows.push_str("\n        </row>");
            }
        }

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if let Some(range) = extent {
            content.push_str(&format!("\n    <dimension ref=\"{}\"/>", range));
        }

        if rows.is_empty() {
            content.push_str("\n    <sheetData/>");
        } else {
            content.push_str("\n    <sheetData>");
            content.push_str(&rows);
            content.push_str("\n    </sheetData>");
        }

        content.push_str("\n</worksheet>");
        content
    }
}

/// Build an XLSX package with default options
pub fn to_xlsx_archive(grid: &Grid) -> XlsxResult<Vec<u8>> {
    XlsxWriter::to_bytes(grid, &XlsxOptions::default())
}

/// A single `<c>` element, or `None` when the cell is left out
fn cell_xml(cell_ref: &str, resolved: Resolved<'_>) -> Option<String> {
    let value = match resolved {
        Resolved::Formula(text) => {
            let formula = text.strip_prefix('=').unwrap_or(text);
            return Some(format!("<c r=\"{}\"><f>{}</f></c>", cell_ref, escape(formula)));
        }
        Resolved::Value { value, .. } => value,
    };

    match value {
        CanonicalValue::Number(n) => Some(format!(
            "<c r=\"{}\"><v>{}</v></c>",
            cell_ref,
            format_number(n)
        )),
        CanonicalValue::Boolean(b) => Some(format!(
            "<c r=\"{}\" t=\"b\"><v>{}</v></c>",
            cell_ref,
            if b { 1 } else { 0 }
        )),
        CanonicalValue::String(s) => {
            let space = if needs_space_preserve(s) {
                " xml:space=\"preserve\""
            } else {
                ""
            };
            Some(format!(
                "<c r=\"{}\" t=\"inlineStr\"><is><t{}>{}</t></is></c>",
                cell_ref,
                space,
                escape(s)
            ))
        }
        CanonicalValue::Null => None,
    }
}

fn needs_space_preserve(s: &str) -> bool {
    s.trim() != s || s.contains(|c| matches!(c, '\t' | '\n' | '\r'))
}

fn validate_sheet_name(name: &str) -> XlsxResult<()> {
    let invalid = name.trim().is_empty()
        || name.chars().count() > MAX_SHEET_NAME_LEN
        || name.contains(|c| matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        || name.starts_with('\'')
        || name.ends_with('\'');
    if invalid {
        return Err(XlsxError::InvalidSheetName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use snapsheet_core::{CellSnapshot, CellValue};
    use std::io::{Cursor, Read};

    /// Row number and cell references of every `<row>` in a worksheet
    fn row_layout(xml: &str) -> Vec<(String, Vec<String>)> {
        let mut reader = Reader::from_str(xml);
        let mut rows: Vec<(String, Vec<String>)> = Vec::new();
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) | Event::Empty(e) => {
                    let attr = |name: &str| {
                        e.try_get_attribute(name)
                            .unwrap()
                            .map(|a| a.unescape_value().unwrap().into_owned())
                    };
                    match e.name().as_ref() {
                        b"row" => rows.push((attr("r").unwrap(), Vec::new())),
                        b"c" => rows.last_mut().unwrap().1.push(attr("r").unwrap()),
                        _ => {}
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        rows
    }

    fn sheet_xml(grid: &Grid) -> String {
        let bytes = to_xlsx_archive(grid).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn test_package_parts() {
        let bytes = to_xlsx_archive(&Grid::new(1, 1)).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "xl/_rels/workbook.xml.rels",
                "xl/styles.xml",
                "xl/workbook.xml",
                "xl/worksheets/sheet1.xml",
            ]
        );
    }

    #[test]
    fn test_parts_order() {
        let parts = XlsxWriter::parts(&Grid::new(1, 1), &XlsxOptions::default()).unwrap();
        let names: Vec<&str> = parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names[0], "[Content_Types].xml");
        assert_eq!(names[5], "xl/worksheets/sheet1.xml");
    }

    #[test]
    fn test_cell_types() {
        let grid = Grid::from_rows(vec![vec![
            CellSnapshot::value(42),
            CellSnapshot::value(true),
            CellSnapshot::value("text"),
            CellSnapshot::formula("=A1*2", 100.0),
            CellSnapshot::value(false),
        ]]);
        let xml = XlsxWriter::worksheet_xml(&grid);

        assert!(xml.contains(r#"<c r="A1"><v>42</v></c>"#));
        assert!(xml.contains(r#"<c r="B1" t="b"><v>1</v></c>"#));
        assert!(xml.contains(r#"<c r="C1" t="inlineStr"><is><t>text</t></is></c>"#));
        assert!(xml.contains(r#"<c r="D1"><f>A1*2</f></c>"#));
        assert!(xml.contains(r#"<c r="E1" t="b"><v>0</v></c>"#));
        assert!(!xml.contains("<v>100</v>"));
        assert!(xml.contains(r#"<dimension ref="A1:E1"/>"#));
    }

    #[test]
    fn test_escaping_and_space_preserve() {
        let grid = Grid::from_rows(vec![vec![
            CellSnapshot::value("a < b & \"c\" 'd'"),
            CellSnapshot {
                display_value: CellValue::string(" lead"),
                formula: None,
            },
            CellSnapshot::value("tab\tinside"),
            CellSnapshot::formula("=IF(A1<>\"\",1,0)", 1.0),
        ]]);
        let xml = XlsxWriter::worksheet_xml(&grid);

        assert!(xml.contains("<t>a &lt; b &amp; &quot;c&quot; &apos;d&apos;</t>"));
        assert!(xml.contains(r#"<t xml:space="preserve"> lead</t>"#));
        assert!(xml.contains("<t xml:space=\"preserve\">tab\tinside</t>"));
        assert!(xml.contains("<f>IF(A1&lt;&gt;&quot;&quot;,1,0)</f>"));
    }

    #[test]
    fn test_sparse_rows_and_cells() {
        let mut grid = Grid::new(5, 3);
        grid.set(0, 0, CellSnapshot::value("a")).unwrap();
        grid.set(2, 1, CellSnapshot::value(3)).unwrap();
        grid.set(2, 2, CellSnapshot::value(f64::NAN)).unwrap();
        grid.set(4, 2, CellSnapshot::formula("=B3", CellValue::Null)).unwrap();

        let layout = row_layout(&sheet_xml(&grid));
        assert_eq!(
            layout,
            vec![
                ("1".to_string(), vec!["A1".to_string()]),
                ("3".to_string(), vec!["B3".to_string()]),
                ("5".to_string(), vec!["C5".to_string()]),
            ]
        );
    }

    #[test]
    fn test_bare_equals_is_not_a_formula() {
        let grid = Grid::from_rows(vec![vec![
            CellSnapshot {
                display_value: CellValue::Number(3.0),
                formula: Some("=".to_string()),
            },
            CellSnapshot {
                display_value: CellValue::Null,
                formula: Some("= ".to_string()),
            },
        ]]);
        let xml = XlsxWriter::worksheet_xml(&grid);

        assert!(xml.contains(r#"<c r="A1"><v>3</v></c>"#));
        assert!(!xml.contains("<f>"));
        assert!(!xml.contains(r#"r="B1""#));
    }

    #[test]
    fn test_empty_grid() {
        let xml = XlsxWriter::worksheet_xml(&Grid::new(3, 3));
        assert!(xml.contains("<sheetData/>"));
        assert!(!xml.contains("<dimension"));
        assert!(!xml.contains("<row"));
    }

    #[test]
    fn test_sheet_name() {
        let options = XlsxOptions {
            sheet_name: "Q1 & Q2".to_string(),
        };
        let parts = XlsxWriter::parts(&Grid::new(1, 1), &options).unwrap();
        let workbook = String::from_utf8(parts[2].data.clone()).unwrap();
        assert!(workbook.contains(r#"<sheet name="Q1 &amp; Q2" sheetId="1" r:id="rId1"/>"#));

        let too_long = "x".repeat(32);
        for bad in ["", "a/b", too_long.as_str(), "'quoted'"] {
            let options = XlsxOptions {
                sheet_name: bad.to_string(),
            };
            assert!(matches!(
                XlsxWriter::parts(&Grid::new(1, 1), &options),
                Err(XlsxError::InvalidSheetName(_))
            ));
        }
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let grid = Grid::from_rows(vec![vec![CellSnapshot::value(1)]]);
        XlsxWriter::write_file(&grid, &path, &XlsxOptions::default()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, to_xlsx_archive(&grid).unwrap());
    }

    proptest::proptest! {
        #[test]
        fn prop_cells_only_for_non_blank(mask in proptest::collection::vec(proptest::collection::vec(0u8..4, 4), 1..6)) {
            let rows: Vec<Vec<CellSnapshot>> = mask
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&kind| match kind {
                            0 => CellSnapshot::blank(),
                            1 => CellSnapshot::value(7),
                            2 => CellSnapshot::value(f64::INFINITY),
                            _ => CellSnapshot::value("s"),
                        })
                        .collect()
                })
                .collect();
            let grid = Grid::from_rows(rows);
            let layout = row_layout(&XlsxWriter::worksheet_xml(&grid));

            let mut expected = Vec::new();
            for (r, row) in mask.iter().enumerate() {
                let refs: Vec<String> = row
                    .iter()
                    .enumerate()
                    .filter(|&(_, &kind)| kind == 1 || kind == 3)
                    .map(|(c, _)| CellAddress::new(r, c).to_a1_string())
                    .collect();
                if !refs.is_empty() {
                    expected.push(((r + 1).to_string(), refs));
                }
            }
            proptest::prop_assert_eq!(layout, expected);
        }
    }
}
