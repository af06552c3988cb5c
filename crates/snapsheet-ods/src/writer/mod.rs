//! ODS writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::escape::escape;
use snapsheet_core::{
    format_number, formula_note, resolve_for, CanonicalValue, ExportTarget, Grid, Resolved,
};
use snapsheet_zip::{build_zip_archive, ZipEntry};

use crate::error::{OdsError, OdsResult};
use crate::text::paragraph_content;
use crate::{MIME_TYPE, ODF_VERSION};

const NS_OFFICE: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
const NS_TABLE: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";
const NS_TEXT: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";
const NS_STYLE: &str = "urn:oasis:names:tc:opendocument:xmlns:style:1.0";
const NS_FO: &str = "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0";
const NS_META: &str = "urn:oasis:names:tc:opendocument:xmlns:meta:1.0";
const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
const NS_CONFIG: &str = "urn:oasis:names:tc:opendocument:xmlns:config:1.0";
const NS_OOO: &str = "http://openoffice.org/2004/office";
const NS_MANIFEST: &str = "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0";

/// Parts listed in the manifest, with their media types
const MANIFEST_PARTS: [(&str, &str); 4] = [
    ("content.xml", "text/xml"),
    ("styles.xml", "text/xml"),
    ("meta.xml", "text/xml"),
    ("settings.xml", "text/xml"),
];

/// Options for writing ODS packages
#[derive(Debug, Clone)]
pub struct OdsOptions {
    /// Name of the single table (default: "Sheet1")
    pub table_name: String,
    /// Generator recorded in `meta.xml`
    pub generator: String,
    /// Creation time recorded in `meta.xml` (default: now)
    pub created: Option<DateTime<Utc>>,
}

impl Default for OdsOptions {
    fn default() -> Self {
        Self {
            table_name: "Sheet1".to_string(),
            generator: concat!("snapsheet/", env!("CARGO_PKG_VERSION")).to_string(),
            created: None,
        }
    }
}

/// ODS package writer
pub struct OdsWriter;

impl OdsWriter {
    /// Write a grid to a file path
    pub fn write_file<P: AsRef<Path>>(grid: &Grid, path: P, options: &OdsOptions) -> OdsResult<()> {
        let file = File::create(path)?;
        Self::write(grid, file, options)
    }

    /// Write a grid to a writer
    pub fn write<W: Write>(grid: &Grid, mut writer: W, options: &OdsOptions) -> OdsResult<()> {
        let bytes = Self::to_bytes(grid, options)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Build the package in memory
    pub fn to_bytes(grid: &Grid, options: &OdsOptions) -> OdsResult<Vec<u8>> {
        let bytes = build_zip_archive(Self::parts(grid, options)?)?;
        log::debug!(
            "ods: wrote {} rows x {} columns ({} bytes)",
            grid.row_count(),
            grid.column_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// The six package parts, `mimetype` first
    pub fn parts(grid: &Grid, options: &OdsOptions) -> OdsResult<Vec<ZipEntry>> {
        if options.table_name.trim().is_empty() {
            return Err(OdsError::InvalidTableName(options.table_name.clone()));
        }
        let created = options.created.unwrap_or_else(Utc::now);

        Ok(vec![
            ZipEntry::new("mimetype", MIME_TYPE),
            ZipEntry::new("content.xml", Self::content_xml(grid, &options.table_name)),
            ZipEntry::new("styles.xml", Self::styles_xml()),
            ZipEntry::new("meta.xml", Self::meta_xml(&options.generator, created)),
            ZipEntry::new("settings.xml", Self::settings_xml(&options.table_name)),
            ZipEntry::new("META-INF/manifest.xml", Self::manifest_xml()),
        ])
    }

    fn content_xml(grid: &Grid, table_name: &str) -> String {
        let mut out = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="{NS_OFFICE}" xmlns:table="{NS_TABLE}" xmlns:text="{NS_TEXT}" office:version="{ODF_VERSION}">
  <office:body>
    <office:spreadsheet>
      <table:table table:name="{}">"#,
            escape(table_name)
        );

        if grid.column_count() > 0 {
            out.push_str(&format!(
                "\n        <table:table-column table:number-columns-repeated=\"{}\"/>",
                grid.column_count()
            ));
        }

        // Dense: every row and every column, blank or not
        for row in grid.rows() {
            if row.is_empty() {
                out.push_str("\n        <table:table-row/>");
                continue;
            }
            out.push_str("\n        <table:table-row>");
            for cell in row {
                out.push_str("\n          ");
                out.push_str(&cell_xml(resolve_for(cell, ExportTarget::Odf)));
            }
            out.push_str("\n        </table:table-row>");
        }

        out.push_str(
            r#"
      </table:table>
    </office:spreadsheet>
  </office:body>
</office:document-content>"#,
        );
        out
    }

    fn styles_xml() -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="{NS_OFFICE}" xmlns:style="{NS_STYLE}" xmlns:fo="{NS_FO}" office:version="{ODF_VERSION}">
  <office:styles>
    <style:default-style style:family="table-cell">
      <style:text-properties fo:font-size="10pt"/>
    </style:default-style>
    <style:style style:name="Default" style:family="table-cell"/>
  </office:styles>
</office:document-styles>"#
        )
    }

    fn meta_xml(generator: &str, created: DateTime<Utc>) -> String {
        let stamp = created.format("%Y-%m-%dT%H:%M:%S");
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-meta xmlns:office="{NS_OFFICE}" xmlns:meta="{NS_META}" xmlns:dc="{NS_DC}" office:version="{ODF_VERSION}">
  <office:meta>
    <meta:generator>{}</meta:generator>
    <meta:creation-date>{stamp}</meta:creation-date>
    <dc:date>{stamp}</dc:date>
  </office:meta>
</office:document-meta>"#,
            escape(generator)
        )
    }

    fn settings_xml(table_name: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-settings xmlns:office="{NS_OFFICE}" xmlns:config="{NS_CONFIG}" xmlns:ooo="{NS_OOO}" office:version="{ODF_VERSION}">
  <office:settings>
    <config:config-item-set config:name="ooo:view-settings">
      <config:config-item-map-indexed config:name="Views">
        <config:config-item-map-entry>
          <config:config-item config:name="ViewId" config:type="string">view1</config:config-item>
          <config:config-item config:name="ActiveTable" config:type="string">{}</config:config-item>
        </config:config-item-map-entry>
      </config:config-item-map-indexed>
    </config:config-item-set>
  </office:settings>
</office:document-settings>"#,
            escape(table_name)
        )
    }

    fn manifest_xml() -> String {
        let mut out = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="{NS_MANIFEST}" manifest:version="{ODF_VERSION}">
  <manifest:file-entry manifest:full-path="/" manifest:version="{ODF_VERSION}" manifest:media-type="{MIME_TYPE}"/>"#
        );
        for (path, media_type) in MANIFEST_PARTS {
            out.push_str(&format!(
                "\n  <manifest:file-entry manifest:full-path=\"{}\" manifest:media-type=\"{}\"/>",
                path, media_type
            ));
        }
        out.push_str("\n</manifest:manifest>");
        out
    }
}

/// Build an ODS package with default options
pub fn to_ods_archive(grid: &Grid) -> OdsResult<Vec<u8>> {
    OdsWriter::to_bytes(grid, &OdsOptions::default())
}

/// A single `<table:table-cell>` element
fn cell_xml(resolved: Resolved<'_>) -> String {
    let (value, annotation) = match resolved {
        Resolved::Value { value, annotation } => (value, annotation),
        // Formulas are never live in ODS output; keep the text visible
        Resolved::Formula(text) => (CanonicalValue::String(text), None),
    };

    let note = annotation
        .map(|formula| {
            format!(
                "<office:annotation><text:p>{}</text:p></office:annotation>",
                paragraph_content(&formula_note(formula))
            )
        })
        .unwrap_or_default();

    match value {
        CanonicalValue::Number(n) => {
            let text = format_number(n);
            format!(
                r#"<table:table-cell office:value-type="float" office:value="{text}">{note}<text:p>{text}</text:p></table:table-cell>"#
            )
        }
        CanonicalValue::Boolean(b) => format!(
            r#"<table:table-cell office:value-type="boolean" office:boolean-value="{}">{note}<text:p>{}</text:p></table:table-cell>"#,
            b,
            if b { "TRUE" } else { "FALSE" }
        ),
        CanonicalValue::String(s) => format!(
            r#"<table:table-cell office:value-type="string">{note}<text:p>{}</text:p></table:table-cell>"#,
            paragraph_content(s)
        ),
        CanonicalValue::Null if note.is_empty() => "<table:table-cell/>".to_string(),
        CanonicalValue::Null => format!("<table:table-cell>{note}</table:table-cell>"),
    }
}
