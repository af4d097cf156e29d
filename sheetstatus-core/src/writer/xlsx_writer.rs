// ! Minimal XLSX writer: a single worksheet of inline strings

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const SHEET_NAME: &str = "Sheet1";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Build an XLSX archive in memory: the header row followed by one row per
/// entry of `rows`. Empty strings leave their cell out.
pub fn build_xlsx(header: &[&str], rows: &[Vec<String>]) -> Result<Vec<u8>> {
    let mut zip_writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip_writer.start_file("[Content_Types].xml", options)?;
    zip_writer.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip_writer.start_file("_rels/.rels", options)?;
    zip_writer.write_all(ROOT_RELS_XML.as_bytes())?;

    zip_writer.start_file("xl/workbook.xml", options)?;
    zip_writer.write_all(&workbook_xml()?)?;

    zip_writer.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip_writer.write_all(WORKBOOK_RELS_XML.as_bytes())?;

    let header_row: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    let all_rows: Vec<&[String]> = std::iter::once(header_row.as_slice())
        .chain(rows.iter().map(Vec::as_slice))
        .collect();

    zip_writer.start_file("xl/worksheets/sheet1.xml", options)?;
    zip_writer.write_all(&worksheet_xml(&all_rows)?)?;

    let cursor = zip_writer.finish()?;
    Ok(cursor.into_inner())
}

fn workbook_xml() -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let workbook = BytesStart::new("workbook")
        .with_attributes([("xmlns", MAIN_NS), ("xmlns:r", REL_NS)]);
    writer.write_event(Event::Start(workbook))?;
    writer.write_event(Event::Start(BytesStart::new("sheets")))?;
    let sheet = BytesStart::new("sheet").with_attributes([
        ("name", SHEET_NAME),
        ("sheetId", "1"),
        ("r:id", "rId1"),
    ]);
    writer.write_event(Event::Empty(sheet))?;
    writer.write_event(Event::End(BytesEnd::new("sheets")))?;
    writer.write_event(Event::End(BytesEnd::new("workbook")))?;

    Ok(writer.into_inner().into_inner())
}

fn worksheet_xml(rows: &[&[String]]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let worksheet = BytesStart::new("worksheet").with_attributes([("xmlns", MAIN_NS)]);
    writer.write_event(Event::Start(worksheet))?;
    writer.write_event(Event::Start(BytesStart::new("sheetData")))?;

    for (row_index, values) in rows.iter().enumerate() {
        let row_number = (row_index + 1).to_string();
        let row = BytesStart::new("row").with_attributes([("r", row_number.as_str())]);
        writer.write_event(Event::Start(row))?;

        for (col_index, value) in values.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let cell_ref = format!("{}{}", column_letter(col_index as u32), row_number);
            let cell = BytesStart::new("c")
                .with_attributes([("r", cell_ref.as_str()), ("t", "inlineStr")]);
            writer.write_event(Event::Start(cell))?;
            writer.write_event(Event::Start(BytesStart::new("is")))?;
            let mut text = BytesStart::new("t");
            // Excel trims edge whitespace unless told otherwise
            if value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace) {
                text.push_attribute(("xml:space", "preserve"));
            }
            writer.write_event(Event::Start(text))?;
            writer.write_event(Event::Text(BytesText::new(value)))?;
            writer.write_event(Event::End(BytesEnd::new("t")))?;
            writer.write_event(Event::End(BytesEnd::new("is")))?;
            writer.write_event(Event::End(BytesEnd::new("c")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("row")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("sheetData")))?;
    writer.write_event(Event::End(BytesEnd::new("worksheet")))?;

    Ok(writer.into_inner().into_inner())
}

/// Convert a 0-based column index to its letter (0 -> A, 26 -> AA)
fn column_letter(mut col: u32) -> String {
    let mut result = String::new();
    loop {
        result.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(7), "H");
        assert_eq!(column_letter(26), "AA");
    }

    #[test]
    fn test_archive_parts() {
        let bytes = build_xlsx(&["A", "B"], &[vec!["x & y".into(), String::new()]]).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
        ] {
            assert!(archive.by_name(part).is_ok(), "missing {}", part);
        }

        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        assert!(sheet.contains(r#"<c r="A2" t="inlineStr"><is><t>x &amp; y</t></is></c>"#));
        // Empty values are not written
        assert!(!sheet.contains(r#"r="B2""#));
    }

    #[test]
    fn test_edge_whitespace_is_preserved() {
        let bytes = build_xlsx(&["A", "B"], &[vec![" Tomahawk ".into(), "Firepower".into()]]).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        assert!(sheet.contains(r#"<t xml:space="preserve"> Tomahawk </t>"#));
        assert!(sheet.contains("<t>Firepower</t>"));
    }
}
