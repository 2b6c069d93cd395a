//! In-memory document builders for parser tests

use lopdf::{dictionary, Document, Object, Stream};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Builds a PDF with one page per entry; an empty entry gives a page with no text
pub fn pdf(page_texts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();

    for text in page_texts {
        let content = if text.is_empty() {
            String::new()
        } else {
            format!(
                "BT /F1 12 Tf 100 700 Td ({}) Tj ET",
                text.replace('\\', "\\\\")
                    .replace('(', "\\(")
                    .replace(')', "\\)")
            )
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| id.into()).collect();
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_texts.len() as i64),
    });

    for page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(*page_id) {
            dict.set("Parent", pages_id);
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Packs `(path, contents)` entries into a zip archive
pub fn zip_archive(entries: &[(&str, String)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (path, contents) in entries {
        writer.start_file(*path, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }

    writer.finish().unwrap().into_inner()
}

/// Builds a .docx whose body holds one paragraph per entry
pub fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| {
            if p.is_empty() {
                "<w:p/>".to_string()
            } else {
                format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p)
            }
        })
        .collect();

    docx_from_body(&body)
}

/// Builds a .docx around a raw `w:body` fragment
pub fn docx_from_body(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        body
    );

    zip_archive(&[
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("word/document.xml", document),
    ])
}

/// Builds a .xlsx with one worksheet per entry, cells as inline strings
///
/// Cells that parse as numbers are written as numeric cells; empty strings
/// leave the cell out.
pub fn xlsx(sheets: &[&[&[&str]]]) -> Vec<u8> {
    let sheet_data: Vec<String> = sheets
        .iter()
        .map(|rows| {
            let mut data = String::new();
            for (r, row) in rows.iter().enumerate() {
                data.push_str(&format!(r#"<row r="{}">"#, r + 1));
                for (c, value) in row.iter().enumerate() {
                    if value.is_empty() {
                        continue;
                    }
                    let reference = format!("{}{}", (b'A' + c as u8) as char, r + 1);
                    if value.parse::<f64>().is_ok() {
                        data.push_str(&format!(r#"<c r="{reference}"><v>{value}</v></c>"#));
                    } else {
                        data.push_str(&format!(
                            r#"<c r="{reference}" t="inlineStr"><is><t>{value}</t></is></c>"#
                        ));
                    }
                }
                data.push_str("</row>");
            }
            data
        })
        .collect();

    xlsx_from_sheet_data(&sheet_data)
}

/// Builds a .xlsx around raw `sheetData` fragments, one worksheet each
///
/// The style sheet defines two cell formats: `s="0"` is General and `s="1"`
/// is the built-in short date format (numFmtId 14).
pub fn xlsx_from_sheet_data(sheets: &[String]) -> Vec<u8> {
    let mut sheet_entries = String::new();
    let mut relationships = String::new();
    let mut entries = Vec::new();

    for (i, sheet_data) in sheets.iter().enumerate() {
        let n = i + 1;
        sheet_entries.push_str(&format!(
            r#"<sheet name="Sheet{n}" sheetId="{n}" r:id="rId{n}"/>"#
        ));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        ));
        entries.push((
            format!("xl/worksheets/sheet{n}.xml"),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_data}</sheetData></worksheet>"#
            ),
        ));
    }

    let workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{sheet_entries}</sheets></workbook>"#
    );
    let workbook_rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{relationships}</Relationships>"#
    );

    let mut all: Vec<(&str, String)> = vec![
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("xl/workbook.xml", workbook),
        ("xl/_rels/workbook.xml.rels", workbook_rels),
        ("xl/styles.xml", STYLES.to_string()),
    ];
    for (path, contents) in &entries {
        all.push((path.as_str(), contents.clone()));
    }

    zip_archive(&all)
}

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="14" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs></styleSheet>"#;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;
