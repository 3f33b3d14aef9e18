//! Writes transactions to an Excel workbook (`.xlsx`).
//!
//! A workbook is a zip archive of SpreadsheetML parts. Only the parts needed
//! for a single styled sheet of text cells are written.

use std::io::{Cursor, Write};

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{Error, statement::CleanedTransaction};

/// The MIME type of an `.xlsx` file.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// The name of the only sheet in the workbook.
pub const SHEET_NAME: &str = "Transactions";

/// The column titles, in column order.
pub const COLUMN_TITLES: [&str; 5] = [
    "Date",
    "Event Description",
    "Your Earnings",
    "Payouts",
    "Balance",
];

/// Column widths in characters, in column order.
const COLUMN_WIDTHS: [u32; 5] = [28, 120, 18, 18, 18];

/// Indices into `cellXfs` in the stylesheet.
#[derive(Debug, Clone, Copy)]
enum CellStyle {
    Header = 1,
    Date = 2,
    Description = 3,
    Amount = 4,
}

/// Render `transactions` as an `.xlsx` workbook with one row per transaction.
///
/// Every value is written as a text cell so amounts keep their sign and digit
/// grouping exactly as they appear.
///
/// # Errors
/// Returns [Error::Spreadsheet] if the archive cannot be written.
pub fn write_workbook(transactions: &[CleanedTransaction]) -> Result<Vec<u8>, Error> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let workbook = workbook_xml()
        .map_err(|error| Error::Spreadsheet(format!("could not render workbook: {error}")))?;
    let sheet = sheet_xml(transactions)
        .map_err(|error| Error::Spreadsheet(format!("could not render sheet: {error}")))?;

    let parts: [(&str, &[u8]); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes()),
        ("xl/styles.xml", STYLES.as_bytes()),
        ("xl/worksheets/sheet1.xml", &sheet),
    ];

    for (name, content) in parts {
        zip.start_file(name, options)
            .map_err(|error| Error::Spreadsheet(format!("could not add {name}: {error}")))?;
        zip.write_all(content)
            .map_err(|error| Error::Spreadsheet(format!("could not write {name}: {error}")))?;
    }

    let cursor = zip
        .finish()
        .map_err(|error| Error::Spreadsheet(format!("could not finish workbook: {error}")))?;

    tracing::debug!(
        "Wrote workbook with {} rows, {} bytes",
        transactions.len(),
        cursor.get_ref().len()
    );

    Ok(cursor.into_inner())
}

const SPREADSHEET_NAMESPACE: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIPS_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// The stylesheet. The order of `cellXfs` must match [CellStyle] and the
/// header fill is `366092`.
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><color rgb="FFFFFFFF"/><name val="Calibri"/></font></fonts><fills count="3"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill><fill><patternFill patternType="solid"><fgColor rgb="FF366092"/><bgColor rgb="FF366092"/></patternFill></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="5"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="2" borderId="0" xfId="0" applyFont="1" applyFill="1" applyAlignment="1"><alignment horizontal="center" vertical="center"/></xf><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1"><alignment horizontal="left" vertical="top"/></xf><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1"><alignment horizontal="left" vertical="top" wrapText="1"/></xf><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1"><alignment horizontal="right" vertical="top"/></xf></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

fn write_declaration(writer: &mut Writer<Vec<u8>>) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
}

fn workbook_xml() -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());
    write_declaration(&mut writer)?;

    writer.write_event(Event::Start(BytesStart::new("workbook").with_attributes([
        ("xmlns", SPREADSHEET_NAMESPACE),
        ("xmlns:r", RELATIONSHIPS_NAMESPACE),
    ])))?;
    writer.write_event(Event::Start(BytesStart::new("sheets")))?;
    writer.write_event(Event::Empty(BytesStart::new("sheet").with_attributes([
        ("name", SHEET_NAME),
        ("sheetId", "1"),
        ("r:id", "rId1"),
    ])))?;
    writer.write_event(Event::End(BytesEnd::new("sheets")))?;
    writer.write_event(Event::End(BytesEnd::new("workbook")))?;

    Ok(writer.into_inner())
}

fn sheet_xml(transactions: &[CleanedTransaction]) -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());
    write_declaration(&mut writer)?;

    writer.write_event(Event::Start(
        BytesStart::new("worksheet").with_attributes([("xmlns", SPREADSHEET_NAMESPACE)]),
    ))?;

    writer.write_event(Event::Start(BytesStart::new("cols")))?;
    for (index, width) in COLUMN_WIDTHS.iter().enumerate() {
        let column = (index + 1).to_string();
        let width = width.to_string();
        writer.write_event(Event::Empty(BytesStart::new("col").with_attributes([
            ("min", column.as_str()),
            ("max", column.as_str()),
            ("width", width.as_str()),
            ("customWidth", "1"),
        ])))?;
    }
    writer.write_event(Event::End(BytesEnd::new("cols")))?;

    writer.write_event(Event::Start(BytesStart::new("sheetData")))?;

    write_row(&mut writer, 1, &COLUMN_TITLES, &[CellStyle::Header; 5])?;

    let data_styles = [
        CellStyle::Date,
        CellStyle::Description,
        CellStyle::Amount,
        CellStyle::Amount,
        CellStyle::Amount,
    ];

    for (index, transaction) in transactions.iter().enumerate() {
        let values = [
            transaction.date.as_str(),
            transaction.event_description.as_str(),
            transaction.earnings.as_str(),
            transaction.payouts.as_str(),
            transaction.balance.as_str(),
        ];
        write_row(&mut writer, index + 2, &values, &data_styles)?;
    }

    writer.write_event(Event::End(BytesEnd::new("sheetData")))?;
    writer.write_event(Event::End(BytesEnd::new("worksheet")))?;

    Ok(writer.into_inner())
}

/// Write one row of inline string cells. Empty values get a styled cell
/// without content.
fn write_row(
    writer: &mut Writer<Vec<u8>>,
    row_number: usize,
    values: &[&str; 5],
    styles: &[CellStyle; 5],
) -> Result<(), quick_xml::Error> {
    let row_reference = row_number.to_string();
    writer.write_event(Event::Start(
        BytesStart::new("row").with_attributes([("r", row_reference.as_str())]),
    ))?;

    for (index, (value, style)) in values.iter().zip(styles).enumerate() {
        let reference = format!("{}{row_number}", column_letter(index));
        let style = (*style as u8).to_string();
        let cell = BytesStart::new("c")
            .with_attributes([("r", reference.as_str()), ("s", style.as_str())]);

        if value.is_empty() {
            writer.write_event(Event::Empty(cell))?;
            continue;
        }

        writer.write_event(Event::Start(cell.with_attributes([("t", "inlineStr")])))?;
        writer.write_event(Event::Start(BytesStart::new("is")))?;
        writer.write_event(Event::Start(
            BytesStart::new("t").with_attributes([("xml:space", "preserve")]),
        ))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new("t")))?;
        writer.write_event(Event::End(BytesEnd::new("is")))?;
        writer.write_event(Event::End(BytesEnd::new("c")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("row")))
}

/// The letter of a column, only covers the first 26 columns.
fn column_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

#[cfg(test)]
mod spreadsheet_tests {
    use std::io::{Cursor, Read};

    use zip::ZipArchive;

    use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};

    use crate::{spreadsheet::write_workbook, statement::CleanedTransaction};

    fn read_part(workbook: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(workbook)).expect("Could not open workbook");
        let mut file = archive.by_name(name).expect("Could not find part");
        let mut content = String::new();
        file.read_to_string(&mut content)
            .expect("Could not read part");
        content
    }

    fn transaction(date: &str, description: &str, earnings: &str) -> CleanedTransaction {
        CleanedTransaction {
            date: date.to_owned(),
            event_description: description.to_owned(),
            earnings: earnings.to_owned(),
            payouts: String::new(),
            balance: "1,999.00".to_owned(),
        }
    }

    #[test]
    fn writes_all_parts() {
        let workbook = write_workbook(&[]).unwrap();
        let archive = ZipArchive::new(Cursor::new(workbook.as_slice())).unwrap();

        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort();

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
    fn sheet_is_named_transactions() {
        let workbook = write_workbook(&[]).unwrap();

        let xml = read_part(&workbook, "xl/workbook.xml");

        assert!(xml.contains(r#"<sheet name="Transactions""#));
    }

    #[test]
    fn header_row_has_titles_in_order() {
        let workbook = write_workbook(&[]).unwrap();

        let xml = read_part(&workbook, "xl/worksheets/sheet1.xml");

        let titles = ["Date", "Event Description", "Your Earnings", "Payouts", "Balance"];
        let mut last_position = 0;
        for (title, column) in titles.iter().zip(['A', 'B', 'C', 'D', 'E']) {
            let cell = format!(
                r#"<c r="{column}1" s="1" t="inlineStr"><is><t xml:space="preserve">{title}</t></is></c>"#
            );
            let position = xml.find(&cell).unwrap_or_else(|| panic!("missing {cell}"));
            assert!(position > last_position, "{title} is out of order");
            last_position = position;
        }
    }

    #[test]
    fn one_row_per_transaction_in_order() {
        let transactions = vec![
            transaction("Mon, Jan 15 2:30 PM", "Trip fare", "123.45"),
            transaction("Tue, Jan 16", "Tip", "-5.00"),
        ];

        let workbook = write_workbook(&transactions).unwrap();
        let xml = read_part(&workbook, "xl/worksheets/sheet1.xml");

        assert_eq!(xml.matches("<row ").count(), 3);
        let first = xml.find("Mon, Jan 15 2:30 PM").unwrap();
        let second = xml.find("Tue, Jan 16").unwrap();
        assert!(first < second);
        assert!(xml.contains(r#"<c r="C3" s="4" t="inlineStr"><is><t xml:space="preserve">-5.00</t></is></c>"#));
        assert!(xml.contains(r#"<c r="D2" s="4"/>"#));
    }

    #[test]
    fn amounts_are_text_cells() {
        let workbook = write_workbook(&[transaction("Mon, Jan 15", "Trip", "1,234.50")]).unwrap();

        let xml = read_part(&workbook, "xl/worksheets/sheet1.xml");

        assert!(xml.contains(r#"<c r="C2" s="4" t="inlineStr"><is><t xml:space="preserve">1,234.50</t></is></c>"#));
        assert!(!xml.contains("<v>"), "want no numeric cells");
    }

    #[test]
    fn column_widths() {
        let workbook = write_workbook(&[]).unwrap();

        let xml = read_part(&workbook, "xl/worksheets/sheet1.xml");

        for (column, width) in [(1, 28), (2, 120), (3, 18), (4, 18), (5, 18)] {
            let col = format!(r#"<col min="{column}" max="{column}" width="{width}" customWidth="1"/>"#);
            assert!(xml.contains(&col), "missing {col}");
        }
    }

    #[test]
    fn header_style_is_bold_white_on_accent() {
        let workbook = write_workbook(&[]).unwrap();

        let xml = read_part(&workbook, "xl/styles.xml");

        assert!(xml.contains(r#"<font><b/><sz val="11"/><color rgb="FFFFFFFF"/>"#));
        assert!(xml.contains(r#"<fgColor rgb="FF366092"/>"#));
        assert!(xml.contains(r#"<alignment horizontal="center" vertical="center"/>"#));
    }

    #[test]
    fn escapes_markup_in_descriptions() {
        let workbook = write_workbook(&[transaction("Mon, Jan 15", "Tips & <bonus>", "1.00")]).unwrap();

        let xml = read_part(&workbook, "xl/worksheets/sheet1.xml");

        assert!(xml.contains("Tips &amp; &lt;bonus&gt;"));
    }

    #[test]
    fn reads_back_as_spreadsheet() {
        let transactions = vec![
            transaction("Mon, Jan 15 2:30 PM", "Trip fare\nAirport", "123.45"),
            transaction("Tue, Jan 16", r#"Tips & <bonus> "weekly" 'extra'"#, "-5.00"),
        ];
        let workbook = write_workbook(&transactions).unwrap();

        let mut spreadsheet: Xlsx<_> =
            open_workbook_from_rs(Cursor::new(workbook)).expect("Could not open workbook");

        assert_eq!(spreadsheet.sheet_names(), vec!["Transactions".to_owned()]);

        let range = spreadsheet
            .worksheet_range("Transactions")
            .expect("Could not read sheet");
        let rows: Vec<Vec<Data>> = range.rows().map(<[Data]>::to_vec).collect();

        let text = |value: &str| Data::String(value.to_owned());
        let want = vec![
            vec![
                text("Date"),
                text("Event Description"),
                text("Your Earnings"),
                text("Payouts"),
                text("Balance"),
            ],
            vec![
                text("Mon, Jan 15 2:30 PM"),
                text("Trip fare\nAirport"),
                text("123.45"),
                Data::Empty,
                text("1,999.00"),
            ],
            vec![
                text("Tue, Jan 16"),
                text(r#"Tips & <bonus> "weekly" 'extra'"#),
                text("-5.00"),
                Data::Empty,
                text("1,999.00"),
            ],
        ];
        assert_eq!(rows, want);
    }

    #[test]
    fn empty_workbook_has_only_header_row() {
        let workbook = write_workbook(&[]).unwrap();

        let mut spreadsheet: Xlsx<_> =
            open_workbook_from_rs(Cursor::new(workbook)).expect("Could not open workbook");
        let range = spreadsheet
            .worksheet_range("Transactions")
            .expect("Could not read sheet");

        assert_eq!(range.height(), 1);
        assert_eq!(
            range.get((0, 1)),
            Some(&Data::String("Event Description".to_owned()))
        );
    }
}
