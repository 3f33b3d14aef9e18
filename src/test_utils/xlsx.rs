use std::io::{Cursor, Read};

use zip::ZipArchive;

/// Read the XML of the first worksheet from an `.xlsx` file.
#[track_caller]
pub(crate) fn read_sheet_xml(workbook: &[u8]) -> String {
    let mut archive = ZipArchive::new(Cursor::new(workbook)).expect("Could not open workbook");
    let mut sheet = archive
        .by_name("xl/worksheets/sheet1.xml")
        .expect("Could not find the worksheet");
    let mut xml = String::new();
    sheet
        .read_to_string(&mut xml)
        .expect("Could not read the worksheet");

    xml
}
