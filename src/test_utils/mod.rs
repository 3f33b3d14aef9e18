#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod pdf;
pub(crate) mod xlsx;

pub(crate) use html::{assert_valid_html, parse_html_document};
pub(crate) use http::{assert_content_type, assert_status_ok};
pub(crate) use pdf::make_pdf;
pub(crate) use xlsx::read_sheet_xml;
