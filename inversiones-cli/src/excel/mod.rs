//! Spreadsheet normalization: MEF workbook to plain CSV

pub mod converter;
pub mod header;

pub use converter::convert_xlsx_to_csv;
