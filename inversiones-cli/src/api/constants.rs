//! Fixed values of the MEF "Seguimiento de Inversiones" report endpoint

/// Report export endpoint; answers a POST with the XLSX bytes
pub const MEF_REPORT_ENDPOINT: &str = "https://ofi5.mef.gob.pe/inviertews/Ssi/expRepSSIDet";

/// Government level filter: regional governments
pub const GOVERNMENT_TYPE_REGIONAL: &str = "GR";

/// Headers the endpoint expects from its own web front end
pub const REPORT_HEADERS: &[(&str, &str)] = &[
    ("Accept", "*/*"),
    ("Accept-Language", "es-ES,es;q=0.9"),
    ("Connection", "keep-alive"),
    ("Content-Type", "application/json; charset=UTF-8"),
    ("Origin", "https://ofi5.mef.gob.pe"),
    ("Referer", "https://ofi5.mef.gob.pe/ssi/Ssi/Index"),
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
];

/// File name the downloaded workbook is stored under
pub fn report_file_name(department: &str) -> String {
    format!("inversiones_{}.xlsx", department)
}
