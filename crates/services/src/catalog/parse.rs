use quiz_core::model::RawRow;

use crate::error::CatalogError;

/// Parse a header-first CSV document into raw rows.
///
/// Records may be shorter or longer than the header; missing cells are simply
/// absent and extra cells are ignored. Records whose cells are all blank are
/// skipped. Cell values are kept verbatim.
///
/// # Errors
///
/// Returns `CatalogError::Csv` if the input is not valid CSV (e.g. bad UTF-8).
pub fn parse_csv(input: &[u8]) -> Result<Vec<RawRow>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, cell)| (header.as_str(), cell))
                .collect::<RawRow>(),
        );
    }

    Ok(rows)
}
