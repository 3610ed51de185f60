//! Extraction of the Mobile Country Code / Mobile Network Code list from the
//! ITU "Annex to ITU Operational Bulletin" document.
//!
//! Check <http://www.itu.int/pub/T-SP-E.212B> for the latest version of the
//! annex. The document is a `.docx` whose second table lists geographical
//! area, MCC+MNC and network name.

mod docx_table;
pub mod errors;

use std::{fs::File, path::Path};

use log::{debug, info};

pub use docx_table::{read_docx_table, read_table, TableRow};
pub use errors::MccMncError;

/// Index of the MCC/MNC table among the top-level tables of the annex.
pub const MCC_MNC_TABLE_INDEX: usize = 1;

/// Writes every complete row of table `table_index` of `input` to `output` as
/// CSV. Rows with an empty cell (column spanning headers, country separators)
/// are skipped. Returns the number of rows written.
pub fn extract_mcc_mnc(
    input: &Path,
    output: &Path,
    table_index: usize,
) -> Result<usize, MccMncError> {
    info!("reading table {} of {}", table_index, input.display());
    let rows = read_docx_table(input, table_index)?;
    write_complete_rows(&rows, File::create(output)?)
}

pub(crate) fn write_complete_rows<W: std::io::Write>(
    rows: &[TableRow],
    out: W,
) -> Result<usize, MccMncError> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    let mut written = 0;
    for row in rows {
        if row.is_empty() || row.iter().any(String::is_empty) {
            debug!("skipping incomplete row {:?}", row);
            continue;
        }
        writer.write_record(row)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}
