use std::io::Write;
use std::path::Path;

use crate::error::CatalogError;
use crate::state::data_table::DataTable;

/// Write the header row and every table row as CSV.
pub fn write_table_csv<W: Write>(table: &DataTable, writer: W) -> Result<(), CatalogError> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    csv_writer.write_record(&table.headers)?;
    for row in &table.cells {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn export_table_csv(table: &DataTable, path: &Path) -> Result<(), CatalogError> {
    let file = std::fs::File::create(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_table_csv(table, file)?;
    tracing::info!("Exported table to {:?}", path);
    Ok(())
}

/// Tab-separated text, the format spreadsheets accept from the clipboard.
pub fn table_to_tsv(table: &DataTable) -> String {
    let mut out = table.headers.join("\t");
    out.push('\n');
    for row in &table.cells {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}
