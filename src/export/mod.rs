use crate::error::Result;
use chrono::NaiveDate;
use ronda_common::{Session, WorkbookWriter};
use std::path::{Path, PathBuf};

/// Nome do arquivo exportado: `<prefixo>_<AAAA-MM-DD>.xlsx`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", prefix, date.format("%Y-%m-%d"))
}

fn output_path(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// Grava a lista mestre e o registro da ronda em um novo .xlsx
///
/// `output` pode ser um diretório (o nome vem de [`export_file_name`]) ou o
/// caminho completo do arquivo.
pub fn export_session(
    session: &Session,
    writer: &dyn WorkbookWriter,
    output: &Path,
    prefix: &str,
    today: NaiveDate,
) -> Result<PathBuf> {
    let sheets = session.export_sheets();
    let bytes = writer.write_workbook(&sheets)?;

    let path = output_path(output, &export_file_name(prefix, today));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, bytes)?;

    tracing::info!(
        path = %path.display(),
        entries = session.ledger().len() + session.ledger().unkeyed().len(),
        "ronda exportada"
    );
    Ok(path)
}
