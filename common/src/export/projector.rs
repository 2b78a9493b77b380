//! Projeção do registro para as colunas fixas da aba "Ronda"

use crate::equipment::EquipmentRecord;
use crate::ledger::AuditLedgerEntry;
use crate::sheet::{CellValue, OutputSheet};
use crate::timestamp::TimestampFormat;

/// Cabeçalho da aba de ronda, nesta ordem
pub const EXPORT_COLUMNS: [&str; 11] = [
    "Tag",
    "Equipamento",
    "Setor",
    "Nº de Série",
    "Patrimônio",
    "Localização",
    "Setor Localizado",
    "Status",
    "Observações",
    "Data da Ronda",
    "Hora da Ronda",
];

/// Uma linha exportada: sempre as 11 colunas, vazias quando faltar dado
pub type ExportRow = [String; 11];

pub fn project_entry(entry: &AuditLedgerEntry, format: &TimestampFormat) -> ExportRow {
    let (date, time) = match &entry.confirmed_at {
        Some(ts) => format.split(ts),
        None => (entry.raw_date.clone(), entry.raw_time.clone()),
    };

    [
        entry.tag.clone(),
        entry.equipment_name.clone(),
        entry.original_sector.clone(),
        entry.serial_number().to_string(),
        entry.asset_tag.clone(),
        entry.found_location.clone(),
        entry.found_sector.clone(),
        entry.status.label().to_string(),
        entry.notes.clone(),
        date,
        time,
    ]
}

pub fn project<'a>(
    entries: impl IntoIterator<Item = &'a AuditLedgerEntry>,
    format: &TimestampFormat,
) -> Vec<ExportRow> {
    entries
        .into_iter()
        .map(|e| project_entry(e, format))
        .collect()
}

/// Aba de ronda pronta para gravar
pub fn ledger_sheet(name: &str, rows: Vec<ExportRow>) -> OutputSheet {
    OutputSheet {
        name: name.to_string(),
        headers: EXPORT_COLUMNS.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .into_iter()
            .map(|row| row.into_iter().map(CellValue::from).collect())
            .collect(),
    }
}

/// Aba de equipamentos regravada como foi lida
pub fn equipment_sheet(name: &str, headers: &[String], records: &[EquipmentRecord]) -> OutputSheet {
    OutputSheet {
        name: name.to_string(),
        headers: headers.to_vec(),
        rows: records
            .iter()
            .map(|r| r.source.fields().iter().map(|(_, v)| v.clone()).collect())
            .collect(),
    }
}
