//! Leitura de planilhas (calamine)
//!
//! Implementação de [`WorkbookReader`]: lê só as abas pedidas, usa a
//! primeira linha como cabeçalho e converte as células para [`CellValue`].

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use ronda_common::sheet::header_matches;
use ronda_common::{CellValue, Error, Result, SheetData, Workbook, WorkbookReader};
use std::io::Cursor;

/// Leitor de .xlsx/.xls/.ods
#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineReader;

impl WorkbookReader for CalamineReader {
    fn load_workbook(&self, bytes: &[u8], sheet_names: &[String]) -> Result<Workbook> {
        let primary = sheet_names.first().map(String::as_str).unwrap_or_default();

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| Error::decode(primary, format!("arquivo inválido: {}", e)))?;
        let available = workbook.sheet_names();

        let mut sheets = Vec::new();
        for wanted in sheet_names {
            let actual = available
                .iter()
                .find(|name| *name == wanted)
                .or_else(|| available.iter().find(|name| header_matches(name, wanted)))
                .cloned();

            let Some(actual) = actual else {
                tracing::debug!(sheet = %wanted, "aba não existe na planilha");
                sheets.push(SheetData::empty(wanted.as_str()));
                continue;
            };

            let range = workbook
                .worksheet_range(&actual)
                .map_err(|e| Error::decode(wanted.as_str(), e.to_string()))?;

            let mut rows = range.rows();
            let headers: Vec<String> = match rows.next() {
                Some(header_row) => header_row
                    .iter()
                    .map(|c| cell_to_value(c).as_text().trim().to_string())
                    .collect(),
                None => {
                    sheets.push(SheetData::empty(wanted.as_str()));
                    continue;
                }
            };

            let data = rows.map(|row| row.iter().map(cell_to_value).collect::<Vec<_>>());
            let sheet = SheetData::from_rows(wanted.as_str(), headers, data);
            tracing::debug!(sheet = %wanted, rows = sheet.records.len(), "aba lida");
            sheets.push(sheet);
        }

        Ok(Workbook::new(sheets))
    }
}

/// Converte uma célula do calamine
fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.as_str()),
        Data::Error(_) => CellValue::Empty,
    }
}
