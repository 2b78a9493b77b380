//! Gravação de .xlsx (biblioteca comum)
//!
//! Implementação de [`WorkbookWriter`] com rust_xlsxwriter. Cada
//! [`OutputSheet`] vira uma aba com o cabeçalho em negrito na primeira linha.

use crate::error::{Error, Result};
use crate::sheet::{CellValue, OutputSheet, WorkbookWriter};
use rust_xlsxwriter::*;

/// Gravador de planilhas .xlsx
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl WorkbookWriter for XlsxWriter {
    fn write_workbook(&self, sheets: &[OutputSheet]) -> Result<Vec<u8>> {
        generate_workbook_buffer(sheets).map_err(Error::Workbook)
    }
}

/// Gera a planilha em memória
pub fn generate_workbook_buffer(sheets: &[OutputSheet]) -> std::result::Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));
    let datetime_format = Format::new().set_num_format("dd/mm/yyyy hh:mm:ss");

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| format!("Erro ao nomear a aba \"{}\": {}", sheet.name, e))?;

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, header.as_str(), &header_format)
                .map_err(|e| format!("Erro ao gravar o cabeçalho: {}", e))?;
        }

        for (i, row) in sheet.rows.iter().enumerate() {
            let row_num = (i + 1) as u32;
            for (col, value) in row.iter().enumerate() {
                write_cell(worksheet, row_num, col as u16, value, &datetime_format)
                    .map_err(|e| format!("Erro ao gravar a linha {}: {}", row_num + 1, e))?;
            }
        }

        worksheet.autofit();
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Erro ao salvar a planilha: {}", e))
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    datetime_format: &Format,
) -> std::result::Result<(), XlsxError> {
    match value {
        CellValue::Empty => {}
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, datetime_format)?;
        }
    }
    Ok(())
}
