//! Modelo de planilha independente do formato
//!
//! A decodificação/codificação do arquivo binário fica fora do núcleo,
//! atrás das traits [`WorkbookReader`] e [`WorkbookWriter`]. O núcleo só
//! enxerga abas nomeadas com linhas de pares cabeçalho → valor.

use crate::error::Result;
use chrono::NaiveDateTime;

/// Valor de célula com tipagem frouxa
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Texto da célula
    ///
    /// Números inteiros saem sem casa decimal (`12.0` → `"12"`), para que um
    /// Nº de Série digitado como número case com o mesmo valor em texto.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Compara cabeçalhos ignorando maiúsculas e espaços nas pontas
pub fn header_matches(header: &str, wanted: &str) -> bool {
    header.trim().to_lowercase() == wanted.trim().to_lowercase()
}

/// Uma linha da aba: pares (cabeçalho, valor) na ordem das colunas
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monta uma linha a partir de pares (cabeçalho, valor)
    pub fn from_pairs<H, V>(pairs: impl IntoIterator<Item = (H, V)>) -> Self
    where
        H: Into<String>,
        V: Into<CellValue>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(h, v)| (h.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, header: impl Into<String>, value: CellValue) {
        self.fields.push((header.into(), value));
    }

    /// Valor pelo cabeçalho (sem diferenciar maiúsculas)
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(h, _)| header_matches(h, header))
            .map(|(_, v)| v)
    }

    pub fn value_at(&self, column: usize) -> Option<&CellValue> {
        self.fields.get(column).map(|(_, v)| v)
    }

    pub fn fields(&self) -> &[(String, CellValue)] {
        &self.fields
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.is_empty())
    }
}

/// Uma aba lida da planilha
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetData {
    pub name: String,
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl SheetData {
    /// Monta a aba a partir do cabeçalho e das linhas de dados
    ///
    /// Linhas totalmente vazias são descartadas.
    pub fn from_rows(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: impl IntoIterator<Item = Vec<CellValue>>,
    ) -> Self {
        let records = rows
            .into_iter()
            .map(|row| {
                let mut record = Record::new();
                for (i, header) in headers.iter().enumerate() {
                    let value = row.get(i).cloned().unwrap_or_default();
                    record.push(header.clone(), value);
                }
                record
            })
            .filter(|r| !r.is_blank())
            .collect();

        Self {
            name: name.into(),
            headers,
            records,
        }
    }

    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Conjunto de abas lidas
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub sheets: Vec<SheetData>,
}

impl Workbook {
    pub fn new(sheets: Vec<SheetData>) -> Self {
        Self { sheets }
    }

    /// Aba pelo nome: primeiro exato, depois sem diferenciar maiúsculas
    pub fn sheet(&self, name: &str) -> Option<&SheetData> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .or_else(|| self.sheets.iter().find(|s| header_matches(&s.name, name)))
    }
}

/// Aba a ser gravada: cabeçalho literal + linhas
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Leitor de planilhas (colaborador externo)
///
/// Abas pedidas que não existem voltam vazias, não como erro; cabe a quem
/// chama exigir a aba de equipamentos.
pub trait WorkbookReader {
    fn load_workbook(&self, bytes: &[u8], sheet_names: &[String]) -> Result<Workbook>;
}

/// Gravador de planilhas (colaborador externo)
pub trait WorkbookWriter {
    fn write_workbook(&self, sheets: &[OutputSheet]) -> Result<Vec<u8>>;
}
