//! Resolução de cabeçalhos
//!
//! Cada campo aceita uma lista de nomes alternativos em ordem de
//! prioridade. A resolução acontece uma vez por aba, no carregamento; o
//! resto do código acessa as colunas pelo campo canônico.

use crate::sheet::{header_matches, CellValue, Record};
use std::collections::HashMap;

/// Campo canônico
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Tag,
    Name,
    Manufacturer,
    Model,
    Sector,
    SerialNumber,
    AssetTag,
    Inactive,
    Status,
    OriginalSector,
    FoundLocation,
    FoundSector,
    Notes,
    Date,
    Time,
    Timestamp,
}

/// Campo + nomes aceitos (o primeiro é o preferido)
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: Field,
    pub aliases: &'static [&'static str],
}

const fn spec(field: Field, aliases: &'static [&'static str]) -> ColumnSpec {
    ColumnSpec { field, aliases }
}

const SERIAL_ALIASES: &[&str] = &[
    "Nº de Série",
    "Nº Série",
    "NumeroSerie",
    "Número de Série",
    "Numero de Serie",
    "SN",
    "Serial",
];

const ASSET_TAG_ALIASES: &[&str] = &["Patrimônio", "Patrimonio"];

/// Colunas da aba de equipamentos
pub const EQUIPMENT_COLUMNS: &[ColumnSpec] = &[
    spec(Field::Tag, &["Tag"]),
    spec(Field::Name, &["Equipamento"]),
    spec(Field::Manufacturer, &["Fabricante"]),
    spec(Field::Model, &["Modelo"]),
    spec(Field::Sector, &["Setor"]),
    spec(Field::SerialNumber, SERIAL_ALIASES),
    spec(Field::AssetTag, ASSET_TAG_ALIASES),
    spec(Field::Inactive, &["Inativo"]),
];

/// Colunas da aba de ronda (atuais e de revisões anteriores)
pub const LEDGER_COLUMNS: &[ColumnSpec] = &[
    spec(Field::Tag, &["Tag"]),
    spec(Field::Name, &["Equipamento"]),
    spec(Field::OriginalSector, &["Setor", "Setor Original"]),
    spec(Field::SerialNumber, SERIAL_ALIASES),
    spec(Field::AssetTag, ASSET_TAG_ALIASES),
    spec(
        Field::FoundLocation,
        &["Localização", "Localização Encontrada", "Localizacao"],
    ),
    spec(Field::FoundSector, &["Setor Localizado"]),
    spec(Field::Status, &["Status"]),
    spec(Field::Notes, &["Observações", "Observacoes"]),
    spec(Field::Date, &["Data da Ronda", "Data da Verificação"]),
    spec(Field::Time, &["Hora da Ronda"]),
    spec(Field::Timestamp, &["timestamp"]),
];

/// Mapa campo canônico → índice da coluna
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    columns: HashMap<Field, usize>,
}

impl ColumnMap {
    /// Resolve os cabeçalhos de uma aba contra a lista de campos
    pub fn resolve(headers: &[String], specs: &[ColumnSpec]) -> Self {
        let mut columns = HashMap::new();

        for spec in specs {
            let found = spec.aliases.iter().find_map(|alias| {
                headers
                    .iter()
                    .position(|h| header_matches(h, alias))
            });
            if let Some(index) = found {
                columns.insert(spec.field, index);
            }
        }

        Self { columns }
    }

    pub fn index(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn has(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }

    pub fn cell<'a>(&self, record: &'a Record, field: Field) -> Option<&'a CellValue> {
        self.index(field).and_then(|i| record.value_at(i))
    }

    /// Texto do campo, sem espaços nas pontas; vazio se a coluna não existe
    pub fn text(&self, record: &Record, field: Field) -> String {
        self.cell(record, field)
            .map(|v| v.as_text().trim().to_string())
            .unwrap_or_default()
    }
}
