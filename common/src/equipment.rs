//! Equipamento da lista mestre (aba "Equipamentos")

use crate::columns::{ColumnMap, Field, EQUIPMENT_COLUMNS};
use crate::identity::{normalize_id, IdentityKey};
use crate::sheet::{Record, SheetData};
use serde::Serialize;

/// Valores aceitos como "sim" na coluna Inativo (já normalizados)
const INACTIVE_YES: &[&str] = &["SIM", "S", "YES", "Y", "TRUE", "1", "X"];

/// Linha da lista mestre
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRecord {
    pub tag: String,
    pub name: String,
    pub manufacturer: String,
    pub model: String,
    pub sector: String,
    pub serial_number: String,
    pub asset_tag: String,
    pub inactive: bool,

    /// Linha original, regravada sem alteração na exportação
    #[serde(skip)]
    pub source: Record,
}

impl EquipmentRecord {
    pub fn from_record(record: &Record, columns: &ColumnMap) -> Self {
        Self {
            tag: columns.text(record, Field::Tag),
            name: columns.text(record, Field::Name),
            manufacturer: columns.text(record, Field::Manufacturer),
            model: columns.text(record, Field::Model),
            sector: columns.text(record, Field::Sector),
            serial_number: columns.text(record, Field::SerialNumber),
            asset_tag: columns.text(record, Field::AssetTag),
            inactive: parse_inactive(&columns.text(record, Field::Inactive)),
            source: record.clone(),
        }
    }

    /// Chave de identidade pelo Nº de Série
    pub fn key(&self) -> Option<IdentityKey> {
        IdentityKey::from_raw(&self.serial_number)
    }

    /// Nome para exibição
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "NOME INDEFINIDO"
        } else {
            &self.name
        }
    }
}

/// Interpreta a coluna Inativo (texto sim/não)
pub fn parse_inactive(raw: &str) -> bool {
    let normalized = normalize_id(raw);
    INACTIVE_YES.contains(&normalized.as_str())
}

/// Converte a aba de equipamentos em registros
pub fn parse_equipment_sheet(sheet: &SheetData) -> Vec<EquipmentRecord> {
    let columns = ColumnMap::resolve(&sheet.headers, EQUIPMENT_COLUMNS);
    sheet
        .records
        .iter()
        .map(|r| EquipmentRecord::from_record(r, &columns))
        .collect()
}
