//! Índice da lista mestre
//!
//! Busca por Nº de Série (chave exata) com fallback pelos dígitos do
//! Patrimônio: o operador pode digitar o número de série ou ler a
//! etiqueta de patrimônio impressa.

use crate::equipment::EquipmentRecord;
use crate::identity::{digits_only, normalize_id, IdentityKey};
use std::collections::HashMap;

/// Caminho pelo qual a busca encontrou o equipamento
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Serial,
    AssetTag,
}

/// Resultado de uma busca
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome<'a> {
    /// Encontrado pela chave normalizada do Nº de Série
    BySerial(&'a EquipmentRecord),
    /// Encontrado pelos dígitos do Patrimônio
    ByAssetTag(&'a EquipmentRecord),
    NotFound,
}

impl<'a> SearchOutcome<'a> {
    pub fn record(&self) -> Option<&'a EquipmentRecord> {
        match *self {
            SearchOutcome::BySerial(r) | SearchOutcome::ByAssetTag(r) => Some(r),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn kind(&self) -> Option<MatchKind> {
        match self {
            SearchOutcome::BySerial(_) => Some(MatchKind::Serial),
            SearchOutcome::ByAssetTag(_) => Some(MatchKind::AssetTag),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, SearchOutcome::NotFound)
    }
}

/// Lista mestre indexada por Nº de Série normalizado
#[derive(Debug, Clone, Default)]
pub struct MasterIndex {
    records: Vec<EquipmentRecord>,
    by_serial: HashMap<IdentityKey, usize>,
}

impl MasterIndex {
    /// Monta o índice
    ///
    /// Linhas sem Nº de Série continuam em `records()` mas não entram no
    /// índice. Nº de Série repetido: a última linha fica com a chave.
    pub fn build(records: Vec<EquipmentRecord>) -> Self {
        let mut by_serial = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            if let Some(key) = record.key() {
                if let Some(previous) = by_serial.insert(key, i) {
                    tracing::debug!(
                        serial = %record.serial_number,
                        previous_row = previous,
                        row = i,
                        "Nº de Série repetido na lista mestre"
                    );
                }
            }
        }

        Self { records, by_serial }
    }

    pub fn records(&self) -> &[EquipmentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Quantidade de chaves distintas no índice
    pub fn indexed_len(&self) -> usize {
        self.by_serial.len()
    }

    /// Linhas sem Nº de Série (precisam de correção na planilha)
    pub fn unindexed(&self) -> impl Iterator<Item = &EquipmentRecord> {
        self.records.iter().filter(|r| r.key().is_none())
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&EquipmentRecord> {
        self.by_serial.get(key).map(|&i| &self.records[i])
    }

    /// Busca por Nº de Série e, em seguida, pelos dígitos do Patrimônio
    pub fn find(&self, term: &str) -> SearchOutcome<'_> {
        if let Some(key) = IdentityKey::from_raw(term) {
            if let Some(record) = self.get(&key) {
                return SearchOutcome::BySerial(record);
            }
        }

        let wanted = digits_only(term);
        if wanted.is_empty() {
            return SearchOutcome::NotFound;
        }
        let wanted = normalize_id(&wanted);

        self.records
            .iter()
            .find(|r| {
                let tag_digits = digits_only(&r.asset_tag);
                !tag_digits.is_empty() && normalize_id(&tag_digits) == wanted
            })
            .map(SearchOutcome::ByAssetTag)
            .unwrap_or(SearchOutcome::NotFound)
    }
}
