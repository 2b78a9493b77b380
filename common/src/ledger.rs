//! Registro da ronda (conciliação)
//!
//! Mantém no máximo uma entrada por chave de identidade. Linhas de rondas
//! anteriores entram re-chaveadas pelo normalizador; confirmações novas
//! sobrescrevem a entrada existente em vez de duplicá-la.
//!
//! A ordem das entradas é a de inserção: linhas anteriores na ordem da aba,
//! depois as confirmações novas. Exportar de novo sem confirmar nada
//! reproduz a mesma ordem.

use crate::columns::{ColumnMap, Field, LEDGER_COLUMNS};
use crate::equipment::EquipmentRecord;
use crate::error::{Error, Result};
use crate::identity::{normalize_id, IdentityKey};
use crate::sheet::{Record, SheetData};
use crate::timestamp::TimestampFormat;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Situação do equipamento na ronda
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    Located,
    #[default]
    Unlocated,
}

impl Status {
    /// Lê o texto da coluna Status; qualquer outro valor é `Unlocated`
    pub fn parse(raw: &str) -> Self {
        match normalize_id(raw).as_str() {
            "LOCALIZADO" | "LOCATED" => Status::Located,
            _ => Status::Unlocated,
        }
    }

    /// Texto gravado na planilha
    pub fn label(&self) -> &'static str {
        match self {
            Status::Located => "Localizado",
            Status::Unlocated => "Não Localizado",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// O que gravar como localização quando o campo fica em branco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankLocation {
    /// Mantém vazio
    #[default]
    KeepEmpty,
    /// Usa o setor em conferência
    ActiveSector,
    /// Usa o setor do equipamento na lista mestre
    OriginalSector,
}

impl std::str::FromStr for BlankLocation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "keep_empty" | "empty" | "vazio" => Ok(BlankLocation::KeepEmpty),
            "active_sector" | "active" | "setor_ronda" => Ok(BlankLocation::ActiveSector),
            "original_sector" | "original" | "setor_original" => {
                Ok(BlankLocation::OriginalSector)
            }
            _ => Err(format!(
                "Opção desconhecida: {}. Use keep-empty, active-sector ou original-sector",
                s
            )),
        }
    }
}

impl std::fmt::Display for BlankLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlankLocation::KeepEmpty => write!(f, "keep-empty"),
            BlankLocation::ActiveSector => write!(f, "active-sector"),
            BlankLocation::OriginalSector => write!(f, "original-sector"),
        }
    }
}

/// Uma entrada do registro
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuditLedgerEntry {
    pub key: Option<IdentityKey>,
    pub status: Status,
    pub original_sector: String,
    pub found_location: String,
    pub found_sector: String,
    pub notes: String,
    pub confirmed_at: Option<NaiveDateTime>,
    pub tag: String,
    pub equipment_name: String,
    pub asset_tag: String,
    /// Data/hora da linha carregada, quando não deu para interpretar
    pub raw_date: String,
    pub raw_time: String,
}

impl AuditLedgerEntry {
    /// Nº de Série exportado (a chave normalizada)
    pub fn serial_number(&self) -> &str {
        self.key.as_ref().map(|k| k.as_str()).unwrap_or_default()
    }

    fn from_record(record: &Record, columns: &ColumnMap, format: &TimestampFormat) -> Self {
        let confirmed_at = format.parse_cells(
            columns.cell(record, Field::Date),
            columns.cell(record, Field::Time),
            columns.cell(record, Field::Timestamp),
        );
        let (raw_date, raw_time) = if confirmed_at.is_some() {
            (String::new(), String::new())
        } else {
            (
                columns.text(record, Field::Date),
                columns.text(record, Field::Time),
            )
        };

        Self {
            key: IdentityKey::from_raw(&columns.text(record, Field::SerialNumber)),
            status: Status::parse(&columns.text(record, Field::Status)),
            original_sector: columns.text(record, Field::OriginalSector),
            found_location: columns.text(record, Field::FoundLocation),
            found_sector: columns.text(record, Field::FoundSector),
            notes: columns.text(record, Field::Notes),
            confirmed_at,
            tag: columns.text(record, Field::Tag),
            equipment_name: columns.text(record, Field::Name),
            asset_tag: columns.text(record, Field::AssetTag),
            raw_date,
            raw_time,
        }
    }
}

/// Dados informados pelo conferente
#[derive(Debug, Clone, Default)]
pub struct Confirmation {
    /// Setor em conferência no momento
    pub active_sector: String,
    pub found_location: String,
    pub notes: String,
}

/// Resultado de uma confirmação
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Inserted,
    Updated,
}

/// Registro da ronda
#[derive(Debug, Clone, Default)]
pub struct AuditLedger {
    entries: Vec<AuditLedgerEntry>,
    positions: HashMap<IdentityKey, usize>,
    /// Linhas anteriores sem Nº de Série: fora do índice, mantidas na exportação
    unkeyed: Vec<AuditLedgerEntry>,
}

impl AuditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carrega a aba de ronda anterior
    ///
    /// Chave repetida: os campos da última linha ficam na posição da
    /// primeira.
    pub fn from_sheet(sheet: &SheetData, format: &TimestampFormat) -> Self {
        let columns = ColumnMap::resolve(&sheet.headers, LEDGER_COLUMNS);
        let mut ledger = Self::new();

        for record in &sheet.records {
            let entry = AuditLedgerEntry::from_record(record, &columns, format);
            match entry.key.clone() {
                Some(key) => {
                    ledger.upsert(key, entry);
                }
                None => ledger.unkeyed.push(entry),
            }
        }

        if !ledger.unkeyed.is_empty() {
            tracing::warn!(
                sheet = %sheet.name,
                rows = ledger.unkeyed.len(),
                "linhas da ronda sem Nº de Série ficaram fora do índice"
            );
        }
        tracing::debug!(sheet = %sheet.name, entries = ledger.len(), "ronda anterior carregada");

        ledger
    }

    fn upsert(&mut self, key: IdentityKey, entry: AuditLedgerEntry) -> ConfirmOutcome {
        match self.positions.get(&key) {
            Some(&i) => {
                self.entries[i] = entry;
                ConfirmOutcome::Updated
            }
            None => {
                self.positions.insert(key, self.entries.len());
                self.entries.push(entry);
                ConfirmOutcome::Inserted
            }
        }
    }

    /// Confirma um equipamento como localizado
    ///
    /// Falha com `IdentityMissing` (sem alterar nada) se o Nº de Série
    /// normaliza para vazio.
    pub fn confirm(
        &mut self,
        asset: &EquipmentRecord,
        confirmation: &Confirmation,
        now: NaiveDateTime,
        blank_location: BlankLocation,
    ) -> Result<ConfirmOutcome> {
        let key = asset.key().ok_or_else(|| Error::IdentityMissing {
            asset_tag: if asset.asset_tag.is_empty() {
                "desconhecido".to_string()
            } else {
                asset.asset_tag.clone()
            },
        })?;

        let mut found_location = confirmation.found_location.trim().to_uppercase();
        if found_location.is_empty() {
            found_location = match blank_location {
                BlankLocation::KeepEmpty => String::new(),
                BlankLocation::ActiveSector => confirmation.active_sector.trim().to_uppercase(),
                BlankLocation::OriginalSector => asset.sector.trim().to_uppercase(),
            };
        }

        let entry = AuditLedgerEntry {
            key: Some(key.clone()),
            status: Status::Located,
            original_sector: asset.sector.trim().to_string(),
            found_location,
            found_sector: confirmation.active_sector.trim().to_string(),
            notes: confirmation.notes.trim().to_string(),
            confirmed_at: Some(now),
            tag: asset.tag.clone(),
            equipment_name: asset.name.clone(),
            asset_tag: asset.asset_tag.clone(),
            raw_date: String::new(),
            raw_time: String::new(),
        };

        let outcome = self.upsert(key.clone(), entry);
        tracing::debug!(key = %key, ?outcome, "equipamento confirmado");
        Ok(outcome)
    }

    /// Situação pela chave; `Unlocated` se não houver entrada
    pub fn status_of(&self, key: &IdentityKey) -> Status {
        self.get(key).map(|e| e.status).unwrap_or_default()
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&AuditLedgerEntry> {
        self.positions.get(key).map(|&i| &self.entries[i])
    }

    /// Entradas na ordem estável de inserção
    pub fn entries(&self) -> &[AuditLedgerEntry] {
        &self.entries
    }

    pub fn unkeyed(&self) -> &[AuditLedgerEntry] {
        &self.unkeyed
    }

    /// Tudo que vai para a exportação: entradas com chave, depois as sem chave
    pub fn export_entries(&self) -> impl Iterator<Item = &AuditLedgerEntry> {
        self.entries.iter().chain(self.unkeyed.iter())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
