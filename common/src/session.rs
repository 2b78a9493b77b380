//! Sessão de ronda
//!
//! Reúne lista mestre, registro, setor em conferência e equipamento
//! selecionado. Cada operação recebe a sessão explicitamente; nada fica em
//! estado global.

use crate::equipment::{parse_equipment_sheet, EquipmentRecord};
use crate::error::{Error, Result};
use crate::export::projector::{equipment_sheet, ledger_sheet, project};
use crate::index::{MasterIndex, MatchKind};
use crate::ledger::{AuditLedger, BlankLocation, ConfirmOutcome, Confirmation};
use crate::progress::{self, Progress};
use crate::roster::{build_roster, list_sectors, SectorRoster};
use crate::sheet::{OutputSheet, Workbook};
use crate::timestamp::TimestampFormat;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Opções da sessão
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Aba da lista mestre (obrigatória)
    pub equipment_sheet: String,
    /// Aba do registro da ronda (opcional na leitura)
    pub ledger_sheet: String,
    pub blank_location: BlankLocation,
    pub timestamp: TimestampFormat,
    /// Regrava a aba de equipamentos junto com a ronda
    pub export_equipment_sheet: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            equipment_sheet: "Equipamentos".into(),
            ledger_sheet: "Ronda".into(),
            blank_location: BlankLocation::default(),
            timestamp: TimestampFormat::default(),
            export_equipment_sheet: true,
        }
    }
}

impl SessionOptions {
    /// Abas a pedir ao leitor
    pub fn sheet_names(&self) -> Vec<String> {
        vec![self.equipment_sheet.clone(), self.ledger_sheet.clone()]
    }
}

/// Resumo do carregamento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    pub equipment: usize,
    pub indexed: usize,
    pub missing_serial: usize,
    pub ledger_entries: usize,
    pub ledger_without_serial: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    options: SessionOptions,
    equipment_headers: Vec<String>,
    index: MasterIndex,
    ledger: AuditLedger,
    roster: Option<SectorRoster>,
    selected: Option<EquipmentRecord>,
}

impl Session {
    /// Monta a sessão a partir das abas lidas
    ///
    /// Aba de equipamentos ausente ou vazia é erro; aba de ronda ausente
    /// começa um registro vazio.
    pub fn from_workbook(workbook: &Workbook, options: SessionOptions) -> Result<Self> {
        let equipment = workbook
            .sheet(&options.equipment_sheet)
            .ok_or_else(|| Error::decode(&options.equipment_sheet, "aba não encontrada"))?;
        if equipment.is_empty() {
            return Err(Error::decode(&options.equipment_sheet, "aba vazia"));
        }

        let index = MasterIndex::build(parse_equipment_sheet(equipment));

        let ledger = match workbook.sheet(&options.ledger_sheet) {
            Some(sheet) => AuditLedger::from_sheet(sheet, &options.timestamp),
            None => {
                tracing::info!(
                    sheet = %options.ledger_sheet,
                    "aba de ronda não encontrada, será criada na exportação"
                );
                AuditLedger::new()
            }
        };

        let session = Self {
            equipment_headers: equipment.headers.clone(),
            options,
            index,
            ledger,
            roster: None,
            selected: None,
        };

        let summary = session.summary();
        tracing::info!(
            equipment = summary.equipment,
            indexed = summary.indexed,
            missing_serial = summary.missing_serial,
            ledger_entries = summary.ledger_entries,
            "planilha carregada"
        );

        Ok(session)
    }

    /// Troca o conteúdo por uma nova planilha
    ///
    /// Em caso de erro o estado anterior continua valendo.
    pub fn reload(&mut self, workbook: &Workbook) -> Result<LoadSummary> {
        let next = Self::from_workbook(workbook, self.options.clone())?;
        *self = next;
        Ok(self.summary())
    }

    pub fn summary(&self) -> LoadSummary {
        LoadSummary {
            equipment: self.index.len(),
            indexed: self.index.indexed_len(),
            missing_serial: self.index.unindexed().count(),
            ledger_entries: self.ledger.len(),
            ledger_without_serial: self.ledger.unkeyed().len(),
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn index(&self) -> &MasterIndex {
        &self.index
    }

    pub fn ledger(&self) -> &AuditLedger {
        &self.ledger
    }

    pub fn sectors(&self) -> Vec<String> {
        list_sectors(self.index.records())
    }

    /// Inicia a conferência de um setor
    pub fn select_sector(&mut self, sector: &str) -> &SectorRoster {
        let roster = build_roster(self.index.records(), sector);
        if roster.is_empty() {
            tracing::info!(sector = %roster.sector, "setor sem equipamentos ativos");
        }
        self.selected = None;
        self.roster.insert(roster)
    }

    pub fn roster(&self) -> Option<&SectorRoster> {
        self.roster.as_ref()
    }

    /// Busca e guarda o equipamento encontrado como selecionado
    ///
    /// Não encontrar é um resultado normal (`None`), não um erro.
    pub fn search(&mut self, term: &str) -> Option<(&EquipmentRecord, MatchKind)> {
        let (found, kind) = {
            let outcome = self.index.find(term);
            (outcome.record().cloned(), outcome.kind())
        };
        self.selected = found;
        match (self.selected.as_ref(), kind) {
            (Some(record), Some(kind)) => Some((record, kind)),
            _ => None,
        }
    }

    pub fn selected(&self) -> Option<&EquipmentRecord> {
        self.selected.as_ref()
    }

    /// Confirma o equipamento selecionado no setor em conferência
    pub fn confirm_selected(
        &mut self,
        found_location: &str,
        notes: &str,
        now: NaiveDateTime,
    ) -> Result<ConfirmOutcome> {
        let active_sector = self
            .roster
            .as_ref()
            .map(|r| r.sector.clone())
            .ok_or(Error::NoSectorSelected)?;
        let asset = self.selected.as_ref().ok_or(Error::NothingSelected)?;

        let confirmation = Confirmation {
            active_sector,
            found_location: found_location.to_string(),
            notes: notes.to_string(),
        };
        let outcome =
            self.ledger
                .confirm(asset, &confirmation, now, self.options.blank_location)?;
        self.selected = None;
        Ok(outcome)
    }

    /// Progresso do setor em conferência
    pub fn progress(&self) -> Option<Progress> {
        self.roster
            .as_ref()
            .map(|r| progress::progress(r, &self.ledger))
    }

    /// Equipamentos do setor ainda não localizados
    pub fn pending(&self) -> Vec<&EquipmentRecord> {
        self.roster
            .as_ref()
            .map(|r| progress::pending(r, &self.ledger))
            .unwrap_or_default()
    }

    /// Abas para gravar: equipamentos (se configurado) e ronda
    pub fn export_sheets(&self) -> Vec<OutputSheet> {
        let mut sheets = Vec::new();

        if self.options.export_equipment_sheet {
            sheets.push(equipment_sheet(
                &self.options.equipment_sheet,
                &self.equipment_headers,
                self.index.records(),
            ));
        }

        let rows = project(self.ledger.export_entries(), &self.options.timestamp);
        sheets.push(ledger_sheet(&self.options.ledger_sheet, rows));

        sheets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::projector::EXPORT_COLUMNS;
    use crate::ledger::Status;
    use crate::sheet::{CellValue, SheetData};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn equipment_sheet_data() -> SheetData {
        let headers = ["Tag", "Equipamento", "Setor", "Nº de Série", "Patrimônio", "Inativo"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows: Vec<Vec<CellValue>> = vec![
            vec!["T1".into(), "Monitor".into(), "UTI".into(), "A100".into(), "PAT-1".into(), "NÃO".into()],
            vec!["T2".into(), "Bomba".into(), "UTI".into(), "A200".into(), "PAT-2".into(), "".into()],
            vec!["T3".into(), "Velho".into(), "UTI".into(), "A300".into(), "PAT-3".into(), "SIM".into()],
            vec!["T4".into(), "Ventilador".into(), "CC".into(), "".into(), "PAT-4455".into(), "".into()],
        ];
        SheetData::from_rows("Equipamentos", headers, rows)
    }

    fn workbook() -> Workbook {
        Workbook::new(vec![equipment_sheet_data()])
    }

    #[test]
    fn test_missing_equipment_sheet_is_decode_error() {
        let err = Session::from_workbook(&Workbook::default(), SessionOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Decode { ref sheet, .. } if sheet == "Equipamentos"));
    }

    #[test]
    fn test_empty_equipment_sheet_is_decode_error() {
        let workbook = Workbook::new(vec![SheetData::empty("Equipamentos")]);
        let err = Session::from_workbook(&workbook, SessionOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_load_summary() {
        let session = Session::from_workbook(&workbook(), SessionOptions::default()).unwrap();
        let summary = session.summary();
        assert_eq!(summary.equipment, 4);
        assert_eq!(summary.indexed, 3);
        assert_eq!(summary.missing_serial, 1);
        assert_eq!(summary.ledger_entries, 0);
        assert_eq!(session.sectors(), vec!["CC", "UTI"]);
    }

    #[test]
    fn test_full_walkthrough() {
        let mut session = Session::from_workbook(&workbook(), SessionOptions::default()).unwrap();

        let roster = session.select_sector("UTI");
        assert_eq!(roster.len(), 2);
        assert_eq!(session.progress(), Some(Progress { confirmed: 0, total: 2 }));

        let (record, kind) = session.search("a100").unwrap();
        assert_eq!(record.name, "Monitor");
        assert_eq!(kind, MatchKind::Serial);

        let outcome = session.confirm_selected("leito 3", "ok", now()).unwrap();
        assert_eq!(outcome, ConfirmOutcome::Inserted);
        assert!(session.selected().is_none());
        assert_eq!(session.progress(), Some(Progress { confirmed: 1, total: 2 }));
        assert_eq!(session.pending().len(), 1);
    }

    #[test]
    fn test_confirm_requires_sector_and_selection() {
        let mut session = Session::from_workbook(&workbook(), SessionOptions::default()).unwrap();
        session.search("A100");
        let err = session.confirm_selected("x", "", now()).unwrap_err();
        assert!(matches!(err, Error::NoSectorSelected));

        session.select_sector("UTI");
        let err = session.confirm_selected("x", "", now()).unwrap_err();
        assert!(matches!(err, Error::NothingSelected));
    }

    #[test]
    fn test_confirm_asset_tag_match_without_serial_is_rejected() {
        let mut session = Session::from_workbook(&workbook(), SessionOptions::default()).unwrap();
        session.select_sector("CC");

        let (record, kind) = session.search("4455").unwrap();
        assert_eq!(record.name, "Ventilador");
        assert_eq!(kind, MatchKind::AssetTag);

        let err = session.confirm_selected("sala", "", now()).unwrap_err();
        assert!(matches!(err, Error::IdentityMissing { .. }));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn test_search_miss_clears_selection() {
        let mut session = Session::from_workbook(&workbook(), SessionOptions::default()).unwrap();
        session.search("A100");
        assert!(session.selected().is_some());
        assert!(session.search("nada").is_none());
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_failed_reload_keeps_previous_state() {
        let mut session = Session::from_workbook(&workbook(), SessionOptions::default()).unwrap();
        session.select_sector("UTI");
        session.search("A100");
        session.confirm_selected("leito 3", "", now()).unwrap();

        let broken = Workbook::new(vec![SheetData::empty("Outra")]);
        assert!(session.reload(&broken).is_err());

        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.index().len(), 4);
        assert!(session.roster().is_some());
    }

    #[test]
    fn test_export_sheets_layout() {
        let mut session = Session::from_workbook(&workbook(), SessionOptions::default()).unwrap();
        session.select_sector("UTI");
        session.search("A200");
        session.confirm_selected("", "", now()).unwrap();

        let sheets = session.export_sheets();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "Equipamentos");
        assert_eq!(sheets[0].rows.len(), 4);
        assert_eq!(sheets[1].name, "Ronda");
        assert_eq!(sheets[1].headers, EXPORT_COLUMNS.to_vec());
        assert_eq!(sheets[1].rows.len(), 1);
        assert_eq!(sheets[1].rows[0][3], CellValue::from("A200"));
        assert_eq!(sheets[1].rows[0][7], CellValue::from(Status::Located.label()));
    }

    #[test]
    fn test_export_without_equipment_sheet() {
        let options = SessionOptions {
            export_equipment_sheet: false,
            ..Default::default()
        };
        let session = Session::from_workbook(&workbook(), options).unwrap();
        let sheets = session.export_sheets();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].name, "Ronda");
    }
}
