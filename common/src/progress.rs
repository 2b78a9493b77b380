//! Progresso da ronda no setor

use crate::equipment::EquipmentRecord;
use crate::ledger::{AuditLedger, Status};
use crate::roster::SectorRoster;

/// Confirmados / total do setor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub confirmed: usize,
    pub total: usize,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.confirmed, self.total)
    }
}

fn is_located(record: &EquipmentRecord, ledger: &AuditLedger) -> bool {
    record
        .key()
        .map(|k| ledger.status_of(&k) == Status::Located)
        .unwrap_or(false)
}

/// Recalcula o progresso do zero a cada chamada
pub fn progress(roster: &SectorRoster, ledger: &AuditLedger) -> Progress {
    Progress {
        confirmed: roster.members.iter().filter(|r| is_located(r, ledger)).count(),
        total: roster.len(),
    }
}

/// Membros do setor ainda não localizados
pub fn pending<'a>(roster: &'a SectorRoster, ledger: &AuditLedger) -> Vec<&'a EquipmentRecord> {
    roster
        .members
        .iter()
        .filter(|r| !is_located(r, ledger))
        .collect()
}
