//! Setores e lista de conferência do setor

use crate::equipment::EquipmentRecord;
use std::collections::BTreeSet;

/// Lista de setores distintos, ordenada (sem normalizar maiúsculas)
pub fn list_sectors(records: &[EquipmentRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.sector.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Equipamentos ativos de um setor
#[derive(Debug, Clone, Default)]
pub struct SectorRoster {
    pub sector: String,
    pub members: Vec<EquipmentRecord>,
}

impl SectorRoster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Setor sem equipamentos ativos: aviso, não erro
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Filtra os equipamentos do setor, excluindo os inativos
pub fn build_roster(records: &[EquipmentRecord], sector: &str) -> SectorRoster {
    let sector = sector.trim();
    let members = records
        .iter()
        .filter(|r| r.sector.trim() == sector && !r.inactive)
        .cloned()
        .collect();

    SectorRoster {
        sector: sector.to_string(),
        members,
    }
}
