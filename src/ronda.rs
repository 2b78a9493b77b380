//! Ronda interativa
//!
//! Escolhe o setor, busca equipamentos por Nº de Série ou Patrimônio e
//! confirma a localização. Ao sair, quem chama exporta a planilha.

use crate::error::{RondaError, Result};
use chrono::Local;
use dialoguer::{Input, Select};
use ronda_common::{
    ConfirmOutcome, EquipmentRecord, Error, IdentityKey, MatchKind, Session, Status,
};

/// Ação digitada no prompt de busca
#[derive(Debug, PartialEq, Eq)]
pub enum RondaAction {
    /// Buscar o termo
    Search(String),
    /// Listar o setor com a situação de cada equipamento
    List,
    /// Encerrar e exportar
    Quit,
}

pub fn parse_action(input: &str) -> RondaAction {
    match input.trim() {
        "" | "q" | "Q" => RondaAction::Quit,
        "l" | "L" => RondaAction::List,
        term => RondaAction::Search(term.to_string()),
    }
}

/// Linhas da lista do setor: ✅ localizado, ❓ pendente
pub fn roster_lines(session: &Session) -> Vec<String> {
    let Some(roster) = session.roster() else {
        return Vec::new();
    };

    roster
        .members
        .iter()
        .map(|item| {
            let serial = if item.serial_number.trim().is_empty() {
                "N/A"
            } else {
                item.serial_number.trim()
            };
            let entry = item.key().and_then(|k| session.ledger().get(&k).cloned());
            match entry {
                Some(e) if e.status == Status::Located => {
                    let place = if e.found_location.is_empty() {
                        e.found_sector.as_str()
                    } else {
                        e.found_location.as_str()
                    };
                    format!(
                        "✅ {} (SN: {}) - Verificado em: {}",
                        item.display_name(),
                        serial,
                        place
                    )
                }
                _ => format!("❓ {} (SN: {})", item.display_name(), serial),
            }
        })
        .collect()
}

/// Ficha do equipamento encontrado
pub fn describe(item: &EquipmentRecord, kind: MatchKind) -> Vec<String> {
    let serial = if item.serial_number.trim().is_empty() {
        "EM FALTA - VERIFICAR ARQUIVO".to_string()
    } else {
        item.serial_number.trim().to_string()
    };
    let mut lines = vec![
        format!("  Equipamento: {}", item.display_name()),
        format!("  Nº de Série: {}", serial),
        format!("  Patrimônio: {}", item.asset_tag),
        format!("  Setor: {}", item.sector),
        format!(
            "  Situação: {}",
            if item.inactive { "INATIVO" } else { "ATIVO" }
        ),
    ];
    if kind == MatchKind::AssetTag {
        lines.push("  (encontrado pelo Patrimônio)".to_string());
    }
    lines
}

/// Situação na ronda, para qualquer equipamento com Nº de Série
pub fn status_line(session: &Session, key: Option<&IdentityKey>) -> Option<String> {
    key.map(|k| format!("  Ronda: {}", session.ledger().status_of(k)))
}

fn prompt_text(prompt: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| RondaError::Prompt(e.to_string()))
}

fn choose_sector(session: &Session, sector: Option<String>) -> Result<String> {
    let sectors = session.sectors();

    if let Some(wanted) = sector {
        let wanted = wanted.trim();
        return sectors
            .iter()
            .find(|s| s.as_str() == wanted)
            .cloned()
            .ok_or_else(|| RondaError::SectorNotFound(wanted.to_string()));
    }

    if sectors.is_empty() {
        return Err(RondaError::SectorNotFound("(nenhum setor na lista mestre)".into()));
    }

    let choice = Select::new()
        .with_prompt("Setor")
        .items(&sectors)
        .default(0)
        .interact()
        .map_err(|e| RondaError::Prompt(e.to_string()))?;
    Ok(sectors[choice].clone())
}

fn print_progress(session: &Session) {
    if let Some(p) = session.progress() {
        println!("  Progresso: {} localizados\n", p);
    }
}

/// Conduz a ronda de um setor até o conferente sair
pub fn run_interactive(session: &mut Session, sector: Option<String>) -> Result<()> {
    let sector = choose_sector(session, sector)?;
    let roster = session.select_sector(&sector);

    println!("📍 Setor: {} ({} equipamentos ativos)", roster.sector, roster.len());
    if roster.is_empty() {
        println!("  Nenhum equipamento ativo neste setor");
    }
    println!("---");
    println!("Digite o Nº de Série ou Patrimônio. [l] lista do setor, [q] ou Enter encerra");
    println!("---\n");
    print_progress(session);

    loop {
        let input = prompt_text("Nº de Série / Patrimônio")?;

        let term = match parse_action(&input) {
            RondaAction::Quit => break,
            RondaAction::List => {
                for line in roster_lines(session) {
                    println!("  {}", line);
                }
                println!();
                continue;
            }
            RondaAction::Search(term) => term,
        };

        let Some((item, kind)) = session.search(&term) else {
            println!("  ✗ Equipamento não encontrado: {}\n", term);
            continue;
        };
        for line in describe(item, kind) {
            println!("{}", line);
        }
        if item.key().is_none() {
            println!("  ⚠ Equipamento sem Nº de Série na lista mestre; corrija o arquivo antes de confirmar\n");
            continue;
        }

        let location = prompt_text("Localização encontrada (Enter para deixar em branco)")?;
        let notes = prompt_text("Observações")?;

        match session.confirm_selected(&location, &notes, Local::now().naive_local()) {
            Ok(ConfirmOutcome::Inserted) => println!("  ✔ Confirmado"),
            Ok(ConfirmOutcome::Updated) => println!("  ✔ Confirmado (registro atualizado)"),
            Err(e @ Error::IdentityMissing { .. }) => println!("  ✗ {}", e),
            Err(e) => return Err(e.into()),
        }
        print_progress(session);
    }

    if let Some(p) = session.progress() {
        println!("Ronda encerrada: {} localizados", p);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ronda_common::{CellValue, SessionOptions, SheetData, Workbook};

    fn session() -> Session {
        let headers = vec!["Equipamento", "Setor", "Nº de Série", "Patrimônio"]
            .into_iter()
            .map(String::from)
            .collect();
        let rows: Vec<Vec<CellValue>> = vec![
            vec!["Monitor".into(), "UTI".into(), "A100".into(), "0042".into()],
            vec!["Bomba".into(), "UTI".into(), "".into(), "77".into()],
        ];
        let workbook = Workbook::new(vec![SheetData::from_rows("Equipamentos", headers, rows)]);
        Session::from_workbook(&workbook, SessionOptions::default()).unwrap()
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action(""), RondaAction::Quit);
        assert_eq!(parse_action(" q "), RondaAction::Quit);
        assert_eq!(parse_action("l"), RondaAction::List);
        assert_eq!(parse_action(" a100 "), RondaAction::Search("a100".into()));
    }

    #[test]
    fn test_roster_lines_mark_located() {
        let mut session = session();
        session.select_sector("UTI");
        session.search("a100").unwrap();
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        session.confirm_selected("uti-3", "", now).unwrap();

        let lines = roster_lines(&session);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "✅ Monitor (SN: A100) - Verificado em: UTI-3");
        assert_eq!(lines[1], "❓ Bomba (SN: N/A)");
    }

    #[test]
    fn test_status_line_after_asset_tag_match() {
        let mut session = session();
        session.select_sector("UTI");
        session.search("A100").unwrap();
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        session.confirm_selected("", "", now).unwrap();

        let (item, kind) = session.search("42").unwrap();
        assert_eq!(kind, MatchKind::AssetTag);
        let key = item.key();
        assert_eq!(
            status_line(&session, key.as_ref()).as_deref(),
            Some("  Ronda: Localizado")
        );

        let (item, _) = session.search("77").unwrap();
        let key = item.key();
        assert_eq!(status_line(&session, key.as_ref()), None);
    }

    #[test]
    fn test_describe_missing_serial() {
        let session = session();
        let item = &session.index().records()[1];
        let lines = describe(item, MatchKind::AssetTag);
        assert!(lines.iter().any(|l| l.contains("EM FALTA")));
        assert!(lines.iter().any(|l| l.contains("Patrimônio)")));
    }
}
