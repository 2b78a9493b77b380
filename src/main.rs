use chrono::Local;
use clap::Parser;
use ronda_common::{ConfirmOutcome, Session, XlsxWriter};
use ronda_rust::{cli, config, error, export, loader, ronda, workbook};
use cli::{Cli, Commands};
use config::Config;
use error::{RondaError, Result};
use loader::SharedReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn load(config: &Config, file: &Path) -> Result<Session> {
    let reader: SharedReader = Arc::new(workbook::CalamineReader);
    println!("- Lendo planilha: {}", file.display());
    let session = loader::load_session(reader, file, config.session.clone()).await?;

    let summary = session.summary();
    println!(
        "✔ {} equipamentos, {} entradas de ronda anteriores",
        summary.equipment, summary.ledger_entries
    );
    if summary.missing_serial > 0 {
        println!(
            "⚠ {} equipamentos sem Nº de Série (não podem ser confirmados)",
            summary.missing_serial
        );
    }
    if summary.ledger_without_serial > 0 {
        println!(
            "⚠ {} linhas da ronda anterior sem Nº de Série (mantidas na exportação)",
            summary.ledger_without_serial
        );
    }
    println!();
    Ok(session)
}

fn select_sector(session: &mut Session, sector: &str) -> Result<()> {
    let sector = sector.trim();
    if !session.sectors().iter().any(|s| s == sector) {
        return Err(RondaError::SectorNotFound(sector.to_string()));
    }
    session.select_sector(sector);
    Ok(())
}

fn save(config: &Config, session: &Session, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| PathBuf::from("."));
    println!("- Gerando planilha...");
    let path = export::export_session(
        session,
        &XlsxWriter,
        &output,
        &config.export_file_prefix,
        Local::now().date_naive(),
    )?;
    println!("✔ Planilha exportada: {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Sectors { file } => {
            let session = load(&config, &file).await?;
            let sectors = session.sectors();
            println!("Setores ({}):", sectors.len());
            for sector in sectors {
                println!("  {}", sector);
            }
        }

        Commands::Search { file, term, json } => {
            let mut session = load(&config, &file).await?;
            let Some((item, kind)) = session.search(&term) else {
                println!("✗ Equipamento não encontrado: {}", term);
                return Ok(());
            };

            let key = item.key();
            if json {
                println!("{}", serde_json::to_string_pretty(item)?);
            } else {
                for line in ronda::describe(item, kind) {
                    println!("{}", line);
                }
                if let Some(line) = ronda::status_line(&session, key.as_ref()) {
                    println!("{}", line);
                }
            }
        }

        Commands::Progress { file, sector, pending } => {
            let mut session = load(&config, &file).await?;
            select_sector(&mut session, &sector)?;

            if let Some(p) = session.progress() {
                println!("📍 {}: {} localizados", sector.trim(), p);
            }
            if pending {
                let items = session.pending();
                println!("Pendentes ({}):", items.len());
                for item in items {
                    println!("  ❓ {} (SN: {})", item.display_name(), item.serial_number);
                }
            }
        }

        Commands::Confirm { file, sector, term, location, notes, output } => {
            println!("📍 ronda - confirmação\n");
            let mut session = load(&config, &file).await?;
            select_sector(&mut session, &sector)?;

            if session.search(&term).is_none() {
                println!("✗ Equipamento não encontrado: {}", term);
                return Ok(());
            }
            let outcome =
                session.confirm_selected(&location, &notes, Local::now().naive_local())?;
            match outcome {
                ConfirmOutcome::Inserted => println!("✔ Confirmado"),
                ConfirmOutcome::Updated => println!("✔ Confirmado (registro atualizado)"),
            }
            if let Some(p) = session.progress() {
                println!("  Progresso: {} localizados\n", p);
            }

            save(&config, &session, output)?;
            println!("\n✅ Concluído");
        }

        Commands::Export { file, output } => {
            println!("📄 ronda - exportação\n");
            let session = load(&config, &file).await?;
            save(&config, &session, output)?;
            println!("\n✅ Exportação concluída");
        }

        Commands::Run { file, sector, output } => {
            println!("🚀 ronda - conferência de equipamentos\n");
            let mut session = load(&config, &file).await?;
            ronda::run_interactive(&mut session, sector)?;
            save(&config, &session, output)?;
            println!("\n✅ Concluído");
        }

        Commands::Config {
            show,
            set_blank_location,
            set_equipment_sheet,
            set_ledger_sheet,
            set_date_format,
            set_time_format,
            set_export_prefix,
            set_export_equipment_sheet,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(policy) = set_blank_location {
                config.session.blank_location = policy;
                changed = true;
            }
            if let Some(name) = set_equipment_sheet {
                config.session.equipment_sheet = name;
                changed = true;
            }
            if let Some(name) = set_ledger_sheet {
                config.session.ledger_sheet = name;
                changed = true;
            }
            if let Some(format) = set_date_format {
                config.session.timestamp.date = format;
                changed = true;
            }
            if let Some(format) = set_time_format {
                config.session.timestamp.time = format;
                changed = true;
            }
            if let Some(prefix) = set_export_prefix {
                config.export_file_prefix = prefix;
                changed = true;
            }
            if let Some(flag) = set_export_equipment_sheet {
                config.session.export_equipment_sheet = flag;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ Configuração salva: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Configuração:");
                println!("  Aba de equipamentos: {}", config.session.equipment_sheet);
                println!("  Aba da ronda: {}", config.session.ledger_sheet);
                println!("  Localização em branco: {}", config.session.blank_location);
                println!(
                    "  Data/hora: {} {}",
                    config.session.timestamp.date, config.session.timestamp.time
                );
                println!("  Prefixo de exportação: {}", config.export_file_prefix);
                println!(
                    "  Regravar aba de equipamentos: {}",
                    if config.session.export_equipment_sheet { "sim" } else { "não" }
                );
            }
        }
    }

    Ok(())
}
