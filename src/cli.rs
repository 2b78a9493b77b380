use clap::{Parser, Subcommand};
use ronda_common::BlankLocation;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Ronda de equipamentos: conferência por setor e exportação da planilha", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Mostra logs detalhados
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lista os setores da lista mestre
    Sectors {
        /// Planilha (.xlsx/.xls/.ods)
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Busca um equipamento por Nº de Série ou Patrimônio
    Search {
        /// Planilha (.xlsx/.xls/.ods)
        #[arg(required = true)]
        file: PathBuf,

        /// Nº de Série ou Patrimônio
        #[arg(required = true)]
        term: String,

        /// Saída em JSON
        #[arg(long)]
        json: bool,
    },

    /// Mostra o progresso da ronda de um setor
    Progress {
        /// Planilha (.xlsx/.xls/.ods)
        #[arg(required = true)]
        file: PathBuf,

        /// Setor
        #[arg(short, long)]
        sector: String,

        /// Lista os equipamentos ainda não localizados
        #[arg(long)]
        pending: bool,
    },

    /// Confirma um equipamento e exporta a planilha atualizada
    Confirm {
        /// Planilha (.xlsx/.xls/.ods)
        #[arg(required = true)]
        file: PathBuf,

        /// Setor em conferência
        #[arg(short, long)]
        sector: String,

        /// Nº de Série ou Patrimônio
        #[arg(short, long)]
        term: String,

        /// Localização encontrada
        #[arg(short, long, default_value = "")]
        location: String,

        /// Observações
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Arquivo/diretório de saída (padrão: diretório atual)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Exporta a planilha sem alterações
    Export {
        /// Planilha (.xlsx/.xls/.ods)
        #[arg(required = true)]
        file: PathBuf,

        /// Arquivo/diretório de saída (padrão: diretório atual)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ronda interativa: escolhe o setor, confirma e exporta ao sair
    Run {
        /// Planilha (.xlsx/.xls/.ods)
        #[arg(required = true)]
        file: PathBuf,

        /// Setor (se omitido, é perguntado)
        #[arg(short, long)]
        sector: Option<String>,

        /// Arquivo/diretório de saída (padrão: diretório atual)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mostra/edita a configuração
    Config {
        /// Mostra a configuração
        #[arg(long)]
        show: bool,

        /// Localização em branco (keep-empty/active-sector/original-sector)
        #[arg(long)]
        set_blank_location: Option<BlankLocation>,

        /// Aba da lista mestre
        #[arg(long)]
        set_equipment_sheet: Option<String>,

        /// Aba do registro da ronda
        #[arg(long)]
        set_ledger_sheet: Option<String>,

        /// Formato da data (chrono, ex.: %d/%m/%Y)
        #[arg(long)]
        set_date_format: Option<String>,

        /// Formato da hora (chrono, ex.: %H:%M)
        #[arg(long)]
        set_time_format: Option<String>,

        /// Prefixo do arquivo exportado
        #[arg(long)]
        set_export_prefix: Option<String>,

        /// Regrava a aba de equipamentos na exportação (true/false)
        #[arg(long)]
        set_export_equipment_sheet: Option<bool>,
    },
}
