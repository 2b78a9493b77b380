//! Definição dos tipos de erro

use thiserror::Error;

/// Erro comum do núcleo da ronda
#[derive(Error, Debug)]
pub enum Error {
    /// Planilha inválida ou aba obrigatória ausente/vazia
    #[error("Erro ao ler a aba \"{sheet}\": {reason}")]
    Decode { sheet: String, reason: String },

    /// Equipamento sem Nº de Série utilizável
    #[error("O equipamento com patrimônio \"{asset_tag}\" não tem um Nº de Série válido")]
    IdentityMissing { asset_tag: String },

    #[error("Nenhum setor selecionado para a ronda")]
    NoSectorSelected,

    #[error("Nenhum equipamento selecionado. Faça uma busca primeiro")]
    NothingSelected,

    #[error("Erro ao gerar a planilha: {0}")]
    Workbook(String),

    #[error("Já existe um carregamento em andamento")]
    LoadInProgress,
}

impl Error {
    pub fn decode(sheet: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            sheet: sheet.into(),
            reason: reason.into(),
        }
    }
}

/// Alias de Result
pub type Result<T> = std::result::Result<T, Error>;
