use thiserror::Error;

#[derive(Error, Debug)]
pub enum RondaError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Setor não encontrado na lista mestre: {0}")]
    SectorNotFound(String),

    #[error("Nenhuma planilha carregada")]
    NotLoaded,

    #[error("Erro no prompt interativo: {0}")]
    Prompt(String),

    #[error("A leitura da planilha foi interrompida: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Erro de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] ronda_common::Error),
}

pub type Result<T> = std::result::Result<T, RondaError>;
