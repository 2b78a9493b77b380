//! Ronda de equipamentos: leitura da planilha, CLI e ronda interativa
//!
//! O núcleo (índice, registro, progresso, exportação) fica em `ronda-common`.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod ronda;
pub mod workbook;
