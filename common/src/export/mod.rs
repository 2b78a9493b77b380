//! Exportação: projeção das colunas e gravação .xlsx

pub mod projector;

#[cfg(feature = "excel")]
pub mod excel_core;
