//! Casos de erro: arquivo ausente, planilha inválida, aba obrigatória faltando

use ronda_common::{OutputSheet, SessionOptions, WorkbookWriter, XlsxWriter};
use ronda_rust::error::RondaError;
use ronda_rust::loader::{load_session, SharedReader};
use ronda_rust::workbook::CalamineReader;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn reader() -> SharedReader {
    Arc::new(CalamineReader)
}

#[tokio::test]
async fn test_load_nonexistent_file() {
    let result = load_session(
        reader(),
        Path::new("/nonexistent/path/12345.xlsx"),
        SessionOptions::default(),
    )
    .await;
    assert!(matches!(result, Err(RondaError::FileNotFound(_))));
}

#[tokio::test]
async fn test_load_invalid_bytes() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("quebrado.xlsx");
    std::fs::write(&path, "isto não é uma planilha").unwrap();

    let err = load_session(reader(), &path, SessionOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RondaError::Common(ronda_common::Error::Decode { ref sheet, .. }) if sheet == "Equipamentos"
    ));
    assert!(err.to_string().contains("Equipamentos"));
}

#[tokio::test]
async fn test_load_without_equipment_sheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("sem_equipamentos.xlsx");
    let bytes = XlsxWriter
        .write_workbook(&[OutputSheet {
            name: "Outra".into(),
            headers: vec!["A".into()],
            rows: vec![vec!["x".into()]],
        }])
        .unwrap();
    std::fs::write(&path, bytes).unwrap();

    let err = load_session(reader(), &path, SessionOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RondaError::Common(ronda_common::Error::Decode { .. })
    ));
}

/// Mensagens de erro não vazias
#[test]
fn test_error_display() {
    let errors = vec![
        RondaError::Config("teste".to_string()),
        RondaError::FileNotFound("inventario.xlsx".to_string()),
        RondaError::SectorNotFound("UTI".to_string()),
        RondaError::NotLoaded,
        RondaError::Prompt("cancelado".to_string()),
        RondaError::Common(ronda_common::Error::NothingSelected),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "Display vazio: {:?}", err);
    }
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "arquivo não existe");
    let err: RondaError = io_err.into();
    assert!(matches!(err, RondaError::Io(_)));
    assert!(format!("{}", err).contains("Erro de IO"));
}
