//! Exportação ponta a ponta: planilha gravada → lida → confirmada → exportada → lida de novo

use chrono::NaiveDate;
use ronda_common::{
    CellValue, Error, MatchKind, OutputSheet, Session, SessionOptions, Status, WorkbookReader,
    WorkbookWriter, XlsxWriter, EXPORT_COLUMNS,
};
use ronda_rust::export::{export_file_name, export_session};
use ronda_rust::workbook::CalamineReader;
use tempfile::tempdir;

fn text_row(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::from(*v)).collect()
}

fn equipment_sheet() -> OutputSheet {
    OutputSheet {
        name: "Equipamentos".into(),
        headers: ["Tag", "Equipamento", "Setor", "Nº de Série", "Patrimônio", "Inativo"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
        rows: vec![
            text_row(&["T1", "Monitor", "UTI", "a100", "0042", ""]),
            text_row(&["T2", "Bomba de Infusão", "UTI", "B200", "77", ""]),
            text_row(&["T3", "Ventilador", "UTI", "", "900", ""]),
            text_row(&["T4", "Desfibrilador", "UTI", "C300", "12", "Sim"]),
            text_row(&["T5", "Maca", "Centro Cirúrgico", "D400", "", ""]),
        ],
    }
}

fn load(bytes: &[u8]) -> Session {
    let options = SessionOptions::default();
    let workbook = CalamineReader
        .load_workbook(bytes, &options.sheet_names())
        .expect("falha ao ler a planilha");
    Session::from_workbook(&workbook, options).expect("falha ao montar a sessão")
}

fn at(h: u32, m: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

#[test]
fn test_confirm_export_reimport() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = XlsxWriter.write_workbook(&[equipment_sheet()]).unwrap();

    let mut session = load(&input);
    assert_eq!(session.sectors(), vec!["Centro Cirúrgico", "UTI"]);

    let roster = session.select_sector("UTI");
    // inativo fica de fora
    assert_eq!(roster.len(), 3);

    let (_, kind) = session.search("A100").unwrap();
    assert_eq!(kind, MatchKind::Serial);
    session.confirm_selected("icu-3", "ok", at(14, 30)).unwrap();
    assert_eq!(session.progress().unwrap().to_string(), "1 / 3");

    let path = export_session(&session, &XlsxWriter, dir.path(), "Ronda_Exportada", today())
        .expect("falha ao exportar");
    assert_eq!(path, dir.path().join(export_file_name("Ronda_Exportada", today())));

    let bytes = std::fs::read(&path).unwrap();
    let mut reloaded = load(&bytes);
    assert_eq!(reloaded.ledger().len(), 1);

    let entry = &reloaded.ledger().entries()[0];
    assert_eq!(entry.serial_number(), "A100");
    assert_eq!(entry.found_location, "ICU-3");
    assert_eq!(entry.found_sector, "UTI");
    assert_eq!(entry.status, Status::Located);
    assert_eq!(entry.notes, "ok");
    assert_eq!(entry.confirmed_at, Some(at(14, 30)));

    // confirmar de novo atualiza em vez de duplicar
    reloaded.select_sector("UTI");
    reloaded.search("a100").unwrap();
    reloaded.confirm_selected("", "", at(15, 0)).unwrap();
    assert_eq!(reloaded.ledger().len(), 1);
    assert_eq!(reloaded.ledger().entries()[0].confirmed_at, Some(at(15, 0)));
}

#[test]
fn test_asset_tag_fallback_and_missing_serial() {
    let input = XlsxWriter.write_workbook(&[equipment_sheet()]).unwrap();
    let mut session = load(&input);
    session.select_sector("UTI");

    let (item, kind) = session.search("42").unwrap();
    assert_eq!(kind, MatchKind::AssetTag);
    assert_eq!(item.serial_number, "a100");

    session.search("900").unwrap();
    let err = session.confirm_selected("SALA 1", "", at(9, 0)).unwrap_err();
    assert!(matches!(err, Error::IdentityMissing { ref asset_tag } if asset_tag == "900"));
    assert!(session.ledger().is_empty());
}

#[test]
fn test_export_columns_complete() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = XlsxWriter.write_workbook(&[equipment_sheet()]).unwrap();
    let mut session = load(&input);
    session.select_sector("UTI");
    session.search("B200").unwrap();
    session.confirm_selected("", "", at(10, 5)).unwrap();

    let path = export_session(&session, &XlsxWriter, dir.path(), "Inventario", today()).unwrap();
    let bytes = std::fs::read(&path).unwrap();

    let options = SessionOptions::default();
    let workbook = CalamineReader
        .load_workbook(&bytes, &options.sheet_names())
        .unwrap();

    let ledger = workbook.sheet("Ronda").expect("aba de ronda ausente");
    assert_eq!(ledger.headers, EXPORT_COLUMNS.to_vec());
    assert_eq!(ledger.records.len(), 1);
    let record = &ledger.records[0];
    assert_eq!(record.fields().len(), EXPORT_COLUMNS.len());
    assert_eq!(record.get("Status").unwrap().as_text(), "Localizado");
    assert_eq!(record.get("Data da Ronda").unwrap().as_text(), "19/10/2026");
    assert_eq!(record.get("Hora da Ronda").unwrap().as_text(), "10:05");
    assert!(record.get("Localização").unwrap().is_empty());

    // a aba de equipamentos volta sem alterações
    let equipment = workbook.sheet("Equipamentos").unwrap();
    assert_eq!(equipment.records.len(), 5);
    assert_eq!(equipment.records[0].get("Patrimônio").unwrap().as_text(), "0042");
}

#[test]
fn test_export_to_explicit_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = XlsxWriter.write_workbook(&[equipment_sheet()]).unwrap();
    let session = load(&input);

    let target = dir.path().join("saida").join("ronda.xlsx");
    let path = export_session(&session, &XlsxWriter, &target, "Ronda_Exportada", today()).unwrap();
    assert_eq!(path, target);
    assert!(target.exists());
}

#[test]
fn test_orphan_ledger_entry_survives_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut prior = vec![String::new(); EXPORT_COLUMNS.len()];
    prior[1] = "Autoclave".into();
    prior[2] = "CME".into();
    prior[3] = "Z999".into();
    prior[7] = "Localizado".into();
    prior[9] = "01/09/2026".into();
    prior[10] = "08:15".into();
    let ledger = OutputSheet {
        name: "Ronda".into(),
        headers: EXPORT_COLUMNS.iter().map(|h| h.to_string()).collect(),
        rows: vec![prior.into_iter().map(CellValue::from).collect()],
    };
    let input = XlsxWriter
        .write_workbook(&[equipment_sheet(), ledger])
        .unwrap();

    let mut session = load(&input);
    assert_eq!(session.ledger().len(), 1);
    session.select_sector("UTI");
    session.search("A100").unwrap();
    session.confirm_selected("", "", at(11, 0)).unwrap();

    let path = export_session(&session, &XlsxWriter, dir.path(), "Ronda_Exportada", today()).unwrap();
    let reloaded = load(&std::fs::read(&path).unwrap());

    let serials: Vec<&str> = reloaded
        .ledger()
        .entries()
        .iter()
        .map(|e| e.serial_number())
        .collect();
    assert_eq!(serials, vec!["Z999", "A100"]);

    let orphan = &reloaded.ledger().entries()[0];
    assert_eq!(orphan.status, Status::Located);
    assert_eq!(orphan.equipment_name, "Autoclave");
    assert_eq!(orphan.original_sector, "CME");
    assert_eq!(
        orphan.confirmed_at,
        Some(
            NaiveDate::from_ymd_opt(2026, 9, 1)
                .unwrap()
                .and_hms_opt(8, 15, 0)
                .unwrap()
        )
    );
}

#[test]
fn test_equipment_date_cells_stay_dates() {
    let dir = tempdir().expect("Failed to create temp dir");
    let acquired = NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(16, 45, 30)
        .unwrap();

    let mut sheet = equipment_sheet();
    sheet.headers.push("Aquisição".into());
    for row in &mut sheet.rows {
        row.push(CellValue::DateTime(acquired));
    }
    let input = XlsxWriter.write_workbook(&[sheet]).unwrap();

    let session = load(&input);
    let path = export_session(&session, &XlsxWriter, dir.path(), "Ronda_Exportada", today()).unwrap();

    let options = SessionOptions::default();
    let workbook = CalamineReader
        .load_workbook(&std::fs::read(&path).unwrap(), &options.sheet_names())
        .unwrap();
    let equipment = workbook.sheet("Equipamentos").unwrap();
    match equipment.records[0].get("Aquisição") {
        Some(CellValue::DateTime(dt)) => {
            assert_eq!(dt.format("%d/%m/%Y %H:%M:%S").to_string(), "07/03/2024 16:45:30");
        }
        other => panic!("esperava data, veio {:?}", other),
    }
}
