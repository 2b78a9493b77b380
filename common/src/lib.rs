//! Ronda Common Library
//!
//! Núcleo da ronda de equipamentos, sem acesso a arquivos: normalização de
//! identificadores, índice da lista mestre, setores, registro da ronda,
//! progresso e projeção para exportação.

pub mod columns;
pub mod equipment;
pub mod error;
pub mod export;
pub mod identity;
pub mod index;
pub mod ledger;
pub mod progress;
pub mod roster;
pub mod session;
pub mod sheet;
pub mod timestamp;

pub use equipment::EquipmentRecord;
pub use error::{Error, Result};
pub use export::projector::{project, ExportRow, EXPORT_COLUMNS};
pub use identity::{normalize_id, IdentityKey};
pub use index::{MasterIndex, MatchKind, SearchOutcome};
pub use ledger::{AuditLedger, AuditLedgerEntry, BlankLocation, ConfirmOutcome, Confirmation, Status};
pub use progress::Progress;
pub use roster::{build_roster, list_sectors, SectorRoster};
pub use session::{LoadSummary, Session, SessionOptions};
pub use sheet::{CellValue, OutputSheet, Record, SheetData, Workbook, WorkbookReader, WorkbookWriter};
pub use timestamp::TimestampFormat;

#[cfg(feature = "excel")]
pub use export::excel_core::XlsxWriter;
