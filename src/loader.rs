//! Carregamento assíncrono da planilha
//!
//! A decodificação roda em `spawn_blocking`; a sessão só é trocada quando a
//! nova planilha foi lida por inteiro. Enquanto uma leitura está em curso,
//! outra é recusada com [`ronda_common::Error::LoadInProgress`].
//!
//! A CLI carrega uma vez por comando com [`load_session`]. [`SharedSession`]
//! é o adaptador para front ends que mantêm a sessão viva e podem disparar
//! um novo carregamento a qualquer momento (interface gráfica, serviço).

use crate::error::{RondaError, Result};
use ronda_common::{LoadSummary, Session, SessionOptions, Workbook, WorkbookReader};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SharedReader = Arc<dyn WorkbookReader + Send + Sync>;

/// Decodifica os bytes fora da thread do runtime
pub async fn decode_workbook(
    reader: SharedReader,
    bytes: Vec<u8>,
    sheet_names: Vec<String>,
) -> Result<Workbook> {
    let workbook =
        tokio::task::spawn_blocking(move || reader.load_workbook(&bytes, &sheet_names)).await??;
    Ok(workbook)
}

/// Lê o arquivo e monta uma sessão nova
pub async fn load_session(
    reader: SharedReader,
    path: &Path,
    options: SessionOptions,
) -> Result<Session> {
    if !path.exists() {
        return Err(RondaError::FileNotFound(path.display().to_string()));
    }

    let bytes = tokio::fs::read(path).await?;
    let workbook = decode_workbook(reader, bytes, options.sheet_names()).await?;
    let session = Session::from_workbook(&workbook, options)?;
    tracing::debug!(path = %path.display(), "arquivo lido");
    Ok(session)
}

/// Sessão compartilhada entre tarefas
pub struct SharedSession {
    reader: SharedReader,
    options: SessionOptions,
    session: Mutex<Option<Session>>,
    loading: AtomicBool,
}

struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SharedSession {
    pub fn new(reader: SharedReader, options: SessionOptions) -> Self {
        Self {
            reader,
            options,
            session: Mutex::new(None),
            loading: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Carrega uma nova planilha
    ///
    /// Em caso de erro a sessão anterior continua valendo.
    pub async fn load(&self, bytes: Vec<u8>) -> Result<LoadSummary> {
        if self.loading.swap(true, Ordering::AcqRel) {
            return Err(ronda_common::Error::LoadInProgress.into());
        }
        let _guard = LoadingGuard(&self.loading);

        let workbook =
            decode_workbook(self.reader.clone(), bytes, self.options.sheet_names()).await?;
        let next = Session::from_workbook(&workbook, self.options.clone())?;
        let summary = next.summary();

        *self.session.lock().await = Some(next);
        Ok(summary)
    }

    /// Executa `f` com a sessão carregada
    pub async fn with_session<T>(
        &self,
        f: impl FnOnce(&mut Session) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(RondaError::NotLoaded)?;
        f(session)
    }
}
