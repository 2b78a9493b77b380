//! Data/hora da ronda
//!
//! O registro guarda um único `NaiveDateTime`; a separação em data e hora
//! acontece só na exportação.

use crate::sheet::CellValue;
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const DEFAULT_DATE: &str = "%d/%m/%Y";
const DEFAULT_TIME: &str = "%H:%M";

const DATE_FALLBACKS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];
const TIME_FALLBACKS: &[&str] = &["%H:%M:%S", "%H:%M"];
const DATETIME_FALLBACKS: &[&str] = &[
    "%d/%m/%Y, %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y, %H:%M",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Formatos de data e hora da exportação (padrão pt-BR)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestampFormat {
    pub date: String,
    pub time: String,
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE.into(),
            time: DEFAULT_TIME.into(),
        }
    }
}

/// Confere um padrão chrono (`%d/%m/%Y` etc.)
pub fn check_pattern(pattern: &str) -> std::result::Result<(), String> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        Err(format!("formato de data/hora inválido: \"{}\"", pattern))
    } else {
        Ok(())
    }
}

fn render(timestamp: &NaiveDateTime, pattern: &str, fallback: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", timestamp.format(pattern)).is_ok() {
        return out;
    }
    tracing::warn!(pattern, fallback, "formato de data/hora inválido, usando o padrão");
    timestamp.format(fallback).to_string()
}

impl TimestampFormat {
    /// Confere os dois padrões
    pub fn validate(&self) -> std::result::Result<(), String> {
        check_pattern(&self.date)?;
        check_pattern(&self.time)
    }

    /// Separa em (data, hora)
    ///
    /// Padrão inválido cai no formato pt-BR em vez de abortar a exportação.
    pub fn split(&self, timestamp: &NaiveDateTime) -> (String, String) {
        (
            render(timestamp, &self.date, DEFAULT_DATE),
            render(timestamp, &self.time, DEFAULT_TIME),
        )
    }

    /// Lê data/hora de uma linha já gravada
    ///
    /// Aceita data + hora em colunas separadas (formato configurado ou os
    /// usuais), células de data do Excel, ou um carimbo único.
    pub fn parse_cells(
        &self,
        date: Option<&CellValue>,
        time: Option<&CellValue>,
        combined: Option<&CellValue>,
    ) -> Option<NaiveDateTime> {
        let time_of_day = time.and_then(|t| self.parse_time_cell(t));

        if let Some(date) = date.filter(|d| !d.is_empty()) {
            if let Some(day) = self.parse_date_cell(date) {
                return match time_of_day {
                    Some(t) => Some(day.and_time(t)),
                    None => day.and_hms_opt(0, 0, 0),
                };
            }
            if let Some(dt) = parse_datetime_cell(date) {
                return Some(dt);
            }
        }

        combined.and_then(parse_datetime_cell)
    }

    fn parse_date_cell(&self, cell: &CellValue) -> Option<NaiveDate> {
        match cell {
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Text(s) => {
                let s = s.trim();
                std::iter::once(self.date.as_str())
                    .chain(DATE_FALLBACKS.iter().copied())
                    .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
            }
            _ => None,
        }
    }

    fn parse_time_cell(&self, cell: &CellValue) -> Option<NaiveTime> {
        match cell {
            CellValue::DateTime(dt) => Some(dt.time()),
            CellValue::Text(s) => {
                let s = s.trim();
                std::iter::once(self.time.as_str())
                    .chain(TIME_FALLBACKS.iter().copied())
                    .find_map(|f| NaiveTime::parse_from_str(s, f).ok())
            }
            _ => None,
        }
    }
}

fn parse_datetime_cell(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::Text(s) => {
            let s = s.trim().trim_end_matches('Z');
            DATETIME_FALLBACKS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        }
        _ => None,
    }
}
