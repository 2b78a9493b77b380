//! Normalização de identificadores
//!
//! Única fonte de verdade para igualdade entre Nº de Série / Patrimônio.
//! Dois identificadores são o mesmo equipamento se e somente se suas chaves
//! normalizadas forem iguais.

use std::fmt;

/// Normaliza um identificador bruto
///
/// - vazio ou só espaços → `""`
/// - só dígitos → forma decimal sem zeros à esquerda (`"0012"` → `"12"`)
/// - qualquer outro texto → sem espaços nas pontas, em maiúsculas
pub fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let stripped = trimmed.trim_start_matches('0');
        return if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        };
    }

    trimmed.to_uppercase()
}

/// Remove tudo que não for dígito
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Chave de identidade normalizada (nunca vazia)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// `None` quando o identificador normaliza para vazio
    pub fn from_raw(raw: &str) -> Option<Self> {
        let normalized = normalize_id(raw);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
