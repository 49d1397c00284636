//! Backend adapter selection.
//!
//! The adapter names the backend the reporting views read from. Only a
//! closed set of adapters carries reporting support; everything else runs
//! the bare application.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::app::AppError;

/// A recognized backend adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Adapter {
    Random,
    Mysql,
}

impl Adapter {
    /// Every adapter that enables the reporting views.
    pub const ALL: [Adapter; 2] = [Adapter::Random, Adapter::Mysql];

    pub fn as_str(&self) -> &'static str {
        match self {
            Adapter::Random => "RANDOM",
            Adapter::Mysql => "MYSQL",
        }
    }
}

impl fmt::Display for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the adapter name.
impl FromStr for Adapter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Adapter::ALL
            .into_iter()
            .find(|adapter| adapter.as_str() == s)
            .ok_or_else(|| AppError::UnknownAdapter(s.to_string()))
    }
}

/// The adapter value as configured, before any policy is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterSetting {
    Unset,
    Known(Adapter),
    Unknown(String),
}

impl AdapterSetting {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => AdapterSetting::Unset,
            Some(value) => match value.parse() {
                Ok(adapter) => AdapterSetting::Known(adapter),
                Err(_) => AdapterSetting::Unknown(value.to_string()),
            },
        }
    }

    /// Apply the unknown-value policy.
    ///
    /// Lenient mode skips unknown values with a warning; strict mode turns
    /// them into an error. An unset adapter is never an error.
    pub fn resolve(self, strict: bool) -> Result<Option<Adapter>, AppError> {
        match self {
            AdapterSetting::Unset => Ok(None),
            AdapterSetting::Known(adapter) => Ok(Some(adapter)),
            AdapterSetting::Unknown(value) if strict => Err(AppError::UnknownAdapter(value)),
            AdapterSetting::Unknown(value) => {
                tracing::warn!(
                    adapter = %value,
                    "Unrecognized adapter, reporting views stay disabled"
                );
                Ok(None)
            }
        }
    }
}
