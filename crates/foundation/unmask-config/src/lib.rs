//! Configuration for unmask runs.
//!
//! Loaded from YAML. Lookup order: an explicit path, then
//! `~/.config/unmask/config.yaml` when it exists, then built-in defaults:
//! `Задание-3-данные.csv` in, `task3_answer.csv` out.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use unmask_core::{PhoneRange, COMMON_DOMAINS, DEFAULT_PHONE_END, DEFAULT_PHONE_START};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnmaskConfig {
    /// CSV export of the encoded spreadsheet
    pub input: PathBuf,
    /// Where the enriched table is written
    pub output: PathBuf,
    pub table: TableConfig,
    pub phone: PhoneConfig,
    pub email: EmailConfig,
    pub decode: DecodeConfig,
}

impl Default for UnmaskConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("Задание-3-данные.csv"),
            output: PathBuf::from("task3_answer.csv"),
            table: TableConfig::default(),
            phone: PhoneConfig::default(),
            email: EmailConfig::default(),
            decode: DecodeConfig::default(),
        }
    }
}

/// Layout of the input table and names of the output columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Field delimiter, a single ASCII character
    pub delimiter: char,
    /// Lines skipped before the header line
    pub header_row: usize,
    /// Drop the first column (a row index in the source sheet)
    pub drop_index_column: bool,
    pub columns: InputColumns,
    pub output_columns: OutputColumns,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            header_row: 1,
            drop_index_column: true,
            columns: InputColumns::default(),
            output_columns: OutputColumns::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputColumns {
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Default for InputColumns {
    fn default() -> Self {
        Self {
            phone: "Телефон".into(),
            email: "email".into(),
            address: "Адрес".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputColumns {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub shift: String,
}

impl Default for OutputColumns {
    fn default() -> Self {
        Self {
            phone: "Расшифрованный телефон".into(),
            email: "Расшифрованный email".into(),
            address: "Расшифрованный адрес".into(),
            shift: "Сдвиг".into(),
        }
    }
}

impl OutputColumns {
    /// Names in the order decoded cells are appended
    pub fn names(&self) -> [&str; 4] {
        [
            self.phone.as_str(),
            self.email.as_str(),
            self.address.as_str(),
            self.shift.as_str(),
        ]
    }
}

/// Phone search bounds, `end` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneConfig {
    pub start: u64,
    pub end: u64,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_PHONE_START,
            end: DEFAULT_PHONE_END,
        }
    }
}

impl PhoneConfig {
    pub fn range(&self) -> Result<PhoneRange> {
        PhoneRange::new(self.start, self.end).map_err(|e| Error::InvalidValue {
            field: "phone",
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Top-level labels that mark a correct shift
    pub allowed_tlds: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            allowed_tlds: COMMON_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// How a batch of records is scheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One record after another
    Sequential,
    /// Records spread over a rayon pool
    #[default]
    Parallel,
    /// One phone scan for the whole batch, then per-record ciphers
    SharedScan,
}

impl std::str::FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "sequential" => Ok(Strategy::Sequential),
            "parallel" => Ok(Strategy::Parallel),
            "shared_scan" => Ok(Strategy::SharedScan),
            other => Err(Error::InvalidValue {
                field: "decode.strategy",
                reason: format!("unknown strategy '{other}'. Use: sequential, parallel, shared_scan"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    pub strategy: Strategy,
    /// Worker threads for the parallel strategy; rayon's default when unset
    pub threads: Option<usize>,
}

impl UnmaskConfig {
    /// Load from `path`, or from the default location, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a specific file; it must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `~/.config/unmask/config.yaml` (or the platform equivalent)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("unmask").join("config.yaml"))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_yaml()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, contents).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.phone.range()?;

        if self.email.allowed_tlds.is_empty() {
            return Err(Error::InvalidValue {
                field: "email.allowed_tlds",
                reason: "at least one top-level domain is required".into(),
            });
        }

        if !self.table.delimiter.is_ascii() {
            return Err(Error::InvalidValue {
                field: "table.delimiter",
                reason: format!("'{}' is not an ASCII character", self.table.delimiter),
            });
        }

        if self.decode.threads == Some(0) {
            return Err(Error::InvalidValue {
                field: "decode.threads",
                reason: "must be at least 1".into(),
            });
        }

        Ok(())
    }
}
