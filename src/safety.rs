//! Pre-flight file safety checks and backups.

use crate::detect::{self, InputKind};
use crate::error::{Error, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Default upper bound on input size (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Outcome of validating one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyReport {
    /// Whether every check passed
    pub is_safe: bool,
    /// Human-readable description of each failed check
    pub issues: Vec<String>,
    /// Lowercase hex SHA-256 of the file (empty if unreadable or oversized)
    pub hash: String,
    /// File size in bytes
    pub file_size: u64,
}

impl SafetyReport {
    /// A report for a file that passed every check.
    pub fn safe(hash: impl Into<String>, file_size: u64) -> Self {
        Self {
            is_safe: true,
            issues: Vec::new(),
            hash: hash.into(),
            file_size,
        }
    }

    /// A report listing failed checks.
    pub fn unsafe_with(issues: Vec<String>) -> Self {
        Self {
            is_safe: false,
            issues,
            ..Default::default()
        }
    }
}

/// Validates input files before they are opened.
pub trait SafetyValidator {
    /// Run every check on `path`.
    fn validate(&self, path: &Path) -> Result<SafetyReport>;

    /// Copy `path` next to itself and return the copy's path.
    fn create_backup(&self, path: &Path) -> Result<PathBuf>;
}

/// Limits applied by [`FileSafetyValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyLimits {
    /// Largest accepted file, in bytes
    pub max_file_size: u64,
    /// Accepted extensions, lowercase without dot
    pub allowed_extensions: Vec<String>,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: InputKind::ALL
                .iter()
                .map(|kind| kind.extension().to_string())
                .collect(),
        }
    }
}

/// Filesystem-backed [`SafetyValidator`].
#[derive(Debug, Clone, Default)]
pub struct FileSafetyValidator {
    limits: SafetyLimits,
}

impl FileSafetyValidator {
    /// Create a validator with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom limits.
    pub fn with_limits(limits: SafetyLimits) -> Self {
        Self { limits }
    }

    /// The limits in effect.
    pub fn limits(&self) -> &SafetyLimits {
        &self.limits
    }

    fn extension_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.limits.allowed_extensions.iter().any(|a| *a == ext)
            })
            .unwrap_or(false)
    }
}

impl SafetyValidator for FileSafetyValidator {
    fn validate(&self, path: &Path) -> Result<SafetyReport> {
        let mut issues = Vec::new();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.contains("..") || name.contains('\0') {
            issues.push("Suspicious file name".to_string());
        }

        if !self.extension_allowed(path) {
            issues.push("Unsupported file extension".to_string());
        }

        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(_) => {
                issues.push("File does not exist or cannot be read".to_string());
                return Ok(SafetyReport::unsafe_with(issues));
            }
        };
        if !meta.is_file() {
            issues.push("Path is not a regular file".to_string());
            return Ok(SafetyReport::unsafe_with(issues));
        }

        let file_size = meta.len();
        let too_large = file_size > self.limits.max_file_size;
        if file_size == 0 {
            issues.push("File is empty".to_string());
        } else if too_large {
            issues.push(format!(
                "File too large: {} bytes (limit {} bytes)",
                file_size, self.limits.max_file_size
            ));
        }

        let zip_expected = detect::detect_kind_from_path(path)
            .map(|kind| kind.is_zip_based())
            .unwrap_or(false);
        if zip_expected && file_size > 0 && !detect::file_has_zip_magic(path)? {
            issues.push("File content does not match its extension".to_string());
        }

        // Oversized files are not hashed
        let hash = if too_large {
            String::new()
        } else {
            sha256_file(path)?
        };
        log::debug!("{}: sha256 {:?}, {} bytes", path.display(), hash, file_size);

        Ok(SafetyReport {
            is_safe: issues.is_empty(),
            issues,
            hash,
            file_size,
        })
    }

    fn create_backup(&self, path: &Path) -> Result<PathBuf> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::Io(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "path has no file name",
                ))
            })?;
        let stamp = Local::now().format("%Y%m%d%H%M%S");
        let file_name = match path.extension() {
            Some(ext) => format!("{}.backup-{}.{}", stem, stamp, ext.to_string_lossy()),
            None => format!("{}.backup-{}", stem, stamp),
        };
        let backup = path.with_file_name(file_name);
        fs::copy(path, &backup)?;
        log::debug!("backup of {} written to {}", path.display(), backup.display());
        Ok(backup)
    }
}

/// Hash a file with SHA-256 and return lowercase hex.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 32 * 1024];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
