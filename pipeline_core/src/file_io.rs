//! # File I/O Module
//!
//! Reading sizing requests and writing text reports:
//! - **JSON input**: a [`SizingRequest`] stored as a `.json` file
//! - **Atomic saves**: reports are written to `.tmp`, synced, then renamed
//!
//! ## Example
//!
//! ```rust,no_run
//! use pipeline_core::calculations::evaluate;
//! use pipeline_core::file_io::{load_request, save_report};
//! use std::path::Path;
//!
//! let request = load_request(Path::new("line_a.json"))?;
//! let params = request.to_parameters()?;
//! let results = evaluate(&params);
//!
//! // Saved as "line_a_report.txt"
//! let written = save_report("...", Path::new("line_a_report"))?;
//! println!("Report written to {}", written.display());
//! # Ok::<(), pipeline_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::input::SizingRequest;

/// Extension every saved report carries
pub const REPORT_EXTENSION: &str = "txt";

/// Load a sizing request from a JSON file.
///
/// The request is parsed but not validated; call
/// [`SizingRequest::to_parameters`] to validate it.
///
/// # Returns
///
/// * `Ok(SizingRequest)` - Successfully parsed request
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_request(path: &Path) -> CalcResult<SizingRequest> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let request: SizingRequest =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    debug!(path = %path.display(), diameters = request.outer_diameters_mm.len(), "loaded request");
    Ok(request)
}

/// Append `.txt` unless the path already ends with it (case-insensitive).
pub fn with_report_extension(path: &Path) -> PathBuf {
    let has_extension = path
        .extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case(REPORT_EXTENSION))
        .unwrap_or(false);

    if has_extension {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(".");
        name.push(REPORT_EXTENSION);
        PathBuf::from(name)
    }
}

/// Save a text report with atomic write semantics.
///
/// The save process:
/// 1. Add the `.txt` extension if missing
/// 2. Write to a temporary file (`.txt.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Rename the temporary file over the target
///
/// Returns the path actually written.
pub fn save_report(text: &str, path: &Path) -> CalcResult<PathBuf> {
    let path = with_report_extension(path);
    let tmp_path = path.with_extension("txt.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(text.as_bytes()).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, &path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), bytes = text.len(), "report saved");
    Ok(path)
}
