//! Temp JSON artifacts written between the scrape and sync stages.
//!
//! The scrape result is persisted to three files so the later stages can
//! be rerun or inspected independently. The directory is owned by a
//! single pipeline run; it is removed after a fully completed run and
//! deliberately kept in place when a stage fails.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::scrape::{PartyData, PoliticianAttendance, ScrapeResult};

/// Paths of the three JSON artifacts produced by one scrape.
#[derive(Debug, Clone)]
pub struct ScrapeArtifacts {
    pub parties_path: PathBuf,
    pub politicians_path: PathBuf,
    pub attendance_path: PathBuf,
}

/// Writes the scrape result into the configured temp directory.
pub fn write_artifacts(
    config: &SyncConfig,
    result: &ScrapeResult,
) -> Result<ScrapeArtifacts, SyncError> {
    fs::create_dir_all(&config.temp_dir)?;

    let parties_path = config.temp_dir.join(&config.parties_file);
    let politicians_path = config.temp_dir.join(&config.politicians_file);
    let attendance_path = config.temp_dir.join(&config.attendance_file);

    fs::write(&parties_path, serde_json::to_string_pretty(&result.parties)?)?;
    println!(
        "Wrote {} parties to {}",
        result.parties.len(),
        parties_path.display()
    );

    fs::write(
        &politicians_path,
        serde_json::to_string_pretty(&result.politicians)?,
    )?;
    println!(
        "Wrote {} politicians to {}",
        result.politicians.len(),
        politicians_path.display()
    );

    fs::write(
        &attendance_path,
        serde_json::to_string_pretty(&result.attendance)?,
    )?;
    println!(
        "Wrote {} attendance rows to {}",
        result.attendance.len(),
        attendance_path.display()
    );

    Ok(ScrapeArtifacts {
        parties_path,
        politicians_path,
        attendance_path,
    })
}

/// Reads the parties artifact back.
pub fn read_parties(path: &Path) -> Result<Vec<PartyData>, SyncError> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Reads the politicians artifact back.
pub fn read_politicians(path: &Path) -> Result<Vec<PoliticianAttendance>, SyncError> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Removes the temp directory and everything in it.
pub fn cleanup(config: &SyncConfig) -> Result<(), SyncError> {
    if config.temp_dir.exists() {
        fs::remove_dir_all(&config.temp_dir)?;
    }
    Ok(())
}
