//! Whole-world scans: file discovery, per-source extraction, aggregation.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::{
    AnvilCodec, Codec, DataSource, Error, Finding, Result, SearchCriteria,
    extract::{self, FileScan},
};

pub const PLAYER_DATA_DIR: &str = "playerdata";
pub const REGION_DIR: &str = "region";
pub const ENTITIES_DIR: &str = "entities";

/// A single-structure `.dat` file searched after the grid sources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MiscFile {
    /// Path relative to the world directory, `/`-separated.
    pub path: String,
    pub description: String,
}

impl MiscFile {
    pub fn new(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}

/// Nether and End chunk data and the world UUID.
pub fn default_misc_files() -> Vec<MiscFile> {
    vec![
        MiscFile::new("DIM-1/data/chunks.dat", "Nether Chunks Data"),
        MiscFile::new("DIM1/data/chunks.dat", "The End Chunks Data"),
        MiscFile::new("data/WorldUUID.dat", "World UUID Data"),
    ]
}

#[derive(Clone, Debug)]
pub struct ScanConfig {
    pub world_dir: PathBuf,
    pub criteria: SearchCriteria,
    pub misc_files: Vec<MiscFile>,
}

impl ScanConfig {
    pub fn new(world_dir: impl Into<PathBuf>, criteria: SearchCriteria) -> Self {
        Self {
            world_dir: world_dir.into(),
            criteria,
            misc_files: default_misc_files(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_failed: usize,
    pub cells_decoded: usize,
    pub cells_corrupt: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ScanOutcome {
    /// Players, then regions, then entities, then misc files.
    pub findings: Vec<Finding>,
    pub stats: ScanStats,
}

/// Runs a configured search over one world directory.
///
/// Per-file and per-cell failures are logged and skipped; a scan itself
/// cannot fail once constructed.
#[derive(Clone, Debug)]
pub struct Scanner<C: Codec = AnvilCodec> {
    codec: C,
    config: ScanConfig,
}

impl Scanner {
    /// A scanner over Java Edition files on disk.
    pub fn new(config: ScanConfig) -> Result<Self> {
        Self::with_codec(AnvilCodec, config)
    }
}

impl<C: Codec> Scanner<C> {
    /// Fails with [`Error::NoCriteria`] if the criteria would match everything.
    pub fn with_codec(codec: C, config: ScanConfig) -> Result<Self> {
        if config.criteria.is_empty() {
            return Err(Error::NoCriteria);
        }
        Ok(Self { codec, config })
    }

    #[inline]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn run(&self) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        info!("Starting NBT scan in world: {}", self.config.world_dir.display());
        info!("Searching for {}", self.config.criteria);

        self.scan_players(&mut outcome);
        self.scan_grid(
            REGION_DIR,
            DataSource::RegionBlockEntity,
            extract::scan_region_file::<C>,
            &mut outcome,
        );
        self.scan_grid(
            ENTITIES_DIR,
            DataSource::EntityFile,
            extract::scan_entity_file::<C>,
            &mut outcome,
        );
        self.scan_misc(&mut outcome);

        let stats = outcome.stats;
        info!(
            "Scanned {} file(s) ({} skipped), {} cell(s) decoded ({} unreadable), {} finding(s)",
            stats.files_scanned,
            stats.files_failed,
            stats.cells_decoded,
            stats.cells_corrupt,
            outcome.findings.len()
        );
        outcome
    }

    fn scan_players(&self, outcome: &mut ScanOutcome) {
        let dir = self.config.world_dir.join(PLAYER_DATA_DIR);
        let Some(files) = self.discover(&dir, "dat", DataSource::PlayerData, outcome) else {
            return;
        };
        for path in files {
            outcome.stats.files_scanned += 1;
            match extract::scan_player_file(&self.codec, &path, &self.config.criteria) {
                Ok(findings) => outcome.findings.extend(findings),
                Err(error) => skip_file(&path, &error, outcome),
            }
        }
    }

    fn scan_grid(
        &self,
        dir_name: &str,
        source: DataSource,
        scan: fn(&C, &Path, &SearchCriteria) -> Result<FileScan>,
        outcome: &mut ScanOutcome,
    ) {
        let dir = self.config.world_dir.join(dir_name);
        let Some(files) = self.discover(&dir, "mca", source, outcome) else {
            return;
        };
        for path in files {
            info!("Processing {}...", path.display());
            outcome.stats.files_scanned += 1;
            match scan(&self.codec, &path, &self.config.criteria) {
                Ok(file) => {
                    outcome.stats.cells_decoded += file.cells_decoded;
                    outcome.stats.cells_corrupt += file.cells_corrupt;
                    outcome.findings.extend(file.findings);
                }
                Err(error) => skip_file(&path, &error, outcome),
            }
        }
    }

    fn scan_misc(&self, outcome: &mut ScanOutcome) {
        info!("--- Scanning {} ---", DataSource::MiscData.description());
        for misc in &self.config.misc_files {
            let path = misc
                .path
                .split('/')
                .fold(self.config.world_dir.clone(), |path, part| path.join(part));
            if !path.is_file() {
                debug!("File not found: {}", path.display());
                continue;
            }
            outcome.stats.files_scanned += 1;
            let criteria = &self.config.criteria;
            match extract::scan_misc_file(&self.codec, &path, &misc.path, &misc.description, criteria)
            {
                Ok(findings) => outcome.findings.extend(findings),
                Err(error) => skip_file(&path, &error, outcome),
            }
        }
    }

    /// Lists the source's files, logging instead of failing.
    fn discover(
        &self,
        dir: &Path,
        extension: &str,
        source: DataSource,
        outcome: &mut ScanOutcome,
    ) -> Option<Vec<PathBuf>> {
        info!("--- Scanning {} ---", source.description());
        match list_files(dir, extension) {
            Ok(Some(files)) => {
                info!("Found {} .{extension} file(s) in {}", files.len(), dir.display());
                Some(files)
            }
            Ok(None) => {
                info!("Directory not found: {}", dir.display());
                None
            }
            Err(error) => {
                outcome.stats.files_failed += 1;
                warn!("Cannot list {}: {error}", dir.display());
                None
            }
        }
    }
}

fn skip_file(path: &Path, error: &Error, outcome: &mut ScanOutcome) {
    outcome.stats.files_failed += 1;
    if error.is_io() {
        warn!("Cannot read {}, skipping: {error}", path.display());
    } else {
        warn!("{} is not a valid NBT file or is corrupted, skipping: {error}", path.display());
    }
}

/// Files in `dir` with the given extension, sorted by name.
///
/// `Ok(None)` if `dir` does not exist.
pub fn list_files(dir: &Path, extension: &str) -> Result<Option<Vec<PathBuf>>> {
    if !dir.is_dir() {
        return Ok(None);
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(Some(files))
}
