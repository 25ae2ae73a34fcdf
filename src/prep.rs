//! Offline sprite preparation
//!
//! Trims, whitens-out and resizes every PNG in a directory by shelling out to
//! ImageMagick's `convert`, writing the results to a fixed output directory.
//! Not part of the game runtime.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Errors raised by the preparation tool
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("Usage: {program} <directory>")]
    Usage { program: String },
    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot create output directory {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write progress: {0}")]
    Progress(#[source] std::io::Error),
}

/// How images are trimmed and where they go
#[derive(Debug, Clone)]
pub struct TrimOptions {
    /// External tool to invoke
    pub program: String,
    /// Colour distance tolerance for trim/transparency, in percent
    pub fuzz_percent: u32,
    /// Colour made transparent
    pub transparent: String,
    /// Target bounding box (width, height)
    pub size: (u32, u32),
    pub output_dir: PathBuf,
}

impl Default for TrimOptions {
    fn default() -> Self {
        Self {
            program: "convert".to_string(),
            fuzz_percent: 10,
            transparent: "white".to_string(),
            size: (50, 50),
            output_dir: PathBuf::from("./static"),
        }
    }
}

impl TrimOptions {
    /// Where the processed copy of `image` is written
    pub fn output_path(&self, image: &Path) -> PathBuf {
        match image.file_name() {
            Some(name) => self.output_dir.join(name),
            None => self.output_dir.join(image),
        }
    }

    /// Arguments passed to the external tool for one image
    pub fn args(&self, image: &Path) -> Vec<OsString> {
        vec![
            "-trim".into(),
            "-fuzz".into(),
            format!("{}%", self.fuzz_percent).into(),
            "-transparent".into(),
            self.transparent.clone().into(),
            "-resize".into(),
            format!("{}x{}", self.size.0, self.size.1).into(),
            image.as_os_str().to_owned(),
            self.output_path(image).into_os_string(),
        ]
    }

    pub fn command(&self, image: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args(image));
        cmd
    }
}

/// Outcome of a preparation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Extract the single directory argument from `argv` (program name first)
pub fn parse_args<I, S>(args: I) -> Result<PathBuf, PrepareError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let program = args.next().unwrap_or_else(|| "prepare-images".to_string());
    match (args.next(), args.next()) {
        (Some(dir), None) => Ok(PathBuf::from(dir)),
        _ => Err(PrepareError::Usage { program }),
    }
}

/// PNG files directly inside `dir`, sorted by path
pub fn find_images(dir: &Path) -> Result<Vec<PathBuf>, PrepareError> {
    let read_err = |source| PrepareError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "png") {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Process every image in `dir`, reporting progress lines to `out`.
///
/// A non-zero exit from the tool is logged and counted; failing to start the
/// tool at all aborts the run.
pub fn run(
    dir: &Path,
    options: &TrimOptions,
    out: &mut impl Write,
) -> Result<PrepSummary, PrepareError> {
    let images = find_images(dir)?;
    std::fs::create_dir_all(&options.output_dir).map_err(|source| {
        PrepareError::CreateOutput {
            path: options.output_dir.clone(),
            source,
        }
    })?;

    let mut summary = PrepSummary::default();
    for image in &images {
        writeln!(out, "Processing: {}", image.display()).map_err(PrepareError::Progress)?;

        let status = options
            .command(image)
            .status()
            .map_err(|source| PrepareError::Spawn {
                program: options.program.clone(),
                source,
            })?;

        if status.success() {
            summary.processed += 1;
        } else {
            log::warn!("{} exited with {} for {}", options.program, status, image.display());
            summary.failed += 1;
        }
    }

    Ok(summary)
}
