//! Provides the `load` function, which reads one input file and returns the
//! integers in it as a `Loaded` set. Files are read whole; UTF-16 files with
//! a Byte Order Mark are translated to UTF-8 on the way in.
use crate::set::{Constraints, Loaded};
use crate::tokens::{values, Split};
use clap::ValueEnum;
use encoding_rs_io::DecodeReaderBytesBuilder;
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// What to do when an input file doesn't exist
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, ValueEnum)]
pub enum MissingFile {
    /// Log a warning and carry on with an empty set
    #[default]
    Warn,
    /// Stop with an error
    Fail,
}

/// Everything `load` needs to know besides the path
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadConfig {
    /// How to cut the file into tokens
    pub split: Split,
    /// Which parsed values to admit
    pub constraints: Constraints,
    /// What a missing file means
    pub missing: MissingFile,
}

/// The ways loading can fail. Malformed content is never one of them.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file doesn't exist, and `MissingFile::Fail` was requested
    #[error("Can't find file: {}", .0.display())]
    NotFound(PathBuf),
    /// Anything else that went wrong while reading
    #[error("Can't read file: {}", .path.display())]
    Read {
        /// The file we were reading
        path: PathBuf,
        /// What went wrong
        #[source]
        source: io::Error,
    },
}

/// Reads the file at `path` and returns the integers in it, sorted into
/// admitted and flagged by `config.constraints`.
pub fn load(path: &Path, config: &LoadConfig) -> Result<Loaded, LoadError> {
    let contents = match read_decoded(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return match config.missing {
                MissingFile::Warn => {
                    let path = path.display();
                    tracing::warn!(%path, "input file not found, using an empty set");
                    Ok(Loaded::not_found())
                }
                MissingFile::Fail => Err(LoadError::NotFound(path.to_owned())),
            };
        }
        Err(source) => return Err(LoadError::Read { path: path.to_owned(), source }),
    };
    tracing::debug!(
        path = %path.display(),
        split = ?config.split,
        bytes = contents.len(),
        "tokenizing"
    );

    let loaded = Loaded::from_values(values(&contents, config.split), config.constraints);
    for flagged in &loaded.flagged {
        tracing::warn!(
            path = %path.display(),
            value = flagged.value,
            "value is {}, left out",
            flagged.reason
        );
    }
    tracing::info!(path = %path.display(), count = loaded.set.len(), "loaded");
    Ok(loaded)
}

/// Returns the contents of `path` as UTF-8 (or at least not UTF-16), with any
/// Byte Order Mark removed.
fn read_decoded(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut reader = DecodeReaderBytesBuilder::new()
        .bom_sniffing(true) // Look at the BOM to detect UTF-16 files and convert to UTF-8
        .strip_bom(true) // A UTF-8 BOM glued to the first number would make it junk
        .utf8_passthru(true) // Don't enforce UTF-8 (BOM or no BOM)
        .build(file);
    let mut contents = Vec::new();
    reader.read_to_end(&mut contents)?;
    Ok(contents)
}
