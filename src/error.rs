use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while decoding or annotating barcodes
#[derive(Error, Debug)]
pub enum Error {
    /// A required input file does not exist
    #[error("Error: {} not found!", .0.display())]
    MissingFile(PathBuf),

    /// A required input is not under the directory mounted into the container
    #[error("Error: {} is outside the mounted directory {}", .path.display(), .workdir.display())]
    OutsideWorkdir {
        /// Offending input path
        path: PathBuf,
        /// Directory mounted into the container
        workdir: PathBuf,
    },

    /// An image could not be opened or decoded
    #[error("Error: Unable to load the image {}: {source}", .path.display())]
    ImageLoad {
        /// Path that failed to load
        path: PathBuf,
        /// Underlying codec error
        #[source]
        source: image::ImageError,
    },

    /// The annotated image could not be written
    #[error("Error: Unable to save the image {}: {source}", .path.display())]
    ImageSave {
        /// Destination path
        path: PathBuf,
        /// Underlying codec error
        #[source]
        source: image::ImageError,
    },

    /// The external decoder could not be started
    #[error("Error: failed to start {program}: {source}")]
    ProcessSpawn {
        /// Program that was invoked
        program: String,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// The external decoder exited unsuccessfully
    #[error("Error during decoding (exit status {}):\n{stderr}", exit_status(.status))]
    ProcessFailure {
        /// Exit code, if the process was not killed by a signal
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// The decoder reported that the image holds no barcode
    #[error("Error: No barcode detected in the image.")]
    NoBarcodeDetected,

    /// Writing to the console failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn exit_status(status: &Option<i32>) -> String {
    status.map_or_else(|| "unknown".to_string(), |code| code.to_string())
}

/// Result alias for this crate
pub type Result<T, E = Error> = std::result::Result<T, E>;
