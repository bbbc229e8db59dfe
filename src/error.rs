use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("volume '{}' has not been mounted", .root.display())]
    NotMounted { root: PathBuf },
    #[error("could not mount volume '{}': {source}", .root.display())]
    Mount { root: PathBuf, source: io::Error },
    #[error("'{name}' is not a name inside the volume")]
    InvalidName { name: String },
    #[error("could not open '{}': {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("could not read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("'{}' is empty", .path.display())]
    Empty { path: PathBuf },
    #[error("checksum of '{}' is {actual:08x}, expected {expected:08x}", .path.display())]
    Mismatch { path: PathBuf, expected: u32, actual: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
