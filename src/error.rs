use std::{num::ParseIntError, path::PathBuf};
use thiserror::Error;

pub type VcfxResult<T> = std::result::Result<T, VcfxError>;

#[derive(Debug, Error)]
pub enum VcfxError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    #[error("No #CHROM column header line found in any input VCF")]
    MissingColumnHeader,
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
}

impl VcfxError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[macro_export]
macro_rules! vcfx_error {
    ($($arg:tt)*) => {
        $crate::error::VcfxError::message(format!($($arg)*))
    };
}
