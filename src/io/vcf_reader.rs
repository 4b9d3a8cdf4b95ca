use crate::{error::VcfxError, utils::util::Result};
use flate2::read::MultiGzDecoder;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read as ioRead},
    path::Path,
};

/// Opens a VCF file for line-oriented reading, transparently decompressing
/// gzip input based on the file extension.
pub fn open_vcf_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    fn is_gzipped(path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();
        path_str.ends_with(".gz") || path_str.ends_with(".gzip")
    }
    let file = File::open(path)
        .map_err(|error| crate::vcfx_error!("Failed to open file {}: {error}", path.display()))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(VcfxError::InvalidGzipHeader {
                path: path.to_path_buf(),
            })
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

/// Header section of a single VCF: the `##` meta lines plus the `#CHROM`
/// column header line, if one was present.
#[derive(Debug, Default)]
pub struct VcfHeader {
    pub meta_lines: Vec<String>,
    pub column_header: Option<String>,
}

/// Reads the header section of a VCF file, stopping at the first data line
/// so variant records are never pulled into memory.
pub fn read_vcf_header(path: &Path) -> Result<VcfHeader> {
    let reader = open_vcf_reader(path)?;
    let mut header = VcfHeader::default();
    for (line_number, result_line) in reader.lines().enumerate() {
        let line = result_line.map_err(|error| {
            crate::vcfx_error!(
                "Error at line {} of {}: {}",
                line_number + 1,
                path.display(),
                error
            )
        })?;
        if line.starts_with("##") {
            header.meta_lines.push(line);
        } else if line.starts_with('#') {
            header.column_header = Some(line);
            break;
        } else {
            break;
        }
    }
    Ok(header)
}
