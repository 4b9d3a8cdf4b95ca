use crate::utils::util::Result;
use std::{
    fs::File,
    io::{BufWriter, Write},
};

/// Buffered line writer for VCF text output.
pub struct VcfWriter {
    writer: BufWriter<File>,
}

impl VcfWriter {
    pub fn create(path: &str) -> Result<Self> {
        let file = File::create(path)
            .map_err(|error| crate::vcfx_error!("Failed to create output file {path}: {error}"))?;
        Ok(VcfWriter {
            writer: BufWriter::new(file),
        })
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flushes buffered output. Dropping the writer without calling this
    /// loses the error from the final flush.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
