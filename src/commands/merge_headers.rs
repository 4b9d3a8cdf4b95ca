use crate::{
    cli::MergeHeadersArgs,
    core::header::HeaderMerger,
    io::{vcf_reader::read_vcf_header, vcf_writer::VcfWriter},
    utils::util::Result,
};

/// Merges the header sections of the input VCFs into a single header file.
pub fn merge_headers(args: &MergeHeadersArgs) -> Result<()> {
    let mut merger = HeaderMerger::new();

    for path in &args.vcfs {
        log::debug!("Reading header of {}", path.display());
        let header = read_vcf_header(path)?;
        if header.meta_lines.is_empty() && header.column_header.is_none() {
            log::warn!("No header lines found in {}", path.display());
        }
        for line in &header.meta_lines {
            merger.add_meta_line(line);
        }
        if let Some(column_header) = &header.column_header {
            merger.add_column_header(column_header);
        }
    }

    let lines = merger.into_lines(args.fullheader)?;
    let mut writer = VcfWriter::create(&args.output)?;
    for line in &lines {
        writer.write_line(line)?;
    }
    writer.finish()?;
    log::info!(
        "Wrote {} merged header lines from {} inputs to {}",
        lines.len(),
        args.vcfs.len(),
        args.output
    );
    Ok(())
}
