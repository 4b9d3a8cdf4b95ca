use crate::{
    cli::VafArgs,
    constants::{
        FILTER_PREFIX, FORMAT_AD_LINE, FORMAT_DPVAF_LINE, FORMAT_VAF_LINE, VAF_DECLARATION_PREFIX,
    },
    core::vaf::annotate_record,
    io::{vcf_reader::open_vcf_reader, vcf_writer::VcfWriter},
    utils::util::Result,
};
use std::io::BufRead;

/// Streams a Strelka2 somatic VCF, appending DPVAF/AD/VAF values to every
/// record and the matching `##FORMAT` declarations to the header.
pub fn add_vaf(args: &VafArgs) -> Result<()> {
    log::debug!(
        "Annotating {} records from {} with tier {} counts",
        args.variant,
        args.input.display(),
        args.tier
    );
    let reader = open_vcf_reader(&args.input)?;
    let mut writer = VcfWriter::create(&args.output)?;

    // The `##` block is buffered so the declarations land before the first
    // `##FILTER` line even though records are streamed.
    let mut meta_lines: Vec<String> = Vec::new();
    let mut header_flushed = false;
    let mut record_count = 0usize;

    for (line_number, result_line) in reader.lines().enumerate() {
        let line = result_line.map_err(|error| {
            crate::vcfx_error!(
                "Error at line {} of {}: {}",
                line_number + 1,
                args.input.display(),
                error
            )
        })?;

        if line.starts_with("##") && !header_flushed {
            meta_lines.push(line);
            continue;
        }
        if !header_flushed {
            flush_header(&mut writer, &meta_lines)?;
            header_flushed = true;
        }
        if line.starts_with('#') {
            writer.write_line(&line)?;
            continue;
        }

        record_count += 1;
        let annotated = annotate_record(&line, args.variant, args.tier).map_err(|error| {
            crate::vcfx_error!(
                "Error at line {} of {}: {}",
                line_number + 1,
                args.input.display(),
                error
            )
        })?;
        writer.write_line(&annotated)?;
    }

    if !header_flushed {
        flush_header(&mut writer, &meta_lines)?;
    }

    writer.finish()?;
    log::info!("Annotated {} records into {}", record_count, args.output);
    Ok(())
}

/// Writes the buffered `##` lines, inserting the three VAF declarations
/// before the first `##FILTER` line, or at the end of the block when the
/// header has none. Headers that already declare VAF are left untouched.
fn flush_header(writer: &mut VcfWriter, meta_lines: &[String]) -> Result<()> {
    let already_declared = meta_lines
        .iter()
        .any(|line| line.starts_with(VAF_DECLARATION_PREFIX));
    let insert_at = if already_declared {
        None
    } else {
        Some(
            meta_lines
                .iter()
                .position(|line| line.starts_with(FILTER_PREFIX))
                .unwrap_or(meta_lines.len()),
        )
    };

    for (index, line) in meta_lines.iter().enumerate() {
        if insert_at == Some(index) {
            write_vaf_declarations(writer)?;
        }
        writer.write_line(line)?;
    }
    if insert_at == Some(meta_lines.len()) {
        write_vaf_declarations(writer)?;
    }
    Ok(())
}

fn write_vaf_declarations(writer: &mut VcfWriter) -> Result<()> {
    writer.write_line(FORMAT_DPVAF_LINE)?;
    writer.write_line(FORMAT_AD_LINE)?;
    writer.write_line(FORMAT_VAF_LINE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vaf::{Tier, VariantType};
    use std::{fs, path::Path};
    use tempfile::TempDir;

    const SNV_VCF: &str = "\
##fileformat=VCFv4.1
##contig=<ID=chr1,length=248956422>
##FILTER=<ID=LowEVS,Description=\"Somatic Empirical Variant Score is below threshold\">
##INFO=<ID=SOMATIC,Number=0,Type=Flag,Description=\"Somatic mutation\">
##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"Read depth\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNORMAL\tTUMOR
chr1\t100\t.\tA\tG\t.\tPASS\tSOMATIC\tDP:FDP:SDP:SUBDP:AU:CU:GU:TU\t30:1:0:0:20,22:0,0:0,0:0,1\t16:1:0:0:10,11:0,0:5,6:0,0
";

    fn run_vaf(dir: &TempDir, input: &Path, variant: VariantType, tier: Tier) -> String {
        let output = dir.path().join("annotated.vcf");
        let args = VafArgs {
            input: input.to_path_buf(),
            output: output.to_str().unwrap().to_string(),
            variant,
            tier,
        };
        add_vaf(&args).unwrap();
        fs::read_to_string(&output).unwrap()
    }

    #[test]
    fn declarations_are_inserted_before_first_filter_line() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("snv.vcf");
        fs::write(&input, SNV_VCF).unwrap();

        let annotated = run_vaf(&dir, &input, VariantType::Snv, Tier::One);
        let lines: Vec<&str> = annotated.lines().collect();
        assert_eq!(lines[2], FORMAT_DPVAF_LINE);
        assert_eq!(lines[3], FORMAT_AD_LINE);
        assert_eq!(lines[4], FORMAT_VAF_LINE);
        assert!(lines[5].starts_with("##FILTER=<ID=LowEVS"));
        assert!(lines
            .last()
            .unwrap()
            .ends_with(":15:10,5:0.3333333333333333"));
    }

    #[test]
    fn header_without_filter_lines_gets_declarations_before_chrom() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("snv.vcf");
        let vcf = SNV_VCF.replace(
            "##FILTER=<ID=LowEVS,Description=\"Somatic Empirical Variant Score is below threshold\">\n",
            "",
        );
        fs::write(&input, vcf).unwrap();

        let annotated = run_vaf(&dir, &input, VariantType::Snv, Tier::One);
        let lines: Vec<&str> = annotated.lines().collect();
        let chrom_index = lines
            .iter()
            .position(|line| line.starts_with("#CHROM"))
            .unwrap();
        assert_eq!(lines[chrom_index - 1], FORMAT_VAF_LINE);
        assert_eq!(lines[chrom_index - 3], FORMAT_DPVAF_LINE);
    }

    #[test]
    fn annotating_twice_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("snv.vcf");
        fs::write(&input, SNV_VCF).unwrap();

        let first_pass = run_vaf(&dir, &input, VariantType::Snv, Tier::One);
        let reannotated_input = dir.path().join("annotated_input.vcf");
        fs::write(&reannotated_input, &first_pass).unwrap();

        let second_pass = run_vaf(&dir, &reannotated_input, VariantType::Snv, Tier::One);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn malformed_record_aborts_with_line_number() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("snv.vcf");
        let vcf = SNV_VCF.replace(":GU:", ":GX:");
        fs::write(&input, vcf).unwrap();

        let output = dir.path().join("annotated.vcf");
        let args = VafArgs {
            input,
            output: output.to_str().unwrap().to_string(),
            variant: VariantType::Snv,
            tier: Tier::One,
        };
        let err = add_vaf(&args).unwrap_err();
        assert!(err.to_string().contains("line 7"));
    }
}
