use crate::utils::util::Result;
use clap::ValueEnum;
use std::fmt;

/// Variant class of a Strelka2 somatic VCF, which determines where the
/// supporting read counts live in the FORMAT column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantType {
    /// Single-nucleotide variants (somatic.snvs.vcf)
    Snv,
    /// Insertions and deletions (somatic.indels.vcf)
    Indel,
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantType::Snv => write!(f, "snv"),
            VariantType::Indel => write!(f, "indel"),
        }
    }
}

/// Strelka2 confidence tier. Every count field is a `tier1,tier2` pair;
/// the tier selects which member feeds the VAF formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tier {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
}

impl Tier {
    fn index(self) -> usize {
        match self {
            Tier::One => 0,
            Tier::Two => 1,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::One => write!(f, "1"),
            Tier::Two => write!(f, "2"),
        }
    }
}

const REF_COLUMN_INDEX: usize = 3;
const ALT_COLUMN_INDEX: usize = 4;
const FORMAT_COLUMN_INDEX: usize = 8;
// FORMAT plus at least one sample column.
const MIN_COLUMN_COUNT: usize = 10;

const INDEL_REF_TAG: &str = "TAR";
const INDEL_ALT_TAG: &str = "TIR";
const VAF_TAG: &str = "VAF";

/// VAF = alt / (ref + alt), defined as 0 when no reads support either allele.
pub fn calculate_vaf(ref_count: u32, alt_count: u32) -> f64 {
    let depth = ref_count + alt_count;
    if depth == 0 {
        0.0
    } else {
        f64::from(alt_count) / f64::from(depth)
    }
}

/// Rewrites one variant record, appending `DPVAF`, `AD`, and `VAF` to the
/// FORMAT column and the corresponding values to every sample column.
/// Records that already carry a `VAF` tag are returned unchanged.
pub fn annotate_record(line: &str, variant_type: VariantType, tier: Tier) -> Result<String> {
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() < MIN_COLUMN_COUNT {
        return Err(crate::vcfx_error!(
            "Expected at least {} tab-separated columns, found {}",
            MIN_COLUMN_COUNT,
            columns.len()
        ));
    }

    let format_tags: Vec<&str> = columns[FORMAT_COLUMN_INDEX].split(':').collect();
    if format_tags.iter().any(|tag| *tag == VAF_TAG) {
        return Ok(line.to_string());
    }

    let (ref_tag, alt_tag) = count_tags(
        variant_type,
        columns[REF_COLUMN_INDEX],
        columns[ALT_COLUMN_INDEX],
    )?;
    let ref_index = format_tag_index(&format_tags, &ref_tag)?;
    let alt_index = format_tag_index(&format_tags, &alt_tag)?;

    let mut out_columns: Vec<String> = columns.iter().map(|column| column.to_string()).collect();
    out_columns[FORMAT_COLUMN_INDEX].push_str(":DPVAF:AD:VAF");

    for sample_column in out_columns.iter_mut().skip(FORMAT_COLUMN_INDEX + 1) {
        let (ref_count, alt_count) = sample_counts(sample_column, ref_index, alt_index, tier)?;
        let depth = ref_count + alt_count;
        let vaf = calculate_vaf(ref_count, alt_count);
        sample_column.push_str(&format!(":{depth}:{ref_count},{alt_count}:{vaf}"));
    }

    Ok(out_columns.join("\t"))
}

/// FORMAT tags holding the supporting read counts for the given variant
/// type. For SNVs these are the per-nucleotide tags (`AU`, `CU`, `GU`,
/// `TU`) of the REF and ALT alleles; for INDELs the fixed `TAR`/`TIR` pair.
fn count_tags(
    variant_type: VariantType,
    ref_allele: &str,
    alt_allele: &str,
) -> Result<(String, String)> {
    match variant_type {
        VariantType::Snv => Ok((base_count_tag(ref_allele)?, base_count_tag(alt_allele)?)),
        VariantType::Indel => Ok((INDEL_REF_TAG.to_string(), INDEL_ALT_TAG.to_string())),
    }
}

fn base_count_tag(allele: &str) -> Result<String> {
    match allele {
        "A" | "C" | "G" | "T" => Ok(format!("{allele}U")),
        _ => Err(crate::vcfx_error!(
            "Expected a single A/C/G/T allele for SNV input, found {allele:?}"
        )),
    }
}

fn format_tag_index(format_tags: &[&str], tag: &str) -> Result<usize> {
    format_tags
        .iter()
        .position(|candidate| *candidate == tag)
        .ok_or_else(|| crate::vcfx_error!("FORMAT column is missing the {tag} count field"))
}

fn sample_counts(
    sample_column: &str,
    ref_index: usize,
    alt_index: usize,
    tier: Tier,
) -> Result<(u32, u32)> {
    let fields: Vec<&str> = sample_column.split(':').collect();
    let ref_count = tier_count(&fields, ref_index, tier)?;
    let alt_count = tier_count(&fields, alt_index, tier)?;
    Ok((ref_count, alt_count))
}

fn tier_count(fields: &[&str], index: usize, tier: Tier) -> Result<u32> {
    let field = fields.get(index).ok_or_else(|| {
        crate::vcfx_error!(
            "Sample column has {} fields, expected a count at position {}",
            fields.len(),
            index + 1
        )
    })?;
    let count = field.split(',').nth(tier.index()).ok_or_else(|| {
        crate::vcfx_error!("Count field {field:?} has no tier {tier} value")
    })?;
    count
        .parse::<u32>()
        .map_err(|_| crate::vcfx_error!("Count field {field:?} is not an integer"))
}
