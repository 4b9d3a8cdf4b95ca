pub const DEFAULT_MERGED_HEADER_OUTPUT: &str = "merged_headers.txt";

pub const FILEFORMAT_PREFIX: &str = "##fileformat=";
pub const CONTIG_PREFIX: &str = "##contig=";
pub const FILTER_PREFIX: &str = "##FILTER=";
pub const INFO_PREFIX: &str = "##INFO=";
pub const FORMAT_PREFIX: &str = "##FORMAT=";

pub const VAF_DECLARATION_PREFIX: &str = "##FORMAT=<ID=VAF,";

pub const FORMAT_DPVAF_LINE: &str = r#"##FORMAT=<ID=DPVAF,Number=1,Type=Integer,Description="Read Depth used with AD for VAF calculation">"#;
pub const FORMAT_AD_LINE: &str = r#"##FORMAT=<ID=AD,Number=R,Type=Integer,Description="Number of observation for each allele">"#;
pub const FORMAT_VAF_LINE: &str = r#"##FORMAT=<ID=VAF,Number=A,Type=Float,Description="The fraction of reads with alternate allele (nALT/nSumAll)">"#;
