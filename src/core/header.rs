use crate::{
    constants::{CONTIG_PREFIX, FILEFORMAT_PREFIX, FILTER_PREFIX, FORMAT_PREFIX, INFO_PREFIX},
    error::VcfxError,
    utils::util::Result,
};
use indexmap::IndexSet;

/// Classification of a `##` meta line by the tag before the first `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaClass {
    FileFormat,
    Contig,
    Filter,
    Info,
    Format,
    Other,
}

pub fn classify_meta_line(line: &str) -> MetaClass {
    if line.starts_with(FILEFORMAT_PREFIX) {
        MetaClass::FileFormat
    } else if line.starts_with(CONTIG_PREFIX) {
        MetaClass::Contig
    } else if line.starts_with(FILTER_PREFIX) {
        MetaClass::Filter
    } else if line.starts_with(INFO_PREFIX) {
        MetaClass::Info
    } else if line.starts_with(FORMAT_PREFIX) {
        MetaClass::Format
    } else {
        MetaClass::Other
    }
}

/// Accumulates header lines from any number of VCF files and merges them.
///
/// Mandatory categories (`contig`, `FILTER`, `INFO`, `FORMAT`) are
/// deduplicated by exact line match in first-seen order. `fileformat` keeps
/// the first value seen; conflicting values are logged and dropped. All
/// remaining `##` lines (commands, dates) are kept in encounter order and
/// only emitted on request.
#[derive(Debug, Default)]
pub struct HeaderMerger {
    fileformat: Option<String>,
    contigs: IndexSet<String>,
    filters: IndexSet<String>,
    infos: IndexSet<String>,
    formats: IndexSet<String>,
    others: Vec<String>,
    column_header: Option<String>,
}

impl HeaderMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_meta_line(&mut self, line: &str) {
        match classify_meta_line(line) {
            MetaClass::FileFormat => match &self.fileformat {
                None => self.fileformat = Some(line.to_string()),
                Some(first) if first != line => {
                    log::warn!("Conflicting fileformat line ignored, keeping {first:?}: {line:?}");
                }
                Some(_) => {}
            },
            MetaClass::Contig => {
                self.contigs.insert(line.to_string());
            }
            MetaClass::Filter => {
                self.filters.insert(line.to_string());
            }
            MetaClass::Info => {
                self.infos.insert(line.to_string());
            }
            MetaClass::Format => {
                self.formats.insert(line.to_string());
            }
            MetaClass::Other => self.others.push(line.to_string()),
        }
    }

    /// Records the `#CHROM` line of an input. The first one seen wins; the
    /// column header is assumed identical across inputs.
    pub fn add_column_header(&mut self, line: &str) {
        if self.column_header.is_none() {
            self.column_header = Some(line.to_string());
        }
    }

    /// Consumes the merger and returns the merged header lines in output
    /// order: `fileformat`, contigs, FILTERs, INFOs, FORMATs, other lines
    /// (when `include_others` is set), and the `#CHROM` line last.
    pub fn into_lines(self, include_others: bool) -> Result<Vec<String>> {
        let column_header = self.column_header.ok_or(VcfxError::MissingColumnHeader)?;
        let mut lines = Vec::new();
        lines.extend(self.fileformat);
        lines.extend(self.contigs);
        lines.extend(self.filters);
        lines.extend(self.infos);
        lines.extend(self.formats);
        if include_others {
            lines.extend(self.others);
        }
        lines.push(column_header);
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMN_HEADER: &str =
        "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNORMAL\tTUMOR";

    fn merger_with_lines(lines: &[&str]) -> HeaderMerger {
        let mut merger = HeaderMerger::new();
        for line in lines {
            merger.add_meta_line(line);
        }
        merger.add_column_header(COLUMN_HEADER);
        merger
    }

    #[test]
    fn classifies_meta_lines_by_tag() {
        assert_eq!(
            classify_meta_line("##fileformat=VCFv4.1"),
            MetaClass::FileFormat
        );
        assert_eq!(classify_meta_line("##contig=<ID=chr1>"), MetaClass::Contig);
        assert_eq!(
            classify_meta_line("##FILTER=<ID=PASS,Description=\"All filters passed\">"),
            MetaClass::Filter
        );
        assert_eq!(
            classify_meta_line("##INFO=<ID=SOMATIC,Number=0,Type=Flag,Description=\"\">"),
            MetaClass::Info
        );
        assert_eq!(
            classify_meta_line("##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"\">"),
            MetaClass::Format
        );
        assert_eq!(
            classify_meta_line("##cmdline=strelka2 --somatic"),
            MetaClass::Other
        );
        // Tag match is exact: VCF meta keys are case-sensitive.
        assert_eq!(classify_meta_line("##filter=<ID=x>"), MetaClass::Other);
    }

    #[test]
    fn identical_contig_sets_merge_to_single_copies() {
        let contig_a = "##contig=<ID=chr1,length=248956422>";
        let contig_b = "##contig=<ID=chr2,length=242193529>";
        let mut merger = merger_with_lines(&[contig_a, contig_b]);
        merger.add_meta_line(contig_a);
        merger.add_meta_line(contig_b);

        let lines = merger.into_lines(false).unwrap();
        assert_eq!(lines, vec![contig_a, contig_b, COLUMN_HEADER]);
    }

    #[test]
    fn disjoint_info_tags_union_in_first_seen_order() {
        let info_a = "##INFO=<ID=QSS,Number=1,Type=Integer,Description=\"\">";
        let info_b = "##INFO=<ID=TQSS,Number=1,Type=Integer,Description=\"\">";
        let info_c = "##INFO=<ID=SOMATIC,Number=0,Type=Flag,Description=\"\">";
        let merger = merger_with_lines(&[info_b, info_a, info_c]);

        let lines = merger.into_lines(false).unwrap();
        assert_eq!(lines, vec![info_b, info_a, info_c, COLUMN_HEADER]);
    }

    #[test]
    fn fileformat_first_value_wins() {
        let merger = merger_with_lines(&["##fileformat=VCFv4.1", "##fileformat=VCFv4.2"]);
        let lines = merger.into_lines(false).unwrap();
        assert_eq!(lines[0], "##fileformat=VCFv4.1");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn other_lines_are_dropped_unless_requested() {
        let cmdline = "##cmdline=configureStrelkaSomaticWorkflow.py";
        let date = "##fileDate=20240101";
        let merger = merger_with_lines(&["##fileformat=VCFv4.1", cmdline, date]);
        let lines = merger.into_lines(false).unwrap();
        assert_eq!(lines, vec!["##fileformat=VCFv4.1", COLUMN_HEADER]);

        let merger = merger_with_lines(&["##fileformat=VCFv4.1", cmdline, date]);
        let lines = merger.into_lines(true).unwrap();
        assert_eq!(
            lines,
            vec!["##fileformat=VCFv4.1", cmdline, date, COLUMN_HEADER]
        );
    }

    #[test]
    fn categories_emit_in_mandatory_order() {
        let merger = merger_with_lines(&[
            "##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"\">",
            "##INFO=<ID=SOMATIC,Number=0,Type=Flag,Description=\"\">",
            "##FILTER=<ID=PASS,Description=\"\">",
            "##contig=<ID=chr1>",
            "##fileformat=VCFv4.1",
        ]);
        let lines = merger.into_lines(false).unwrap();
        assert_eq!(
            lines,
            vec![
                "##fileformat=VCFv4.1",
                "##contig=<ID=chr1>",
                "##FILTER=<ID=PASS,Description=\"\">",
                "##INFO=<ID=SOMATIC,Number=0,Type=Flag,Description=\"\">",
                "##FORMAT=<ID=DP,Number=1,Type=Integer,Description=\"\">",
                COLUMN_HEADER,
            ]
        );
    }

    #[test]
    fn missing_column_header_is_fatal() {
        let mut merger = HeaderMerger::new();
        merger.add_meta_line("##fileformat=VCFv4.1");
        let err = merger.into_lines(false).unwrap_err();
        assert!(matches!(err, VcfxError::MissingColumnHeader));
    }

    #[test]
    fn first_column_header_wins() {
        let mut merger = HeaderMerger::new();
        merger.add_column_header(COLUMN_HEADER);
        merger.add_column_header("#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO");
        let lines = merger.into_lines(false).unwrap();
        assert_eq!(lines, vec![COLUMN_HEADER]);
    }
}
