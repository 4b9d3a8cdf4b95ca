pub mod cli;
pub mod commands;
pub mod error;

pub mod core {
    pub mod header;
    pub mod vaf;
}

pub mod io {
    pub mod vcf_reader;
    pub mod vcf_writer;
}

pub mod utils {
    pub mod util;
}

pub mod constants;

pub use constants::*;
