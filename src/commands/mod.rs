mod merge_headers;
mod vaf;

pub use merge_headers::merge_headers;
pub use vaf::add_vaf;
