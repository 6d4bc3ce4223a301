// Job batch processing: source seam, metadata derivation, concurrent processing, export.
// Extraction itself lives in `crate::extraction`; this module wires it to postings.

pub mod export;
pub mod handlers;
pub mod models;
pub mod processor;
pub mod source;
