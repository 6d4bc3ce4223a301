// Posting extraction: section segmentation, skill tagging, experience and salary patterns.
// Everything here is synchronous and side-effect free.

pub mod catalog;
pub mod experience;
pub mod pipeline;
pub mod salary;
pub mod sections;
pub mod skills;

/// Placeholder for a field no pattern could find.
pub const NOT_SPECIFIED: &str = "Not specified";
