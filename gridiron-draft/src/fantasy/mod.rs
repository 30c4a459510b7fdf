// Fantasy scoring engine: season stat records, PPR scoring, and head-to-head
// stat comparison.

pub mod compare;
pub mod scoring;
pub mod stats;
