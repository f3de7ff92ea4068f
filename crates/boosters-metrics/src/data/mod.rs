//! Borrowed views over the label and weight columns of an evaluation set.
//!
//! The arrays themselves are owned by the dataset collaborator. Metrics only
//! hold [`Metadata`], whose lifetime ties them to that owner.

mod views;

pub use views::{Metadata, WeightsView};
