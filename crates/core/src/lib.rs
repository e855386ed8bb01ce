#![forbid(unsafe_code)]

pub mod model;
pub mod scoring;

pub use model::{ActivityCounts, Category, MasteryRank, ProgressRecord, TopicId};
