pub mod list;
pub mod stats;
pub mod subject;
pub mod topic;
