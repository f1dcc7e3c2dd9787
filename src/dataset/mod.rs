pub mod curator;

pub use curator::{curate, one_hot, CuratedDataset, CuratorConfig, Partition};
