pub mod model;
pub mod optimizer;
pub mod trainer;

pub use model::{Classifier, ClassifierConfig};
pub use optimizer::RmsProp;
pub use trainer::{train, EpochMetrics, TrainConfig};
