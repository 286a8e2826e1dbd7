pub mod assessment;
pub mod prediction;
