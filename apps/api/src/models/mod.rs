pub mod assessment;
pub mod learning;
pub mod placement;
pub mod student;
