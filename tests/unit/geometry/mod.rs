pub mod point;
pub mod segment;
