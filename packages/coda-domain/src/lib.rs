pub mod address;
pub mod answer;

pub use answer::RankedAnswer;
