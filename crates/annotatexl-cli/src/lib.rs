pub mod input;
pub mod output;
pub mod runner;

pub use runner::Runner;
