pub mod file;
pub mod observations;
pub mod stdin;
