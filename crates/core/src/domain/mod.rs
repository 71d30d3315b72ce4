pub mod file;
pub mod relay;
