pub mod aggregate;

pub use aggregate::{Resume, ResumeDto};
