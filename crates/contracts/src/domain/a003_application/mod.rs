pub mod aggregate;

pub use aggregate::{Application, ApplicationDto};
