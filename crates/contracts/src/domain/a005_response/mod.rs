pub mod aggregate;

pub use aggregate::{Response, ResponseDto};
