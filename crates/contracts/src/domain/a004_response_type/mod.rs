pub mod aggregate;

pub use aggregate::{ResponseType, ResponseTypeDto};
