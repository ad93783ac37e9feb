pub mod aggregate;

pub use aggregate::{Posting, PostingDto};
