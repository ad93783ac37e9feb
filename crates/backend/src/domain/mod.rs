pub mod a001_resume;
pub mod a002_posting;
pub mod a003_application;
pub mod a004_response_type;
pub mod a005_response;

#[cfg(test)]
mod tests;
