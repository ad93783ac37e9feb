pub mod api_utils;
pub mod form_tree;
