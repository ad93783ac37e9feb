pub mod record_table;
pub mod view;
pub mod view_model;

pub use view::FormTreeView;
pub use view_model::FormTreeViewModel;
