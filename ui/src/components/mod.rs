pub mod explorer;
pub mod json_tree;
pub mod schema_form;
pub mod services;
