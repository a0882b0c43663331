pub mod app_template;
pub mod todo;
