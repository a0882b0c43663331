pub mod prelude;

pub mod article;
pub mod todo;
