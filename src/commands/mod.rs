pub mod add;
pub mod build;
pub mod list;
pub mod remove;
