pub mod media;
pub mod project;
