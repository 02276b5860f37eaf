pub mod metadata;
pub mod resume;
