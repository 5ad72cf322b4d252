//! Template source implementations

mod dir;

pub use dir::DirTemplateSource;
