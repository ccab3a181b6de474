//! Text transformations on VS Code settings documents

pub mod extra_paths;
pub mod header;
pub mod interpreter;

// Re-exports for library consumers
#[allow(unused_imports)]
pub use extra_paths::{extract_extra_paths, merge_extra_paths, ExtraPaths};
#[allow(unused_imports)]
pub use header::with_header;
