//! Source accessor abstractions
//!
//! Planners only ever see a project through [`FileSystem`]; [`RealFileSystem`]
//! serves a directory on disk and [`MockFileSystem`] an in-memory tree.

mod accessor;
mod mock;
mod real;

pub use accessor::{DirEntry, FileSystem, FileType};
pub use mock::MockFileSystem;
pub use real::RealFileSystem;
