//! Source layer
//! - traits.rs: VersionSource trait definition
//! - file.rs: JSON mapping file source
//! - github.rs: GitHub Releases source

pub mod file;
pub mod github;
pub mod traits;

pub use file::FileSource;
pub use github::GitHubReleaseSource;
pub use traits::VersionSource;
