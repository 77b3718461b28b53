//! One-shot batch jobs behind the `sync`, `upload` and `preview` subcommands.

mod error;
pub mod preview;
pub mod sync;
pub mod upload;

pub use error::CommandError;
pub use preview::{PreviewReport, run_preview};
pub use sync::{SyncReport, run_sync};
pub use upload::{FilePattern, UploadOptions, UploadReport, run_upload};
