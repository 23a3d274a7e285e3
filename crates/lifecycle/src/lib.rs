//! Upload batch lifecycle: creation, lookup, deletion and timed expiry.
//!
//! A batch moves `absent -> active -> (deleted | expired)` and is never
//! modified in between. [`UploadManager`] serves foreground requests;
//! [`ExpirySweeper`] purges expired batches in the background. Both share the
//! same record and blob stores without any lock; idempotent deletes and
//! unique stored names keep the overlap safe.

pub mod error;
pub mod manager;
pub mod sweeper;

pub use error::UploadError;
pub use manager::{CreatedBatch, CredentialStatus, IncomingFile, ResolvedFile, UploadManager};
pub use sweeper::{ExpirySweeper, SweepReport, DEFAULT_SWEEP_PERIOD};
