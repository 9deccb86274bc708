//! Business logic services.

pub mod analytics;
pub mod appcast;
pub mod assets;
pub mod catalog;
pub mod identifier;
pub mod storage;
pub mod versioning;

pub use analytics::{
    AnalyticsEvent, AnalyticsHandle, EventNotifier, NoopNotifier, QueuedNotifier, build_notifier,
};
pub use appcast::appcast;
pub use storage::{BlobStore, MemoryBlobStore, S3BlobStore, StoredBlob, build_blob_store};
