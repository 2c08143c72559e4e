// Drive module: locating files in a remote folder hierarchy.
// - `drive_models.rs` holds the entry/query types.
// - `drive_store.rs` is the port the infra layer implements.
// - `path_resolver.rs` walks logical paths against that port.

pub mod drive_models;
pub mod drive_store;
pub mod path_resolver;

pub use drive_models::{EntryQuery, FileId, RemoteEntry, FOLDER_MIME_TYPE};
pub use drive_store::RemoteFileStore;
pub use path_resolver::{PathResolver, ResolveError};
