//! File-backed queue of pending disaster events.
//!
//! Each pending [`EventRecord`](alert_core::EventRecord) is one JSON file in
//! the store directory. The publisher writes records with
//! [`EventStore::put`]; the consumer scans them with
//! [`EventStore::list_pending`] and drops them with [`EventStore::clear_all`].
//!
//! # Example
//!
//! ```no_run
//! use alert_core::{Coordinates, EventRecord};
//! use event_store::EventStore;
//!
//! fn main() -> Result<(), event_store::StoreError> {
//!     let store = EventStore::open("./data")?;
//!     let tokyo = Coordinates::new(35.68, 139.69);
//!     store.put(&EventRecord::new("EQ", "Tokyo", "", "Japan", tokyo))?;
//!
//!     for entry in store.list_pending()? {
//!         let stored = entry?;
//!         println!("{} -> {}", stored.path.display(), stored.record.city);
//!     }
//!
//!     store.clear_all()?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod purge;
mod store;

pub use error::{Result, StoreError};
pub use purge::{purge_directory, RESERVED_ENTRIES};
pub use store::{
    EventStore, KeyStrategy, PendingEvents, StoredEvent, RECORD_EXTENSION, STAGING_DIR,
};
