pub mod store;
pub mod types;

pub use store::{PendingStore, YamlPendingStore};
pub use types::Pending;
