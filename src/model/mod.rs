mod descriptor;
mod ids;
mod log;
mod path;
mod value;

pub use self::descriptor::{ConnectionDescriptor, DEFAULT_DATABASE_PATH, DescriptorField};
pub use self::ids::EntryId;
pub use self::log::{ActivityLog, LogEntry, LogSink, Severity};
pub use self::path::DbPath;
pub use self::value::{RemoteValue, StoreEvent};
