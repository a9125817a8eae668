mod log_entry;
mod member;

pub use log_entry::LogEntry;
pub use member::{Member, Role, RolePartition, RoomMember, is_admin};
