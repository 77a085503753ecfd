mod messages;
pub mod status;

pub use messages::{MessageList, MessageListState};
pub use status::StatusBar;
