//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod reply;
pub mod search;

pub use user::User;
pub use message::{Message, Content};
pub use command::{CommandKind, StaticCommand};
pub use reply::{Reply, ParseMode};
pub use search::{SearchOutcome, SearchResultItem};
