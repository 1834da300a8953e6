// Service exports
pub mod directory;
pub mod presence;
pub mod swipelog;

pub use directory::{DirectoryClient, DirectoryError};
pub use presence::{PresenceError, PresenceStore};
pub use swipelog::{SwipeKind, SwipeLogClient, SwipeLogError};
