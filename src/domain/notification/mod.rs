pub mod entity;
pub mod message;

pub use entity::{NotificationItem, NotificationType};
pub use message::{application_accepted_message, new_application_message, walker_selected_message};
