pub mod action;
pub mod entity;
pub mod event;
pub mod message;
pub mod patch;
pub mod session;

pub use action::{ActionCall, ActionPayload, ActionResult};
pub use entity::{
    List, Priority, Project, ProjectSnapshot, Task, TaskStatus, DEFAULT_LIST_COLOR,
    DEFAULT_TASK_COLOR,
};
pub use event::{ActionEvent, Notification, NotificationLevel};
pub use message::{ConversationMessage, MessageStatus, Role};
pub use session::SessionId;
