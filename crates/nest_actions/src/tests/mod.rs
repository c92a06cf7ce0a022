mod action_bus;
mod memory_store;

use std::sync::{Arc, Mutex};

use nest_core::Notification;

use crate::notify::Notifier;
use crate::store::InMemoryProjectStore;

pub(crate) const PROJECT: &str = "proj_1";

pub(crate) fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

/// Store with a "Backend" list holding one "Auth" task.
pub(crate) fn seeded_store() -> (Arc<InMemoryProjectStore>, String, String) {
    let store = Arc::new(InMemoryProjectStore::new(PROJECT, "Website"));
    let list_uid = store.add_list("Backend");
    let task_uid = store.add_task(&list_uid, "Auth").unwrap();
    (store, list_uid, task_uid)
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub seen: Mutex<Vec<Notification>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}
