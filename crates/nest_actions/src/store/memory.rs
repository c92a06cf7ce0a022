//! In-process project store.
//!
//! Backs the offline CLI mode and the test suites. Every mutating call is
//! counted before it runs, and individual operations can be made to fail.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use nest_core::{List, Project, Task, DEFAULT_LIST_COLOR, DEFAULT_TASK_COLOR};

use super::{ListPatch, NewList, NewTask, ProjectStore, StoreError, TaskPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    FetchProject,
    CreateList,
    UpdateList,
    DeleteList,
    CreateTask,
    UpdateTask,
    DeleteTask,
}

impl StoreOp {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, StoreOp::FetchProject)
    }
}

#[derive(Default)]
struct State {
    lists: Vec<List>,
    failures: HashMap<StoreOp, String>,
    log: Vec<StoreOp>,
}

pub struct InMemoryProjectStore {
    project_uid: String,
    name: String,
    state: Mutex<State>,
    mutations: AtomicUsize,
}

impl InMemoryProjectStore {
    pub fn new(project_uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project_uid: project_uid.into(),
            name: name.into(),
            state: Mutex::new(State::default()),
            mutations: AtomicUsize::new(0),
        }
    }

    /// Seed a list directly, bypassing the counters. Returns its uid.
    pub fn add_list(&self, name: &str) -> String {
        let mut state = self.lock();
        let list = List {
            list_uid: new_uid("list"),
            project_uid: self.project_uid.clone(),
            name: name.to_string(),
            color: DEFAULT_LIST_COLOR.to_string(),
            position: state.lists.len() as i64,
            tasks: Vec::new(),
        };
        let uid = list.list_uid.clone();
        state.lists.push(list);
        uid
    }

    /// Seed a task directly. Returns `None` when the list does not exist.
    pub fn add_task(&self, list_uid: &str, title: &str) -> Option<String> {
        let mut state = self.lock();
        let list = state.lists.iter_mut().find(|l| l.list_uid == list_uid)?;
        let task = blank_task(list_uid, title, list.tasks.len() as i64);
        let uid = task.task_uid.clone();
        list.tasks.push(task);
        Some(uid)
    }

    /// Make every later call of `op` fail with `message`.
    pub fn fail_on(&self, op: StoreOp, message: impl Into<String>) {
        self.lock().failures.insert(op, message.into());
    }

    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Number of mutating calls attempted so far, failed ones included.
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    /// Every call received, in order.
    pub fn calls(&self) -> Vec<StoreOp> {
        self.lock().log.clone()
    }

    pub fn project(&self) -> Project {
        let state = self.lock();
        Project {
            project_uid: self.project_uid.clone(),
            name: self.name.clone(),
            description: None,
            lists: state.lists.clone(),
        }
    }

    pub fn find_task(&self, task_uid: &str) -> Option<Task> {
        self.lock()
            .lists
            .iter()
            .flat_map(|l| l.tasks.iter())
            .find(|t| t.task_uid == task_uid)
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the call and return the guard, or the injected failure.
    fn begin(&self, op: StoreOp) -> Result<MutexGuard<'_, State>, StoreError> {
        if op.is_mutation() {
            self.mutations.fetch_add(1, Ordering::SeqCst);
        }
        let mut state = self.lock();
        state.log.push(op);
        if let Some(message) = state.failures.get(&op) {
            return Err(StoreError::Rejected(message.clone()));
        }
        Ok(state)
    }
}

fn new_uid(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

fn blank_task(list_uid: &str, title: &str, position: i64) -> Task {
    let now = Utc::now();
    Task {
        task_uid: new_uid("task"),
        list_uid: list_uid.to_string(),
        title: title.to_string(),
        description: String::new(),
        status: Default::default(),
        priority: Default::default(),
        color: DEFAULT_TASK_COLOR.to_string(),
        position,
        due_date: None,
        is_completed: false,
        created_by: None,
        updated_by: None,
        created_at: Some(now),
        updated_at: Some(now),
    }
}

fn task_mut<'a>(state: &'a mut State, task_uid: &str) -> Option<&'a mut Task> {
    state
        .lists
        .iter_mut()
        .flat_map(|l| l.tasks.iter_mut())
        .find(|t| t.task_uid == task_uid)
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn fetch_project(&self, project_uid: &str) -> Result<Project, StoreError> {
        drop(self.begin(StoreOp::FetchProject)?);
        if project_uid != self.project_uid {
            return Err(StoreError::not_found("Project", project_uid));
        }
        Ok(self.project())
    }

    async fn create_list(&self, list: NewList) -> Result<List, StoreError> {
        let mut state = self.begin(StoreOp::CreateList)?;
        if list.project_uid != self.project_uid {
            return Err(StoreError::not_found("Project", list.project_uid));
        }
        let position = list.position.unwrap_or(state.lists.len() as i64);
        let created = List {
            list_uid: new_uid("list"),
            project_uid: list.project_uid,
            name: list.name,
            color: list.color,
            position,
            tasks: Vec::new(),
        };
        state.lists.push(created.clone());
        state.lists.sort_by_key(|l| l.position);
        Ok(created)
    }

    async fn update_list(&self, list_uid: &str, patch: ListPatch) -> Result<List, StoreError> {
        let mut state = self.begin(StoreOp::UpdateList)?;
        let list = state
            .lists
            .iter_mut()
            .find(|l| l.list_uid == list_uid)
            .ok_or_else(|| StoreError::not_found("List", list_uid))?;
        if let Some(name) = patch.name {
            list.name = name;
        }
        if let Some(color) = patch.color {
            list.color = color;
        }
        if let Some(position) = patch.position {
            list.position = position;
        }
        Ok(list.clone())
    }

    async fn delete_list(&self, list_uid: &str) -> Result<(), StoreError> {
        let mut state = self.begin(StoreOp::DeleteList)?;
        let before = state.lists.len();
        state.lists.retain(|l| l.list_uid != list_uid);
        if state.lists.len() == before {
            return Err(StoreError::not_found("List", list_uid));
        }
        Ok(())
    }

    async fn create_task(&self, task: NewTask) -> Result<Task, StoreError> {
        let mut state = self.begin(StoreOp::CreateTask)?;
        let list = state
            .lists
            .iter_mut()
            .find(|l| l.list_uid == task.list_uid)
            .ok_or_else(|| StoreError::not_found("List", task.list_uid.clone()))?;

        let mut created = blank_task(&task.list_uid, &task.title, list.tasks.len() as i64);
        created.description = task.description;
        created.status = task.status;
        created.priority = task.priority;
        created.color = task.color;
        created.due_date = task.due_date;
        created.is_completed = task.is_completed;
        if let Some(position) = task.position {
            created.position = position;
        }

        list.tasks.push(created.clone());
        list.tasks.sort_by_key(|t| t.position);
        Ok(created)
    }

    async fn update_task(&self, task_uid: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut state = self.begin(StoreOp::UpdateTask)?;
        let task = task_mut(&mut state, task_uid)
            .ok_or_else(|| StoreError::not_found("Task", task_uid))?;
        patch.apply(task);
        task.updated_at = Some(Utc::now());
        Ok(task.clone())
    }

    async fn delete_task(&self, task_uid: &str) -> Result<(), StoreError> {
        let mut state = self.begin(StoreOp::DeleteTask)?;
        for list in state.lists.iter_mut() {
            if let Some(idx) = list.tasks.iter().position(|t| t.task_uid == task_uid) {
                list.tasks.remove(idx);
                return Ok(());
            }
        }
        Err(StoreError::not_found("Task", task_uid))
    }
}
