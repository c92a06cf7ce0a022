use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DeleteTaskArgs {
    pub task_uid: String,
}
