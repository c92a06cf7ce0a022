use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MoveTaskArgs {
    pub task_uid: String,

    pub target_list_uid: String,

    #[serde(default)]
    pub position: Option<f64>,
}
