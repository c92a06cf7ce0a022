use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateListArgs {
    pub list_uid: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub position: Option<f64>,
}
