use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateListArgs {
    pub name: String,

    #[serde(default)]
    pub color: Option<String>,

    /// Omitted means "after the last list".
    #[serde(default)]
    pub position: Option<f64>,
}
