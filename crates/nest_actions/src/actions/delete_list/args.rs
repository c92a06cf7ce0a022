use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DeleteListArgs {
    pub list_uid: String,
}
