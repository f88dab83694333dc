use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct DiagnoseRequest {
    #[serde(default, rename = "imageBase64")]
    pub image_base64: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
