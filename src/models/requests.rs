use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::MapPlaceholder;

/// Request to classify a single location URL
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResolveLocationRequest {
    #[validate(length(min = 1, max = 4096))]
    pub url: String,
    #[serde(alias = "element_id", rename = "elementId", default)]
    pub element_id: Option<String>,
}

/// Request to lay out every map placeholder of a page
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MapBoardRequest {
    #[validate(length(min = 1, max = 200))]
    pub placeholders: Vec<MapPlaceholder>,
}

/// Request to check an "add option" submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOptionRequest {
    pub text: String,
}
