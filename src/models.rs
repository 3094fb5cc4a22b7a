use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Form body of `POST /token`, shaped like an OAuth2 password grant.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create/update body for a product. Absent optional fields are left alone on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub product_number: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub standard_cost: Option<f64>,
    #[serde(default)]
    pub list_price: Option<f64>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub product_category_id: Option<i32>,
    #[serde(default)]
    pub product_model_id: Option<i32>,
    #[serde(default)]
    pub sell_start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sell_end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub discontinued_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thumbnail_photo_file_name: Option<String>,
}
