use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ExportError;

/// Fully-populated order aggregate, as fetched by the caller.
///
/// The renderer never queries storage; this is read-only input.
#[derive(Debug, Deserialize)]
pub struct OrderSnapshot {
    pub id: String,
    pub product_name: Option<String>,
    pub client_name: String,
    pub seller_name: String,
    pub seller_email: String,
    pub status: String,
    pub total: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub comments: String,
    pub created_at: NaiveDate,
    #[serde(default)]
    pub options: Vec<SelectedOption>,
    #[serde(default)]
    pub colors: Vec<ColorChoice>,
    #[serde(default)]
    pub designs: Vec<DesignChoice>,
    #[serde(default)]
    pub floor_plans: Vec<FloorPlan>,
    pub signature_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    #[serde(default)]
    pub suboptions: Vec<SubOption>,
}

#[derive(Debug, Deserialize)]
pub struct SubOption {
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub comment: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ColorChoice {
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DesignChoice {
    pub design_type: String,
    pub name: String,
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct FloorPlan {
    pub name: String,
    pub image_url: String,
}

/// Read an order snapshot from a JSON file.
pub fn load_order(path: &str) -> Result<OrderSnapshot, ExportError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ExportError::Order(format!("{}: {}", path, e)))?;
    serde_json::from_str(&content)
        .map_err(|e| ExportError::Order(format!("Invalid JSON: {}", e)))
}
