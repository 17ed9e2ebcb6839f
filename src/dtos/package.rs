use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreatePackageRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub features: Vec<String>,
    pub icon: Option<String>,
    pub gradient: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub features: Option<Vec<String>>,
    pub icon: Option<String>,
    pub gradient: Option<String>,
    pub gallery: Option<Vec<String>>,
}
