use serde::Deserialize;

#[derive(Deserialize)]
pub struct UpdateContactSettingsRequest {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEventImagesRequest {
    pub images: Vec<String>,
}
