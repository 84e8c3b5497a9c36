use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub server: ServerSettings,
    #[serde(default)]
    pub map: MapSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    /// Opaque bearer credential for the remote store.
    pub token: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MapSettings {
    #[serde(default)]
    pub filter_active: bool,
    #[serde(default)]
    pub deduplicate: bool,
}

fn default_page_size() -> usize {
    1000
}

pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/noise"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
