use serde::Serialize;

use crate::AppState;
use gacha_domain::ServerRegion;

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub endpoint: &'static str,
    pub default: bool,
}

pub fn list_servers(state: &AppState) -> Vec<ServerInfo> {
    ServerRegion::ALL
        .into_iter()
        .map(|region| ServerInfo {
            code: region.code(),
            name: region.display_name(),
            endpoint: region.endpoint(),
            default: region == state.config.default_server,
        })
        .collect()
}
