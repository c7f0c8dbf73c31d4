// Server region value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServerRegion {
    #[default]
    #[serde(rename = "darkwinter")]
    Darkwinter,
    #[serde(rename = "haoplay")]
    HaoplayAsia,
    #[serde(rename = "haoplay-jp")]
    HaoplayJapan,
    #[serde(rename = "haoplay-kr")]
    HaoplayKorea,
    #[serde(rename = "haoplay-intl")]
    HaoplayInternational,
    #[serde(rename = "cn")]
    China,
}

impl ServerRegion {
    pub const ALL: [ServerRegion; 6] = [
        ServerRegion::Darkwinter,
        ServerRegion::HaoplayAsia,
        ServerRegion::HaoplayJapan,
        ServerRegion::HaoplayKorea,
        ServerRegion::HaoplayInternational,
        ServerRegion::China,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ServerRegion::Darkwinter => "darkwinter",
            ServerRegion::HaoplayAsia => "haoplay",
            ServerRegion::HaoplayJapan => "haoplay-jp",
            ServerRegion::HaoplayKorea => "haoplay-kr",
            ServerRegion::HaoplayInternational => "haoplay-intl",
            ServerRegion::China => "cn",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServerRegion::Darkwinter => "Darkwinter (US/EU)",
            ServerRegion::HaoplayAsia => "Haoplay Asia",
            ServerRegion::HaoplayJapan => "Haoplay Japan",
            ServerRegion::HaoplayKorea => "Haoplay Korea",
            ServerRegion::HaoplayInternational => "Haoplay International",
            ServerRegion::China => "CN Server",
        }
    }

    /// Gacha record endpoint for this region.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ServerRegion::Darkwinter => "https://gf2-gacha-record-us.sunborngame.com/list",
            ServerRegion::HaoplayAsia => "https://gf2-gacha-record-asia.haoplay.com/list",
            ServerRegion::HaoplayJapan => "https://gf2-gacha-record-jp.haoplay.com/list",
            ServerRegion::HaoplayKorea => "https://gf2-gacha-record-kr.haoplay.com/list",
            ServerRegion::HaoplayInternational => "https://gf2-gacha-record-intl.haoplay.com/list",
            ServerRegion::China => "https://gf2-gacha-record.sunborngame.com/list",
        }
    }

    /// Matches either the short code or the display name, case-insensitively.
    pub fn lookup(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL.into_iter().find(|region| {
            region.code().eq_ignore_ascii_case(needle)
                || region.display_name().eq_ignore_ascii_case(needle)
        })
    }
}

impl From<&str> for ServerRegion {
    fn from(s: &str) -> Self {
        Self::lookup(s).unwrap_or_default()
    }
}
