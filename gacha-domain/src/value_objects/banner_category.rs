// Banner category value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerCategory {
    Weapons,
    Characters,
    Special,
    Beginner,
    Event,
    Permanent,
    MysteryBox,
    Promotional,
}

impl BannerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BannerCategory::Weapons => "weapons",
            BannerCategory::Characters => "characters",
            BannerCategory::Special => "special",
            BannerCategory::Beginner => "beginner",
            BannerCategory::Event => "event",
            BannerCategory::Permanent => "permanent",
            BannerCategory::MysteryBox => "mystery_box",
            BannerCategory::Promotional => "promotional",
        }
    }

    /// Localization key resolved by the presentation layer.
    pub fn localization_key(&self) -> String {
        format!("banners.{}", self.as_str())
    }

    /// The characters filter also covers promotional character banners.
    pub fn matches_filter(&self, filter: BannerCategory) -> bool {
        if filter == BannerCategory::Characters {
            return matches!(self, BannerCategory::Characters | BannerCategory::Promotional);
        }
        *self == filter
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weapons" => Some(BannerCategory::Weapons),
            "characters" => Some(BannerCategory::Characters),
            "special" => Some(BannerCategory::Special),
            "beginner" => Some(BannerCategory::Beginner),
            "event" => Some(BannerCategory::Event),
            "permanent" => Some(BannerCategory::Permanent),
            "mystery_box" | "mbox" => Some(BannerCategory::MysteryBox),
            "promotional" => Some(BannerCategory::Promotional),
            _ => None,
        }
    }
}
