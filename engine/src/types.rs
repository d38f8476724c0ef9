//! Common types used across the engine

use serde::{Deserialize, Serialize};

/// Supported languages for farmer-facing text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    French,
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::English => "en",
        }
    }
}

/// Crops with dedicated reference data
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Crop {
    Maize,
    Rice,
    Millet,
    Sorghum,
    Cotton,
    Groundnut,
    Cowpea,
    Cassava,
    Yam,
}

impl Crop {
    pub const ALL: [Crop; 9] = [
        Crop::Maize,
        Crop::Rice,
        Crop::Millet,
        Crop::Sorghum,
        Crop::Cotton,
        Crop::Groundnut,
        Crop::Cowpea,
        Crop::Cassava,
        Crop::Yam,
    ];

    /// Parse a crop name as sent by the app (English or French, any case).
    /// Returns `None` for crops without reference data.
    pub fn parse(name: &str) -> Option<Crop> {
        let normalized = name.trim().to_lowercase();
        let crop = match normalized.as_str() {
            "maize" | "corn" | "mais" | "maïs" => Crop::Maize,
            "rice" | "riz" => Crop::Rice,
            "millet" | "mil" => Crop::Millet,
            "sorghum" | "sorgho" => Crop::Sorghum,
            "cotton" | "coton" => Crop::Cotton,
            "groundnut" | "peanut" | "arachide" => Crop::Groundnut,
            "cowpea" | "niebe" | "niébé" => Crop::Cowpea,
            "cassava" | "manioc" => Crop::Cassava,
            "yam" | "igname" => Crop::Yam,
            _ => return None,
        };
        Some(crop)
    }

    pub fn display_name(&self, language: Language) -> &'static str {
        match (self, language) {
            (Crop::Maize, Language::French) => "maïs",
            (Crop::Maize, Language::English) => "maize",
            (Crop::Rice, Language::French) => "riz",
            (Crop::Rice, Language::English) => "rice",
            (Crop::Millet, Language::French) => "mil",
            (Crop::Millet, Language::English) => "millet",
            (Crop::Sorghum, Language::French) => "sorgho",
            (Crop::Sorghum, Language::English) => "sorghum",
            (Crop::Cotton, Language::French) => "coton",
            (Crop::Cotton, Language::English) => "cotton",
            (Crop::Groundnut, Language::French) => "arachide",
            (Crop::Groundnut, Language::English) => "groundnut",
            (Crop::Cowpea, Language::French) => "niébé",
            (Crop::Cowpea, Language::English) => "cowpea",
            (Crop::Cassava, Language::French) => "manioc",
            (Crop::Cassava, Language::English) => "cassava",
            (Crop::Yam, Language::French) => "igname",
            (Crop::Yam, Language::English) => "yam",
        }
    }
}

impl std::fmt::Display for Crop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name(Language::English))
    }
}

/// West African agro-climatic zones used for regional pricing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Sahel,
    Sudan,
    Guinea,
    Coastal,
}

impl Region {
    pub fn parse(name: &str) -> Option<Region> {
        let normalized = name.trim().to_lowercase();
        let region = match normalized.as_str() {
            "sahel" | "sahelian" | "sahélien" => Region::Sahel,
            "sudan" | "sudanian" | "soudanien" => Region::Sudan,
            "guinea" | "guinean" | "guinéen" => Region::Guinea,
            "coastal" | "coast" | "côtier" | "cotier" => Region::Coastal,
            _ => return None,
        };
        Some(region)
    }
}
