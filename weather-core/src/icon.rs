use serde::{Deserialize, Serialize};

/// Symbolic glyph name chosen from a free-text weather description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconTag {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Thunderstorm,
    PartlySunny,
}

impl IconTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconTag::Sunny => "sunny",
            IconTag::Cloudy => "cloudy",
            IconTag::Rainy => "rainy",
            IconTag::Snowy => "snowy",
            IconTag::Thunderstorm => "thunderstorm",
            IconTag::PartlySunny => "partly-sunny",
        }
    }

    /// Terminal glyph for the tag.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconTag::Sunny => "☀",
            IconTag::Cloudy => "☁",
            IconTag::Rainy => "☂",
            IconTag::Snowy => "❄",
            IconTag::Thunderstorm => "⚡",
            IconTag::PartlySunny => "⛅",
        }
    }
}

impl std::fmt::Display for IconTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword rules, checked in order. First match wins.
const RULES: &[(&[&str], IconTag)] = &[
    (&["sun", "clear"], IconTag::Sunny),
    (&["cloud"], IconTag::Cloudy),
    (&["storm", "thunder"], IconTag::Thunderstorm),
    (&["rain", "drizzle"], IconTag::Rainy),
    (&["snow"], IconTag::Snowy),
];

pub fn classify(description: &str) -> IconTag {
    let desc = description.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| desc.contains(k)))
        .map(|(_, tag)| *tag)
        .unwrap_or(IconTag::PartlySunny)
}
