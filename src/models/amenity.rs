use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Amenity tag attached to a listing
///
/// Known tags get their own variant so every one of them has an icon;
/// anything else is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Amenity {
    WiFi,
    AirConditioning,
    Laundry,
    Meals,
    Security,
    Gym,
    Other(String),
}

/// Icon shown next to an amenity on the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmenityIcon {
    Wifi,
    Wind,
    Droplet,
    Utensils,
    Shield,
    Users,
    CheckCircle,
}

impl AmenityIcon {
    pub fn name(self) -> &'static str {
        match self {
            AmenityIcon::Wifi => "wifi",
            AmenityIcon::Wind => "wind",
            AmenityIcon::Droplet => "droplet",
            AmenityIcon::Utensils => "utensils",
            AmenityIcon::Shield => "shield",
            AmenityIcon::Users => "users",
            AmenityIcon::CheckCircle => "check-circle",
        }
    }
}

impl Amenity {
    pub fn parse(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_lowercase().as_str() {
            "wifi" | "wi-fi" => Amenity::WiFi,
            "ac" | "air conditioning" => Amenity::AirConditioning,
            "laundry" => Amenity::Laundry,
            "meals" | "food" => Amenity::Meals,
            "security" => Amenity::Security,
            "gym" => Amenity::Gym,
            _ => Amenity::Other(trimmed.to_string()),
        }
    }

    /// Tag as displayed and as sent over the wire
    pub fn as_tag(&self) -> &str {
        match self {
            Amenity::WiFi => "WiFi",
            Amenity::AirConditioning => "AC",
            Amenity::Laundry => "Laundry",
            Amenity::Meals => "Meals",
            Amenity::Security => "Security",
            Amenity::Gym => "Gym",
            Amenity::Other(tag) => tag,
        }
    }

    pub fn icon(&self) -> AmenityIcon {
        match self {
            Amenity::WiFi => AmenityIcon::Wifi,
            Amenity::AirConditioning => AmenityIcon::Wind,
            Amenity::Laundry => AmenityIcon::Droplet,
            Amenity::Meals => AmenityIcon::Utensils,
            Amenity::Security => AmenityIcon::Shield,
            Amenity::Gym => AmenityIcon::Users,
            Amenity::Other(_) => AmenityIcon::CheckCircle,
        }
    }
}

impl From<String> for Amenity {
    fn from(tag: String) -> Self {
        Amenity::parse(&tag)
    }
}

impl From<&str> for Amenity {
    fn from(tag: &str) -> Self {
        Amenity::parse(tag)
    }
}

impl From<Amenity> for String {
    fn from(amenity: Amenity) -> Self {
        amenity.as_tag().to_string()
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Deduplicate tags keeping the first occurrence; `null` becomes empty
pub(crate) fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<Amenity>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags: Vec<Amenity> = super::null_as_empty(deserializer)?;
    Ok(dedup(tags))
}

/// Free-form tags compare case-insensitively, like the known ones
pub(crate) fn dedup(tags: impl IntoIterator<Item = Amenity>) -> Vec<Amenity> {
    let mut seen: Vec<String> = Vec::new();
    let mut unique: Vec<Amenity> = Vec::new();
    for tag in tags {
        let key = tag.as_tag().to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            unique.push(tag);
        }
    }
    unique
}
