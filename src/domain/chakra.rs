//! Chakra profile and status evaluation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest value a chakra can hold
pub const MIN_VALUE: u8 = 1;
/// Highest value a chakra can hold
pub const MAX_VALUE: u8 = 10;
/// Neutral value; a profile made only of these is treated as unset
pub const DEFAULT_VALUE: u8 = 5;

/// The seven tracked energy centers, ordered from base to crown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Chakra {
    Root,
    Sacral,
    SolarPlexus,
    Heart,
    Throat,
    ThirdEye,
    Crown,
}

impl Chakra {
    pub const ALL: [Chakra; 7] = [
        Chakra::Root,
        Chakra::Sacral,
        Chakra::SolarPlexus,
        Chakra::Heart,
        Chakra::Throat,
        Chakra::ThirdEye,
        Chakra::Crown,
    ];

    /// Canonical key used in the CLI, tags and stored files
    pub fn key(&self) -> &'static str {
        match self {
            Chakra::Root => "root",
            Chakra::Sacral => "sacral",
            Chakra::SolarPlexus => "solar-plexus",
            Chakra::Heart => "heart",
            Chakra::Throat => "throat",
            Chakra::ThirdEye => "third-eye",
            Chakra::Crown => "crown",
        }
    }

    pub fn info(&self) -> &'static ChakraInfo {
        &CHAKRA_TABLE[*self as usize]
    }

    /// Parse a chakra key, tolerating case and `-`/`_`/space separators
    pub fn parse(input: &str) -> Option<Chakra> {
        let normalized: String = input
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "root" | "muladhara" => Some(Chakra::Root),
            "sacral" | "svadhisthana" => Some(Chakra::Sacral),
            "solarplexus" | "solar" | "manipura" => Some(Chakra::SolarPlexus),
            "heart" | "anahata" => Some(Chakra::Heart),
            "throat" | "vishuddha" => Some(Chakra::Throat),
            "thirdeye" | "ajna" => Some(Chakra::ThirdEye),
            "crown" | "sahasrara" => Some(Chakra::Crown),
            _ => None,
        }
    }
}

impl fmt::Display for Chakra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

impl FromStr for Chakra {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chakra::parse(s).ok_or_else(|| format!("Unknown chakra: '{}'", s))
    }
}

/// Qualitative reading of a chakra value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChakraStatus {
    Underactive,
    Balanced,
    Overactive,
}

impl ChakraStatus {
    /// Classify a raw value. Below 5 is underactive, 5 through 7 balanced, above 7 overactive.
    pub fn from_value(value: i64) -> Self {
        match clamp_value(value) {
            v if v < 5 => ChakraStatus::Underactive,
            v if v <= 7 => ChakraStatus::Balanced,
            _ => ChakraStatus::Overactive,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChakraStatus::Underactive => "underactive",
            ChakraStatus::Balanced => "balanced",
            ChakraStatus::Overactive => "overactive",
        }
    }

    fn generic_guidance(&self) -> &'static str {
        match self {
            ChakraStatus::Underactive => {
                "This energy center could use some attention. Gentle, regular practice helps it open."
            }
            ChakraStatus::Balanced => "This energy center is in a healthy balance. Keep nurturing it.",
            ChakraStatus::Overactive => {
                "This energy center is running hot. Grounding and rest help bring it back to center."
            }
        }
    }
}

impl fmt::Display for ChakraStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Static descriptive data for one chakra
#[derive(Debug)]
pub struct ChakraInfo {
    pub name: &'static str,
    pub sanskrit: &'static str,
    pub focus: &'static str,
    pub underactive: &'static str,
    pub balanced: &'static str,
    pub overactive: &'static str,
    pub practice: &'static str,
}

impl ChakraInfo {
    pub fn guidance(&self, status: ChakraStatus) -> &'static str {
        match status {
            ChakraStatus::Underactive => self.underactive,
            ChakraStatus::Balanced => self.balanced,
            ChakraStatus::Overactive => self.overactive,
        }
    }
}

static CHAKRA_TABLE: [ChakraInfo; 7] = [
    ChakraInfo {
        name: "Root",
        sanskrit: "Muladhara",
        focus: "safety, stability and belonging",
        underactive: "You may feel anxious, ungrounded or unsure of your footing.",
        balanced: "You feel safe, grounded and supported by your surroundings.",
        overactive: "You may cling to security, resist change or feel sluggish.",
        practice: "Walk barefoot outside, or try a slow standing meditation focused on your feet.",
    },
    ChakraInfo {
        name: "Sacral",
        sanskrit: "Svadhisthana",
        focus: "creativity, pleasure and emotional flow",
        underactive: "Creativity and enjoyment may feel muted or out of reach.",
        balanced: "You move with your emotions and enjoy creative play.",
        overactive: "Emotions may feel overwhelming, or you may chase stimulation.",
        practice: "Spend ten minutes on an unstructured creative activity: drawing, dancing or music.",
    },
    ChakraInfo {
        name: "Solar Plexus",
        sanskrit: "Manipura",
        focus: "confidence, willpower and self-worth",
        underactive: "You may doubt yourself or struggle to follow through.",
        balanced: "You act with confidence and a clear sense of purpose.",
        overactive: "You may push too hard, control too much or burn out.",
        practice: "Set one small, achievable intention for the day and close the loop on it tonight.",
    },
    ChakraInfo {
        name: "Heart",
        sanskrit: "Anahata",
        focus: "love, compassion and connection",
        underactive: "You may feel closed off, lonely or slow to trust.",
        balanced: "You give and receive care openly.",
        overactive: "You may give too much of yourself or lose your own boundaries.",
        practice: "Write down three things you are grateful for and one kind thing you did for yourself.",
    },
    ChakraInfo {
        name: "Throat",
        sanskrit: "Vishuddha",
        focus: "expression, honesty and communication",
        underactive: "Speaking up or naming your needs may feel difficult.",
        balanced: "You express yourself clearly and listen well.",
        overactive: "You may talk over others or struggle to listen.",
        practice: "Journal an honest conversation you have been avoiding, as if it already went well.",
    },
    ChakraInfo {
        name: "Third Eye",
        sanskrit: "Ajna",
        focus: "intuition, insight and clarity",
        underactive: "Decisions may feel foggy and your intuition quiet.",
        balanced: "You trust your intuition and see situations clearly.",
        overactive: "You may overthink, daydream or lose touch with the practical.",
        practice: "Sit for five minutes with eyes closed and note the first images or words that come.",
    },
    ChakraInfo {
        name: "Crown",
        sanskrit: "Sahasrara",
        focus: "meaning, spirituality and awareness",
        underactive: "Life may feel disconnected from a larger sense of meaning.",
        balanced: "You feel connected to something larger than yourself.",
        overactive: "You may feel detached from your body and daily life.",
        practice: "Take a quiet moment in silence or prayer, then do something physical to come back down.",
    },
];

/// Clamp any numeric value into the chakra range [1, 10]
pub fn clamp_value(value: i64) -> u8 {
    value.clamp(MIN_VALUE as i64, MAX_VALUE as i64) as u8
}

/// Read any integer from a stored file and clamp it into [1, 10]
pub(crate) fn deserialize_clamped<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(clamp_value)
}

/// Result of evaluating one chakra value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChakraReading {
    pub chakra: Option<Chakra>,
    pub value: u8,
    pub status: ChakraStatus,
    pub guidance: &'static str,
}

/// Evaluate a value against an optional chakra key.
///
/// Never fails: the value is clamped and unknown keys fall back to generic guidance.
pub fn evaluate(value: i64, chakra_key: Option<&str>) -> ChakraReading {
    let chakra = chakra_key.and_then(Chakra::parse);
    let status = ChakraStatus::from_value(value);
    let guidance = match chakra {
        Some(c) => c.info().guidance(status),
        None => status.generic_guidance(),
    };

    ChakraReading {
        chakra,
        value: clamp_value(value),
        status,
        guidance,
    }
}

/// Per-journal chakra assessment, overwritten on reassessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChakraProfile {
    #[serde(deserialize_with = "deserialize_clamped")]
    pub root: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    pub sacral: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    pub solar_plexus: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    pub heart: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    pub throat: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    pub third_eye: u8,
    #[serde(deserialize_with = "deserialize_clamped")]
    pub crown: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessed_at: Option<DateTime<Utc>>,
}

impl Default for ChakraProfile {
    fn default() -> Self {
        ChakraProfile {
            root: DEFAULT_VALUE,
            sacral: DEFAULT_VALUE,
            solar_plexus: DEFAULT_VALUE,
            heart: DEFAULT_VALUE,
            throat: DEFAULT_VALUE,
            third_eye: DEFAULT_VALUE,
            crown: DEFAULT_VALUE,
            assessed_at: None,
        }
    }
}

impl ChakraProfile {
    pub fn get(&self, chakra: Chakra) -> u8 {
        match chakra {
            Chakra::Root => self.root,
            Chakra::Sacral => self.sacral,
            Chakra::SolarPlexus => self.solar_plexus,
            Chakra::Heart => self.heart,
            Chakra::Throat => self.throat,
            Chakra::ThirdEye => self.third_eye,
            Chakra::Crown => self.crown,
        }
    }

    /// Set a value, clamping into range
    pub fn set(&mut self, chakra: Chakra, value: i64) {
        let value = clamp_value(value);
        match chakra {
            Chakra::Root => self.root = value,
            Chakra::Sacral => self.sacral = value,
            Chakra::SolarPlexus => self.solar_plexus = value,
            Chakra::Heart => self.heart = value,
            Chakra::Throat => self.throat = value,
            Chakra::ThirdEye => self.third_eye = value,
            Chakra::Crown => self.crown = value,
        }
    }

    /// Re-clamp every field
    pub fn normalized(mut self) -> Self {
        for chakra in Chakra::ALL {
            let value = self.get(chakra) as i64;
            self.set(chakra, value);
        }
        self
    }

    /// A profile where all seven values equal exactly 5 is a placeholder, not an assessment
    pub fn is_unset(&self) -> bool {
        Chakra::ALL
            .iter()
            .all(|c| self.get(*c) == DEFAULT_VALUE)
    }

    pub fn readings(&self) -> Vec<ChakraReading> {
        Chakra::ALL
            .iter()
            .map(|c| evaluate(self.get(*c) as i64, Some(c.key())))
            .collect()
    }

    /// Lowest chakra; ties go to the one closest to the root
    pub fn weakest(&self) -> Chakra {
        Chakra::ALL
            .iter()
            .copied()
            .min_by_key(|c| self.get(*c))
            .unwrap_or(Chakra::Root)
    }

    /// Mean of all seven values
    pub fn average(&self) -> f64 {
        let total: u32 = Chakra::ALL.iter().map(|c| self.get(*c) as u32).sum();
        total as f64 / Chakra::ALL.len() as f64
    }
}
