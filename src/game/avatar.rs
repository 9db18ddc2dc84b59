//! Avatar presentation derived from the avatar level.
//!
//! The level itself lives in [`GameState`](super::state::GameState); this
//! module only maps it to what the front-end shows.

use serde::Serialize;

/// Facial expression bucket for a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Tired,
    Neutral,
    Happy,
    Heroic,
}

/// Backdrop bucket for a level, from grey sludge to solarpunk utopia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Polluted,
    Transitioning,
    Green,
    Solarpunk,
}

/// Everything the front-end needs to render the avatar at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvatarView {
    pub level: u8,
    pub emoji: &'static str,
    pub label: &'static str,
    pub status: &'static str,
    pub mood: Mood,
    pub environment: Environment,
}

/// Presentation for an avatar level. Out-of-range levels are clamped
/// to `[1, 5]`.
#[must_use]
pub fn for_level(level: u8) -> AvatarView {
    match level.clamp(1, 5) {
        1 => AvatarView {
            level: 1,
            emoji: "😰",
            label: "Épuisé",
            status: "Système compromis",
            mood: Mood::Tired,
            environment: Environment::Polluted,
        },
        2 => AvatarView {
            level: 2,
            emoji: "😐",
            label: "Fatigué",
            status: "Connexion instable",
            mood: Mood::Tired,
            environment: Environment::Transitioning,
        },
        3 => AvatarView {
            level: 3,
            emoji: "🙂",
            label: "Motivé",
            status: "Synchronisation...",
            mood: Mood::Neutral,
            environment: Environment::Transitioning,
        },
        4 => AvatarView {
            level: 4,
            emoji: "😊",
            label: "Confiant",
            status: "IA Optimisée",
            mood: Mood::Happy,
            environment: Environment::Green,
        },
        _ => AvatarView {
            level: 5,
            emoji: "🦸",
            label: "Héros NIRD",
            status: "Mode Résistance",
            mood: Mood::Heroic,
            environment: Environment::Solarpunk,
        },
    }
}
