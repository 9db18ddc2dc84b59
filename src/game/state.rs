//! Game state and reducer-style transitions.
//!
//! [`GameState`] is a plain snapshot of one play-through: selected role,
//! position in the role's scenario list, the three-axis score, avatar level,
//! recorded decisions and completion flags. All transitions are synchronous
//! methods that mutate the state in place and never touch I/O, so the whole
//! engine is trivially testable.

use serde::{Deserialize, Serialize};

use super::content::{self, Choice, Scenario, TerminalChallenge};
use super::terminal;

/// Scenario count assumed before a role is selected.
const DEFAULT_SCENARIO_COUNT: usize = 5;

/// The four playable roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// School head managing budget and vendor pressure.
    Directeur,
    /// IT technician keeping old hardware alive.
    Technicien,
    /// Student navigating Big Tech at school.
    Eleve,
    /// Parent managing the family's devices and budget.
    Parent,
}

impl Role {
    /// All roles, in presentation order.
    pub const ALL: [Role; 4] = [Role::Directeur, Role::Technicien, Role::Eleve, Role::Parent];

    /// Stable identifier used on the wire and in content tables.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Role::Directeur => "directeur",
            Role::Technicien => "technicien",
            Role::Eleve => "eleve",
            Role::Parent => "parent",
        }
    }
}

/// A fixed effect on the three scoring axes.
///
/// `money` is in euros, `co2` in kilograms, `nird` in campaign points.
/// Negative values are losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Impact {
    pub money: i64,
    pub co2: i64,
    pub nird: i64,
}

/// Cumulative score over the three axes. Any axis may go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub money: i64,
    pub co2: i64,
    pub nird: i64,
}

impl Score {
    /// Add an impact triple to the score.
    pub fn add(&mut self, impact: Impact) {
        self.money += impact.money;
        self.co2 += impact.co2;
        self.nird += impact.nird;
    }
}

/// Errors surfaced when a transition cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A transition that needs a current scenario was attempted before
    /// a role was selected.
    #[error("no role selected")]
    RoleNotSelected,
    /// The play-through already ended.
    #[error("game is already over")]
    GameOver,
    /// The choice id does not belong to the current scenario.
    #[error("unknown choice: {0}")]
    UnknownChoice(String),
    /// The terminal challenge id does not exist.
    #[error("unknown terminal challenge: {0}")]
    UnknownChallenge(String),
    /// No live session under this id.
    #[error("unknown session: {0}")]
    UnknownSession(String),
}

/// Snapshot of one play-through.
///
/// Serialization uses container-level defaults: a partial or older payload
/// deserializes with the missing fields taken from [`GameState::default`],
/// which is exactly the merge-over-defaults behavior the save store relies
/// on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    /// Selected role, `None` until the player picks one.
    pub role: Option<Role>,
    /// Index into the role's scenario list.
    pub scenario_index: usize,
    /// Cumulative three-axis score.
    pub score: Score,
    /// Avatar level, always within `[1, 5]`.
    pub avatar_level: u8,
    /// Ids of the choices made so far, in order.
    pub decisions: Vec<String>,
    /// Set once the last scenario has been answered.
    pub game_over: bool,
    /// Number of completed terminal challenges.
    pub terminals_completed: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            role: None,
            scenario_index: 0,
            score: Score::default(),
            avatar_level: 1,
            decisions: Vec::new(),
            game_over: false,
            terminals_completed: 0,
        }
    }
}

impl GameState {
    /// Select a role and restart scenario progression.
    ///
    /// Score, avatar level and decision history are kept; only a full
    /// [`reset`](Self::reset) clears them.
    pub fn select_role(&mut self, role: Role) {
        self.role = Some(role);
        self.scenario_index = 0;
        self.game_over = false;
    }

    /// Add an impact triple to the score without any other effect.
    pub fn apply_impact(&mut self, impact: Impact) {
        self.score.add(impact);
    }

    /// Record a choice: score its impact, move the avatar one level up
    /// (good choice) or down (bad choice) within `[1, 5]`, and append the
    /// choice id to the decision history.
    pub fn apply_choice(&mut self, choice: &Choice) {
        self.score.add(choice.impact);
        if choice.good && self.avatar_level < 5 {
            self.avatar_level += 1;
        } else if !choice.good && self.avatar_level > 1 {
            self.avatar_level -= 1;
        }
        self.decisions.push(choice.id.to_string());
    }

    /// Resolve a choice id against the current scenario and apply it.
    ///
    /// # Errors
    ///
    /// [`GameError::GameOver`] once the play-through ended,
    /// [`GameError::RoleNotSelected`] before a role is picked, and
    /// [`GameError::UnknownChoice`] when the id is not one of the current
    /// scenario's choices.
    pub fn make_choice(&mut self, choice_id: &str) -> Result<&'static Choice, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        let scenario = self.current_scenario().ok_or(GameError::RoleNotSelected)?;
        let choice = scenario
            .choices
            .iter()
            .find(|c| c.id == choice_id)
            .ok_or_else(|| GameError::UnknownChoice(choice_id.to_string()))?;
        self.apply_choice(choice);
        Ok(choice)
    }

    /// Record a completed terminal challenge: score its impact, raise the
    /// avatar one level (saturating at 5) and count the completion.
    pub fn complete_terminal(&mut self, challenge: &TerminalChallenge) {
        self.score.add(challenge.impact);
        self.avatar_level = (self.avatar_level + 1).min(5);
        self.terminals_completed += 1;
    }

    /// Move to the next scenario, or end the game after the last one.
    ///
    /// The index is left on the last scenario when the game ends, so the
    /// final scenario stays addressable for result rendering. Without a
    /// role this is a no-op.
    pub fn advance(&mut self) {
        let Some(role) = self.role else {
            return;
        };
        let next = self.scenario_index + 1;
        if next >= content::scenario_count(role) {
            self.game_over = true;
        } else {
            self.scenario_index = next;
        }
    }

    /// Restart the play-through, keeping only the selected role.
    pub fn reset(&mut self) {
        *self = Self {
            role: self.role,
            ..Self::default()
        };
    }

    /// Number of scenarios in the current role's campaign.
    #[must_use]
    pub fn total_scenarios(&self) -> usize {
        self.role
            .map_or(DEFAULT_SCENARIO_COUNT, content::scenario_count)
    }

    /// The scenario the player currently faces, if any.
    #[must_use]
    pub fn current_scenario(&self) -> Option<&'static Scenario> {
        let role = self.role?;
        content::scenarios_for(role).get(self.scenario_index)
    }

    /// Whether a terminal challenge should be offered right now.
    #[must_use]
    pub fn terminal_due(&self) -> bool {
        terminal::challenge_due(self.scenario_index, self.terminals_completed)
    }
}
