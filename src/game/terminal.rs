//! Terminal side challenges: scheduling, selection and command matching.

use rand::Rng;
use serde::Serialize;

use super::content::{self, TerminalChallenge, TERMINAL_CHALLENGES};
use super::state::Role;

/// Scenario indices after which a side challenge is offered.
pub const TRIGGERS: [usize; 2] = [2, 4];

/// Whether a challenge should be offered at this point of the campaign.
///
/// One challenge is offered per trigger index, so a player who already
/// completed as many challenges as there are triggers at or before the
/// current scenario is not prompted again.
#[must_use]
pub fn challenge_due(scenario_index: usize, terminals_completed: u32) -> bool {
    if !TRIGGERS.contains(&scenario_index) {
        return false;
    }
    let offered = TRIGGERS.iter().filter(|&&t| t <= scenario_index).count();
    (terminals_completed as usize) < offered
}

/// Pick a random challenge aimed at the role, falling back to the whole
/// table for roles without a dedicated one.
#[must_use]
pub fn pick_challenge(role: Role) -> &'static TerminalChallenge {
    let mut rng = rand::thread_rng();
    let targeted = content::challenges_for(role);
    if targeted.is_empty() {
        &TERMINAL_CHALLENGES[rng.gen_range(0..TERMINAL_CHALLENGES.len())]
    } else {
        targeted[rng.gen_range(0..targeted.len())]
    }
}

/// Result of one submitted command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptOutcome {
    pub success: bool,
    /// Lines to append to the terminal transcript.
    pub output: Vec<String>,
    /// Revealed from the second failed attempt on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

/// Whether the submitted command fulfils the challenge.
///
/// Matching is forgiving on purpose: the trimmed, lowercased input either
/// equals the expected command or contains its first word, so `sudo htop`
/// passes a challenge expecting `htop`.
#[must_use]
pub fn command_matches(challenge: &TerminalChallenge, input: &str) -> bool {
    let submitted = input.trim().to_lowercase();
    let expected = challenge.expected_command.to_lowercase();
    if submitted == expected {
        return true;
    }
    expected
        .split_whitespace()
        .next()
        .is_some_and(|first| submitted.contains(first))
}

/// Evaluate a submitted command against a challenge.
///
/// `prior_failures` counts earlier failed attempts at the same challenge.
#[must_use]
pub fn check_command(
    challenge: &'static TerminalChallenge,
    input: &str,
    prior_failures: u32,
) -> AttemptOutcome {
    if command_matches(challenge, input) {
        AttemptOutcome {
            success: true,
            output: vec![
                challenge.success_message.to_string(),
                String::new(),
                challenge.lesson.to_string(),
            ],
            hint: None,
        }
    } else {
        AttemptOutcome {
            success: false,
            output: vec![format!("bash: {input}: commande non reconnue"), String::new()],
            hint: (prior_failures >= 1).then_some(challenge.hint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(id: &str) -> &'static TerminalChallenge {
        content::find_challenge(id).unwrap()
    }

    #[test]
    fn test_challenge_due_at_triggers_only() {
        assert!(!challenge_due(0, 0));
        assert!(!challenge_due(1, 0));
        assert!(challenge_due(2, 0));
        assert!(!challenge_due(3, 0));
        assert!(challenge_due(4, 0));
    }

    #[test]
    fn test_challenge_not_due_twice_for_same_trigger() {
        // After completing the challenge offered at index 2.
        assert!(!challenge_due(2, 1));
        // The second trigger still owes one.
        assert!(challenge_due(4, 1));
        assert!(!challenge_due(4, 2));
    }

    #[test]
    fn test_skipped_first_challenge_still_offered_once_at_second_trigger() {
        assert!(challenge_due(4, 0));
    }

    #[test]
    fn test_pick_challenge_targets_the_role() {
        for _ in 0..20 {
            let picked = pick_challenge(Role::Technicien);
            assert_eq!(picked.role, Role::Technicien);
        }
    }

    #[test]
    fn test_command_matches_exact_ignoring_case_and_spacing() {
        let ch = challenge("term-3");
        assert!(command_matches(ch, "sudo apt upgrade"));
        assert!(command_matches(ch, "  SUDO APT UPGRADE  "));
        assert!(!command_matches(ch, "ls -la"));
    }

    #[test]
    fn test_command_matches_on_first_word_containment() {
        let ch = challenge("term-1");
        assert_eq!(ch.expected_command, "htop");
        assert!(command_matches(ch, "sudo htop"));
        assert!(command_matches(ch, "htop -d 10"));
        assert!(!command_matches(ch, "top"));
    }

    #[test]
    fn test_check_command_success_output() {
        let ch = challenge("term-4");
        let outcome = check_command(ch, "sudo apt autoremove", 0);
        assert!(outcome.success);
        assert_eq!(
            outcome.output,
            vec![ch.success_message.to_string(), String::new(), ch.lesson.to_string()]
        );
        assert_eq!(outcome.hint, None);
    }

    #[test]
    fn test_check_command_failure_echoes_raw_input() {
        let ch = challenge("term-4");
        let outcome = check_command(ch, "rm -rf /", 0);
        assert!(!outcome.success);
        assert_eq!(outcome.output[0], "bash: rm -rf /: commande non reconnue");
        assert_eq!(outcome.hint, None);
    }

    #[test]
    fn test_hint_revealed_from_second_failure() {
        let ch = challenge("term-5");
        assert_eq!(check_command(ch, "ping", 0).hint, None);
        assert_eq!(check_command(ch, "ping", 1).hint, Some(ch.hint));
        assert_eq!(check_command(ch, "ping", 7).hint, Some(ch.hint));
    }
}
