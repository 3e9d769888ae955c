//! Contact categories and the pair resolution table
//!
//! Each body carries at most one category. When two bodies overlap, the
//! unordered pair of categories decides whether the solver separates them
//! and which gameplay action follows.

use serde::{Deserialize, Serialize};

/// Role of a collision body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// The player-controlled body
    Player,
    /// Upper or lower obstacle barrier
    Trunk,
    /// Invisible trigger in the obstacle gap
    ScoreHitBox,
}

/// Gameplay effect of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactAction {
    None,
    /// End the run
    GameOver,
    /// Award one point (once per overlap episode)
    Score,
}

/// Outcome of looking up a category pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactRule {
    pub action: ContactAction,
    /// Whether the solver separates the pair
    pub solid: bool,
}

impl ContactRule {
    /// Untagged contacts get no response at all
    pub const IGNORE: Self = Self {
        action: ContactAction::None,
        solid: false,
    };
    pub const SOLID: Self = Self {
        action: ContactAction::None,
        solid: true,
    };
}

/// Resolve a category pair. Symmetric in its arguments.
pub fn contact_rule(a: Option<Category>, b: Option<Category>) -> ContactRule {
    use Category::*;

    let (Some(a), Some(b)) = (a, b) else {
        return ContactRule::IGNORE;
    };

    match (a, b) {
        (Player, Trunk) | (Trunk, Player) => ContactRule {
            action: ContactAction::GameOver,
            solid: true,
        },
        (Player, ScoreHitBox) | (ScoreHitBox, Player) => ContactRule {
            action: ContactAction::Score,
            solid: false,
        },
        _ => ContactRule::SOLID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Category::*;

    const ALL: [Option<Category>; 4] = [None, Some(Player), Some(Trunk), Some(ScoreHitBox)];

    #[test]
    fn test_untagged_is_ignored() {
        assert_eq!(contact_rule(None, Some(Player)), ContactRule::IGNORE);
        assert_eq!(contact_rule(Some(Trunk), None), ContactRule::IGNORE);
        assert_eq!(contact_rule(None, None), ContactRule::IGNORE);
    }

    #[test]
    fn test_player_trunk_is_solid_game_over() {
        let rule = contact_rule(Some(Player), Some(Trunk));
        assert_eq!(rule.action, ContactAction::GameOver);
        assert!(rule.solid);
    }

    #[test]
    fn test_score_box_is_passthrough() {
        let rule = contact_rule(Some(ScoreHitBox), Some(Player));
        assert_eq!(rule.action, ContactAction::Score);
        assert!(!rule.solid);
    }

    #[test]
    fn test_other_pairs_default_solid() {
        assert_eq!(contact_rule(Some(Trunk), Some(ScoreHitBox)), ContactRule::SOLID);
        assert_eq!(contact_rule(Some(Trunk), Some(Trunk)), ContactRule::SOLID);
    }

    #[test]
    fn test_table_is_symmetric() {
        for a in ALL {
            for b in ALL {
                assert_eq!(contact_rule(a, b), contact_rule(b, a), "{a:?} vs {b:?}");
            }
        }
    }
}
