//! Survivor scoring and match standings
//!
//! Every death is worth one point to each competitor still alive at that
//! moment, so the last survivor of a round collects the most.

use crate::sim::Player;

/// A row of the scoreboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub name: String,
    pub score: u32,
    /// Still alive in the current round
    pub alive: bool,
}

/// Give one point to every living competitor other than `dead_name`.
///
/// Returns how many players were awarded.
pub fn award_survivors(players: &mut [Player], dead_name: &str) -> usize {
    let mut awarded = 0;
    for player in players
        .iter_mut()
        .filter(|p| !p.is_dead() && p.name() != dead_name)
    {
        player.score += 1;
        awarded += 1;
    }
    awarded
}

/// Roster sorted by score, highest first; ties keep roster order
pub fn standings(players: &[Player]) -> Vec<Standing> {
    let mut rows: Vec<Standing> = players
        .iter()
        .map(|p| Standing {
            name: p.name().to_string(),
            score: p.score,
            alive: !p.is_dead(),
        })
        .collect();
    rows.sort_by(|a, b| b.score.cmp(&a.score));
    rows
}

/// Names sharing the top score (empty roster → empty)
pub fn leaders(players: &[Player]) -> Vec<&str> {
    let Some(top) = players.iter().map(|p| p.score).max() else {
        return Vec::new();
    };
    players
        .iter()
        .filter(|p| p.score == top)
        .map(|p| p.name())
        .collect()
}

/// The outright winner, if exactly one competitor leads
pub fn match_winner(players: &[Player]) -> Option<&str> {
    match leaders(players).as_slice() {
        [winner] => Some(*winner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Color, Key, PlayerIdentity};

    fn roster(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .map(|n| {
                Player::new(PlayerIdentity::new(
                    *n,
                    Color::rgb(255, 255, 255),
                    Key::ArrowRight,
                    Key::ArrowLeft,
                ))
            })
            .collect()
    }

    #[test]
    fn test_award_survivors_skips_dead_player() {
        let mut players = roster(&["Red", "Blue", "Green"]);
        assert_eq!(award_survivors(&mut players, "Blue"), 2);
        assert_eq!(players[0].score, 1);
        assert_eq!(players[1].score, 0);
        assert_eq!(players[2].score, 1);
    }

    #[test]
    fn test_standings_sorted_stable() {
        let mut players = roster(&["Red", "Blue", "Green"]);
        players[1].score = 4;
        players[2].score = 1;
        players[0].score = 1;
        let names: Vec<_> = standings(&players).into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["Blue", "Red", "Green"]);
    }

    #[test]
    fn test_winner_requires_outright_lead() {
        let mut players = roster(&["Red", "Blue"]);
        assert_eq!(match_winner(&players), None);
        assert_eq!(leaders(&players), ["Red", "Blue"]);
        players[1].score = 2;
        assert_eq!(match_winner(&players), Some("Blue"));
        assert!(leaders(&[]).is_empty());
    }
}
