//! Summary assembly: winner, metadata and player summaries

use chrono::{DateTime, Utc};
use uuid::Uuid;
use vgccorner_battle::dex::to_id;
use vgccorner_battle::{BoardTracker, Player, PokemonState, SideState};
use vgccorner_team::{classify_team, TeamMember};

use crate::error::AnalysisError;
use crate::model::{
    Battle, BattleStats, KeyMoment, PlayerSummary, PokemonSummary, Turn, Winner,
};

/// Happiness is never shown in replays
const DEFAULT_HAPPINESS: u8 = 255;

/// First and last `|t:|` stamps seen in the log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Timestamps {
    pub first: Option<i64>,
    pub last: Option<i64>,
}

impl Timestamps {
    pub fn record(&mut self, seconds: i64) {
        self.first.get_or_insert(seconds);
        self.last = Some(seconds);
    }

    fn start(&self) -> DateTime<Utc> {
        self.first
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    fn duration(&self) -> u64 {
        match (self.first, self.last) {
            (Some(first), Some(last)) => u64::try_from(last - first).unwrap_or(0),
            _ => 0,
        }
    }
}

/// Decide the winner from the end-of-battle markers, falling back to
/// whichever side was wiped out
pub(crate) fn determine_winner(tracker: &BoardTracker) -> Result<Winner, AnalysisError> {
    if let Some(player) = tracker.winner.as_deref().and_then(|name| match_player(tracker, name)) {
        return Ok(player.into());
    }
    if tracker.tie {
        return Ok(Winner::Draw);
    }

    let wiped: Vec<Player> = tracker
        .sides()
        .filter(|side| side.roster_size() > 0 && side.total_left() == 0)
        .map(|side| side.player)
        .collect();
    match wiped.as_slice() {
        [loser] => Ok(loser.opponent().into()),
        _ => Err(AnalysisError::IncompleteLog),
    }
}

fn match_player(tracker: &BoardTracker, name: &str) -> Option<Player> {
    let exact = tracker.sides().find(|side| side.username == name);
    exact
        .or_else(|| {
            let id = to_id(name);
            tracker.sides().find(|side| to_id(&side.username) == id)
        })
        .map(|side| side.player)
}

/// Deterministic id for a log analysed without a replay id
pub fn battle_id(raw: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, raw.as_bytes()).to_string()
}

pub(crate) struct Sections {
    pub turns: Vec<Turn>,
    pub stats: BattleStats,
    pub key_moments: Vec<KeyMoment>,
}

pub(crate) fn assemble(
    raw: &str,
    replay_id: Option<&str>,
    tracker: &BoardTracker,
    timestamps: Timestamps,
    winner: Winner,
    sections: Sections,
) -> Battle {
    let id = replay_id.map_or_else(|| battle_id(raw), str::to_string);
    let format = if tracker.tier.is_empty() {
        format!("Gen {}", tracker.generation)
    } else {
        tracker.tier.clone()
    };

    Battle {
        id,
        format,
        timestamp: timestamps.start(),
        duration: timestamps.duration(),
        player1: player_summary(tracker.get_side(Player::P1)),
        player2: player_summary(tracker.get_side(Player::P2)),
        winner,
        turns: sections.turns,
        stats: sections.stats,
        key_moments: sections.key_moments,
        game_type: tracker.game_type,
        generation: tracker.generation,
        rated: tracker.rated,
        rules: tracker.rules.clone(),
    }
}

fn player_summary(side: Option<&SideState>) -> PlayerSummary {
    let Some(side) = side else {
        return PlayerSummary {
            name: String::new(),
            rating: None,
            team: Vec::new(),
            active: None,
            losses: 0,
            total_left: 0,
            roster_size: 0,
            archetype: classify_team(&[]),
        };
    };

    let members: Vec<TeamMember> = side.pokemon.iter().map(team_member).collect();
    PlayerSummary {
        name: side.username.clone(),
        rating: side.rating,
        team: side.pokemon.iter().map(pokemon_summary).collect(),
        active: side.active_indices.first().copied().flatten(),
        losses: side.losses,
        total_left: side.total_left(),
        roster_size: side.roster_size(),
        archetype: classify_team(&members),
    }
}

fn team_member(poke: &PokemonState) -> TeamMember {
    let mut member = TeamMember::new(poke.identity.species.clone())
        .with_name(poke.name())
        .with_moves(poke.known_moves.iter());
    if let Some(ability) = &poke.known_ability {
        member = member.with_ability(ability.clone());
    }
    if let Some(item) = &poke.known_item {
        member = member.with_item(item.clone());
    }
    member
}

fn pokemon_summary(poke: &PokemonState) -> PokemonSummary {
    PokemonSummary {
        id: to_id(&poke.identity.species),
        name: poke.name().to_string(),
        species: poke.identity.species.clone(),
        level: poke.identity.level,
        gender: poke.identity.gender,
        ability: poke.known_ability.clone().unwrap_or_default(),
        item: poke.known_item.clone().unwrap_or_default(),
        tera_type: poke.tera_type.clone().unwrap_or_default(),
        moves: poke.known_moves.clone(),
        current_hp: poke.hp_current,
        max_hp: poke.hp_max.unwrap_or(100),
        status: poke.status,
        happiness: DEFAULT_HAPPINESS,
        shiny: poke.identity.shiny,
        fainted: poke.fainted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgccorner_protocol::ServerMessage;

    fn named(p1: &str, p2: &str) -> BoardTracker {
        let mut tracker = BoardTracker::new();
        for (player, name) in [(Player::P1, p1), (Player::P2, p2)] {
            tracker.update(&ServerMessage::BattlePlayer {
                player,
                username: name.to_string(),
                avatar: String::new(),
                rating: None,
            });
        }
        tracker
    }

    #[test]
    fn test_explicit_winner() {
        let mut tracker = named("Alice", "Bob Smith");
        tracker.update(&ServerMessage::Win("Bob Smith".to_string()));
        assert_eq!(determine_winner(&tracker), Ok(Winner::Player2));
    }

    #[test]
    fn test_winner_matched_by_id() {
        let mut tracker = named("Alice", "Bob Smith");
        tracker.update(&ServerMessage::Win("bobsmith".to_string()));
        assert_eq!(determine_winner(&tracker), Ok(Winner::Player2));
    }

    #[test]
    fn test_tie_is_draw() {
        let mut tracker = named("Alice", "Bob");
        tracker.update(&ServerMessage::Tie);
        assert_eq!(determine_winner(&tracker), Ok(Winner::Draw));
    }

    #[test]
    fn test_no_outcome_is_incomplete() {
        let tracker = named("Alice", "Bob");
        assert_eq!(determine_winner(&tracker), Err(AnalysisError::IncompleteLog));
    }

    #[test]
    fn test_timestamps() {
        let mut stamps = Timestamps::default();
        assert_eq!(stamps.start(), DateTime::UNIX_EPOCH);
        assert_eq!(stamps.duration(), 0);

        stamps.record(1_700_000_000);
        stamps.record(1_700_000_090);
        assert_eq!(stamps.start().timestamp(), 1_700_000_000);
        assert_eq!(stamps.duration(), 90);
    }

    #[test]
    fn test_battle_id_is_stable() {
        assert_eq!(battle_id("|turn|1"), battle_id("|turn|1"));
        assert_ne!(battle_id("|turn|1"), battle_id("|turn|2"));
    }

    #[test]
    fn test_missing_side_summary() {
        let summary = player_summary(None);
        assert!(summary.team.is_empty());
        assert_eq!(summary.archetype.archetype.as_str(), "Unclassified");
    }
}
