//! BoardTracker - authoritative board state for one battle

use vgccorner_protocol::{GameType, Player, ServerMessage};

use super::error::TrackError;
use crate::types::{FieldState, PokemonState, SideState};

/// Board state reconstructed from a replay log
///
/// Metadata lines (players, team preview, rules, outcome) go through
/// [`BoardTracker::update`]; state changes arrive as classified events
/// through [`BoardTracker::apply_event`]. One tracker belongs to one
/// analysis and is never shared.
#[derive(Debug, Clone)]
pub struct BoardTracker {
    // === Battle metadata ===
    pub game_type: Option<GameType>,

    /// Generation (1-9)
    pub generation: u8,

    /// Format name from `|tier|`
    pub tier: String,

    pub rated: bool,
    pub rules: Vec<String>,

    /// Current turn number (0 = preamble)
    pub turn: u32,

    // === State ===
    pub field: FieldState,

    pub(crate) sides: [Option<SideState>; 2],

    // === Outcome ===
    pub ended: bool,

    /// Winner's username as written in `|win|`
    pub winner: Option<String>,

    pub tie: bool,
}

impl BoardTracker {
    pub fn new() -> Self {
        Self {
            game_type: None,
            generation: 9,
            tier: String::new(),
            rated: false,
            rules: Vec::new(),
            turn: 0,
            field: FieldState::new(),
            sides: [None, None],
            ended: false,
            winner: None,
            tie: false,
        }
    }

    pub fn get_side(&self, player: Player) -> Option<&SideState> {
        self.sides[player.index()].as_ref()
    }

    pub fn get_side_mut(&mut self, player: Player) -> Option<&mut SideState> {
        self.sides[player.index()].as_mut()
    }

    pub(crate) fn side_mut(&mut self, player: Player) -> Result<&mut SideState, TrackError> {
        self.sides[player.index()]
            .as_mut()
            .ok_or(TrackError::UnknownSide(player))
    }

    /// Get or create a side for a player
    pub fn get_or_create_side(&mut self, player: Player, username: &str) -> &mut SideState {
        let slots = self.active_slots();
        self.sides[player.index()].get_or_insert_with(|| {
            let mut side = SideState::new(player, username);
            side.set_active_slots(slots);
            side
        })
    }

    pub fn sides(&self) -> impl Iterator<Item = &SideState> {
        self.sides.iter().filter_map(|s| s.as_ref())
    }

    fn active_slots(&self) -> usize {
        self.game_type.map_or(1, |g| g.active_slots())
    }

    /// Set game type and update active slots accordingly
    pub fn set_game_type(&mut self, game_type: GameType) {
        self.game_type = Some(game_type);
        let slots = game_type.active_slots();
        for side in self.sides.iter_mut().flatten() {
            side.set_active_slots(slots);
        }
    }

    pub fn begin_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    /// Find a roster member by protocol name
    pub fn find_pokemon(&self, player: Player, name: &str) -> Option<&PokemonState> {
        let side = self.get_side(player)?;
        side.find_pokemon(name).and_then(|idx| side.get_pokemon(idx))
    }

    /// Record metadata carried by a non-event line
    pub fn update(&mut self, msg: &ServerMessage) {
        match msg {
            ServerMessage::BattlePlayer {
                player,
                username,
                avatar: _,
                rating,
            } => {
                // A bare `|player|p1|` marks a player leaving; keep what we have
                if username.is_empty() {
                    return;
                }
                let side = self.get_or_create_side(*player, username);
                side.username = username.clone();
                if rating.is_some() {
                    side.rating = *rating;
                }
            }

            ServerMessage::TeamSize { player, size } => {
                let side = self.get_or_create_side(*player, "");
                side.declared_size = Some(usize::from(*size));
            }

            ServerMessage::GameType(game_type) => self.set_game_type(*game_type),

            ServerMessage::Gen(generation) => self.generation = *generation,

            ServerMessage::Tier(tier) => self.tier = tier.clone(),

            ServerMessage::Rated(_) => self.rated = true,

            ServerMessage::Rule(rule) => self.rules.push(rule.clone()),

            ServerMessage::ClearPoke => {
                for side in self.sides.iter_mut().flatten() {
                    side.pokemon.clear();
                    side.preview = false;
                }
            }

            ServerMessage::Poke {
                player,
                details,
                has_item: _,
            } => {
                let side = self.get_or_create_side(*player, "");
                side.pokemon.push(PokemonState::from_protocol(details));
                side.preview = true;
            }

            ServerMessage::Ability {
                pokemon, ability, ..
            } => {
                if let Some(poke) = self.find_pokemon_mut(pokemon.player, &pokemon.name) {
                    poke.record_ability(ability);
                }
            }

            ServerMessage::DetailsChange {
                pokemon, details, ..
            } => {
                // Persistent forme change (Terapagos, Palafin, Ogerpon tera)
                if let Some(poke) = self.find_pokemon_mut(pokemon.player, &pokemon.name) {
                    poke.identity.species = details.species.clone();
                }
            }

            ServerMessage::Win(winner) => {
                self.ended = true;
                self.winner = Some(winner.clone());
            }

            ServerMessage::Tie => {
                self.ended = true;
                self.tie = true;
            }

            // Everything else is either an event or carries no board state
            _ => {}
        }
    }

    pub(crate) fn find_pokemon_mut(
        &mut self,
        player: Player,
        name: &str,
    ) -> Option<&mut PokemonState> {
        let side = self.get_side_mut(player)?;
        let idx = side.find_pokemon(name)?;
        side.get_pokemon_mut(idx)
    }
}

impl Default for BoardTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgccorner_protocol::PokemonDetails;

    fn player(p: Player, name: &str) -> ServerMessage {
        ServerMessage::BattlePlayer {
            player: p,
            username: name.to_string(),
            avatar: "1".to_string(),
            rating: Some(1500),
        }
    }

    fn poke(p: Player, species: &str) -> ServerMessage {
        ServerMessage::Poke {
            player: p,
            details: PokemonDetails::parse(species),
            has_item: true,
        }
    }

    #[test]
    fn test_new_tracker() {
        let tracker = BoardTracker::new();
        assert_eq!(tracker.turn, 0);
        assert!(!tracker.ended);
        assert!(tracker.game_type.is_none());
        assert_eq!(tracker.sides().count(), 0);
    }

    #[test]
    fn test_update_battle_player() {
        let mut tracker = BoardTracker::new();
        tracker.update(&player(Player::P1, "Alice"));

        let side = tracker.get_side(Player::P1).unwrap();
        assert_eq!(side.username, "Alice");
        assert_eq!(side.rating, Some(1500));
    }

    #[test]
    fn test_player_leaving_keeps_name() {
        let mut tracker = BoardTracker::new();
        tracker.update(&player(Player::P2, "Bob"));
        tracker.update(&ServerMessage::BattlePlayer {
            player: Player::P2,
            username: String::new(),
            avatar: String::new(),
            rating: None,
        });
        let side = tracker.get_side(Player::P2).unwrap();
        assert_eq!(side.username, "Bob");
        assert_eq!(side.rating, Some(1500));
    }

    #[test]
    fn test_game_type_sets_slots_for_existing_and_new_sides() {
        let mut tracker = BoardTracker::new();
        tracker.update(&player(Player::P1, "Alice"));
        tracker.update(&ServerMessage::GameType(GameType::Doubles));
        tracker.update(&player(Player::P2, "Bob"));

        for p in Player::BOTH {
            assert_eq!(tracker.get_side(p).unwrap().active_indices.len(), 2);
        }
    }

    #[test]
    fn test_team_preview_and_teamsize() {
        let mut tracker = BoardTracker::new();
        tracker.update(&player(Player::P1, "Alice"));
        tracker.update(&ServerMessage::TeamSize {
            player: Player::P1,
            size: 4,
        });
        tracker.update(&ServerMessage::ClearPoke);
        for s in ["Incineroar", "Rillaboom", "Urshifu-*", "Amoonguss", "Tornadus", "Flutter Mane"] {
            tracker.update(&poke(Player::P1, s));
        }

        let side = tracker.get_side(Player::P1).unwrap();
        assert!(side.preview);
        assert_eq!(side.pokemon.len(), 6);
        assert_eq!(side.roster_size(), 4);
    }

    #[test]
    fn test_metadata() {
        let mut tracker = BoardTracker::new();
        tracker.update(&ServerMessage::Gen(9));
        tracker.update(&ServerMessage::Tier("[Gen 9] VGC 2024 Reg G".to_string()));
        tracker.update(&ServerMessage::Rated(None));
        tracker.update(&ServerMessage::Rule("Species Clause".to_string()));

        assert_eq!(tracker.generation, 9);
        assert_eq!(tracker.tier, "[Gen 9] VGC 2024 Reg G");
        assert!(tracker.rated);
        assert_eq!(tracker.rules, vec!["Species Clause".to_string()]);
    }

    #[test]
    fn test_update_win_and_tie() {
        let mut tracker = BoardTracker::new();
        tracker.update(&ServerMessage::Win("Alice".to_string()));
        assert!(tracker.ended);
        assert_eq!(tracker.winner.as_deref(), Some("Alice"));

        let mut tied = BoardTracker::new();
        tied.update(&ServerMessage::Tie);
        assert!(tied.ended && tied.tie);
    }
}
