//! The single state-transition function: classified events into board state

use vgccorner_protocol::{Player, PokemonDetails};

use super::board::BoardTracker;
use super::error::TrackError;
use crate::events::{BattleEvent, EventKind};
use crate::types::{
    species_matches, PokemonState, Room, SideCondition, SideState,
};

impl BoardTracker {
    /// Apply one classified event to the board
    ///
    /// Returns the implicit `Faint` event when damage drops a pokemon to
    /// zero. Errors leave the board untouched; callers skip the event and
    /// carry on.
    pub fn apply_event(&mut self, event: &BattleEvent) -> Result<Option<BattleEvent>, TrackError> {
        let Some(player) = event.side else {
            self.apply_field_event(&event.kind);
            return Ok(None);
        };

        match &event.kind {
            EventKind::Move { move_name, .. } => {
                let poke = self.member_mut(player, &event.pokemon)?;
                poke.record_move(move_name);
                Ok(None)
            }

            EventKind::Switch {
                species,
                level,
                slot,
                hp,
                max_hp,
                gender,
                shiny,
                forced: _,
                replacement: _,
                lead,
            } => {
                let side = self.get_or_create_side(player, "");
                let idx = switch_target(side, &event.pokemon, species, *level, *gender, *shiny)?;

                let poke = &mut side.pokemon[idx];
                if poke.fainted {
                    return Err(TrackError::FaintedPokemon {
                        player,
                        name: event.pokemon.clone(),
                    });
                }
                if event.pokemon != *species {
                    poke.identity.nickname = Some(event.pokemon.clone());
                }
                poke.identity.species = species.clone();
                poke.identity.level = *level;
                poke.apply_hp(*hp, Some(*max_hp));
                if *lead {
                    poke.is_lead = true;
                }

                side.set_active(*slot, Some(idx));
                Ok(None)
            }

            EventKind::Damage { hp, max_hp, .. } => {
                let side = self.side_mut(player)?;
                let idx = member_index(side, player, &event.pokemon)?;
                let poke = &mut side.pokemon[idx];
                if poke.fainted {
                    return Ok(None);
                }
                poke.apply_hp(*hp, Some(*max_hp));
                if *hp > 0 {
                    return Ok(None);
                }

                mark_fainted(side, idx);
                Ok(Some(
                    BattleEvent::new(
                        EventKind::Faint {
                            remaining: side.total_left(),
                        },
                        event.pokemon.clone(),
                        "fainted",
                    )
                    .with_side(player),
                ))
            }

            EventKind::Heal { hp, max_hp, .. } => {
                let poke = self.living_member_mut(player, &event.pokemon)?;
                let max = (*max_hp).max(1);
                poke.apply_hp((*hp).min(max), Some(max));
                Ok(None)
            }

            EventKind::Faint { .. } => {
                let side = self.side_mut(player)?;
                let idx = member_index(side, player, &event.pokemon)?;
                if !side.pokemon[idx].fainted {
                    mark_fainted(side, idx);
                }
                Ok(None)
            }

            EventKind::Status { status, .. } => {
                let poke = self.living_member_mut(player, &event.pokemon)?;
                poke.status = *status;
                Ok(None)
            }

            EventKind::Hazard { condition, removed } => {
                let side = self.side_mut(player)?;
                apply_side_condition(side, *condition, *removed);
                Ok(None)
            }

            EventKind::Terastallize { tera_type } => {
                let poke = self.member_mut(player, &event.pokemon)?;
                poke.tera_type = Some(tera_type.clone());
                poke.terastallized = true;
                Ok(None)
            }

            EventKind::Item { item, consumed } => {
                let poke = self.member_mut(player, &event.pokemon)?;
                poke.record_item(item);
                if *consumed {
                    poke.consume_item();
                }
                Ok(None)
            }

            EventKind::Weather { .. }
            | EventKind::Terrain { .. }
            | EventKind::Field { .. }
            | EventKind::Boost { .. }
            | EventKind::Other { .. } => {
                self.apply_field_event(&event.kind);
                Ok(None)
            }
        }
    }

    fn apply_field_event(&mut self, kind: &EventKind) {
        match kind {
            EventKind::Weather { weather, .. } => self.field.weather = *weather,
            EventKind::Terrain { terrain, .. } => self.field.terrain = *terrain,
            EventKind::Field { condition, removed } => {
                if let Some(room) = Room::from_protocol(condition) {
                    self.field.set_room(room, !removed);
                }
            }
            _ => {}
        }
    }

    fn member_mut(&mut self, player: Player, name: &str) -> Result<&mut PokemonState, TrackError> {
        let side = self.side_mut(player)?;
        let idx = member_index(side, player, name)?;
        Ok(&mut side.pokemon[idx])
    }

    fn living_member_mut(
        &mut self,
        player: Player,
        name: &str,
    ) -> Result<&mut PokemonState, TrackError> {
        let poke = self.member_mut(player, name)?;
        if poke.fainted {
            return Err(TrackError::FaintedPokemon {
                player,
                name: name.to_string(),
            });
        }
        Ok(poke)
    }
}

fn member_index(side: &SideState, player: Player, name: &str) -> Result<usize, TrackError> {
    side.find_pokemon(name)
        .ok_or_else(|| TrackError::UnknownPokemon {
            player,
            name: name.to_string(),
        })
}

/// Locate (or discover) the roster member a switch-in refers to
fn switch_target(
    side: &mut SideState,
    name: &str,
    species: &str,
    level: u8,
    gender: Option<char>,
    shiny: bool,
) -> Result<usize, TrackError> {
    if let Some(idx) = side.find_pokemon(name) {
        return Ok(idx);
    }

    // Nicknamed pokemon match their preview entry by species
    if let Some(idx) = side
        .pokemon
        .iter()
        .position(|p| p.identity.nickname.is_none() && species_matches(&p.identity.species, species))
    {
        return Ok(idx);
    }

    if side.preview {
        return Err(TrackError::UnknownPokemon {
            player: side.player,
            name: name.to_string(),
        });
    }

    if side.pokemon.len() >= side.capacity() {
        return Err(TrackError::RosterFull {
            player: side.player,
        });
    }

    let details = PokemonDetails {
        species: species.to_string(),
        level: Some(level),
        gender,
        shiny,
        tera_type: None,
    };
    side.pokemon.push(PokemonState::from_protocol_with_name(&details, name));
    Ok(side.pokemon.len() - 1)
}

fn mark_fainted(side: &mut SideState, idx: usize) {
    if let Some(poke) = side.get_pokemon_mut(idx) {
        poke.fainted = true;
        poke.hp_current = 0;
        poke.status = None;
    }
    side.losses += 1;
    side.vacate(idx);
}

fn apply_side_condition(side: &mut SideState, condition: SideCondition, removed: bool) {
    if removed {
        side.remove_condition(condition);
    } else {
        side.add_condition(condition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Status, Weather};
    use vgccorner_protocol::{GameType, ServerMessage};

    fn switch(player: Player, name: &str, species: &str, slot: usize) -> BattleEvent {
        BattleEvent::new(
            EventKind::Switch {
                species: species.to_string(),
                level: 50,
                slot,
                hp: 100,
                max_hp: 100,
                gender: None,
                shiny: false,
                forced: false,
                replacement: false,
                lead: false,
            },
            name,
            "switched in",
        )
        .with_side(player)
    }

    fn damage(player: Player, name: &str, hp: u32) -> BattleEvent {
        BattleEvent::new(
            EventKind::Damage {
                amount: 0,
                hp,
                max_hp: 100,
                source: None,
            },
            name,
            "took damage",
        )
        .with_side(player)
    }

    fn heal(player: Player, name: &str, hp: u32) -> BattleEvent {
        BattleEvent::new(
            EventKind::Heal {
                amount: 0,
                hp,
                max_hp: 100,
                source: None,
            },
            name,
            "healed",
        )
        .with_side(player)
    }

    fn doubles_tracker() -> BoardTracker {
        let mut tracker = BoardTracker::new();
        tracker.update(&ServerMessage::GameType(GameType::Doubles));
        for (p, name) in [(Player::P1, "Alice"), (Player::P2, "Bob")] {
            tracker.update(&ServerMessage::BattlePlayer {
                player: p,
                username: name.to_string(),
                avatar: String::new(),
                rating: None,
            });
        }
        tracker
    }

    #[test]
    fn test_switch_discovers_roster() {
        let mut tracker = doubles_tracker();
        tracker
            .apply_event(&switch(Player::P1, "Sparky", "Pikachu", 1))
            .unwrap();

        let side = tracker.get_side(Player::P1).unwrap();
        assert_eq!(side.pokemon.len(), 1);
        assert_eq!(side.pokemon[0].name(), "Sparky");
        assert_eq!(side.active(1).unwrap().identity.species, "Pikachu");
        assert!(side.pokemon[0].revealed);
    }

    #[test]
    fn test_switch_matches_preview_by_species() {
        let mut tracker = doubles_tracker();
        for s in ["Urshifu-*", "Incineroar"] {
            tracker.update(&ServerMessage::Poke {
                player: Player::P2,
                details: PokemonDetails::parse(s),
                has_item: true,
            });
        }

        tracker
            .apply_event(&switch(Player::P2, "Fish", "Urshifu-Rapid-Strike", 0))
            .unwrap();

        let side = tracker.get_side(Player::P2).unwrap();
        assert_eq!(side.pokemon.len(), 2);
        assert_eq!(side.pokemon[0].name(), "Fish");
        assert_eq!(side.pokemon[0].identity.species, "Urshifu-Rapid-Strike");

        let err = tracker
            .apply_event(&switch(Player::P2, "Pikachu", "Pikachu", 1))
            .unwrap_err();
        assert!(matches!(err, TrackError::UnknownPokemon { .. }));
    }

    #[test]
    fn test_roster_full() {
        let mut tracker = doubles_tracker();
        tracker.update(&ServerMessage::TeamSize {
            player: Player::P1,
            size: 1,
        });
        tracker
            .apply_event(&switch(Player::P1, "Pikachu", "Pikachu", 0))
            .unwrap();
        let err = tracker
            .apply_event(&switch(Player::P1, "Raichu", "Raichu", 1))
            .unwrap_err();
        assert_eq!(err, TrackError::RosterFull { player: Player::P1 });
    }

    #[test]
    fn test_damage_to_zero_emits_faint_once() {
        let mut tracker = doubles_tracker();
        tracker.update(&ServerMessage::TeamSize {
            player: Player::P1,
            size: 2,
        });
        tracker
            .apply_event(&switch(Player::P1, "Pikachu", "Pikachu", 0))
            .unwrap();
        tracker
            .apply_event(&switch(Player::P1, "Charizard", "Charizard", 1))
            .unwrap();

        assert!(tracker
            .apply_event(&damage(Player::P1, "Pikachu", 40))
            .unwrap()
            .is_none());

        let faint = tracker
            .apply_event(&damage(Player::P1, "Pikachu", 0))
            .unwrap()
            .unwrap();
        assert_eq!(faint.kind, EventKind::Faint { remaining: 1 });
        assert_eq!(faint.side, Some(Player::P1));

        // The explicit faint line and any later damage are no-ops
        let explicit = BattleEvent::new(EventKind::Faint { remaining: 1 }, "Pikachu", "fainted")
            .with_side(Player::P1);
        assert!(tracker.apply_event(&explicit).unwrap().is_none());
        assert!(tracker
            .apply_event(&damage(Player::P1, "Pikachu", 0))
            .unwrap()
            .is_none());

        let side = tracker.get_side(Player::P1).unwrap();
        assert_eq!(side.losses, 1);
        assert_eq!(side.total_left(), 1);
        assert!(side.active(0).is_none());
    }

    #[test]
    fn test_fainted_pokemon_cannot_return() {
        let mut tracker = doubles_tracker();
        tracker
            .apply_event(&switch(Player::P2, "Rillaboom", "Rillaboom", 0))
            .unwrap();
        tracker
            .apply_event(&damage(Player::P2, "Rillaboom", 0))
            .unwrap();

        let heal_err = tracker
            .apply_event(&heal(Player::P2, "Rillaboom", 50))
            .unwrap_err();
        assert!(matches!(heal_err, TrackError::FaintedPokemon { .. }));

        let switch_err = tracker
            .apply_event(&switch(Player::P2, "Rillaboom", "Rillaboom", 1))
            .unwrap_err();
        assert!(matches!(switch_err, TrackError::FaintedPokemon { .. }));

        let poke = tracker.find_pokemon(Player::P2, "Rillaboom").unwrap();
        assert_eq!(poke.hp_current, 0);
        assert!(poke.fainted);
    }

    #[test]
    fn test_heal_capped_at_max() {
        let mut tracker = doubles_tracker();
        tracker
            .apply_event(&switch(Player::P1, "Amoonguss", "Amoonguss", 0))
            .unwrap();
        tracker
            .apply_event(&heal(Player::P1, "Amoonguss", 140))
            .unwrap();
        assert_eq!(
            tracker.find_pokemon(Player::P1, "Amoonguss").unwrap().hp_current,
            100
        );
    }

    #[test]
    fn test_unknown_pokemon_is_an_error() {
        let mut tracker = doubles_tracker();
        let err = tracker
            .apply_event(&damage(Player::P1, "Mew", 10))
            .unwrap_err();
        assert_eq!(
            err,
            TrackError::UnknownPokemon {
                player: Player::P1,
                name: "Mew".to_string()
            }
        );
    }

    #[test]
    fn test_status_overwrites() {
        let mut tracker = doubles_tracker();
        tracker
            .apply_event(&switch(Player::P1, "Pikachu", "Pikachu", 0))
            .unwrap();
        for status in [Some(Status::Paralysis), Some(Status::Burn), None] {
            let event = BattleEvent::new(
                EventKind::Status {
                    status,
                    previous: None,
                },
                "Pikachu",
                "status",
            )
            .with_side(Player::P1);
            tracker.apply_event(&event).unwrap();
            assert_eq!(
                tracker.find_pokemon(Player::P1, "Pikachu").unwrap().status,
                status
            );
        }
    }

    #[test]
    fn test_field_and_side_conditions() {
        let mut tracker = doubles_tracker();
        let sun = BattleEvent::new(
            EventKind::Weather {
                weather: Some(Weather::Sun),
                previous: None,
            },
            "",
            "Sun",
        );
        tracker.apply_event(&sun).unwrap();
        assert_eq!(tracker.field.weather, Some(Weather::Sun));

        let room = BattleEvent::new(
            EventKind::Field {
                condition: "move: Trick Room".to_string(),
                removed: false,
            },
            "",
            "Trick Room",
        );
        tracker.apply_event(&room).unwrap();
        assert!(tracker.field.trick_room);

        let tailwind = BattleEvent::new(
            EventKind::Hazard {
                condition: SideCondition::Tailwind,
                removed: false,
            },
            "",
            "Tailwind",
        )
        .with_side(Player::P2);
        tracker.apply_event(&tailwind).unwrap();
        assert_eq!(
            tracker
                .get_side(Player::P2)
                .unwrap()
                .condition_layers(SideCondition::Tailwind),
            1
        );
    }
}
