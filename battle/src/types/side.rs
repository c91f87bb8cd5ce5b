//! Side (player) state

use std::collections::BTreeMap;

use vgccorner_protocol::Player;

use super::conditions::{SideCondition, SideConditionState};
use super::pokemon::PokemonState;

/// Roster capacity when neither team preview nor `|teamsize|` says otherwise
pub const DEFAULT_ROSTER_CAPACITY: usize = 6;

/// One player's side of the battle
#[derive(Debug, Clone)]
pub struct SideState {
    pub player: Player,
    pub username: String,
    pub rating: Option<u32>,

    /// Known roster members, in preview or discovery order
    pub pokemon: Vec<PokemonState>,

    /// Size announced by `|teamsize|`
    pub declared_size: Option<usize>,

    /// Whether `pokemon` was filled from team preview
    pub preview: bool,

    /// Active pokemon indices per slot (a, b, c)
    pub active_indices: Vec<Option<usize>>,

    pub conditions: BTreeMap<SideCondition, SideConditionState>,

    /// Number of fainted roster members; never decreases
    pub losses: usize,
}

impl SideState {
    pub fn new(player: Player, username: impl Into<String>) -> Self {
        Self {
            player,
            username: username.into(),
            rating: None,
            pokemon: Vec::new(),
            declared_size: None,
            preview: false,
            active_indices: vec![None],
            conditions: BTreeMap::new(),
            losses: 0,
        }
    }

    /// Set the number of active slots (1 for singles, 2 for doubles, ...)
    pub fn set_active_slots(&mut self, count: usize) {
        self.active_indices.resize(count, None);
    }

    /// Members that have actually been sent out
    pub fn revealed_count(&self) -> usize {
        self.pokemon.iter().filter(|p| p.revealed).count()
    }

    /// Number of pokemon this side brought to the battle
    ///
    /// `|teamsize|` wins when present (VGC previews six but brings four),
    /// otherwise the preview length. Without either, a side that has sent
    /// anything out is assumed to have a full roster so the size never
    /// grows as members are discovered.
    pub fn roster_size(&self) -> usize {
        match self.declared_size {
            Some(declared) => declared.max(self.revealed_count()),
            None if self.preview || self.pokemon.is_empty() => self.pokemon.len(),
            None => DEFAULT_ROSTER_CAPACITY,
        }
    }

    /// How many more distinct pokemon may be discovered from switch-ins
    pub fn capacity(&self) -> usize {
        self.declared_size.unwrap_or(DEFAULT_ROSTER_CAPACITY)
    }

    pub fn total_left(&self) -> usize {
        self.roster_size().saturating_sub(self.losses)
    }

    /// Whether every brought pokemon is in `pokemon`, so unrevealed
    /// preview entries are known to be part of the battle
    pub fn roster_is_exact(&self) -> bool {
        self.pokemon.len() <= self.roster_size()
    }

    /// Names of the roster members still able to battle
    pub fn alive_names(&self) -> Vec<String> {
        let exact = self.roster_is_exact();
        self.pokemon
            .iter()
            .filter(|p| p.is_alive() && (exact || p.revealed))
            .map(|p| p.name().to_string())
            .collect()
    }

    pub fn active(&self, slot: usize) -> Option<&PokemonState> {
        self.active_indices
            .get(slot)
            .copied()
            .flatten()
            .and_then(|idx| self.pokemon.get(idx))
    }

    /// Iterate over `(slot, pokemon)` for occupied active slots
    pub fn get_active(&self) -> impl Iterator<Item = (usize, &PokemonState)> {
        self.active_indices
            .iter()
            .enumerate()
            .filter_map(|(slot, idx)| idx.and_then(|i| self.pokemon.get(i)).map(|p| (slot, p)))
    }

    /// Find a pokemon by protocol name (nickname or species)
    pub fn find_pokemon(&self, name: &str) -> Option<usize> {
        // Prefer an exact nickname hit over a species match
        self.pokemon
            .iter()
            .position(|p| p.identity.nickname.as_deref() == Some(name))
            .or_else(|| self.pokemon.iter().position(|p| p.answers_to(name)))
    }

    pub fn get_pokemon(&self, index: usize) -> Option<&PokemonState> {
        self.pokemon.get(index)
    }

    pub fn get_pokemon_mut(&mut self, index: usize) -> Option<&mut PokemonState> {
        self.pokemon.get_mut(index)
    }

    pub fn condition_layers(&self, cond: SideCondition) -> u8 {
        self.conditions.get(&cond).map_or(0, |s| s.layers)
    }

    /// Add a side condition (or a layer of it).
    /// Returns false if it was already at max layers.
    pub fn add_condition(&mut self, cond: SideCondition) -> bool {
        if let Some(state) = self.conditions.get_mut(&cond) {
            state.add_layer(cond)
        } else {
            self.conditions.insert(cond, SideConditionState::new());
            true
        }
    }

    pub fn remove_condition(&mut self, cond: SideCondition) -> bool {
        self.conditions.remove(&cond).is_some()
    }

    /// Put a pokemon into a slot, switching out whatever was there
    pub fn set_active(&mut self, slot: usize, pokemon_index: Option<usize>) {
        if slot >= self.active_indices.len() {
            self.set_active_slots(slot + 1);
        }

        if let Some(old_idx) = self.active_indices[slot]
            && let Some(old_poke) = self.pokemon.get_mut(old_idx)
        {
            old_poke.on_switch_out();
        }

        self.active_indices[slot] = pokemon_index;

        if let Some(idx) = pokemon_index
            && let Some(new_poke) = self.pokemon.get_mut(idx)
        {
            new_poke.on_switch_in();
        }
    }

    /// Clear whichever slot holds this pokemon
    pub fn vacate(&mut self, pokemon_index: usize) {
        for slot in self.active_indices.iter_mut() {
            if *slot == Some(pokemon_index) {
                *slot = None;
            }
        }
        if let Some(poke) = self.pokemon.get_mut(pokemon_index) {
            poke.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgccorner_protocol::PokemonDetails;

    fn side_with(species: &[&str]) -> SideState {
        let mut side = SideState::new(Player::P1, "Alice");
        for s in species {
            side.pokemon
                .push(PokemonState::from_protocol(&PokemonDetails::parse(s)));
        }
        side
    }

    #[test]
    fn test_roster_size_prefers_teamsize() {
        let mut side = side_with(&[
            "Incineroar",
            "Rillaboom",
            "Urshifu-*",
            "Flutter Mane",
            "Amoonguss",
            "Tornadus",
        ]);
        side.preview = true;
        assert_eq!(side.roster_size(), 6);

        side.declared_size = Some(4);
        assert_eq!(side.roster_size(), 4);
        assert_eq!(side.total_left(), 4);
        assert!(!side.roster_is_exact());
    }

    #[test]
    fn test_discovered_roster() {
        let mut side = SideState::new(Player::P1, "Alice");
        assert_eq!(side.roster_size(), 0);

        side.pokemon
            .push(PokemonState::from_protocol(&PokemonDetails::parse("Pikachu")));
        assert_eq!(side.roster_size(), DEFAULT_ROSTER_CAPACITY);

        // Losing the only revealed member is not a wipe
        side.pokemon[0].fainted = true;
        side.losses = 1;
        assert_eq!(side.total_left(), 5);

        side.pokemon
            .push(PokemonState::from_protocol(&PokemonDetails::parse("Charizard")));
        assert_eq!(side.roster_size(), DEFAULT_ROSTER_CAPACITY);
        assert_eq!(side.total_left(), 5);
    }

    #[test]
    fn test_alive_names_with_bring_four() {
        let mut side = side_with(&["Incineroar", "Rillaboom", "Amoonguss", "Tornadus"]);
        side.declared_size = Some(2);
        side.set_active(0, Some(0));
        side.pokemon[1].revealed = true;
        side.pokemon[1].fainted = true;
        side.losses = 1;

        assert_eq!(side.alive_names(), vec!["Incineroar".to_string()]);
        assert_eq!(side.total_left(), 1);
    }

    #[test]
    fn test_find_pokemon_by_nickname_first() {
        let mut side = side_with(&["Pikachu", "Raichu"]);
        side.pokemon[1].identity.nickname = Some("Pikachu".to_string());
        assert_eq!(side.find_pokemon("Pikachu"), Some(1));
        assert_eq!(side.find_pokemon("Raichu"), None);
        assert_eq!(side.find_pokemon("Mew"), None);
    }

    #[test]
    fn test_set_active_and_vacate() {
        let mut side = side_with(&["Pikachu", "Charizard"]);
        side.set_active_slots(2);

        side.set_active(1, Some(0));
        assert!(side.pokemon[0].active);
        assert_eq!(side.active(1).unwrap().name(), "Pikachu");

        side.set_active(1, Some(1));
        assert!(!side.pokemon[0].active);
        assert!(side.pokemon[1].active);

        side.vacate(1);
        assert!(side.active(1).is_none());
        assert_eq!(side.get_active().count(), 0);
    }

    #[test]
    fn test_side_conditions() {
        let mut side = SideState::new(Player::P2, "Bob");
        assert!(side.add_condition(SideCondition::Tailwind));
        assert!(!side.add_condition(SideCondition::Tailwind));
        assert!(side.add_condition(SideCondition::Spikes));
        assert!(side.add_condition(SideCondition::Spikes));
        assert_eq!(side.condition_layers(SideCondition::Spikes), 2);
        assert!(side.remove_condition(SideCondition::Tailwind));
        assert_eq!(side.condition_layers(SideCondition::Tailwind), 0);
    }
}
