//! Pokemon state types

use vgccorner_protocol::{HpStatus, PokemonDetails};

use super::status::Status;

/// Core identity (doesn't change during battle, except forme changes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonIdentity {
    /// Species name including forme, e.g. "Urshifu-Rapid-Strike".
    /// Team preview may show a wildcard such as "Urshifu-*" until switch-in.
    pub species: String,

    /// Nickname, if different from species
    pub nickname: Option<String>,

    pub level: u8,
    pub gender: Option<char>,
    pub shiny: bool,
}

impl PokemonIdentity {
    pub fn from_protocol(details: &PokemonDetails) -> Self {
        Self {
            species: details.species.clone(),
            nickname: None,
            level: details.level.unwrap_or(100),
            gender: details.gender,
            shiny: details.shiny,
        }
    }

    /// Nickname if set, otherwise species
    pub fn name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.species)
    }
}

/// Whether a species name seen in a switch matches one listed earlier
///
/// Handles preview wildcards ("Urshifu-*") and formes revealed later
/// ("Palafin" previewed, "Palafin-Hero" on the field).
pub fn species_matches(known: &str, seen: &str) -> bool {
    if known == seen {
        return true;
    }
    if let Some(base) = known.strip_suffix("-*") {
        return seen.starts_with(base);
    }
    seen.strip_prefix(known).is_some_and(|rest| rest.starts_with('-'))
        || known.strip_prefix(seen).is_some_and(|rest| rest.starts_with('-'))
}

/// A roster member as the log has revealed it so far
#[derive(Debug, Clone)]
pub struct PokemonState {
    pub identity: PokemonIdentity,

    // === HP ===
    /// HP as last reported (replay logs report out of 100 for both sides)
    pub hp_current: u32,
    pub hp_max: Option<u32>,

    // === Status ===
    pub status: Option<Status>,
    pub fainted: bool,
    pub active: bool,

    /// Has been sent out at least once
    pub revealed: bool,
    /// Was sent out before the first turn
    pub is_lead: bool,

    pub tera_type: Option<String>,
    pub terastallized: bool,

    // === Revealed information ===
    pub known_moves: Vec<String>,
    pub known_ability: Option<String>,
    pub known_item: Option<String>,
    pub item_consumed: bool,
}

impl PokemonState {
    pub fn from_protocol(details: &PokemonDetails) -> Self {
        Self {
            identity: PokemonIdentity::from_protocol(details),
            hp_current: 100,
            hp_max: Some(100),
            status: None,
            fainted: false,
            active: false,
            revealed: false,
            is_lead: false,
            tera_type: details.tera_type.clone(),
            terastallized: false,
            known_moves: Vec::new(),
            known_ability: None,
            known_item: None,
            item_consumed: false,
        }
    }

    /// Create from a switch-in, remembering the nickname if it differs
    pub fn from_protocol_with_name(details: &PokemonDetails, name: &str) -> Self {
        let mut state = Self::from_protocol(details);
        if name != details.species {
            state.identity.nickname = Some(name.to_string());
        }
        state
    }

    /// HP as a 0-100 percentage
    pub fn hp_percent(&self) -> u32 {
        if self.fainted {
            return 0;
        }
        HpStatus {
            current: self.hp_current,
            max: self.hp_max,
            status: None,
        }
        .percent()
    }

    pub fn name(&self) -> &str {
        self.identity.name()
    }

    /// Whether a protocol name (nickname or species) refers to this pokemon
    pub fn answers_to(&self, name: &str) -> bool {
        self.identity.nickname.as_deref() == Some(name)
            || (self.identity.nickname.is_none() && species_matches(&self.identity.species, name))
    }

    pub fn record_move(&mut self, move_name: &str) {
        if !self.known_moves.iter().any(|m| m == move_name) {
            self.known_moves.push(move_name.to_string());
        }
    }

    pub fn record_ability(&mut self, ability: &str) {
        self.known_ability = Some(ability.to_string());
    }

    pub fn record_item(&mut self, item: &str) {
        self.known_item = Some(item.to_string());
        self.item_consumed = false;
    }

    pub fn consume_item(&mut self) {
        self.item_consumed = true;
    }

    /// Take an HP reading. A "fnt" or zero reading does not mark the pokemon
    /// fainted here; the tracker owns that transition.
    pub fn apply_hp(&mut self, current: u32, max: Option<u32>) {
        self.hp_current = current;
        if max.is_some() {
            self.hp_max = max;
        }
    }

    /// Called when this pokemon switches out
    pub fn on_switch_out(&mut self) {
        self.active = false;
    }

    /// Called when this pokemon switches in
    pub fn on_switch_in(&mut self) {
        self.active = true;
        self.revealed = true;
    }

    pub fn is_alive(&self) -> bool {
        !self.fainted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(s: &str) -> PokemonDetails {
        PokemonDetails::parse(s)
    }

    #[test]
    fn test_identity_name_prefers_nickname() {
        let state = PokemonState::from_protocol_with_name(&details("Pikachu, L50"), "Sparky");
        assert_eq!(state.name(), "Sparky");
        assert_eq!(state.identity.species, "Pikachu");
        assert_eq!(state.identity.level, 50);

        let plain = PokemonState::from_protocol_with_name(&details("Pikachu"), "Pikachu");
        assert!(plain.identity.nickname.is_none());
        assert_eq!(plain.identity.level, 100);
    }

    #[test]
    fn test_species_matches() {
        assert!(species_matches("Urshifu-*", "Urshifu-Rapid-Strike"));
        assert!(species_matches("Palafin", "Palafin-Hero"));
        assert!(species_matches("Incineroar", "Incineroar"));
        assert!(!species_matches("Rillaboom", "Incineroar"));
        assert!(!species_matches("Mew", "Mewtwo"));
    }

    #[test]
    fn test_answers_to() {
        let mut state = PokemonState::from_protocol(&details("Urshifu-*, L50"));
        assert!(state.answers_to("Urshifu-Rapid-Strike"));

        state.identity.nickname = Some("Fish".to_string());
        assert!(state.answers_to("Fish"));
        assert!(!state.answers_to("Urshifu-Rapid-Strike"));
    }

    #[test]
    fn test_hp_percent() {
        let mut state = PokemonState::from_protocol(&details("Amoonguss"));
        state.apply_hp(150, Some(221));
        assert_eq!(state.hp_percent(), 68);

        state.apply_hp(37, None);
        assert_eq!(state.hp_max, Some(221));
        assert_eq!(state.hp_percent(), 17);

        state.fainted = true;
        assert_eq!(state.hp_percent(), 0);
    }

    #[test]
    fn test_record_move_dedups() {
        let mut state = PokemonState::from_protocol(&details("Incineroar"));
        state.record_move("Fake Out");
        state.record_move("Parting Shot");
        state.record_move("Fake Out");
        assert_eq!(state.known_moves, vec!["Fake Out", "Parting Shot"]);
    }

    #[test]
    fn test_switch_marks_revealed() {
        let mut state = PokemonState::from_protocol(&details("Rillaboom"));
        assert!(!state.revealed);
        state.on_switch_in();
        assert!(state.active && state.revealed);
        state.on_switch_out();
        assert!(!state.active && state.revealed);
    }
}
