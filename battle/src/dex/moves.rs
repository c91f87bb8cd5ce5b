use crate::types::Type::{self, *};

use super::to_id;

const MOVES: &[(&str, Type)] = &[
    // Normal
    ("boomburst", Normal),
    ("bodyslam", Normal),
    ("doubleedge", Normal),
    ("extremespeed", Normal),
    ("facade", Normal),
    ("fakeout", Normal),
    ("followme", Normal),
    ("helpinghand", Normal),
    ("hypervoice", Normal),
    ("protect", Normal),
    ("populationbomb", Normal),
    ("return", Normal),
    ("terablast", Normal),
    // Fire
    ("armorcannon", Fire),
    ("bitterblade", Fire),
    ("blazekick", Fire),
    ("eruption", Fire),
    ("fireblast", Fire),
    ("firepunch", Fire),
    ("flamecharge", Fire),
    ("flamethrower", Fire),
    ("flareblitz", Fire),
    ("heatwave", Fire),
    ("overheat", Fire),
    ("sacredfire", Fire),
    ("sunnyday", Fire),
    ("willowisp", Fire),
    // Water
    ("aquajet", Water),
    ("hydropump", Water),
    ("jetpunch", Water),
    ("liquidation", Water),
    ("muddywater", Water),
    ("raindance", Water),
    ("scald", Water),
    ("surf", Water),
    ("surgingstrikes", Water),
    ("waterspout", Water),
    ("wavecrash", Water),
    ("hydrosteam", Water),
    // Electric
    ("discharge", Electric),
    ("electroweb", Electric),
    ("electrodrift", Electric),
    ("thunder", Electric),
    ("thunderbolt", Electric),
    ("thunderclap", Electric),
    ("thunderwave", Electric),
    ("voltswitch", Electric),
    ("wildcharge", Electric),
    ("volttackle", Electric),
    // Grass
    ("energyball", Grass),
    ("gigadrain", Grass),
    ("grassknot", Grass),
    ("grassyglide", Grass),
    ("ivycudgel", Grass),
    ("leafstorm", Grass),
    ("matchagotcha", Grass),
    ("seedbomb", Grass),
    ("solarbeam", Grass),
    ("spore", Grass),
    ("sleeppowder", Grass),
    ("woodhammer", Grass),
    // Ice
    ("blizzard", Ice),
    ("freezedry", Ice),
    ("glaciallance", Ice),
    ("icebeam", Ice),
    ("icepunch", Ice),
    ("iceshard", Ice),
    ("iciclecrash", Ice),
    ("icywind", Ice),
    ("snowscape", Ice),
    // Fighting
    ("aurasphere", Fighting),
    ("bodypress", Fighting),
    ("closecombat", Fighting),
    ("coaching", Fighting),
    ("drainpunch", Fighting),
    ("focusblast", Fighting),
    ("lowkick", Fighting),
    ("machpunch", Fighting),
    ("sacredsword", Fighting),
    // Poison
    ("gunkshot", Poison),
    ("poisonjab", Poison),
    ("sludgebomb", Poison),
    ("toxic", Poison),
    ("direclaw", Poison),
    // Ground
    ("bulldoze", Ground),
    ("earthpower", Ground),
    ("earthquake", Ground),
    ("headlongrush", Ground),
    ("highhorsepower", Ground),
    ("precipiceblades", Ground),
    ("sandsearstorm", Ground),
    ("stompingtantrum", Ground),
    // Flying
    ("tailwind", Flying),
    ("acrobatics", Flying),
    ("bleakwindstorm", Flying),
    ("bravebird", Flying),
    ("dragonascent", Flying),
    ("hurricane", Flying),
    ("airslash", Flying),
    ("roost", Flying),
    // Psychic
    ("trickroom", Psychic),
    ("recover", Psychic),
    ("expandingforce", Psychic),
    ("futuresight", Psychic),
    ("imprison", Psychic),
    ("psychic", Psychic),
    ("psychicterrain", Psychic),
    ("psyshock", Psychic),
    ("zenheadbutt", Psychic),
    ("lightscreen", Psychic),
    ("reflect", Psychic),
    // Bug
    ("ragepowder", Bug),
    ("pollenpuff", Bug),
    ("firstimpression", Bug),
    ("leechlife", Bug),
    ("uturn", Bug),
    ("xscissor", Bug),
    // Rock
    ("meteorbeam", Rock),
    ("powergem", Rock),
    ("rockslide", Rock),
    ("stoneedge", Rock),
    ("stealthrock", Rock),
    ("wideguard", Rock),
    // Ghost
    ("astralbarrage", Ghost),
    ("ragefist", Ghost),
    ("phantomforce", Ghost),
    ("poltergeist", Ghost),
    ("shadowball", Ghost),
    ("shadowclaw", Ghost),
    ("shadowsneak", Ghost),
    // Dragon
    ("clangingscales", Dragon),
    ("dracometeor", Dragon),
    ("dragonclaw", Dragon),
    ("dragondarts", Dragon),
    ("dragonpulse", Dragon),
    ("outrage", Dragon),
    ("scaleshot", Dragon),
    ("dragoncheer", Dragon),
    ("dynamaxcannon", Dragon),
    ("breakingswipe", Dragon),
    // Dark
    ("wickedblow", Dark),
    ("snarl", Dark),
    ("crunch", Dark),
    ("darkpulse", Dark),
    ("foulplay", Dark),
    ("knockoff", Dark),
    ("kowtowcleave", Dark),
    ("partingshot", Dark),
    ("ruination", Dark),
    ("suckerpunch", Dark),
    ("throatchop", Dark),
    ("taunt", Dark),
    // Steel
    ("behemothblade", Steel),
    ("behemothbash", Steel),
    ("flashcannon", Steel),
    ("gigatonhammer", Steel),
    ("heavyslam", Steel),
    ("ironhead", Steel),
    ("makeitrain", Steel),
    ("steelbeam", Steel),
    ("bulletpunch", Steel),
    // Fairy
    ("spiritbreak", Fairy),
    ("dazzlinggleam", Fairy),
    ("moonblast", Fairy),
    ("playrough", Fairy),
    ("drainingkiss", Fairy),
    ("mistyterrain", Fairy),
];

/// Type of a move, by display name or id
pub fn move_type(name: &str) -> Option<Type> {
    let id = to_id(name);
    MOVES.iter().find(|(key, _)| *key == id).map(|(_, t)| *t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_type_by_name() {
        assert_eq!(move_type("Flare Blitz"), Some(Fire));
        assert_eq!(move_type("U-turn"), Some(Bug));
        assert_eq!(move_type("Make It Rain"), Some(Steel));
        assert_eq!(move_type("Fake Out"), Some(Normal));
    }

    #[test]
    fn test_unknown_move() {
        assert_eq!(move_type("Struggle Bug Deluxe"), None);
    }
}
