use rand::Rng;
use rand::prelude::IndexedRandom;
use serde::{Deserialize, Serialize};

// Static content tables. The deterministic actor/loot resolution step is
// the only consumer; the generative layer never picks entries itself.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonsterEntry {
    pub name: &'static str,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub tier: u8, // 1..=5, matched against encounter difficulty
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemEntry {
    pub name: &'static str,
    pub power: u32,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffixEntry {
    pub name: &'static str,
    pub prefix: bool, // prefix affixes go before the base name, suffixes after
    pub hp_add: i32,
    pub attack_add: i32,
    pub defense_add: i32,
    pub power_mult: f32,
}

const MONSTERS: &[MonsterEntry] = &[
    MonsterEntry { name: "rat swarm", hp: 8, attack: 2, defense: 8, tier: 1 },
    MonsterEntry { name: "goblin", hp: 12, attack: 3, defense: 10, tier: 1 },
    MonsterEntry { name: "bandit", hp: 16, attack: 4, defense: 11, tier: 2 },
    MonsterEntry { name: "skeleton", hp: 18, attack: 4, defense: 12, tier: 2 },
    MonsterEntry { name: "dire wolf", hp: 22, attack: 6, defense: 12, tier: 3 },
    MonsterEntry { name: "ogre", hp: 34, attack: 7, defense: 11, tier: 3 },
    MonsterEntry { name: "wraith", hp: 28, attack: 8, defense: 14, tier: 4 },
    MonsterEntry { name: "troll", hp: 46, attack: 9, defense: 13, tier: 4 },
    MonsterEntry { name: "chimera", hp: 58, attack: 11, defense: 15, tier: 5 },
    MonsterEntry { name: "wyvern", hp: 64, attack: 12, defense: 16, tier: 5 },
];

const ITEMS: &[ItemEntry] = &[
    ItemEntry { name: "shortsword", power: 3, value: 25 },
    ItemEntry { name: "oak staff", power: 2, value: 18 },
    ItemEntry { name: "chain shirt", power: 2, value: 40 },
    ItemEntry { name: "healing draught", power: 5, value: 30 },
    ItemEntry { name: "hunting bow", power: 3, value: 35 },
    ItemEntry { name: "silver dagger", power: 4, value: 50 },
    ItemEntry { name: "tower shield", power: 3, value: 45 },
    ItemEntry { name: "rune charm", power: 4, value: 60 },
];

const AFFIXES: &[AffixEntry] = &[
    AffixEntry { name: "ancient", prefix: true, hp_add: 6, attack_add: 1, defense_add: 1, power_mult: 1.2 },
    AffixEntry { name: "feral", prefix: true, hp_add: 2, attack_add: 3, defense_add: 0, power_mult: 1.1 },
    AffixEntry { name: "armored", prefix: true, hp_add: 4, attack_add: 0, defense_add: 3, power_mult: 1.1 },
    AffixEntry { name: "venomous", prefix: true, hp_add: 0, attack_add: 2, defense_add: 0, power_mult: 1.3 },
    AffixEntry { name: "of the depths", prefix: false, hp_add: 8, attack_add: 1, defense_add: 1, power_mult: 1.2 },
    AffixEntry { name: "of embers", prefix: false, hp_add: 0, attack_add: 4, defense_add: 0, power_mult: 1.4 },
    AffixEntry { name: "of warding", prefix: false, hp_add: 5, attack_add: 0, defense_add: 2, power_mult: 1.2 },
];

const NPCS: &[&str] = &[
    "Maribel the herbalist",
    "Oswin the ferryman",
    "Captain Edda",
    "Brother Tal",
    "Greta the peddler",
    "Old Fennick",
];

pub struct MonsterCatalog;

impl MonsterCatalog {
    pub fn entries() -> &'static [MonsterEntry] {
        MONSTERS
    }

    /// Random entry whose tier is within one step of the requested difficulty.
    pub fn random_entry(rng: &mut impl Rng, difficulty: u8) -> &'static MonsterEntry {
        let candidates: Vec<&MonsterEntry> = MONSTERS
            .iter()
            .filter(|m| m.tier.abs_diff(difficulty) <= 1)
            .collect();
        candidates
            .choose(rng)
            .copied()
            .unwrap_or(&MONSTERS[0])
    }

    pub fn lookup(name: &str) -> Option<&'static MonsterEntry> {
        MONSTERS.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn base_names() -> impl Iterator<Item = &'static str> {
        MONSTERS.iter().map(|m| m.name)
    }
}

pub struct ItemCatalog;

impl ItemCatalog {
    pub fn random_entry(rng: &mut impl Rng) -> &'static ItemEntry {
        ITEMS.choose(rng).unwrap_or(&ITEMS[0])
    }

    pub fn lookup(name: &str) -> Option<&'static ItemEntry> {
        ITEMS.iter().find(|i| i.name.eq_ignore_ascii_case(name))
    }
}

pub struct NpcCatalog;

impl NpcCatalog {
    pub fn random_entry(rng: &mut impl Rng) -> &'static str {
        NPCS.choose(rng).copied().unwrap_or(NPCS[0])
    }

    pub fn names() -> &'static [&'static str] {
        NPCS
    }
}

/// A monster instance: base definition plus 0-2 affixes, generated once and
/// immutable thereafter. Owned by the active-encounter slot holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffixedMonster {
    pub name: String,
    pub base_name: String,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub difficulty: u8,
}

/// An inventory item with its affix deltas already folded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffixedItem {
    pub name: String,
    pub power: u32,
    pub value: u32,
}

fn roll_affixes(rng: &mut impl Rng) -> Vec<&'static AffixEntry> {
    let count = match rng.random_range(0..10) {
        0..=4 => 0,
        5..=7 => 1,
        _ => 2,
    };
    let mut picked: Vec<&AffixEntry> = Vec::new();
    while picked.len() < count {
        let affix = AFFIXES.choose(rng).unwrap_or(&AFFIXES[0]);
        if !picked.iter().any(|p| p.name == affix.name) {
            picked.push(affix);
        }
    }
    picked
}

fn affixed_name(base: &str, affixes: &[&AffixEntry]) -> String {
    let mut name = base.to_string();
    for affix in affixes {
        if affix.prefix {
            name = format!("{} {}", affix.name, name);
        } else {
            name = format!("{} {}", name, affix.name);
        }
    }
    name
}

pub fn generate_monster(rng: &mut impl Rng, difficulty: u8, level: u32) -> AffixedMonster {
    let base = MonsterCatalog::random_entry(rng, difficulty);
    let affixes = roll_affixes(rng);

    let mut hp = base.hp as i32 + level as i32;
    let mut attack = base.attack as i32;
    let mut defense = base.defense as i32;
    for affix in &affixes {
        hp += affix.hp_add;
        attack += affix.attack_add;
        defense += affix.defense_add;
    }

    AffixedMonster {
        name: affixed_name(base.name, &affixes),
        base_name: base.name.to_string(),
        hp: hp.max(1) as u32,
        attack: attack.max(1) as u32,
        defense: defense.max(1) as u32,
        difficulty,
    }
}

pub fn generate_item(rng: &mut impl Rng) -> AffixedItem {
    let base = ItemCatalog::random_entry(rng);
    let affixes = roll_affixes(rng);

    let mut power = base.power as f32;
    let mut value = base.value;
    for affix in &affixes {
        power *= affix.power_mult;
        value += (base.value as f32 * (affix.power_mult - 1.0)) as u32;
    }

    AffixedItem {
        name: affixed_name(base.name, &affixes),
        power: power.round().max(1.0) as u32,
        value,
    }
}
