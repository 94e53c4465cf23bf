use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::catalog::AffixedItem;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize,
)]
pub enum Class {
    Warrior,
    Rogue,
    Mage,
    Cleric,
    Ranger,
}

impl Class {
    pub fn base_hp(&self) -> i32 {
        match self {
            Class::Warrior => 30,
            Class::Cleric => 26,
            Class::Ranger => 24,
            Class::Rogue => 22,
            Class::Mage => 18,
        }
    }

    pub fn base_attack(&self) -> u32 {
        match self {
            Class::Warrior => 5,
            Class::Ranger | Class::Rogue => 4,
            Class::Mage | Class::Cleric => 3,
        }
    }

    pub fn starting_ability(&self) -> &'static str {
        match self {
            Class::Warrior => "Shield Bash",
            Class::Rogue => "Backstab",
            Class::Mage => "Ember Bolt",
            Class::Cleric => "Mend Wounds",
            Class::Ranger => "Steady Shot",
        }
    }
}

// XP needed to go from level n to n+1.
fn xp_to_next(level: u32) -> u32 {
    100 * level * level
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub name: String,
    pub class: Class,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub xp: u32,
    pub gold: u32,
    pub attack: u32,
    pub defense: u32,
    pub abilities: Vec<String>,
    pub inventory: Vec<AffixedItem>,
}

impl CharacterSheet {
    pub fn new(name: String, class: Class) -> Self {
        CharacterSheet {
            name,
            class,
            level: 1,
            hp: class.base_hp(),
            max_hp: class.base_hp(),
            xp: 0,
            gold: 20,
            attack: class.base_attack(),
            defense: 11,
            abilities: vec![class.starting_ability().to_string()],
            inventory: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn apply_damage(&mut self, amount: u32) {
        self.hp = (self.hp - amount as i32).max(0);
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = (self.hp + amount as i32).min(self.max_hp);
    }

    /// Adds XP and applies any level-ups. Returns the number of levels
    /// gained so the orchestrator can fetch new-ability flavor.
    pub fn gain_xp(&mut self, amount: u32) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        while self.xp >= xp_to_next(self.level) {
            self.xp -= xp_to_next(self.level);
            self.level += 1;
            self.max_hp += 4;
            self.hp = self.max_hp; // level-up heals to full
            if self.level % 2 == 0 {
                self.attack += 1;
            } else {
                self.defense += 1;
            }
            gained += 1;
        }
        gained
    }

    pub fn add_item(&mut self, item: AffixedItem) {
        self.inventory.push(item);
    }
}
