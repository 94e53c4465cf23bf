use rand::Rng;

use crate::catalog::AffixedMonster;
use crate::character::CharacterSheet;

// Deterministic turn-based combat, fully outside the generative loop. The
// narrator only ever describes a fight after this has decided it.

const MAX_ROUNDS: u32 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct CombatOutcome {
    pub victory: bool,
    pub rounds: u32,
    pub damage_taken: u32,
    pub log: Vec<String>,
}

pub fn roll_die(rng: &mut impl Rng, sides: u32) -> u32 {
    rng.random_range(1..=sides)
}

/// Resolves a full engagement. The character's HP is mutated; the monster
/// is immutable (its remaining HP only matters inside this function).
pub fn resolve_combat(
    character: &mut CharacterSheet,
    monster: &AffixedMonster,
    rng: &mut impl Rng,
) -> CombatOutcome {
    let mut monster_hp = monster.hp as i32;
    let mut damage_taken = 0u32;
    let mut log = Vec::new();
    let mut rounds = 0;

    while rounds < MAX_ROUNDS && character.is_alive() && monster_hp > 0 {
        rounds += 1;

        let attack_roll = roll_die(rng, 20) + character.attack;
        if attack_roll > monster.defense {
            let damage = roll_die(rng, 6) + character.level;
            monster_hp -= damage as i32;
            log.push(format!(
                "Round {rounds}: you hit the {} for {damage}.",
                monster.name
            ));
        } else {
            log.push(format!("Round {rounds}: the {} evades you.", monster.name));
        }

        if monster_hp <= 0 {
            break;
        }

        let counter_roll = roll_die(rng, 20) + monster.attack;
        if counter_roll > character.defense + 10 {
            let damage = roll_die(rng, 4) + monster.difficulty as u32;
            character.apply_damage(damage);
            damage_taken += damage;
            log.push(format!(
                "Round {rounds}: the {} strikes back for {damage}.",
                monster.name
            ));
        }
    }

    let victory = monster_hp <= 0 && character.is_alive();
    if victory {
        log.push(format!("The {} is defeated.", monster.name));
    } else if !character.is_alive() {
        log.push(format!("You fall before the {}.", monster.name));
    } else {
        log.push(format!("The {} still stands as you break off.", monster.name));
    }

    CombatOutcome {
        victory,
        rounds,
        damage_taken,
        log,
    }
}
