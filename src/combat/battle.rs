//! Turn-based battle resolution
//!
//! A battle runs from `start_battle` until it has an outcome. Each
//! `handle_action` call resolves one full round: the player's action and,
//! unless the battle ended or the action was refused, the enemy's reply.
//! A finished battle stays in place until `end_battle` dismisses it.

use hecs::Entity;
use thiserror::Error;

use super::damage::{attack_damage, enemy_damage, magic_damage, Dice};
use crate::data::{stories, EnemyTemplate, Rules};
use crate::ecs::{EntityKind, Position, StatusEffect};
use crate::entities::{kind_of, remove_entity};
use crate::entities::spawner::position_of;
use crate::game::GameState;
use crate::progression::{check_level_ups, LevelUp};

/// Player command for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleAction {
    Attack,
    Magic,
    Defend,
    Run,
}

impl BattleAction {
    pub const ALL: [BattleAction; 4] = [
        BattleAction::Attack,
        BattleAction::Magic,
        BattleAction::Defend,
        BattleAction::Run,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BattleAction::Attack => "Attack",
            BattleAction::Magic => "Magic",
            BattleAction::Defend => "Defend",
            BattleAction::Run => "Run",
        }
    }
}

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory { game_clear: bool },
    Defeat,
    Fled,
}

/// Something that happened during a round, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    PlayerAttack { damage: i32 },
    PlayerMagic { damage: i32 },
    Defended,
    FleeFailed,
    Fled,
    EnemyAttack { damage: i32, guarded: bool },
    EnemyDefeated { exp: u32, gold: u32 },
    LevelUp(LevelUp),
    PlayerDefeated,
}

/// Styling hint for a battle log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Normal,
    Damage,
    Heal,
    Miss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleLine {
    pub text: String,
    pub kind: LineKind,
}

/// A refused battle command; nothing changed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("Already in a battle.")]
    AlreadyInBattle,
    #[error("There is nothing to fight here.")]
    NotAnEnemy,
    #[error("No battle in progress.")]
    NoBattle,
    #[error("Wait for your turn.")]
    NotPlayerTurn,
    #[error("The battle is already over.")]
    BattleOver,
    #[error("The battle is not over yet.")]
    BattleNotOver,
    #[error("Not enough MP... (need {needed}, have {available})")]
    InsufficientMana { needed: i32, available: i32 },
    #[error("You cannot flee from this foe!")]
    CannotFlee,
}

/// Live battle state
#[derive(Debug, Clone)]
pub struct BattleContext {
    pub entity: Entity,
    pub position: Position,
    /// Snapshot of the enemy taken at battle start
    pub enemy: EnemyTemplate,
    pub current_hp: i32,
    pub is_boss_battle: bool,
    pub is_player_turn: bool,
    /// `Some` once the battle has ended
    pub outcome: Option<BattleOutcome>,
    pub log: Vec<BattleLine>,
}

impl BattleContext {
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn enemy_hp_ratio(&self) -> f32 {
        if self.enemy.hp <= 0 {
            return 0.0;
        }
        self.current_hp as f32 / self.enemy.hp as f32
    }

    fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        self.log.push(BattleLine {
            text: text.into(),
            kind,
        });
    }
}

/// What one `handle_action` call did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub events: Vec<BattleEvent>,
    pub outcome: Option<BattleOutcome>,
}

/// Open a battle against the enemy entity
pub fn start_battle(state: &mut GameState, entity: Entity, encounter_line: &str) -> Result<(), BattleError> {
    if state.battle.is_some() {
        return Err(BattleError::AlreadyInBattle);
    }
    let Some(EntityKind::Enemy(enemy)) = kind_of(&state.entities, entity) else {
        return Err(BattleError::NotAnEnemy);
    };
    let position = position_of(&state.entities, entity).ok_or(BattleError::NotAnEnemy)?;

    log::debug!("Battle started against {} at ({}, {})", enemy.name, position.x, position.y);
    let mut ctx = BattleContext {
        entity,
        position,
        current_hp: enemy.hp,
        is_boss_battle: enemy.is_boss,
        is_player_turn: true,
        outcome: None,
        log: Vec::new(),
        enemy,
    };
    ctx.push(LineKind::Normal, encounter_line);
    state.battle = Some(ctx);
    Ok(())
}

/// Resolve one player action and the enemy's reply
pub fn handle_action(
    state: &mut GameState,
    action: BattleAction,
    rules: &Rules,
    dice: &mut impl Dice,
) -> Result<TurnReport, BattleError> {
    let GameState {
        player,
        map,
        entities,
        battle,
        ..
    } = state;
    let ctx = battle.as_mut().ok_or(BattleError::NoBattle)?;
    if ctx.is_over() {
        return Err(BattleError::BattleOver);
    }
    if !ctx.is_player_turn {
        return Err(BattleError::NotPlayerTurn);
    }

    // Refusals leave the turn with the player
    match action {
        BattleAction::Magic if player.mana.current < rules.magic_cost => {
            ctx.push(LineKind::Miss, "Not enough MP...");
            return Err(BattleError::InsufficientMana {
                needed: rules.magic_cost,
                available: player.mana.current,
            });
        }
        BattleAction::Run if ctx.is_boss_battle => {
            ctx.push(LineKind::Miss, "You cannot flee from this foe!");
            return Err(BattleError::CannotFlee);
        }
        _ => {}
    }

    ctx.is_player_turn = false;
    let mut report = TurnReport::default();

    match action {
        BattleAction::Attack => {
            let damage = attack_damage(player.attack, ctx.enemy.defense, dice);
            ctx.current_hp = (ctx.current_hp - damage).max(0);
            ctx.push(LineKind::Damage, format!("You attack! {} damage!", damage));
            report.events.push(BattleEvent::PlayerAttack { damage });
        }
        BattleAction::Magic => {
            player.mana.spend(rules.magic_cost);
            let damage = magic_damage(player.attack, dice);
            ctx.current_hp = (ctx.current_hp - damage).max(0);
            ctx.push(LineKind::Damage, format!("Magic strike! {} damage!", damage));
            report.events.push(BattleEvent::PlayerMagic { damage });
        }
        BattleAction::Defend => {
            player.status.add_effect(StatusEffect::Defending);
            ctx.push(LineKind::Normal, "You brace yourself.");
            report.events.push(BattleEvent::Defended);
        }
        BattleAction::Run => {
            if dice.chance(rules.flee_chance) {
                ctx.push(LineKind::Normal, "You got away!");
                ctx.outcome = Some(BattleOutcome::Fled);
                report.events.push(BattleEvent::Fled);
                report.outcome = ctx.outcome;
                log::debug!("Fled from {}", ctx.enemy.name);
                return Ok(report);
            }
            ctx.push(LineKind::Miss, "Couldn't escape!");
            report.events.push(BattleEvent::FleeFailed);
        }
    }

    if ctx.current_hp <= 0 {
        let (exp, gold) = (ctx.enemy.exp, ctx.enemy.gold);
        ctx.push(LineKind::Heal, "Victory!");
        ctx.push(LineKind::Normal, format!("Gained {} EXP and {} G!", exp, gold));
        report.events.push(BattleEvent::EnemyDefeated { exp, gold });

        player.experience.add_xp(exp);
        player.add_gold(gold);
        for level in check_level_ups(player) {
            ctx.push(LineKind::Heal, format!("You reached level {}!", level.level));
            report.events.push(BattleEvent::LevelUp(level));
        }

        remove_entity(map, entities, ctx.entity);
        let game_clear = ctx.is_boss_battle;
        ctx.outcome = Some(BattleOutcome::Victory { game_clear });
        report.outcome = ctx.outcome;
        log::info!("Defeated {} (boss: {})", ctx.enemy.name, game_clear);
        return Ok(report);
    }

    // Enemy turn
    let rolled = enemy_damage(ctx.enemy.attack, player.level(), player.defense, dice);
    let (damage, guarded) = player.status.absorb_hit(rolled);
    player.health.take_damage(damage);
    ctx.push(
        LineKind::Damage,
        format!("{} attacks! You take {} damage!", ctx.enemy.name, damage),
    );
    report.events.push(BattleEvent::EnemyAttack { damage, guarded });

    if player.health.is_dead() {
        ctx.push(LineKind::Damage, "Defeat...");
        ctx.push(LineKind::Normal, "Return to town and regroup...");
        player.restore_full();
        player.position = map.start_pos;
        ctx.outcome = Some(BattleOutcome::Defeat);
        report.events.push(BattleEvent::PlayerDefeated);
        report.outcome = ctx.outcome;
        log::info!("Player defeated by {}", ctx.enemy.name);
        return Ok(report);
    }

    ctx.is_player_turn = true;
    Ok(report)
}

/// Dismiss a finished battle
pub fn end_battle(state: &mut GameState) -> Result<BattleOutcome, BattleError> {
    let ctx = state.battle.as_ref().ok_or(BattleError::NoBattle)?;
    let outcome = ctx.outcome.ok_or(BattleError::BattleNotOver)?;
    state.player.status.clear();
    state.battle = None;
    log::debug!("Battle dismissed: {:?}", outcome);
    Ok(outcome)
}

/// Lines to narrate after dismissal
pub fn closing_story(outcome: BattleOutcome, leveled: bool) -> Vec<&'static str> {
    match outcome {
        BattleOutcome::Victory { game_clear: true } => stories::GAME_CLEAR.to_vec(),
        BattleOutcome::Victory { .. } => {
            let mut lines = stories::VICTORY.to_vec();
            if leveled {
                lines.extend_from_slice(stories::LEVEL_UP);
            }
            lines
        }
        BattleOutcome::Defeat => stories::DEFEAT.to_vec(),
        BattleOutcome::Fled => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::damage::tests::FixedDice;
    use crate::data::enemies::default_enemy_templates;
    use crate::entities::{get_entity_at, spawn_enemy};
    use crate::world::{Map, TileType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn template(name: &str) -> EnemyTemplate {
        default_enemy_templates().find(name).unwrap().clone()
    }

    fn state_with(enemy: EnemyTemplate) -> (GameState, Entity) {
        let mut map = Map::new(32, 32);
        map.start_pos = Position::new(16, 16);
        let mut state = GameState::new(Default::default(), map, hecs::World::new());
        let entity = spawn_enemy(&mut state.map, &mut state.entities, Position::new(20, 20), enemy);
        state.player.position = Position::new(20, 20);
        (state, entity)
    }

    fn battle(state: &GameState) -> &BattleContext {
        state.battle.as_ref().unwrap()
    }

    #[test]
    fn test_start_battle() {
        let (mut state, entity) = state_with(template("Slime"));
        start_battle(&mut state, entity, "A red light has caught sight of you.").unwrap();

        let ctx = battle(&state);
        assert_eq!(ctx.current_hp, 30);
        assert!(ctx.is_player_turn);
        assert!(!ctx.is_boss_battle);
        assert!(ctx.outcome.is_none());
        assert_eq!(ctx.log.len(), 1);

        assert_eq!(start_battle(&mut state, entity, ""), Err(BattleError::AlreadyInBattle));
    }

    #[test]
    fn test_start_battle_rejects_non_enemy() {
        let (mut state, _) = state_with(template("Slime"));
        let chest = crate::entities::spawn_treasure(
            &mut state.map,
            &mut state.entities,
            Position::new(1, 1),
            60,
        );
        assert_eq!(start_battle(&mut state, chest, ""), Err(BattleError::NotAnEnemy));
        assert!(state.battle.is_none());
    }

    #[test]
    fn test_slime_falls_on_fourth_attack() {
        let (mut state, entity) = state_with(template("Slime"));
        let rules = Rules::default();
        let mut dice = FixedDice::zero();
        start_battle(&mut state, entity, "").unwrap();

        for expected in [22, 14, 6] {
            let report = handle_action(&mut state, BattleAction::Attack, &rules, &mut dice).unwrap();
            assert_eq!(report.outcome, None);
            assert_eq!(battle(&state).current_hp, expected);
            assert!(battle(&state).is_player_turn);
        }

        let report = handle_action(&mut state, BattleAction::Attack, &rules, &mut dice).unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Victory { game_clear: false }));
        assert_eq!(battle(&state).current_hp, 0);
        assert_eq!(state.player.experience.current_xp, 20);
        assert_eq!(state.player.gold, 115);
        assert!(!report.events.iter().any(|e| matches!(e, BattleEvent::EnemyAttack { .. })));

        // Enemy removed from grid and collection
        assert_eq!(state.map.get_tile(20, 20), Some(TileType::Empty));
        assert_eq!(get_entity_at(&state.entities, Position::new(20, 20)), None);

        assert_eq!(
            handle_action(&mut state, BattleAction::Attack, &rules, &mut dice),
            Err(BattleError::BattleOver)
        );
    }

    #[test]
    fn test_enemy_reply_damage() {
        let (mut state, entity) = state_with(template("Slime"));
        let rules = Rules::default();
        let mut dice = FixedDice::zero();
        start_battle(&mut state, entity, "").unwrap();

        handle_action(&mut state, BattleAction::Attack, &rules, &mut dice).unwrap();
        // Slime attack 5 vs defense 5 hits the floor of 5
        assert_eq!(state.player.health.current, 95);
    }

    #[test]
    fn test_magic_without_mana_is_refused() {
        let (mut state, entity) = state_with(template("Slime"));
        let rules = Rules::default();
        let mut dice = FixedDice::zero();
        state.player.mana.current = 5;
        start_battle(&mut state, entity, "").unwrap();

        let result = handle_action(&mut state, BattleAction::Magic, &rules, &mut dice);
        assert_eq!(result, Err(BattleError::InsufficientMana { needed: 10, available: 5 }));
        assert_eq!(state.player.mana.current, 5);
        assert_eq!(state.player.health.current, 100);
        assert!(battle(&state).is_player_turn);
        assert_eq!(battle(&state).current_hp, 30);
    }

    #[test]
    fn test_magic_spends_mana() {
        let (mut state, entity) = state_with(template("Goblin"));
        let rules = Rules::default();
        let mut dice = FixedDice::zero();
        start_battle(&mut state, entity, "").unwrap();

        handle_action(&mut state, BattleAction::Magic, &rules, &mut dice).unwrap();
        assert_eq!(state.player.mana.current, 40);
        assert_eq!(battle(&state).current_hp, 35);
    }

    #[test]
    fn test_defend_halves_one_hit() {
        let (mut state, entity) = state_with(template("Orc"));
        let rules = Rules::default();
        let mut dice = FixedDice::zero();
        start_battle(&mut state, entity, "").unwrap();

        let report = handle_action(&mut state, BattleAction::Defend, &rules, &mut dice).unwrap();
        // Orc attack 12 - defense 5 = 7, halved to 3
        assert!(report.events.contains(&BattleEvent::EnemyAttack { damage: 3, guarded: true }));
        assert_eq!(state.player.health.current, 97);
        assert!(!state.player.status.has_effect(StatusEffect::Defending));

        handle_action(&mut state, BattleAction::Attack, &rules, &mut dice).unwrap();
        assert_eq!(state.player.health.current, 90);
    }

    #[test]
    fn test_boss_flee_always_fails() {
        let (mut state, entity) = state_with(template("Lord of Darkness"));
        let rules = Rules::default();
        start_battle(&mut state, entity, "").unwrap();
        assert!(battle(&state).is_boss_battle);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = handle_action(&mut state, BattleAction::Run, &rules, &mut rng);
            assert_eq!(result, Err(BattleError::CannotFlee));
        }
        let mut always = FixedDice::zero();
        assert_eq!(
            handle_action(&mut state, BattleAction::Run, &rules, &mut always),
            Err(BattleError::CannotFlee)
        );
        assert_eq!(state.player.health.current, 100);
        assert!(battle(&state).outcome.is_none());
    }

    #[test]
    fn test_flee() {
        let (mut state, entity) = state_with(template("Goblin"));
        let rules = Rules::default();
        start_battle(&mut state, entity, "").unwrap();

        let mut fail = FixedDice { variance: 0, chance: false };
        let report = handle_action(&mut state, BattleAction::Run, &rules, &mut fail).unwrap();
        assert_eq!(report.events[0], BattleEvent::FleeFailed);
        assert!(state.player.health.current < 100);

        let mut succeed = FixedDice::zero();
        let report = handle_action(&mut state, BattleAction::Run, &rules, &mut succeed).unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Fled));
        // Enemy stays on the map
        assert_eq!(state.map.get_tile(20, 20), Some(TileType::Enemy));
    }

    #[test]
    fn test_defeat_revives_at_start() {
        let (mut state, entity) = state_with(template("Dark Knight"));
        let rules = Rules::default();
        let mut dice = FixedDice::zero();
        state.player.health.current = 5;
        state.player.mana.current = 0;
        state.player.experience.current_xp = 40;
        start_battle(&mut state, entity, "").unwrap();

        let report = handle_action(&mut state, BattleAction::Defend, &rules, &mut dice).unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Defeat));
        assert_eq!(state.player.health.current, 100);
        assert_eq!(state.player.mana.current, 50);
        assert_eq!(state.player.position, Position::new(16, 16));
        assert_eq!(state.player.experience.current_xp, 40);
        assert_eq!(state.player.gold, 100);
    }

    #[test]
    fn test_hp_never_negative() {
        let rules = Rules::default();
        for seed in 0..30 {
            let (mut state, entity) = state_with(template("Dark Knight"));
            let mut rng = StdRng::seed_from_u64(seed);
            start_battle(&mut state, entity, "").unwrap();
            while !battle(&state).is_over() {
                let _ = handle_action(&mut state, BattleAction::Attack, &rules, &mut rng);
                assert!(battle(&state).current_hp >= 0);
                assert!(state.player.health.current >= 0);
            }
        }
    }

    #[test]
    fn test_boss_victory_clears_game() {
        let (mut state, entity) = state_with(template("Lord of Darkness"));
        let rules = Rules::default();
        let mut dice = FixedDice::zero();
        state.player.attack = 500;
        start_battle(&mut state, entity, "").unwrap();

        let report = handle_action(&mut state, BattleAction::Attack, &rules, &mut dice).unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Victory { game_clear: true }));
        // 300 exp crosses two thresholds
        let levels = report.events.iter().filter(|e| matches!(e, BattleEvent::LevelUp(_))).count();
        assert_eq!(levels, 2);
        assert_eq!(state.player.level(), 3);
    }

    #[test]
    fn test_end_battle() {
        let (mut state, entity) = state_with(template("Slime"));
        let rules = Rules::default();
        let mut dice = FixedDice::zero();

        assert_eq!(end_battle(&mut state), Err(BattleError::NoBattle));
        start_battle(&mut state, entity, "").unwrap();
        assert_eq!(end_battle(&mut state), Err(BattleError::BattleNotOver));

        handle_action(&mut state, BattleAction::Defend, &rules, &mut dice).unwrap();
        state.player.status.add_effect(StatusEffect::Defending);
        let mut flee = FixedDice::zero();
        handle_action(&mut state, BattleAction::Run, &rules, &mut flee).unwrap();

        assert_eq!(end_battle(&mut state), Ok(BattleOutcome::Fled));
        assert!(state.battle.is_none());
        assert!(state.player.status.is_empty());
    }
}
