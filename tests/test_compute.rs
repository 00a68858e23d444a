use plane_battle::assets::SpriteSheet;
use plane_battle::compute::*;
use plane_battle::entities::*;
use plane_battle::player::Players;
use plane_battle::ports::{Background, Silence};
use plane_battle::tuning::Tuning;
use plane_battle::vector::Vector2;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_match() -> (Players, World) {
    let sheet = SpriteSheet::default();
    let tuning = Tuning::default();
    (Players::new(&sheet, &tuning), World::new(sheet, tuning))
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn random_direction(rng: &mut StdRng) -> Direction {
    let mut direction = Direction::NONE;
    for bit in [
        Direction::FORWARD,
        Direction::BACKWARD,
        Direction::LEFT,
        Direction::RIGHT,
    ] {
        if rng.gen_bool(0.3) {
            direction |= bit;
        }
    }
    direction
}

// ── World::new ────────────────────────────────────────────────────────────────

#[test]
fn new_world_starts_with_a_full_wave() {
    let (_, world) = make_match();
    assert_eq!(world.enemies.len(), 3);
    assert_eq!(world.lives, MatchState::new(2));
    assert_eq!(world.frame, 0);
    assert!(world.bullets.is_empty());

    let positions = world.wave_positions().unwrap();
    assert_eq!(positions[0], Vector2::new(950.0, 70.0));
    assert_eq!(positions[1], Vector2::new(350.0, 70.0));
    assert_eq!(positions[2], Vector2::new(1550.0, 70.0));
}

#[test]
fn wave_holds_the_spawned_ids_in_order() {
    let (_, world) = make_match();
    let Wave(ids) = world.wave().unwrap();
    let spawned: Vec<EntityId> = world.enemies.iter().map(|e| e.id).collect();
    assert_eq!(ids.to_vec(), spawned);
}

#[test]
fn tick_increments_frame() {
    let (mut players, mut world) = make_match();
    world.tick(&mut players, &mut Silence);
    assert_eq!(world.frame, 1);
}

// ── tick — player bullet ↔ enemy ─────────────────────────────────────────────

#[test]
fn player_bullet_on_enemy_costs_enemy_a_life() {
    let (mut players, mut world) = make_match();
    let first = world.enemies[0].id;
    let bullet = world
        .bullets
        .spawn(Vector2::new(950.0, 70.0), Faction::Player);

    world.tick(&mut players, &mut Silence);

    assert!(world.enemy(first).unwrap().hit);
    assert_eq!(world.lives.enemy_lives, 1);
    assert!(world.bullets.get(bullet).is_none());
    // The hit plane stays on the field.
    assert_eq!(world.enemies.len(), 3);
}

#[test]
fn one_bullet_scores_at_most_once() {
    let (mut players, mut world) = make_match();
    // Stack two enemies on the bullet.
    world.enemies[1].body.position = Vector2::new(950.0, 70.0);
    world
        .bullets
        .spawn(Vector2::new(950.0, 70.0), Faction::Player);

    world.tick(&mut players, &mut Silence);

    assert_eq!(world.lives.enemy_lives, 1);
    assert_eq!(world.enemies.iter().filter(|e| e.hit).count(), 1);
}

#[test]
fn enemy_bullets_do_not_hit_enemies() {
    let (mut players, mut world) = make_match();
    world
        .bullets
        .spawn(Vector2::new(950.0, 70.0), Faction::Enemy);

    world.tick(&mut players, &mut Silence);

    assert_eq!(world.lives.enemy_lives, 2);
    assert!(world.enemies.iter().all(|e| !e.hit));
}

#[test]
fn last_enemy_life_ends_the_match_for_enemies() {
    let (mut players, mut world) = make_match();
    world.lives.enemy_lives = 0;
    let first = world.enemies[0].id;
    world
        .bullets
        .spawn(Vector2::new(950.0, 70.0), Faction::Player);

    world.tick(&mut players, &mut Silence);

    assert_eq!(world.lives.enemy_lives, LOST);
    assert_eq!(world.lives.loser(), Some(Side::Enemies));
    assert!(world.bullets.is_empty());
    assert_eq!(world.background(), Background::EnemiesLost);

    // The whole wave stays; the leader is parked back on its anchor.
    assert_eq!(world.enemies.len(), 3);
    let leader = world.enemy(first).unwrap();
    assert_eq!(leader.position(), Vector2::new(950.0, 70.0));
    assert_eq!(leader.body.velocity, Vector2::ZERO);
    assert!(world.wave_positions().is_ok());

    // And nothing moves afterwards.
    let before = world.enemies.clone();
    world.tick(&mut players, &mut Silence);
    assert_eq!(world.enemies, before);
}

#[test]
fn no_new_wave_after_enemies_lost() {
    let (mut players, mut world) = make_match();
    world.lives.enemy_lives = LOST;
    world.enemies.clear();

    world.tick(&mut players, &mut Silence);

    assert!(world.enemies.is_empty());
}

// ── tick — enemy bullet ↔ player ─────────────────────────────────────────────

#[test]
fn enemy_bullet_on_player_costs_a_life() {
    let (mut players, mut world) = make_match();
    // Falls onto player one's anchor this tick.
    world
        .bullets
        .spawn(Vector2::new(100.0, 897.0), Faction::Enemy);

    world.tick(&mut players, &mut Silence);

    assert_eq!(world.lives.player_lives, 1);
    assert!(world.bullets.is_empty());
    assert!(!players[PlayerSlot::One].is_exploding());
}

#[test]
fn last_player_life_explodes_and_freezes_the_counter() {
    let (mut players, mut world) = make_match();
    world.lives.player_lives = 0;
    world
        .bullets
        .spawn(Vector2::new(100.0, 897.0), Faction::Enemy);

    world.tick(&mut players, &mut Silence);

    assert_eq!(
        players[PlayerSlot::One].explosion,
        ExplosionState::Exploding { frame: 0 }
    );
    assert_eq!(world.lives.player_lives, LOST);
    assert_eq!(world.background(), Background::PlayersLost);

    // Further hits change nothing.
    world
        .bullets
        .spawn(Vector2::new(1800.0, 897.0), Faction::Enemy);
    world.tick(&mut players, &mut Silence);
    assert_eq!(world.lives.player_lives, LOST);
    assert!(!players[PlayerSlot::Two].is_exploding());
}

#[test]
fn player_bullets_do_not_hit_players() {
    let (mut players, mut world) = make_match();
    world
        .bullets
        .spawn(Vector2::new(100.0, 903.0), Faction::Player);

    world.tick(&mut players, &mut Silence);

    assert_eq!(world.lives.player_lives, 2);
}

// ── tick — ramming ───────────────────────────────────────────────────────────

#[test]
fn enemy_contact_shoots_player_down_without_costing_lives() {
    let (mut players, mut world) = make_match();
    players[PlayerSlot::Two].body.position = Vector2::new(1200.0, 500.0);
    world.enemies[0].body.position = Vector2::new(1200.0, 500.0);

    world.tick(&mut players, &mut Silence);

    let two = &players[PlayerSlot::Two];
    assert!(two.is_exploding());
    assert_eq!(two.position(), two.anchor);
    assert_eq!(two.explosion_position, Vector2::new(1200.0, 500.0));
    assert_eq!(world.lives, MatchState::new(2));
}

// ── tick — waves ─────────────────────────────────────────────────────────────

#[test]
fn empty_field_spawns_a_wave_at_the_anchors() {
    let (mut players, mut world) = make_match();
    let old = world.wave().unwrap();
    world.enemies.clear();
    world.lives.enemy_lives = 1;

    world.tick(&mut players, &mut Silence);

    assert_eq!(world.enemies.len(), 3);
    let positions: Vec<Vector2> = world.enemies.iter().map(|e| e.position()).collect();
    assert_eq!(
        positions,
        vec![
            Vector2::new(950.0, 70.0),
            Vector2::new(350.0, 70.0),
            Vector2::new(1550.0, 70.0),
        ]
    );
    assert_ne!(world.wave().unwrap(), old);
    assert!(world.enemies.iter().all(|e| !e.hit));
}

#[test]
fn incomplete_wave_is_an_invariant_violation() {
    let (_, mut world) = make_match();
    world.enemies.remove(1);
    assert!(world.wave_positions().is_err());

    let before = world.enemies.clone();
    let result = world.place_wave([Vector2::ZERO; 3]);
    assert!(matches!(
        result,
        Err(plane_battle::error::GameError::InvariantViolation { .. })
    ));
    assert_eq!(world.enemies, before);
}

// ── tick — enemy AI ──────────────────────────────────────────────────────────

#[test]
fn enemies_sweep_every_tick() {
    let (mut players, mut world) = make_match();
    world.tick(&mut players, &mut Silence);
    assert_eq!(world.enemies[0].position(), Vector2::new(953.0, 70.0));
    assert_eq!(world.enemies[0].sweep, SweepDirection::Right);
}

#[test]
fn enemies_open_fire_once_cooled_down() {
    let (mut players, mut world) = make_match();
    // 150 → 4 takes 146 ticks.
    for _ in 0..145 {
        world.tick(&mut players, &mut Silence);
    }
    assert!(world.bullets.is_empty());

    world.tick(&mut players, &mut Silence);
    assert_eq!(world.bullets.len(), 3);
    assert!(world.bullets.iter().all(|b| b.faction == Faction::Enemy));
    assert!(world.enemies.iter().all(|e| e.shoot_cooldown == 100));
}

#[test]
fn enemy_ai_frozen_once_match_is_over() {
    let (mut players, mut world) = make_match();
    world.lives.player_lives = LOST;
    let before = world.enemies.clone();

    world.tick(&mut players, &mut Silence);

    assert_eq!(world.enemies, before);
}

// ── tick — cull ──────────────────────────────────────────────────────────────

#[test]
fn bullets_leaving_the_field_are_culled() {
    let (mut players, mut world) = make_match();
    let high = world.bullets.spawn(Vector2::new(600.0, 36.0), Faction::Player);
    let low = world.bullets.spawn(Vector2::new(600.0, 958.0), Faction::Enemy);
    let inside = world.bullets.spawn(Vector2::new(600.0, 500.0), Faction::Player);

    world.tick(&mut players, &mut Silence);

    assert!(world.bullets.get(high).is_none());
    assert!(world.bullets.get(low).is_none());
    assert_eq!(
        world.bullets.get(inside).unwrap().body.position,
        Vector2::new(600.0, 497.0)
    );
}

#[test]
fn enemies_outside_the_field_are_culled() {
    let (mut players, mut world) = make_match();
    world.enemies[2].body.position.y = 990.0;

    world.tick(&mut players, &mut Silence);

    assert_eq!(world.enemies.len(), 2);
}

#[test]
fn decided_match_clears_all_bullets() {
    let (mut players, mut world) = make_match();
    world.lives.player_lives = LOST;
    world.bullets.spawn(Vector2::new(600.0, 500.0), Faction::Player);
    world.bullets.spawn(Vector2::new(600.0, 500.0), Faction::Enemy);

    world.tick(&mut players, &mut Silence);

    assert!(world.bullets.is_empty());
}

// ── background ───────────────────────────────────────────────────────────────

#[test]
fn background_follows_player_lives() {
    let (_, mut world) = make_match();
    let cases = [
        (2, Background::Lives2),
        (1, Background::Lives1),
        (0, Background::Lives0),
        (LOST, Background::PlayersLost),
    ];
    for (lives, expected) in cases {
        world.lives.player_lives = lives;
        assert_eq!(world.background(), expected, "player lives {lives}");
    }
}

#[test]
fn enemy_defeat_outranks_player_lives_in_background() {
    let (_, mut world) = make_match();
    world.lives.enemy_lives = LOST;
    for lives in [2, 1, 0, LOST] {
        world.lives.player_lives = lives;
        assert_eq!(world.background(), Background::EnemiesLost);
    }
}

// ── properties ────────────────────────────────────────────────────────────────

#[test]
fn lives_never_increase_and_stop_at_lost() {
    let mut rng = seeded_rng();
    let (mut players, mut world) = make_match();

    for _ in 0..5_000 {
        let before = world.lives;

        for slot in PlayerSlot::ALL {
            let direction = random_direction(&mut rng);
            players[slot].steer(direction, world.tuning());
            players[slot].update(0.016);
            if rng.gen_bool(0.5) {
                players[slot].shoot(&mut world.bullets);
            }
        }
        // Rain some bullets of either side into the field.
        if rng.gen_bool(0.2) {
            let x = rng.gen_range(0.0..1920.0);
            let y = rng.gen_range(40.0..950.0);
            let faction = if rng.gen_bool(0.5) {
                Faction::Player
            } else {
                Faction::Enemy
            };
            world.bullets.spawn(Vector2::new(x, y), faction);
        }
        world.tick(&mut players, &mut Silence);

        for (old, new) in [
            (before.player_lives, world.lives.player_lives),
            (before.enemy_lives, world.lives.enemy_lives),
        ] {
            assert!(new <= old, "lives went up: {old} -> {new}");
            assert!(new >= LOST);
            if old == LOST {
                assert_eq!(new, LOST);
            }
        }
        assert!(world
            .bullets
            .iter()
            .all(|b| (35.0..=960.0).contains(&b.body.position.y)));
    }
}

#[test]
fn players_stay_inside_their_flight_band() {
    let mut rng = seeded_rng();
    let (mut players, world) = make_match();
    let tuning = *world.tuning();

    for _ in 0..2_000 {
        for slot in PlayerSlot::ALL {
            let player = &mut players[slot];
            player.steer(random_direction(&mut rng), &tuning);
            // Clamping happens on the next steer, so check before integrating.
            let p = player.position();
            assert!((0.0..=tuning.arena.width).contains(&p.x));
            assert!((tuning.player.min_y..=tuning.player.max_y).contains(&p.y));
            player.update(0.05);
        }
    }
}
