/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::entities::{
    Bullet, Enemy, EnemyKind, Explosion, GameState, GameStatus, LifeIcon, Player,
};

// ── Tuning constants ─────────────────────────────────────────────────────────

/// Frames the post-hit fade-in lasts; collision checks are skipped throughout.
pub const RESPAWN_FRAMES: u32 = 250;

/// Frames a deployed shield lasts (6 s at 60 FPS).
pub const SHIELD_FRAMES: u32 = 360;

/// Enemies descend one row every this many frames.
pub const ENEMY_FALL_INTERVAL: u64 = 8;

/// Enemy bullets descend one row every this many frames (player bullets
/// climb one row every frame, preserving the original speed ratio).
pub const ENEMY_BULLET_INTERVAL: u64 = 2;

/// Length of the explosion animation.
pub const EXPLOSION_FRAMES: u32 = 60;

/// Last score at which a fresh wave still spawns as level 1.
pub const LEVEL2_SCORE: u32 = 50;

/// Per-frame enemy fire odds are 1/probability.
pub const LEVEL1_PROBABILITY: u32 = 200;
pub const LEVEL2_PROBABILITY: u32 = 100;

pub const START_LIVES: u32 = 3;
pub const START_SHIELDS: u32 = 3;

/// Columns moved per player step.
const PLAYER_STEP: i32 = 2;

// ── Play-field geometry ──────────────────────────────────────────────────────

/// Left edge of the player/enemy corridor.  The play area keeps a dead
/// margin of about one seventh of the screen on the left, leaving room for
/// the life icons underneath.
pub fn left_limit(width: u16) -> i32 {
    (width / 7) as i32
}

/// Rightmost column the player may occupy (inside the border).
pub fn right_limit(width: u16) -> i32 {
    width as i32 - 2
}

/// Enemies spawn with y inside `[2, spawn_band_bottom)` — the upper half of
/// the play area — and wrap back to row 2 after falling off the bottom.
pub fn spawn_band_bottom(height: u16) -> i32 {
    (height / 2) as i32
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for the given terminal dimensions.
///
/// The player spawns through the respawn path, so play opens with the same
/// fade-in grace period that follows a life loss.  Collections start empty;
/// the empty enemy list makes the first wave spawn on the first tick.
pub fn init_state(width: u16, height: u16) -> GameState {
    let icon_y = height as i32 - 3;
    let life_icons = (0..START_LIVES)
        .map(|i| LifeIcon { x: 2 + i as i32 * 2, y: icon_y })
        .collect();

    GameState {
        player: Player {
            x: (width / 2) as i32,
            y: height as i32 - 4, // one row higher to fit the 2-row sprite
            respawning: 1,
            shield: 0,
        },
        enemies: Vec::new(),
        enemy_bullets: Vec::new(),
        player_bullets: Vec::new(),
        explosions: Vec::new(),
        life_icons,
        score: 0,
        lives: START_LIVES,
        level: 1,
        probability: LEVEL1_PROBABILITY,
        shield_stock: START_SHIELDS,
        misses: 0,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let new_x = (state.player.x - PLAYER_STEP).max(left_limit(state.width));
    GameState {
        player: Player {
            x: new_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

pub fn move_player_right(state: &GameState) -> GameState {
    let new_x = (state.player.x + PLAYER_STEP).min(right_limit(state.width));
    GameState {
        player: Player {
            x: new_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire a bullet from the tip of the player's ship.
pub fn player_shoot(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let mut player_bullets = state.player_bullets.clone();
    player_bullets.push(Bullet {
        x: state.player.x,
        y: state.player.y - 1,
    });
    GameState {
        player_bullets,
        ..state.clone()
    }
}

/// Deploy one shield from the stock, granting SHIELD_FRAMES of immunity.
/// Redeploying while a shield is live restarts the timer.
pub fn deploy_shield(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver || state.shield_stock == 0 {
        return state.clone();
    }
    GameState {
        player: Player {
            shield: 1,
            ..state.player.clone()
        },
        shield_stock: state.shield_stock - 1,
        ..state.clone()
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

/// Recenter the player and start the fade-in counter.
fn respawn(player: &Player, width: u16, height: u16) -> Player {
    Player {
        x: (width / 2) as i32,
        y: height as i32 - 4,
        respawning: 1,
        shield: player.shield,
    }
}

/// True if a bullet at (bx, by) lands inside the 3-wide, 2-tall ship box
/// anchored at (sx, sy).
fn hits_ship(bx: i32, by: i32, sx: i32, sy: i32) -> bool {
    (bx - sx).abs() <= 1 && (by == sy || by == sy + 1)
}

/// Spawn one wave of `count` enemies of `kind`, uniformly placed inside the
/// spawn band.
fn spawn_wave(
    enemies: &mut Vec<Enemy>,
    count: u32,
    kind: EnemyKind,
    width: u16,
    height: u16,
    rng: &mut impl Rng,
) {
    // Degenerate terminals must still yield non-empty ranges
    let lo_x = left_limit(width) + 1;
    let hi_x = right_limit(width).max(lo_x + 1);
    let hi_y = spawn_band_bottom(height).max(3);
    for _ in 0..count {
        enemies.push(Enemy {
            x: rng.gen_range(lo_x..hi_x),
            y: rng.gen_range(2..hi_y),
            kind: kind.clone(),
        });
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// After game over the field stays alive — enemies keep falling, wrapping
/// and respawning in waves behind the overlay — but nothing fires, nothing
/// collides, and the miss counter freezes.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let frame = state.frame + 1;
    let playing = state.status == GameStatus::Playing;

    // ── 1. Move bullets ──────────────────────────────────────────────────────
    let play_bottom = state.height as i32 - 3; // last row inside the border

    let mut player_bullets: Vec<Bullet> = state
        .player_bullets
        .iter()
        .filter_map(|b| {
            let new_y = b.y - 1;
            if new_y < 2 {
                None
            } else {
                Some(Bullet { y: new_y, ..*b })
            }
        })
        .collect();

    let mut enemy_bullets: Vec<Bullet> = state
        .enemy_bullets
        .iter()
        .filter_map(|b| {
            let new_y = if frame % ENEMY_BULLET_INTERVAL == 0 {
                b.y + 1
            } else {
                b.y
            };
            if new_y > play_bottom {
                None
            } else {
                Some(Bullet { y: new_y, ..*b })
            }
        })
        .collect();

    // ── 2. Enemies descend; wrap past the bottom back to the top band ───────
    let mut misses = state.misses;
    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| {
            let new_y = if frame % ENEMY_FALL_INTERVAL == 0 {
                e.y + 1
            } else {
                e.y
            };
            if new_y >= state.height as i32 - 2 {
                // Slipped past the player — reappear at the top
                if playing {
                    misses += 1;
                }
                Enemy { y: 2, ..e.clone() }
            } else {
                Enemy { y: new_y, ..e.clone() }
            }
        })
        .collect();

    // ── 3. Spawn a fresh wave when the field is clear ────────────────────────
    let mut level = state.level;
    let mut probability = state.probability;
    if enemies.is_empty() {
        if state.score <= LEVEL2_SCORE {
            let count = rng.gen_range(5..15);
            spawn_wave(&mut enemies, count, EnemyKind::Scout, state.width, state.height, rng);
        } else {
            level = 2;
            probability = LEVEL2_PROBABILITY;
            let count = rng.gen_range(15..25);
            spawn_wave(&mut enemies, count, EnemyKind::Raider, state.width, state.height, rng);
        }
    }

    // ── 4. Enemies randomly shoot ────────────────────────────────────────────
    if playing {
        for enemy in &enemies {
            // Muzzle sits just below the 2-row sprite; holds fire when that
            // would poke past the bottom border
            if enemy.y + 2 > play_bottom {
                continue;
            }
            if rng.gen_ratio(1, probability) {
                enemy_bullets.push(Bullet {
                    x: enemy.x,
                    y: enemy.y + 2,
                });
            }
        }
    }

    // ── 5. Collision: player bullets ↔ enemies ───────────────────────────────
    let mut explosions = state.explosions.clone();
    let mut score_gain: u32 = 0;

    if playing {
        let mut killed_enemies: Vec<usize> = Vec::new();
        let mut used_bullets: Vec<usize> = Vec::new();

        for (bi, bullet) in player_bullets.iter().enumerate() {
            for (ei, enemy) in enemies.iter().enumerate() {
                if hits_ship(bullet.x, bullet.y, enemy.x, enemy.y)
                    && !killed_enemies.contains(&ei)
                {
                    killed_enemies.push(ei);
                    used_bullets.push(bi);
                    explosions.push(Explosion { x: enemy.x, y: enemy.y, frame: 0 });
                    score_gain += 1;
                    break;
                }
            }
        }

        enemies = enemies
            .iter()
            .enumerate()
            .filter(|(i, _)| !killed_enemies.contains(i))
            .map(|(_, e)| e.clone())
            .collect();

        player_bullets = player_bullets
            .iter()
            .enumerate()
            .filter(|(i, _)| !used_bullets.contains(i))
            .map(|(_, b)| b.clone())
            .collect();
    }

    // ── 6. Collision: enemy bullets / enemy ships ↔ player ───────────────────
    // Skipped entirely while the respawn fade or a shield is active.
    let mut player = state.player.clone();
    let mut lives = state.lives;
    let mut life_icons = state.life_icons.clone();
    let mut shield_stock = state.shield_stock;
    let mut status = state.status.clone();

    let vulnerable = playing && player.respawning == 0 && player.shield == 0;
    if vulnerable {
        let mut hit = false;

        if let Some(bi) = enemy_bullets
            .iter()
            .position(|b| hits_ship(b.x, b.y, player.x, player.y))
        {
            enemy_bullets.remove(bi);
            hit = true;
        } else if let Some(ei) = enemies
            .iter()
            .position(|e| (e.x - player.x).abs() <= 2 && (e.y - player.y).abs() <= 1)
        {
            enemies.remove(ei);
            hit = true;
        }

        if hit {
            explosions.push(Explosion { x: player.x, y: player.y, frame: 0 });
            if lives > 0 {
                lives -= 1;
                life_icons.pop();
                player = respawn(&player, state.width, state.height);
            } else {
                // Out of lives — freeze shields and level behind the overlay
                status = GameStatus::GameOver;
                shield_stock = 0;
                level = 0;
            }
        }
    }

    // ── 7. Countdown timers ──────────────────────────────────────────────────
    if status == GameStatus::Playing {
        if player.respawning > 0 {
            player.respawning += 1;
            if player.respawning > RESPAWN_FRAMES {
                player.respawning = 0;
            }
        }
        if player.shield > 0 {
            player.shield += 1;
            if player.shield > SHIELD_FRAMES {
                player.shield = 0;
            }
        }
    }

    let explosions: Vec<Explosion> = explosions
        .iter()
        .filter_map(|e| {
            let f = e.frame + 1;
            if f < EXPLOSION_FRAMES {
                Some(Explosion { frame: f, ..*e })
            } else {
                None
            }
        })
        .collect();

    GameState {
        player,
        enemies,
        enemy_bullets,
        player_bullets,
        explosions,
        life_icons,
        score: state.score + score_gain,
        lives,
        level,
        probability,
        shield_stock,
        misses,
        status,
        frame,
        width: state.width,
        height: state.height,
    }
}
