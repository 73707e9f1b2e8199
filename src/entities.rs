/// All game entity types — pure data, no logic.

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyKind {
    /// Level-1 ship.
    Scout,
    /// Level-2 ship — bigger waves, twice the fire rate.
    Raider,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A single-cell projectile.  Player and enemy bullets live in separate
/// collections on `GameState`, so no owner tag is needed.
#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
}

/// A fixed-length explosion animation left behind by a destroyed ship.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    /// Frames elapsed since the hit; self-removes at EXPLOSION_FRAMES.
    pub frame: u32,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    /// 0 = normal.  >0 = fading back in after a life loss; counts up each
    /// frame and auto-clears above RESPAWN_FRAMES.  Collision checks are
    /// skipped while non-zero.
    pub respawning: u32,
    /// 0 = no shield.  >0 = invulnerable; counts up each frame and
    /// auto-clears above SHIELD_FRAMES.
    pub shield: u32,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub kind: EnemyKind,
}

/// Decorative ship glyph in the bottom-left corner; one is popped per
/// life lost.
#[derive(Clone, Debug)]
pub struct LifeIcon {
    pub x: i32,
    pub y: i32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Bullets fired by enemies, moving down.
    pub enemy_bullets: Vec<Bullet>,
    /// Bullets fired by the player, moving up.
    pub player_bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub life_icons: Vec<LifeIcon>,
    pub score: u32,
    pub lives: u32,
    /// 1 or 2 during play; forced to 0 on game over (shown as-is in the HUD).
    pub level: u32,
    /// Each enemy fires with odds 1/probability per frame.
    pub probability: u32,
    /// Shields left to deploy with the Z key.
    pub shield_stock: u32,
    /// Enemies that slipped past the bottom of the screen.
    pub misses: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub width: u16,
    pub height: u16,
}
