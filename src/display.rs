/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use nova_strike::compute::{EXPLOSION_FRAMES, RESPAWN_FRAMES};
use nova_strike::entities::{
    Bullet, Enemy, EnemyKind, Explosion, GameState, GameStatus, LifeIcon,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_SHIELD: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PLAYER_SHIELDED: Color = Color::Cyan;
const C_ENEMY_SCOUT: Color = Color::Green;
const C_ENEMY_RAIDER: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_LIFE_ICON: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, state)?;
    draw_hud(out, state)?;

    for enemy in &state.enemies {
        draw_enemy(out, enemy, state.height as i32 - 2)?;
    }
    for bullet in &state.player_bullets {
        draw_bullet(out, bullet, C_BULLET_PLAYER, "║")?;
    }
    for bullet in &state.enemy_bullets {
        draw_bullet(out, bullet, C_BULLET_ENEMY, "↓")?;
    }
    for explosion in &state.explosions {
        draw_explosion(out, explosion)?;
    }
    for icon in &state.life_icons {
        draw_life_icon(out, icon)?;
    }

    if state.status == GameStatus::Playing {
        draw_player(out, state)?;
    }
    draw_controls_hint(out, state)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, state.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let w = state.width as usize;
    let h = state.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(state.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Score and misses — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>5}  Misses:{:>4}",
        state.score, state.misses
    )))?;

    // Level — centre
    let level_str = format!("[ LEVEL {} ]", state.level);
    let level_color = match state.level {
        1 => Color::Green,
        2 => Color::Red,
        _ => Color::DarkGrey, // 0 after game over
    };
    let lx = (state.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(level_color))?;
    out.queue(Print(&level_str))?;

    // Shield stock + lives — right side, right-aligned
    let shield_str = format!("Shields:{}  ", state.shield_stock);
    let hearts: String = "♥".repeat(state.lives as usize);
    let lives_str = format!("Lives:{}", hearts);
    let right_len = (shield_str.chars().count() + lives_str.chars().count()) as u16;

    let rx = state.width.saturating_sub(right_len + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SHIELD))?;
    out.queue(Print(&shield_str))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // 2-row, 3-column sprite:
    //   ▲       ← row y      (tip)
    //  /█\      ← row y+1    (fuselage + wings)
    let p = &state.player;

    // The respawn fade steps through grey shades standing in for the
    // original alpha ramp; an active shield tints the whole ship.
    let color = if p.shield > 0 {
        C_PLAYER_SHIELDED
    } else if p.respawning > 0 && p.respawning < RESPAWN_FRAMES / 2 {
        Color::DarkGrey
    } else if p.respawning > 0 {
        Color::Grey
    } else {
        C_PLAYER
    };
    out.queue(style::SetForegroundColor(color))?;

    // Tip
    out.queue(cursor::MoveTo(p.x as u16, p.y as u16))?;
    out.queue(Print("▲"))?;

    // Fuselage — starting one column left of centre
    let wing_y = p.y + 1;
    if wing_y < state.height as i32 - 2 {
        out.queue(cursor::MoveTo((p.x - 1).max(1) as u16, wing_y as u16))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &Enemy,
    play_bottom: i32, // bottom border row (= height - 2)
) -> std::io::Result<()> {
    let lx = (enemy.x - 1).max(0) as u16;
    match enemy.kind {
        EnemyKind::Scout => {
            //   «▼»    ← swept-back wings
            //   ╚═╝    ← engine block
            out.queue(style::SetForegroundColor(C_ENEMY_SCOUT))?;
            out.queue(cursor::MoveTo(lx, enemy.y as u16))?;
            out.queue(Print("«▼»"))?;
            if enemy.y + 1 < play_bottom {
                out.queue(cursor::MoveTo(lx, (enemy.y + 1) as u16))?;
                out.queue(Print("╚═╝"))?;
            }
        }
        EnemyKind::Raider => {
            //   ≪◆≫    ← armoured prow
            //   ╰▼╯    ← gun mount
            out.queue(style::SetForegroundColor(C_ENEMY_RAIDER))?;
            out.queue(cursor::MoveTo(lx, enemy.y as u16))?;
            out.queue(Print("≪◆≫"))?;
            if enemy.y + 1 < play_bottom {
                out.queue(cursor::MoveTo(lx, (enemy.y + 1) as u16))?;
                out.queue(Print("╰▼╯"))?;
            }
        }
    }
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    bullet: &Bullet,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(bullet.x as u16, bullet.y as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Four-stage burst keyed off the explosion's age: flash, bloom, embers, smoke.
fn draw_explosion<W: Write>(out: &mut W, explosion: &Explosion) -> std::io::Result<()> {
    let stage = explosion.frame / (EXPLOSION_FRAMES / 4);
    let (glyph, color) = match stage {
        0 => ("✶", Color::White),
        1 => ("✹", Color::Yellow),
        2 => ("✺", Color::Red),
        _ => ("·", Color::DarkGrey),
    };
    out.queue(cursor::MoveTo(explosion.x as u16, explosion.y as u16))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_life_icon<W: Write>(out: &mut W, icon: &LifeIcon) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(icon.x as u16, icon.y as u16))?;
    out.queue(style::SetForegroundColor(C_LIFE_ICON))?;
    out.queue(Print("▲"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, state.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Z : Shield   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>5}", state.score);
    // Slipped-past enemies per landed hit, as a percentage
    let ratio_line = if state.score != 0 {
        format!(
            "Miss Ratio: {:.2}%",
            state.misses as f64 / state.score as f64 * 100.0
        )
    } else {
        "No hits".to_string()
    };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    let cx = state.width / 2;
    let total_rows = lines.len() + 3; // 3 box lines + score + ratio + hint
    let start_row = (state.height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let ratio_row = score_row + 1;
    let col = cx.saturating_sub(ratio_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, ratio_row))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(&ratio_line))?;

    let hint = "R - Play Again  Q - Quit";
    let hint_row = ratio_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
