//! Terminal rendering.  The only module that writes to stdout.
//!
//! Each function receives a mutable writer and a [`RenderSnapshot`].  No game
//! logic is performed; this module only scales world coordinates (800×600 by
//! default) into terminal cells and queues the matching commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invader::config::{DROP_SIZE, ENEMY_SIZE, PLAYER_SIZE};
use space_invader::entities::{Bullet, BulletKind, DropItem, DropKind, Enemy, MessageColor};
use space_invader::{Lifecycle, RenderSnapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Yellow;
const C_BULLET_ANGLED: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_DROP_PENALTY: Color = Color::Red;
const C_DROP_SCORE: Color = Color::Magenta;
const C_DROP_FIRING: Color = Color::Yellow;
const C_POWERUP_ACTIVE: Color = Color::Green;

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Play area inside the border: columns `1..cols-1`, rows `2..rows-2`.
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    fn new(cols: u16, rows: u16, snapshot: &RenderSnapshot) -> Self {
        Self {
            cols,
            rows,
            world_w: snapshot.width,
            world_h: snapshot.height,
        }
    }

    fn inner_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Cell for the world point `(x, y)`, clamped inside the border.
    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let col = (x / self.world_w * self.inner_cols()) as i32 + 1;
        let row = (y / self.world_h * self.inner_rows()) as i32 + 2;
        let col = col.clamp(1, self.cols.saturating_sub(2).max(1) as i32);
        let row = row.clamp(2, self.rows.saturating_sub(3).max(2) as i32);
        (col as u16, row as u16)
    }

    /// Cell at the horizontal centre of a body `size` wide.
    fn centre(&self, x: f32, y: f32, size: f32) -> (u16, u16) {
        self.cell(x + size / 2.0, y + size / 2.0)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snapshot: &RenderSnapshot) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cols, rows, snapshot);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, &view)?;
    draw_hud(out, &view, snapshot)?;

    match snapshot.lifecycle {
        Lifecycle::Title => draw_title(out, &view)?,
        Lifecycle::GameOver => draw_game_over(out, &view, snapshot)?,
        Lifecycle::Playing | Lifecycle::Paused => {
            for enemy in &snapshot.enemies {
                draw_enemy(out, &view, enemy)?;
            }
            for drop in &snapshot.drops {
                draw_drop(out, &view, drop)?;
            }
            for bullet in &snapshot.bullets {
                draw_bullet(out, &view, bullet)?;
            }
            draw_player(out, &view, snapshot)?;
            draw_messages(out, snapshot)?;
            if snapshot.lifecycle == Lifecycle::Paused {
                draw_centred(out, &view, &[("PAUSED — P to resume", Color::Yellow)])?;
            }
        }
    }
    draw_controls_hint(out, &view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    view: &Viewport,
    snapshot: &RenderSnapshot,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>7}", snapshot.score)))?;

    if snapshot.enhanced_firing {
        let tag = "[★ TRIPLE SHOT]";
        let x = view.cols.saturating_sub(tag.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(x, 0))?;
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(tag))?;
    }
    Ok(())
}

fn draw_messages<W: Write>(out: &mut W, snapshot: &RenderSnapshot) -> std::io::Result<()> {
    for (i, line) in snapshot.messages.iter().enumerate() {
        let color = match line.color {
            MessageColor::Red => Color::Red,
            MessageColor::Green => Color::Green,
        };
        out.queue(cursor::MoveTo(2, 2 + i as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(line.text))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    view: &Viewport,
    snapshot: &RenderSnapshot,
) -> std::io::Result<()> {
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let p = &snapshot.player;
    let (col, row) = view.centre(p.x, p.y, PLAYER_SIZE);
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col, row.saturating_sub(1).max(2)))?;
    out.queue(Print("▲"))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(Print("/█\\"))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    //   «▼»
    //   ╚═╝
    let (col, row) = view.centre(enemy.x, enemy.y, ENEMY_SIZE);
    let lx = col.saturating_sub(1).max(1);
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(Print("«▼»"))?;
    if row + 1 < view.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(lx, row + 1))?;
        out.queue(Print("╚═╝"))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, view: &Viewport, bullet: &Bullet) -> std::io::Result<()> {
    let (col, row) = view.cell(bullet.x, bullet.y);
    out.queue(cursor::MoveTo(col, row))?;
    match bullet.kind {
        BulletKind::Straight => {
            out.queue(style::SetForegroundColor(C_BULLET))?;
            out.queue(Print("║"))?;
        }
        BulletKind::Angled { drift } => {
            out.queue(style::SetForegroundColor(C_BULLET_ANGLED))?;
            let glyph = if drift > 0.0 {
                "╱"
            } else if drift < 0.0 {
                "╲"
            } else {
                "║"
            };
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

/// Draw a falling drop.
///
/// Symbols:
///   ☠  (red)      Penalty:     costs points
///   $  (magenta)  BonusScore:  adds points
///   ★  (yellow)   BonusFiring: triple shot for a few seconds
fn draw_drop<W: Write>(out: &mut W, view: &Viewport, drop: &DropItem) -> std::io::Result<()> {
    let (col, row) = view.centre(drop.x, drop.y, DROP_SIZE);
    out.queue(cursor::MoveTo(col, row))?;
    let (symbol, color) = match drop.kind {
        DropKind::Penalty => ("☠", C_DROP_PENALTY),
        DropKind::BonusScore => ("$", C_DROP_SCORE),
        DropKind::BonusFiring => ("★", C_DROP_FIRING),
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(symbol))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centred<W: Write>(
    out: &mut W,
    view: &Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_title<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    draw_centred(
        out,
        view,
        &[
            ("★  SPACE  INVADER  ★", Color::Cyan),
            ("", Color::Reset),
            ("PRESS ENTER TO PLAY", Color::Red),
            ("PRESS ESC TO EXIT", Color::Red),
        ],
    )
}

fn draw_game_over<W: Write>(
    out: &mut W,
    view: &Viewport,
    snapshot: &RenderSnapshot,
) -> std::io::Result<()> {
    let score_line = format!("Score: {}", snapshot.score);
    draw_centred(
        out,
        view,
        &[
            ("╔══════════════════╗", Color::Red),
            ("║    GAME  OVER    ║", Color::Red),
            ("╚══════════════════╝", Color::Red),
            (score_line.as_str(), Color::Yellow),
            ("PRESS R TO RESTART  ESC - Title", Color::White),
        ],
    )
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   P : Pause   ESC : Quit"))?;
    Ok(())
}
