//! Terminal renderer — all terminal output lives here.
//!
//! Implements the engine's `Renderer` port by scaling the logical arena onto
//! the terminal grid.  No game logic is performed; this module only
//! translates draw calls into terminal commands.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use plane_battle::entities::{Faction, PlayerSlot};
use plane_battle::ports::{Background, Renderer, Sprite};
use plane_battle::tuning::ArenaTuning;
use plane_battle::vector::Vector2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_WIN: Color = Color::Green;
const C_HUD_LOSS: Color = Color::Red;
const C_PLAYER_ONE: Color = Color::White;
const C_PLAYER_TWO: Color = Color::Yellow;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const EXPLOSION_GLYPHS: [&str; 4] = ["✶", "✷", "✸", "✹"];

pub struct TerminalRenderer<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    arena: ArenaTuning,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16, arena: ArenaTuning) -> Self {
        Self {
            out,
            cols,
            rows,
            arena,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Map an arena position into the play area (inside the border, below
    /// the HUD row).
    fn cell(&self, position: Vector2) -> (u16, u16) {
        let inner_w = self.cols.saturating_sub(2).max(1) as f64;
        let inner_h = self.rows.saturating_sub(4).max(1) as f64;
        let col = (position.x / self.arena.width * inner_w).clamp(0.0, inner_w - 1.0);
        let row = (position.y / self.arena.height * inner_h).clamp(0.0, inner_h - 1.0);
        (1 + col as u16, 2 + row as u16)
    }

    fn put(&mut self, col: u16, row: u16, color: Color, text: &str) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    // ── Border ────────────────────────────────────────────────────────────────

    fn draw_border(&mut self) -> io::Result<()> {
        let w = self.cols as usize;
        let h = self.rows;

        self.out.queue(style::SetForegroundColor(C_BORDER))?;

        // Row 1 — top bar
        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        // Row h-2 — bottom bar
        self.out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 2..h.saturating_sub(2) {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.cols.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    // ── HUD (row 0) and hint (last row) ───────────────────────────────────────

    fn draw_hud(&mut self, background: Background) -> io::Result<()> {
        let (text, color) = match background {
            Background::Lives2 => ("Lives: ♥♥♥".to_string(), C_HUD_LIVES),
            Background::Lives1 => ("Lives: ♥♥".to_string(), C_HUD_LIVES),
            Background::Lives0 => ("Lives: ♥  (last one!)".to_string(), C_HUD_LIVES),
            Background::PlayersLost => ("GAME OVER — the enemy wins".to_string(), C_HUD_LOSS),
            Background::EnemiesLost => ("VICTORY — enemy squadron destroyed".to_string(), C_HUD_WIN),
        };
        let col = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.put(col, 0, color, &text)?;

        let hint = "P1 ←↑↓→ SPACE  P2 WASD F  F1 save  F2 load  R restart  ESC quit";
        let last = self.rows.saturating_sub(1);
        self.put(1, last, C_HINT, hint)
    }

    // ── Entities ──────────────────────────────────────────────────────────────

    fn draw_plane(&mut self, slot: PlayerSlot, position: Vector2) -> io::Result<()> {
        // Sprite (2 rows, 3 cols):
        //   ▲       ← tip
        //  /█\      ← fuselage + wings
        let color = match slot {
            PlayerSlot::One => C_PLAYER_ONE,
            PlayerSlot::Two => C_PLAYER_TWO,
        };
        let (col, row) = self.cell(position);
        self.put(col, row, color, "▲")?;
        if row + 1 < self.rows.saturating_sub(2) {
            self.put(col.saturating_sub(1).max(1), row + 1, color, "/█\\")?;
        }
        Ok(())
    }

    fn draw_enemy(&mut self, position: Vector2) -> io::Result<()> {
        //   «▼»    ← swept-back wings
        //   ╚═╝    ← engine block
        let (col, row) = self.cell(position);
        let left = col.saturating_sub(1).max(1);
        self.put(left, row, C_ENEMY, "«▼»")?;
        if row + 1 < self.rows.saturating_sub(2) {
            self.put(left, row + 1, C_ENEMY, "╚═╝")?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn background(&mut self, background: Background) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()?;
        self.draw_hud(background)
    }

    fn draw(&mut self, sprite: Sprite, position: Vector2) -> io::Result<()> {
        match sprite {
            Sprite::Plane(slot) => self.draw_plane(slot, position),
            Sprite::Enemy => self.draw_enemy(position),
            Sprite::Explosion { frame, .. } => {
                let (col, row) = self.cell(position);
                let glyph = EXPLOSION_GLYPHS[frame as usize % EXPLOSION_GLYPHS.len()];
                self.put(col, row, C_EXPLOSION, glyph)
            }
            Sprite::Bullet(Faction::Player) => {
                let (col, row) = self.cell(position);
                self.put(col, row, C_BULLET_PLAYER, "║")
            }
            Sprite::Bullet(Faction::Enemy) => {
                let (col, row) = self.cell(position);
                self.put(col, row, C_BULLET_ENEMY, "↓")
            }
        }
    }

    fn present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
