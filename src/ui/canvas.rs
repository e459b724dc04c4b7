//! Overworld canvas
//!
//! Draws the map straight into a ratatui buffer. Every world cell is two
//! terminal columns wide so the grid looks square.

use hecs::World;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};

use crate::ecs::{EntityKind, Position, StatusEffect, StatusEffects};
use crate::render::colors::{self, Rgb};
use crate::render::Renderer;
use crate::world::Map;

/// Terminal columns per world cell
pub const CELL_WIDTH: u16 = 2;

pub(crate) fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// A `Renderer` over one rectangle of a ratatui buffer
pub struct MapCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> MapCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        Self { buf, area }
    }

    /// Screen origin of a world cell, if it fits in the area
    fn cell_origin(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 {
            return None;
        }
        let sx = self.area.x.checked_add(u16::try_from(x).ok()?.checked_mul(CELL_WIDTH)?)?;
        let sy = self.area.y.checked_add(u16::try_from(y).ok()?)?;
        if sx + CELL_WIDTH > self.area.right() || sy >= self.area.bottom() {
            return None;
        }
        Some((sx, sy))
    }

    fn put(&mut self, x: i32, y: i32, glyph: char, fg: Rgb, bold: bool) {
        let Some((sx, sy)) = self.cell_origin(x, y) else {
            return;
        };
        let bg = rgb(colors::BACKGROUND);
        for dx in 0..CELL_WIDTH {
            if let Some(cell) = self.buf.cell_mut((sx + dx, sy)) {
                let ch = if dx == 0 { glyph } else { ' ' };
                cell.set_char(ch).set_fg(rgb(fg)).set_bg(bg);
                if bold {
                    cell.modifier.insert(Modifier::BOLD);
                }
            }
        }
    }
}

impl Renderer for MapCanvas<'_> {
    fn draw_world(&mut self, map: &Map, entities: &World) {
        for y in 0..map.height {
            for x in 0..map.width {
                if let Some(tile) = map.get_tile(x, y) {
                    self.put(x, y, tile.glyph(), tile.fg_color(), false);
                }
            }
        }

        // Enemies take their own hue over the generic marker color
        for (_, (pos, kind)) in entities.query::<(&Position, &EntityKind)>().iter() {
            if let EntityKind::Enemy(enemy) = kind {
                let Some(tile) = map.get_tile(pos.x, pos.y) else {
                    continue;
                };
                let color = colors::parse_hex(&enemy.color).unwrap_or_else(|| tile.fg_color());
                self.put(pos.x, pos.y, tile.glyph(), color, enemy.is_boss);
            }
        }
    }

    fn draw_player(&mut self, position: Position, hp_ratio: f32, status: &StatusEffects) {
        let guarded = status.has_effect(StatusEffect::Defending);
        self.put(position.x, position.y, '@', colors::player_color(hp_ratio), guarded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::spawn_enemy;
    use crate::data::EnemyTemplate;
    use crate::world::TileType;

    fn slime() -> EnemyTemplate {
        EnemyTemplate {
            name: "Slime".into(),
            hp: 30,
            attack: 5,
            defense: 2,
            exp: 20,
            gold: 15,
            color: "#f66".into(),
            is_boss: false,
        }
    }

    #[test]
    fn test_draws_tiles_two_columns_wide() {
        let mut map = Map::new(4, 4);
        map.set_tile(1, 0, TileType::Water);
        let world = World::new();
        let area = Rect::new(0, 0, 8, 4);
        let mut buf = Buffer::empty(area);

        MapCanvas::new(&mut buf, area).draw_world(&map, &world);

        assert_eq!(buf[(2, 0)].symbol(), "≈");
        assert_eq!(buf[(3, 0)].symbol(), " ");
        assert_eq!(buf[(2, 0)].fg, rgb(TileType::Water.fg_color()));
    }

    #[test]
    fn test_enemy_uses_template_color() {
        let mut map = Map::new(4, 4);
        let mut world = World::new();
        spawn_enemy(&mut map, &mut world, Position::new(1, 1), slime());
        let area = Rect::new(0, 0, 8, 4);
        let mut buf = Buffer::empty(area);

        MapCanvas::new(&mut buf, area).draw_world(&map, &world);

        assert_eq!(buf[(2, 1)].symbol(), "●");
        assert_eq!(buf[(2, 1)].fg, Color::Rgb(255, 102, 102));
    }

    #[test]
    fn test_clips_outside_area() {
        let map = Map::new(10, 10);
        let world = World::new();
        let area = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::empty(area);

        let mut canvas = MapCanvas::new(&mut buf, area);
        canvas.draw_world(&map, &world);
        canvas.draw_player(Position::new(9, 9), 1.0, &StatusEffects::default());
        canvas.draw_player(Position::new(-1, 0), 1.0, &StatusEffects::default());

        assert_eq!(buf[(4, 1)].fg, rgb(TileType::Empty.fg_color()));
        assert!(buf.content().iter().all(|cell| cell.symbol() != "@"));
    }

    #[test]
    fn test_player_color_follows_health() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        MapCanvas::new(&mut buf, area).draw_player(Position::new(1, 1), 0.0, &StatusEffects::default());

        assert_eq!(buf[(2, 1)].symbol(), "@");
        assert_eq!(buf[(2, 1)].fg, Color::Rgb(255, 68, 0));
    }
}
