//! Main application UI
//!
//! Screen-by-screen rendering of a `Game` with ratatui.

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::canvas::{rgb, MapCanvas, CELL_WIDTH};
use crate::combat::battle::{BattleLine, LineKind};
use crate::combat::{BattleAction, BattleContext};
use crate::data::{stories, ItemEffect, ShopItem};
use crate::game::{Game, MessageCategory, PlayingState, Screen};
use crate::progression::level_title;
use crate::render::colors;
use crate::town::TownAction;
use crate::world::TileType;

/// Battle log typing speed
pub const REVEAL_CHARS_PER_SEC: f32 = 60.0;

/// Typewriter effect over the battle log.
///
/// Lines before `lines` are fully shown; `chars` counts the visible
/// characters of the line being typed.
#[derive(Debug, Clone, Default)]
pub struct LogReveal {
    lines: usize,
    chars: usize,
    budget: f32,
}

impl LogReveal {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_done(&self, log: &[BattleLine]) -> bool {
        self.lines >= log.len()
    }

    pub fn update(&mut self, log: &[BattleLine], delta: Duration) {
        // A shorter log means a new battle
        if self.lines > log.len() {
            self.reset();
        }
        self.budget += delta.as_secs_f32() * REVEAL_CHARS_PER_SEC;

        while self.budget >= 1.0 {
            let Some(line) = log.get(self.lines) else {
                self.budget = 0.0;
                break;
            };
            let len = line.text.chars().count();
            let step = (self.budget as usize).min(len.saturating_sub(self.chars));
            self.chars += step;
            self.budget -= step as f32;
            if self.chars >= len {
                self.lines += 1;
                self.chars = 0;
            }
        }
    }

    /// The part of the log typed so far
    pub fn visible(&self, log: &[BattleLine]) -> Vec<(String, LineKind)> {
        let mut shown: Vec<(String, LineKind)> = log
            .iter()
            .take(self.lines)
            .map(|line| (line.text.clone(), line.kind))
            .collect();
        if self.chars > 0 {
            if let Some(line) = log.get(self.lines) {
                shown.push((line.text.chars().take(self.chars).collect(), line.kind));
            }
        }
        shown
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct App {
    reveal: LogReveal,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance animations
    pub fn update(&mut self, game: &Game, delta: Duration) {
        match &game.state().battle {
            Some(battle) => self.reveal.update(&battle.log, delta),
            None => self.reveal.reset(),
        }
    }

    /// Battle commands wait until the log has finished typing
    pub fn accepts_input(&self, game: &Game) -> bool {
        match &game.state().battle {
            Some(battle) => self.reveal.is_done(&battle.log),
            None => true,
        }
    }

    pub fn render(&self, frame: &mut Frame, game: &Game) {
        frame.render_widget(Clear, frame.area());

        match game.screen() {
            Screen::Title => self.render_title(frame),
            Screen::Playing(state) => self.render_playing(frame, game, state),
            Screen::GameClear { level, gold } => self.render_game_clear(frame, level, gold),
            Screen::Quit => {}
        }
    }

    fn render_title(&self, frame: &mut Frame) {
        let area = frame.area();
        let accent = Style::default().fg(rgb(colors::PLAYER_HEALTHY)).add_modifier(Modifier::BOLD);
        let muted = Style::default().fg(rgb(colors::TEXT_MUTED));

        let text = vec![
            Line::from(""),
            Line::from(Span::styled("O N E   P I X E L", accent)),
            Line::from(""),
            Line::from(Span::styled("A tiny quest on a tiny world", Style::default().fg(rgb(colors::TEXT)))),
            Line::from(""),
            Line::from(vec![
                Span::styled("@", Style::default().fg(rgb(colors::player_color(1.0)))),
                Span::styled("  you     ", muted),
                Span::styled("●", Style::default().fg(rgb(TileType::Enemy.fg_color()))),
                Span::styled("  monsters     ", muted),
                Span::styled("▒", Style::default().fg(rgb(TileType::Town.fg_color()))),
                Span::styled("  towns     ", muted),
                Span::styled("$", Style::default().fg(rgb(colors::GOLD))),
                Span::styled("  treasure", muted),
            ]),
            Line::from(""),
            Line::from(Span::styled("Move: arrows / WASD    Search: Space    Sound: M    Quit: Q", muted)),
            Line::from(""),
            Line::from(Span::styled("Press [Enter] to begin", Style::default().fg(Color::Gray))),
        ];

        let para = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(para, area);
    }

    fn render_playing(&self, frame: &mut Frame, game: &Game, state: PlayingState) {
        let area = frame.area();
        let map = &game.state().map;
        let map_width = (map.width.max(0) as u16).saturating_mul(CELL_WIDTH) + 2;
        let map_height = map.height.max(0) as u16 + 2;

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(map_height), Constraint::Min(4)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(map_width), Constraint::Min(24)])
            .split(rows[0]);

        self.render_map(frame, game, columns[0]);
        self.render_status(frame, game, columns[1]);
        self.render_messages(frame, game, rows[1]);

        match state {
            PlayingState::Exploring => {}
            PlayingState::Battle => {
                if let Some(battle) = &game.state().battle {
                    self.render_battle(frame, game, battle);
                }
            }
            PlayingState::Town => self.render_town(frame, game),
            PlayingState::Shop => self.render_shop(frame, game),
        }
    }

    fn render_map(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" World ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut canvas = MapCanvas::new(frame.buffer_mut(), inner);
        game.render_with(&mut canvas);
    }

    fn render_status(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .border_style(Style::default().fg(Color::DarkGray));

        let player = &game.state().player;
        let hp_color = rgb(colors::player_color(player.health.percentage()));
        let xp = &player.experience;

        let lines = vec![
            Line::from(Span::styled(
                "Hero",
                Style::default().fg(rgb(colors::PLAYER_HEALTHY)).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                level_title(xp.level),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(format!("Level {}", xp.level)),
            Line::from(vec![
                Span::raw("HP:  "),
                Span::styled(format!("{}/{}", player.health.current, player.health.max), Style::default().fg(hp_color)),
            ]),
            Line::from(vec![
                Span::raw("MP:  "),
                Span::styled(
                    format!("{}/{}", player.mana.current, player.mana.max),
                    Style::default().fg(rgb(colors::MANA)),
                ),
            ]),
            Line::from(format!("EXP: {}/{}", xp.current_xp, xp.xp_to_next)),
            Line::from(""),
            Line::from(format!("ATK: {}", player.attack)),
            Line::from(format!("DEF: {}", player.defense)),
            Line::from(vec![
                Span::raw("Gold: "),
                Span::styled(format!("{} G", player.gold), Style::default().fg(rgb(colors::GOLD))),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!("Steps: {}", game.state().move_count),
                Style::default().fg(rgb(colors::TEXT_MUTED)),
            )),
            Line::from(Span::styled(
                if game.is_muted() { "Sound: off" } else { "Sound: on" },
                Style::default().fg(rgb(colors::TEXT_MUTED)),
            )),
        ];

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_messages(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);

        let messages: Vec<Line> = game
            .messages()
            .iter()
            .rev()
            .take(inner.height as usize)
            .rev()
            .map(|msg| {
                let color = match msg.category {
                    MessageCategory::Story => Color::Magenta,
                    MessageCategory::Combat => Color::Red,
                    MessageCategory::Town => Color::Green,
                    MessageCategory::Item => rgb(colors::GOLD),
                    MessageCategory::System => Color::Cyan,
                    MessageCategory::Warning => Color::LightRed,
                };
                Line::from(Span::styled(msg.text.as_str(), Style::default().fg(color)))
            })
            .collect();

        frame.render_widget(Paragraph::new(messages).block(block), area);
    }

    fn render_battle(&self, frame: &mut Frame, game: &Game, battle: &BattleContext) {
        let area = centered_rect(70, 80, frame.area());
        frame.render_widget(Clear, area);

        let (title, border) = if battle.is_boss_battle {
            (" BOSS BATTLE ", Color::Magenta)
        } else {
            (" Battle ", Color::Red)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3), Constraint::Length(2)])
            .split(inner);

        // Combatants
        let ratio = battle.enemy_hp_ratio();
        let base = colors::parse_hex(&battle.enemy.color).unwrap_or(colors::DAMAGE);
        let enemy_color = rgb(colors::enemy_color(base, ratio));
        let player = &game.state().player;
        let mut header = vec![
            Line::from(vec![
                Span::styled("██ ", Style::default().fg(enemy_color)),
                Span::styled(battle.enemy.name.as_str(), Style::default().fg(enemy_color).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::raw("   "),
                Span::styled(hp_bar(ratio, 20), Style::default().fg(enemy_color)),
                Span::raw(format!(" {}/{}", battle.current_hp.max(0), battle.enemy.hp)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("@  ", Style::default().fg(rgb(colors::player_color(player.health.percentage())))),
                Span::raw(format!("HP {}/{}  ", player.health.current, player.health.max)),
                Span::styled(
                    format!("MP {}/{}", player.mana.current, player.mana.max),
                    Style::default().fg(rgb(colors::MANA)),
                ),
            ]),
        ];
        if let Some(last) = header.last_mut() {
            for effect in player.status.iter() {
                last.push_span(Span::styled(format!("  [{}]", effect.name()), Style::default().fg(rgb(effect.color()))));
            }
        }
        frame.render_widget(Paragraph::new(header), chunks[0]);

        // Log
        let visible = self.reveal.visible(&battle.log);
        let height = chunks[1].height as usize;
        let skip = visible.len().saturating_sub(height);
        let log: Vec<Line> = visible
            .into_iter()
            .skip(skip)
            .map(|(text, kind)| Line::from(Span::styled(text, line_style(kind))))
            .collect();
        frame.render_widget(
            Paragraph::new(log).block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray))),
            chunks[1],
        );

        // Commands
        let footer = if !self.reveal.is_done(&battle.log) {
            Line::from(Span::styled("...", Style::default().fg(rgb(colors::TEXT_MUTED))))
        } else if battle.is_over() {
            Line::from(Span::styled("Press [Space] to continue", Style::default().fg(Color::Gray)))
        } else {
            let magic_cost = game.data().rules.magic_cost;
            let spans: Vec<Span> = BattleAction::ALL
                .iter()
                .enumerate()
                .map(|(i, action)| {
                    let label = match action {
                        BattleAction::Magic => format!("[{}] {} ({} MP)  ", i + 1, action.label(), magic_cost),
                        _ => format!("[{}] {}  ", i + 1, action.label()),
                    };
                    let dimmed = match action {
                        BattleAction::Magic => player.mana.current < magic_cost,
                        BattleAction::Run => battle.is_boss_battle,
                        _ => false,
                    };
                    let color = if dimmed { colors::TEXT_MUTED } else { colors::TEXT };
                    Span::styled(label, Style::default().fg(rgb(color)))
                })
                .collect();
            Line::from(spans)
        };
        frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[2]);
    }

    fn render_town(&self, frame: &mut Frame, game: &Game) {
        let Some(ctx) = &game.state().town else {
            return;
        };
        let town = &ctx.town;
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);

        let mut lines = vec![
            Line::from(Span::styled(
                town.name.as_str(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(town.description.as_str(), Style::default().fg(rgb(colors::TEXT_MUTED)))),
            Line::from(""),
        ];
        for (i, action) in TownAction::ALL.iter().enumerate() {
            let label = match action {
                TownAction::Rest => format!("[{}] {} ({} G)", i + 1, action.label(), town.inn_cost),
                _ => format!("[{}] {}", i + 1, action.label()),
            };
            lines.push(Line::from(Span::styled(label, Style::default().fg(rgb(colors::TEXT)))));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Town ")
            .border_style(Style::default().fg(Color::Green));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
    }

    fn render_shop(&self, frame: &mut Frame, game: &Game) {
        let Some(ctx) = &game.state().town else {
            return;
        };
        let gold = game.state().player.gold;
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Your gold: "),
                Span::styled(format!("{} G", gold), Style::default().fg(rgb(colors::GOLD))),
            ]),
            Line::from(""),
        ];
        for (i, item) in ctx.town.shop_items.iter().enumerate() {
            let color = if item.price <= gold { colors::TEXT } else { colors::TEXT_MUTED };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[{}] {:<18} {:>4} G  ", i + 1, item.name, item.price),
                    Style::default().fg(rgb(color)),
                ),
                Span::styled(effect_text(item), Style::default().fg(rgb(colors::TEXT_MUTED))),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("[Esc] Back", Style::default().fg(Color::Gray))));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Shop ")
            .border_style(Style::default().fg(rgb(colors::GOLD)));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_game_clear(&self, frame: &mut Frame, level: u32, gold: u32) {
        let area = frame.area();

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME CLEAR",
                Style::default().fg(rgb(colors::GOLD)).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        text.extend(stories::GAME_CLEAR.iter().map(|line| Line::from(*line)));
        text.extend([
            Line::from(""),
            Line::from(format!("Final level: {}", level)),
            Line::from(format!("Gold: {} G", gold)),
            Line::from(""),
            Line::from(Span::styled("Press [Enter] to play again", Style::default().fg(Color::Gray))),
        ]);

        let para = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(para, area);
    }
}

fn line_style(kind: LineKind) -> Style {
    let color = match kind {
        LineKind::Normal => colors::TEXT,
        LineKind::Damage => colors::DAMAGE,
        LineKind::Heal => colors::HEAL,
        LineKind::Miss => colors::MISS,
    };
    Style::default().fg(rgb(color))
}

fn effect_text(item: &ShopItem) -> String {
    match item.effect {
        ItemEffect::Heal => format!("restores {} HP", item.value),
        ItemEffect::Mana => format!("restores {} MP", item.value),
        ItemEffect::BuffAttack => format!("ATK +{}", item.value),
        ItemEffect::BuffDefense => format!("DEF +{}", item.value),
    }
}

fn hp_bar(ratio: f32, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f32).ceil() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
