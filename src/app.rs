use crate::{
    config::Config,
    content::{PROFILE, SESSION},
    glow,
    page::{BORDER, EMERALD, GRAY_300, GRAY_400, Page},
    rain::{Canvas, RainLoop},
    reveal::Reveal,
    spy::{NAV_HEIGHT, REFERENCE_LINE, ScrollSpy, ease_toward},
    types::{Section, SessionLine},
};

use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
    layout::Position,
    prelude::*,
    widgets::*,
};
use std::time::Instant;
use tracing::{debug, info};
use tui_input::{Input, InputRequest};

const NAV_GAP: u16 = 3;
const WHEEL_ROWS: isize = 3;
const PROMPT: &str = ":goto ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    size: (u16, u16),
    page: Page,
    scroll: usize,
    target: Option<usize>,
    spy: ScrollSpy,
    session: Reveal<SessionLine>,
    cursor_on: bool,
    rain: Option<RainLoop>,
    pointer: Option<(u16, u16)>,
    prompt: Option<Input>,
    status: Option<String>,
}

impl App {
    pub fn new(config: &Config, size: (u16, u16), now: Instant) -> Self {
        let rain = if config.rain {
            RainLoop::start(Canvas::acquire(size.0, size.1), config.rain_settings(), now)
        } else {
            info!("rain disabled");
            None
        };

        let session = Reveal::start(SESSION.to_vec(), config.reveal_delay, now);
        let page = Page::compose(size.0, session.revealed(), true);

        Self {
            size,
            page,
            scroll: 0,
            target: None,
            spy: ScrollSpy::new(Section::TRACKED, REFERENCE_LINE),
            session,
            cursor_on: true,
            rain,
            pointer: None,
            prompt: None,
            status: None,
        }
    }

    pub fn active(&self) -> Option<Section> {
        self.spy.active()
    }

    /// Advances every time-driven part of the page to `now`.
    pub fn update(&mut self, now: Instant) {
        if let Some(rain) = self.rain.as_mut() {
            rain.pump(now);
        }

        let revealed = !self.session.is_complete() && self.session.advance(now) > 0;
        let cursor_on = self.session.cursor_on(now);

        if revealed || cursor_on != self.cursor_on {
            self.cursor_on = cursor_on;
            self.recompose();
        }

        if let Some(target) = self.target {
            let target = target.min(self.max_scroll());
            let next = ease_toward(self.scroll, target);

            self.scroll_to(next);
            if next == target {
                self.target = None;
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);

        if let Some(rain) = self.rain.as_mut() {
            rain.resize(width, height);
        }

        self.recompose();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return Flow::Continue;
        }

        self.status = None;
        let page_rows = self.size.1.saturating_sub(NAV_HEIGHT as u16).max(1) as isize;

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page_rows),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page_rows),
            KeyCode::Home => {
                self.target = None;
                self.scroll_to(0);
            }
            KeyCode::End => {
                self.target = None;
                self.scroll_to(self.max_scroll());
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.navigate(Section::TRACKED[index]);
            }
            KeyCode::Tab => self.cycle(true),
            KeyCode::BackTab => self.cycle(false),
            KeyCode::Char(':') => self.prompt = Some(Input::default()),
            _ => {}
        }

        Flow::Continue
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_ROWS),
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_ROWS),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = nav_entries(self.size.0)
                    .into_iter()
                    .find(|(_, rect)| rect.contains(Position::new(mouse.column, mouse.row)));

                if let Some((section, _)) = hit {
                    self.navigate(section);
                }
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(input) = self.prompt.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                let name = input.value().to_string();
                self.prompt = None;

                match Section::from_name(&name) {
                    Some(section) => self.navigate(section),
                    None => self.status = Some(format!("no section named {:?}", name.trim())),
                }
            }
            KeyCode::Char(c) => {
                input.handle(InputRequest::InsertChar(c));
            }
            KeyCode::Backspace => {
                input.handle(InputRequest::DeletePrevChar);
            }
            KeyCode::Left => {
                input.handle(InputRequest::GoToPrevChar);
            }
            KeyCode::Right => {
                input.handle(InputRequest::GoToNextChar);
            }
            _ => {}
        }
    }

    /// Marks the section active at once, then eases the page to it.
    fn navigate(&mut self, section: Section) {
        let viewport = self.page.viewport(self.scroll);
        let target = self.spy.navigate(section, &viewport, NAV_HEIGHT);

        info!(%section, ?target, "navigate");
        self.target = target.map(|row| row.min(self.max_scroll()));
    }

    fn cycle(&mut self, forward: bool) {
        let tracked = Section::TRACKED;
        let len = tracked.len();
        let current = self
            .spy
            .active()
            .and_then(|active| tracked.iter().position(|&s| s == active));

        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };

        self.navigate(tracked[next]);
    }

    fn scroll_by(&mut self, delta: isize) {
        self.target = None;
        self.scroll_to(self.scroll.saturating_add_signed(delta));
    }

    /// Moves the page; every actual change counts as a scroll event.
    fn scroll_to(&mut self, row: usize) {
        let row = row.min(self.max_scroll());
        if row == self.scroll {
            return;
        }

        self.scroll = row;
        self.spy.on_scroll(&self.page.viewport(self.scroll));
    }

    fn max_scroll(&self) -> usize {
        self.page.len().saturating_sub(self.size.1 as usize)
    }

    fn recompose(&mut self) {
        self.page = Page::compose(self.size.0, self.session.revealed(), self.cursor_on);
        self.scroll = self.scroll.min(self.max_scroll());
        debug!(rows = self.page.len(), "page composed");
    }

    pub fn draw_ui(&self, f: &mut Frame) {
        let area = f.area();

        let end = (self.scroll + area.height as usize).min(self.page.len());
        let start = self.scroll.min(end);
        let visible = self.page.lines()[start..end].to_vec();
        f.render_widget(Paragraph::new(visible), area);

        if let Some(rain) = &self.rain {
            rain.canvas().blit(f.buffer_mut(), area);
        }

        if let Some((x, y)) = self.pointer {
            let (x, y) = (i32::from(x), i32::from(y));

            if let Some(card) = self.page.card_at(self.scroll, x, y) {
                if let Some(focus) = glow::focus((x, y), card) {
                    glow::paint(f.buffer_mut(), area, card, focus);
                }
            }
        }

        self.draw_nav(f, area);
        self.draw_prompt(f, area);
    }

    fn draw_nav(&self, f: &mut Frame, area: Rect) {
        let bar = Rect::new(area.x, area.y, area.width, (NAV_HEIGHT as u16).min(area.height));
        let backdrop = Style::default().bg(Color::Rgb(17, 24, 39));

        f.render_widget(Clear, bar);
        f.render_widget(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(backdrop.fg(BORDER))
                .style(backdrop),
            bar,
        );

        let brand = Paragraph::new(Span::styled(
            PROFILE.brand,
            backdrop.fg(EMERALD).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(brand, Rect::new(bar.x + 2, bar.y + 1, 2, 1).intersection(bar));

        for (section, rect) in nav_entries(area.width) {
            let style = if self.spy.active() == Some(section) {
                backdrop.fg(EMERALD).add_modifier(Modifier::UNDERLINED)
            } else {
                backdrop.fg(GRAY_300)
            };

            f.render_widget(
                Paragraph::new(Span::styled(section.label(), style)),
                rect.intersection(bar),
            );
        }
    }

    fn draw_prompt(&self, f: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }

        let line_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        let backdrop = Style::default().bg(Color::Rgb(17, 24, 39));

        if let Some(input) = &self.prompt {
            let line = Line::from(vec![
                Span::styled(PROMPT, backdrop.fg(EMERALD)),
                Span::styled(input.value().to_string(), backdrop.fg(Color::White)),
            ]);

            f.render_widget(Clear, line_area);
            f.render_widget(Paragraph::new(line).style(backdrop), line_area);

            let cursor_x = line_area.x + PROMPT.len() as u16 + input.cursor() as u16;
            f.set_cursor_position((cursor_x.min(line_area.right().saturating_sub(1)), line_area.y));
        } else if let Some(status) = &self.status {
            f.render_widget(Clear, line_area);
            f.render_widget(
                Paragraph::new(Span::styled(status.clone(), backdrop.fg(GRAY_400))).style(backdrop),
                line_area,
            );
        }
    }
}

/// Navigation entries right-aligned on the middle row of the bar.
pub fn nav_entries(width: u16) -> Vec<(Section, Rect)> {
    let total: u16 = Section::TRACKED
        .iter()
        .map(|section| section.label().len() as u16)
        .sum::<u16>()
        + NAV_GAP * (Section::TRACKED.len() as u16 - 1);

    let mut x = width.saturating_sub(total + 2);

    Section::TRACKED
        .iter()
        .map(|&section| {
            let w = section.label().len() as u16;
            let rect = Rect::new(x, 1, w, 1);
            x = x.saturating_add(w + NAV_GAP);
            (section, rect)
        })
        .collect()
}
