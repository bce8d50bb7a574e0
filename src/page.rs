//! Lays the portfolio out as one tall document of styled lines.
//!
//! The document is rebuilt whenever the width or the shell session changes.
//! Alongside the lines it records where every section and project card
//! landed, which is what the scroll tracker and the pointer glow measure.

use crate::{
    content::{PROFILE, PROJECTS, ROLES, SKILLS},
    glow::Bounds,
    helpers::{layout_text, pack_labels, pad},
    spy::{Measure, NAV_HEIGHT},
    types::{Section, SectionSpan, SessionLine},
};

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub const EMERALD: Color = Color::Rgb(52, 211, 153);
pub const GRAY_100: Color = Color::Rgb(243, 244, 246);
pub const GRAY_300: Color = Color::Rgb(209, 213, 219);
pub const GRAY_400: Color = Color::Rgb(156, 163, 175);
pub const BORDER: Color = Color::Rgb(22, 101, 52);
const CARD_BG: Color = Color::Rgb(31, 41, 55);
const SHELL_BG: Color = Color::Rgb(17, 24, 39);
const WATERMARK: Color = Color::Rgb(36, 64, 60);

const MARGIN: usize = 2;
const MIN_WIDTH: usize = 24;
const MAX_WIDTH: usize = 96;

pub struct Page {
    lines: Vec<Line<'static>>,
    spans: Vec<SectionSpan>,
    cards: Vec<Bounds>,
}

impl Page {
    pub fn compose(width: u16, session: &[SessionLine], cursor_on: bool) -> Self {
        let inner = (width as usize)
            .saturating_sub(MARGIN * 2)
            .clamp(MIN_WIDTH, MAX_WIDTH);

        let mut c = Composer {
            width: inner,
            lines: Vec::new(),
            spans: Vec::new(),
            cards: Vec::new(),
            open: None,
        };

        for _ in 0..=NAV_HEIGHT {
            c.blank();
        }

        about(&mut c, session, cursor_on);
        experience(&mut c);
        projects(&mut c);
        skills(&mut c);
        contact(&mut c);

        for _ in 0..NAV_HEIGHT {
            c.blank();
        }

        Self {
            lines: c.lines,
            spans: c.spans,
            cards: c.cards,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    #[cfg(test)]
    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    pub fn viewport(&self, scroll: usize) -> Viewport<'_> {
        Viewport { page: self, scroll }
    }

    /// Project card under a viewport position, in viewport coordinates.
    pub fn card_at(&self, scroll: usize, x: i32, y: i32) -> Option<Bounds> {
        self.cards
            .iter()
            .map(|card| Bounds {
                top: card.top - scroll as i32,
                ..*card
            })
            .find(|card| card.contains(x, y))
    }
}

/// The page as seen at a given scroll position.
pub struct Viewport<'a> {
    page: &'a Page,
    scroll: usize,
}

impl Measure for Viewport<'_> {
    fn bounds(&self, section: Section) -> Option<(i32, i32)> {
        self.page
            .spans
            .iter()
            .find(|span| span.section == section)
            .map(|span| {
                (
                    span.top as i32 - self.scroll as i32,
                    span.bottom as i32 - self.scroll as i32,
                )
            })
    }

    fn offset_top(&self, section: Section) -> Option<usize> {
        self.page
            .spans
            .iter()
            .find(|span| span.section == section)
            .map(|span| span.top)
    }
}

struct Composer {
    width: usize,
    lines: Vec<Line<'static>>,
    spans: Vec<SectionSpan>,
    cards: Vec<Bounds>,
    open: Option<(Section, usize)>,
}

impl Composer {
    fn row(&self) -> usize {
        self.lines.len()
    }

    fn begin(&mut self, section: Section) {
        self.end();
        self.open = Some((section, self.row()));
    }

    fn end(&mut self) {
        if let Some((section, top)) = self.open.take() {
            let bottom = self.row().saturating_sub(1).max(top);
            self.spans.push(SectionSpan {
                section,
                top,
                bottom,
            });
        }
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn push(&mut self, spans: Vec<Span<'static>>) {
        let mut line = vec![Span::raw(" ".repeat(MARGIN))];
        line.extend(spans);
        self.lines.push(Line::from(line));
    }

    fn text(&mut self, text: &str, style: Style) {
        for row in layout_text(text, self.width as u16) {
            self.push(vec![Span::styled(row, style)]);
        }
    }

    fn heading(&mut self, icon: &str, title: &str) {
        self.push(vec![
            Span::styled(format!("{icon} "), Style::default().fg(EMERALD)),
            Span::styled(
                title.to_string(),
                Style::default().fg(GRAY_100).add_modifier(Modifier::BOLD),
            ),
        ]);
        self.blank();
    }

    /// Draws a rounded box the full content width and returns its document bounds.
    fn boxed(
        &mut self,
        title: Vec<Span<'static>>,
        body: Vec<Vec<Span<'static>>>,
        bg: Color,
        watermark: Option<char>,
    ) -> Bounds {
        let top = self.row();
        let inner = self.width.saturating_sub(4);
        let border = Style::default().fg(BORDER).bg(bg);
        let fill = Style::default().bg(bg);

        let title_width = width_of(&title);
        let mut top_line = vec![Span::styled("╭─", border)];
        top_line.extend(
            title
                .into_iter()
                .map(|span| Span::styled(span.content, fill.patch(span.style))),
        );
        top_line.push(Span::styled(
            format!("{}╮", "─".repeat(self.width.saturating_sub(3 + title_width))),
            border,
        ));
        self.push(top_line);

        for (i, row) in body.into_iter().enumerate() {
            let used = width_of(&row);
            let mut line = vec![Span::styled("│ ", border)];
            line.extend(
                row.into_iter()
                    .map(|span| Span::styled(span.content, fill.patch(span.style))),
            );

            let gap = inner.saturating_sub(used);
            match watermark {
                Some(mark) if i == 0 && gap >= 2 => {
                    line.push(Span::styled(" ".repeat(gap - 1), fill));
                    line.push(Span::styled(
                        mark.to_string(),
                        fill.fg(WATERMARK).add_modifier(Modifier::BOLD),
                    ));
                }
                _ => line.push(Span::styled(" ".repeat(gap), fill)),
            }

            line.push(Span::styled(" │", border));
            self.push(line);
        }

        self.push(vec![Span::styled(
            format!("╰{}╯", "─".repeat(self.width.saturating_sub(2))),
            border,
        )]);

        Bounds {
            left: MARGIN as i32,
            top: top as i32,
            width: self.width as i32,
            height: (self.row() - top) as i32,
        }
    }

    fn inner(&self) -> u16 {
        self.width.saturating_sub(4) as u16
    }
}

fn width_of(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|span| span.content.chars().count()).sum()
}

fn wrapped(text: &str, width: u16, style: Style) -> Vec<Vec<Span<'static>>> {
    layout_text(text, width)
        .into_iter()
        .map(|row| vec![Span::styled(row, style)])
        .collect()
}

fn chips(labels: &[&str], width: u16, style: Style) -> Vec<Vec<Span<'static>>> {
    let framed: Vec<String> = labels.iter().map(|label| format!("[{label}]")).collect();
    let refs: Vec<&str> = framed.iter().map(String::as_str).collect();

    pack_labels(&refs, width, 1)
        .into_iter()
        .map(|row| vec![Span::styled(row.join(" "), style)])
        .collect()
}

fn link_or_dash(url: &str) -> String {
    match url {
        "" | "#" => "-".to_string(),
        url => url.to_string(),
    }
}

fn window_dots(label: &str) -> Vec<Span<'static>> {
    vec![
        Span::raw(" "),
        Span::styled("●", Style::default().fg(Color::Rgb(239, 68, 68))),
        Span::raw(" "),
        Span::styled("●", Style::default().fg(Color::Rgb(234, 179, 8))),
        Span::raw(" "),
        Span::styled("●", Style::default().fg(Color::Rgb(34, 197, 94))),
        Span::styled(format!("  {label} "), Style::default().fg(GRAY_400)),
    ]
}

fn about(c: &mut Composer, session: &[SessionLine], cursor_on: bool) {
    c.begin(Section::About);

    let width = c.inner();
    let mut body = Vec::new();

    for line in session {
        body.push(vec![
            Span::styled("➜ ", Style::default().fg(EMERALD)),
            Span::styled("~/portfolio", Style::default().fg(GRAY_400)),
            Span::styled(format!(" $ {}", line.input), Style::default().fg(Color::White)),
        ]);
        body.extend(wrapped(line.output, width, Style::default().fg(GRAY_300)));
        body.push(Vec::new());
    }

    body.push(vec![Span::styled(
        if cursor_on { "█" } else { " " },
        Style::default().fg(EMERALD),
    )]);

    c.boxed(window_dots("portfolio ~ bash"), body, SHELL_BG, None);
    c.blank();

    c.text(PROFILE.greeting, Style::default().fg(EMERALD));
    c.text(
        PROFILE.name,
        Style::default().fg(GRAY_100).add_modifier(Modifier::BOLD),
    );
    c.text(
        PROFILE.headline,
        Style::default().fg(GRAY_400).add_modifier(Modifier::BOLD),
    );
    c.blank();
    c.text(PROFILE.summary, Style::default().fg(GRAY_400));
    c.blank();

    c.push(vec![
        Span::styled("[ View Resume › ]", Style::default().fg(EMERALD)),
        Span::styled("  github ", Style::default().fg(GRAY_400)),
        Span::styled(PROFILE.github, Style::default().fg(GRAY_300)),
    ]);
    c.push(vec![
        Span::raw(" ".repeat(17)),
        Span::styled("  linkedin ", Style::default().fg(GRAY_400)),
        Span::styled(PROFILE.linkedin, Style::default().fg(GRAY_300)),
    ]);
    c.blank();

    c.end();
}

fn experience(c: &mut Composer) {
    c.begin(Section::Experience);
    c.heading("▣", "Experience");

    let width = c.inner() as usize;

    for role in &ROLES {
        let company_width = width.saturating_sub(role.period.chars().count());
        let mut body = vec![vec![
            Span::styled(pad(role.company, company_width), Style::default().fg(EMERALD)),
            Span::styled(role.period, Style::default().fg(GRAY_400)),
        ]];

        for point in role.points {
            for (i, row) in layout_text(point, width.saturating_sub(2) as u16)
                .into_iter()
                .enumerate()
            {
                let bullet = if i == 0 { "• " } else { "  " };
                body.push(vec![Span::styled(
                    format!("{bullet}{row}"),
                    Style::default().fg(GRAY_400),
                )]);
            }
        }

        let title = vec![Span::styled(
            format!(" {} ", role.title),
            Style::default().fg(GRAY_100).add_modifier(Modifier::BOLD),
        )];

        c.boxed(title, body, CARD_BG, None);
        c.blank();
    }

    c.end();
}

fn projects(c: &mut Composer) {
    c.begin(Section::Projects);
    c.heading("</>", "Featured Projects");

    let width = c.inner();

    for project in &PROJECTS {
        let mut body = wrapped(project.description, width, Style::default().fg(GRAY_400));
        body.push(Vec::new());
        body.extend(chips(project.tech, width, Style::default().fg(EMERALD)));
        body.push(Vec::new());
        body.push(vec![
            Span::styled("github ", Style::default().fg(GRAY_400)),
            Span::styled(link_or_dash(project.github), Style::default().fg(GRAY_300)),
            Span::styled("  live ", Style::default().fg(GRAY_400)),
            Span::styled(link_or_dash(project.live), Style::default().fg(GRAY_300)),
        ]);

        let title = vec![Span::styled(
            format!(" {} ", project.title),
            Style::default().fg(GRAY_100).add_modifier(Modifier::BOLD),
        )];

        let card = c.boxed(title, body, CARD_BG, project.title.chars().next());
        c.cards.push(card);
        c.blank();
    }

    c.end();
}

fn skills(c: &mut Composer) {
    c.begin(Section::Skills);
    c.heading("◆", "Skills");

    let width = c.inner();

    for group in &SKILLS {
        let title = vec![Span::styled(
            format!(" {} ", group.category),
            Style::default().fg(EMERALD).add_modifier(Modifier::BOLD),
        )];

        c.boxed(
            title,
            chips(group.items, width, Style::default().fg(GRAY_300)),
            CARD_BG,
            None,
        );
        c.blank();
    }

    c.end();
}

fn contact(c: &mut Composer) {
    c.begin(Section::Contact);

    let width = c.inner();
    let mut body = vec![
        Vec::new(),
        vec![Span::styled(
            "Get In Touch",
            Style::default().fg(GRAY_100).add_modifier(Modifier::BOLD),
        )],
        Vec::new(),
    ];

    body.extend(wrapped(
        "Currently looking for new opportunities. Feel free to reach out if you would like to connect!",
        width,
        Style::default().fg(GRAY_400),
    ));
    body.push(Vec::new());

    for (label, url) in [
        ("mail     ", PROFILE.email),
        ("github   ", PROFILE.github),
        ("linkedin ", PROFILE.linkedin),
    ] {
        body.push(vec![
            Span::styled(label, Style::default().fg(EMERALD)),
            Span::styled(link_or_dash(url), Style::default().fg(GRAY_300)),
        ]);
    }
    body.push(Vec::new());

    c.boxed(window_dots("contact.js"), body, SHELL_BG, None);
    c.end();
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::content::SESSION;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn sections_are_ordered_and_disjoint() {
        let page = Page::compose(80, &SESSION, true);
        let order: Vec<_> = page.spans().iter().map(|span| span.section).collect();

        assert_eq!(order, Section::ALL.to_vec());

        for pair in page.spans().windows(2) {
            assert!(pair[0].top <= pair[0].bottom);
            assert!(pair[0].bottom < pair[1].top);
        }

        let last = page.spans().last().unwrap();
        assert!(last.bottom < page.len());
    }

    #[test]
    fn page_starts_below_the_nav_bar() {
        let page = Page::compose(80, &[], false);
        assert!(page.spans()[0].top > NAV_HEIGHT);
    }

    #[test]
    fn revealed_session_grows_the_about_section() {
        let empty = Page::compose(80, &[], false);
        let full = Page::compose(80, &SESSION, false);

        let about = |page: &Page| page.spans()[0].bottom - page.spans()[0].top;
        assert!(about(&full) > about(&empty));

        let rendered: Vec<String> = full.lines().iter().map(text_of).collect();
        assert!(rendered.iter().any(|line| line.contains("$ whoami")));
        assert!(rendered.iter().any(|line| line.contains("Bhavika Salunkhe")));
    }

    #[test]
    fn boxes_are_the_content_width() {
        let page = Page::compose(80, &SESSION, true);

        for line in page.lines() {
            let text = text_of(line);
            let trimmed = text.trim_start();

            if trimmed.starts_with('╭') || trimmed.starts_with('│') || trimmed.starts_with('╰') {
                assert_eq!(trimmed.chars().count(), 76, "{text:?}");
            }
        }
    }

    #[test]
    fn one_card_per_project() {
        let page = Page::compose(100, &[], false);
        assert_eq!(page.cards.len(), PROJECTS.len());

        let projects = page.spans()[2];
        for card in &page.cards {
            assert!(card.top as usize >= projects.top);
            assert!(((card.top + card.height) as usize) <= projects.bottom + 1);
        }
    }

    #[test]
    fn viewport_measures_relative_to_scroll() {
        let page = Page::compose(80, &[], false);
        let span = page.spans()[1];

        let view = page.viewport(span.top);
        assert_eq!(
            view.bounds(Section::Experience),
            Some((0, (span.bottom - span.top) as i32))
        );
        assert_eq!(view.offset_top(Section::Experience), Some(span.top));
    }

    #[test]
    fn card_lookup_follows_scroll() {
        let page = Page::compose(80, &[], false);
        let card = page.cards[0];

        let scroll = card.top as usize;
        let hit = page.card_at(scroll, card.left + 1, 1).unwrap();
        assert_eq!(hit.top, 0);
        assert!(page.card_at(scroll, 0, 1).is_none());
    }
}
