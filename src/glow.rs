use ratatui::{buffer::Buffer, layout::Rect, style::Color};

const RADIUS: f32 = 8.0;
const STRENGTH: f32 = 0.35;
const CARD_BG: (u8, u8, u8) = (31, 41, 55);
const TINT: (u8, u8, u8) = (16, 185, 129);

/// Rectangle in viewport cells. `top` may be negative while a card is
/// partly scrolled off screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// Pointer position as fractions of the card's width and height.
pub fn focus(pointer: (i32, i32), card: Bounds) -> Option<(f32, f32)> {
    if card.width <= 0 || card.height <= 0 || !card.contains(pointer.0, pointer.1) {
        return None;
    }

    Some((
        (pointer.0 - card.left) as f32 / card.width as f32,
        (pointer.1 - card.top) as f32 / card.height as f32,
    ))
}

/// Tints the card background around the focus point, fading to nothing at `RADIUS`.
pub fn paint(buf: &mut Buffer, area: Rect, card: Bounds, focus: (f32, f32)) {
    let cx = card.left as f32 + focus.0 * card.width as f32;
    let cy = card.top as f32 + focus.1 * card.height as f32;

    for y in card.top.max(i32::from(area.top()))..(card.top + card.height).min(i32::from(area.bottom())) {
        for x in card.left.max(i32::from(area.left()))..(card.left + card.width).min(i32::from(area.right())) {
            // cells are roughly twice as tall as they are wide
            let dx = (x as f32 - cx) / 2.0;
            let dy = y as f32 - cy;
            let distance = (dx * dx + dy * dy).sqrt();

            if distance >= RADIUS {
                continue;
            }

            if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
                cell.set_bg(tint(STRENGTH * (1.0 - distance / RADIUS)));
            }
        }
    }
}

fn tint(amount: f32) -> Color {
    let t = amount.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| (f32::from(from) + (f32::from(to) - f32::from(from)) * t).round() as u8;

    Color::Rgb(
        mix(CARD_BG.0, TINT.0),
        mix(CARD_BG.1, TINT.1),
        mix(CARD_BG.2, TINT.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Bounds = Bounds {
        left: 10,
        top: -2,
        width: 20,
        height: 8,
    };

    #[test]
    fn focus_is_relative_to_card() {
        assert_eq!(focus((10, -2), CARD), Some((0.0, 0.0)));
        assert_eq!(focus((20, 2), CARD), Some((0.5, 0.5)));
        assert_eq!(focus((30, 2), CARD), None);
        assert_eq!(focus((15, 6), CARD), None);
    }

    #[test]
    fn empty_card_has_no_focus() {
        let flat = Bounds {
            height: 0,
            ..CARD
        };
        assert_eq!(focus((10, -2), flat), None);
    }

    #[test]
    fn paint_stays_inside_card_and_screen() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);

        paint(&mut buf, area, CARD, (0.5, 0.5));

        assert_ne!(buf.cell((20, 2)).unwrap().bg, Color::Reset);
        assert_eq!(buf.cell((9, 2)).unwrap().bg, Color::Reset);
        assert_eq!(buf.cell((20, 6)).unwrap().bg, Color::Reset);
    }

    #[test]
    fn tint_is_strongest_at_focus() {
        assert_eq!(tint(0.0), Color::Rgb(31, 41, 55));
        assert_eq!(tint(1.0), Color::Rgb(16, 185, 129));
    }
}
