use crate::types::Section;

use tracing::{debug, trace};

/// Viewport row the tracker tests sections against, just under the nav bar.
pub const REFERENCE_LINE: i32 = 4;

/// Rows covered by the fixed navigation bar.
pub const NAV_HEIGHT: usize = 3;

/// Layout queries the tracker needs from the page.
pub trait Measure {
    /// Inclusive `(top, bottom)` viewport rows of a section, or `None` if it
    /// is not laid out.
    fn bounds(&self, section: Section) -> Option<(i32, i32)>;

    /// First document row of a section.
    fn offset_top(&self, section: Section) -> Option<usize>;
}

pub struct ScrollSpy {
    sections: Vec<Section>,
    line: i32,
    active: Option<Section>,
}

impl ScrollSpy {
    pub fn new(sections: impl Into<Vec<Section>>, line: i32) -> Self {
        Self {
            sections: sections.into(),
            line,
            active: None,
        }
    }

    pub fn active(&self) -> Option<Section> {
        self.active
    }

    /// Credits the first section, in list order, straddling the reference line.
    /// When none does the previous marker is kept.
    pub fn on_scroll<M: Measure + ?Sized>(&mut self, layout: &M) -> Option<Section> {
        let line = self.line;

        let hit = self.sections.iter().copied().find(|&section| {
            match layout.bounds(section) {
                Some((top, bottom)) => top <= line && line <= bottom,
                None => {
                    trace!(%section, "section not measurable, skipped");
                    false
                }
            }
        });

        if let Some(section) = hit {
            if self.active != Some(section) {
                debug!(%section, "active section changed");
            }

            self.active = Some(section);
        }

        self.active
    }

    /// Marks `section` active and returns the scroll position that places it
    /// just below the navigation bar.
    pub fn navigate<M: Measure + ?Sized>(
        &mut self,
        section: Section,
        layout: &M,
        nav_height: usize,
    ) -> Option<usize> {
        self.active = Some(section);

        let target = layout
            .offset_top(section)
            .map(|top| top.saturating_sub(nav_height));

        if target.is_none() {
            debug!(%section, "navigation target not measurable");
        }

        target
    }
}

/// Moves `pos` a quarter of the way to `target`, at least one row.
pub fn ease_toward(pos: usize, target: usize) -> usize {
    if pos == target {
        return pos;
    }

    let step = (pos.abs_diff(target) / 4).max(1);

    if pos < target { pos + step } else { pos - step }
}
