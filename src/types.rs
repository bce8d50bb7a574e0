use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Experience,
    Projects,
    Skills,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::About,
        Section::Experience,
        Section::Projects,
        Section::Skills,
        Section::Contact,
    ];

    /// Sections followed by the scroll tracker, in tie-break order. These are
    /// also the navigation entries.
    pub const TRACKED: [Section; 4] = [
        Section::About,
        Section::Experience,
        Section::Projects,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Contact => "Contact",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();

        Self::ALL
            .into_iter()
            .find(|section| section.label().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive range of document rows occupied by a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionSpan {
    pub section: Section,
    pub top: usize,
    pub bottom: usize,
}

/// One command/output pair of the simulated shell session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionLine {
    pub input: &'static str,
    pub output: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub github: &'static str,
    pub live: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct SkillGroup {
    pub category: &'static str,
    pub items: &'static [&'static str],
}

#[derive(Clone, Copy, Debug)]
pub struct Role {
    pub title: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub points: &'static [&'static str],
}

#[derive(Clone, Copy, Debug)]
pub struct Profile {
    pub brand: &'static str,
    pub greeting: &'static str,
    pub name: &'static str,
    pub headline: &'static str,
    pub summary: &'static str,
    pub email: &'static str,
    pub github: &'static str,
    pub linkedin: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_names_parse_case_insensitively() {
        assert_eq!(Section::from_name("projects"), Some(Section::Projects));
        assert_eq!(Section::from_name("  Contact "), Some(Section::Contact));
        assert_eq!(Section::from_name("SKILLS"), Some(Section::Skills));
        assert_eq!(Section::from_name("home"), None);
    }

    #[test]
    fn skills_are_not_tracked() {
        assert!(!Section::TRACKED.contains(&Section::Skills));
        assert_eq!(Section::TRACKED[0], Section::About);
    }
}
