//! Static link lists and the about/changelog overlay.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: &'static str,
    pub label: &'static str,
}

/// A labelled, collapsible list of links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkGroup {
    pub label: &'static str,
    pub links: Vec<Link>,
    is_open: bool,
}

impl LinkGroup {
    pub fn new(label: &'static str, links: Vec<Link>) -> Self {
        Self {
            label,
            links,
            is_open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// The label alone while collapsed, the label followed by one
    /// `- label: href` line per link when open.
    pub fn render(&self) -> String {
        let marker = if self.is_open { "v" } else { ">" };
        let mut output = format!("{marker} {}", self.label);
        if self.is_open {
            for link in &self.links {
                output.push_str(&format!("\n  - {}: {}", link.label, link.href));
            }
        }
        output
    }
}

pub fn church_links() -> LinkGroup {
    LinkGroup::new(
        "Links to Churches",
        vec![
            Link {
                href: "https://www.faithfulwordbaptist.org/page5.html",
                label: "Faithful Word Baptist Church",
            },
            Link {
                href: "https://sbckjv.com/gospel/",
                label: "Stedfast Baptist Church",
            },
            Link {
                href: "https://anchorkjv.com/",
                label: "Anchor Baptist Church",
            },
        ],
    )
}

pub fn contact_links() -> LinkGroup {
    LinkGroup::new(
        "Contact Links",
        vec![
            Link {
                href: "https://github.com/TheodorCrosswell",
                label: "Github Profile",
            },
            Link {
                href: "https://www.linkedin.com/in/theodor-crosswell-a08b4a2a5/",
                label: "LinkedIn",
            },
        ],
    )
}

pub fn project_links() -> LinkGroup {
    LinkGroup::new(
        "Project Links",
        vec![
            Link {
                href: "https://hub.docker.com/repository/docker/theodorcrosswell/atp-search/general",
                label: "Docker Repo",
            },
            Link {
                href: "https://huggingface.co/datasets/Theodor-Crosswell/All_The_Preaching_Transcripts",
                label: "Hugging Face Repo",
            },
            Link {
                href: "https://github.com/TheodorCrosswell/All_The_Preaching_Search_Tools",
                label: "Github Repo",
            },
        ],
    )
}

const ABOUT: &str = "Query a library of over 15,000 sermon transcripts from AllThePreaching.com \
using a specialized vector database. This lets you search on the meaning and context of your \
query, not just on exact keywords.\n\n\
Every chunk of every sermon is encoded into a vector, a list of numbers capturing its meaning. \
Your query is converted the same way, so the database can return the most contextually \
similar chunks.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangelogEntry {
    pub version: &'static str,
    pub notes: &'static [&'static str],
}

pub const CHANGELOG: &[ChangelogEntry] = &[
    ChangelogEntry {
        version: "v0.2.1",
        notes: &[
            "Cleaned up the style of the app.",
            "Added full-text search functionality.",
            "Added capitalization of the Preacher and Title fields.",
            "Added loading spinner.",
            "Added metadata filtering.",
            "Added changelog.",
            "Added rate limiter.",
        ],
    },
    ChangelogEntry {
        version: "v0.2.0",
        notes: &["Converted the app to use React instead of Streamlit"],
    },
    ChangelogEntry {
        version: "v0.1.1",
        notes: &["Tried to patch an error caused by Streamlit"],
    },
    ChangelogEntry {
        version: "v0.1.0",
        notes: &["This is the initial release"],
    },
];

/// About text, changelog and link groups, shown only while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoOverlay {
    is_open: bool,
    groups: Vec<LinkGroup>,
}

impl Default for InfoOverlay {
    fn default() -> Self {
        Self {
            is_open: false,
            groups: vec![church_links(), contact_links(), project_links()],
        }
    }
}

impl InfoOverlay {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn groups(&self) -> &[LinkGroup] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [LinkGroup] {
        &mut self.groups
    }

    pub fn render(&self) -> Option<String> {
        if !self.is_open {
            return None;
        }

        let mut sections = Vec::new();
        sections.push(
            self.groups
                .iter()
                .map(LinkGroup::render)
                .collect::<Vec<_>>()
                .join("\n"),
        );
        sections.push(format!("About this Project\n\n{ABOUT}"));

        let mut changelog = String::from("Changelog");
        for entry in CHANGELOG {
            changelog.push_str(&format!("\n\n{}", entry.version));
            for note in entry.notes {
                changelog.push_str(&format!("\n  {note}"));
            }
        }
        sections.push(changelog);

        Some(sections.join("\n\n"))
    }
}
