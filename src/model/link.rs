use serde::{Deserialize, Serialize};

/// Category id for links that belong to no named category
pub const OTHER_CATEGORY: &str = "other";
/// Filter pseudo-category matching every link (never stored)
pub const ALL_CATEGORY: &str = "all";
/// Glyph shown for links without an icon
pub const DEFAULT_ICON: &str = "🌐";
/// Icon given to links the user adds by hand
pub const MANUAL_ICON: &str = "🔗";
/// Description given to links the user adds by hand
pub const MANUAL_DESCRIPTION: &str = "用户添加的链接";

/// A bookmark entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Opaque identifier, unique for the lifetime of the store
    pub id: String,
    pub title: String,
    /// Stored verbatim, never validated
    pub url: String,
    #[serde(default)]
    pub description: String,
    /// Emoji or short glyph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// A category id or `other`; dangling references are tolerated
    #[serde(default = "default_category")]
    pub category: String,
    /// Confirmed outbound navigations
    #[serde(default)]
    pub visits: u64,
}

impl Link {
    /// Icon to display, falling back to the generic globe glyph
    pub fn display_icon(&self) -> &str {
        match self.icon.as_deref() {
            Some(icon) if !icon.is_empty() => icon,
            _ => DEFAULT_ICON,
        }
    }
}

fn default_category() -> String {
    OTHER_CATEGORY.to_string()
}

/// A link that has not been ingested yet: no id, no visit count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
    pub description: String,
    pub category: String,
    pub icon: Option<String>,
}

impl LinkDraft {
    /// Attach an identifier, starting with zero visits
    pub fn into_link(self, id: String) -> Link {
        Link {
            id,
            title: self.title,
            url: self.url,
            description: self.description,
            icon: self.icon,
            category: self.category,
            visits: 0,
        }
    }
}

/// A named grouping bucket referenced by id from links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    /// Build an auto-created category whose name is the capitalized id
    pub fn derived(id: &str) -> Self {
        Category {
            id: id.to_string(),
            name: capitalize(id),
        }
    }
}

/// Upper-case the first character, keep the rest verbatim
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
