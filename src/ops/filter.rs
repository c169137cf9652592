use crate::model::link::{ALL_CATEGORY, Link};

/// Which category the view is restricted to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Id(String),
}

impl CategoryFilter {
    /// Parse a user-supplied category; `all` selects everything
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => CategoryFilter::All,
            Some(id) if id == ALL_CATEGORY => CategoryFilter::All,
            Some(id) => CategoryFilter::Id(id.to_string()),
        }
    }

    pub fn matches(&self, link: &Link) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Id(id) => link.category == *id,
        }
    }
}

/// True when `query` is a case-insensitive substring of the title or description.
/// An empty query matches everything; whitespace is matched literally.
pub fn matches_query(link: &Link, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    link.title.to_lowercase().contains(&needle)
        || link.description.to_lowercase().contains(&needle)
}

/// The visible links for a category and search text, in store order
pub fn filter_links<'a>(links: &'a [Link], category: &CategoryFilter, query: &str) -> Vec<&'a Link> {
    links
        .iter()
        .filter(|link| category.matches(link) && matches_query(link, query))
        .collect()
}
