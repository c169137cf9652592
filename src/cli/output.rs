use serde::Serialize;

use crate::io::kv::KvStore;
use crate::model::link::{Category, Link};
use crate::ops::store::{LinkStore, MergeReport};
use crate::util::unicode::{display_width, truncate_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct LinkJson<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub url: &'a str,
    pub description: &'a str,
    pub icon: &'a str,
    pub category: &'a str,
    pub category_name: &'a str,
    pub visits: u64,
}

#[derive(Serialize)]
pub struct CategoryJson<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub links: usize,
}

#[derive(Serialize)]
pub struct MergeJson {
    pub added_links: usize,
    pub added_categories: usize,
}

#[derive(Serialize)]
pub struct OpenJson<'a> {
    pub id: &'a str,
    pub url: &'a str,
    pub visits: Option<u64>,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

pub fn link_to_json<'a, S: KvStore>(store: &'a LinkStore<S>, link: &'a Link) -> LinkJson<'a> {
    LinkJson {
        id: &link.id,
        title: &link.title,
        url: &link.url,
        description: &link.description,
        icon: link.display_icon(),
        category: &link.category,
        category_name: store.category_name(&link.category),
        visits: link.visits,
    }
}

pub fn category_to_json<'a>(category: &'a Category, links: &[Link]) -> CategoryJson<'a> {
    CategoryJson {
        id: &category.id,
        name: &category.name,
        links: links.iter().filter(|l| l.category == category.id).count(),
    }
}

pub fn merge_to_json(report: &MergeReport) -> MergeJson {
    MergeJson {
        added_links: report.added_links,
        added_categories: report.added_categories,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

const TITLE_W: usize = 24;

/// One line per link: `id  icon title  category  visits  url`
pub fn format_link_line<S: KvStore>(store: &LinkStore<S>, link: &Link, id_w: usize) -> String {
    let title = truncate_to_width(&link.title, TITLE_W);
    let pad = TITLE_W.saturating_sub(display_width(&title));
    format!(
        "{:<id_w$}  {} {}{}  {:<8}  {:>5}  {}",
        link.id,
        link.display_icon(),
        title,
        " ".repeat(pad),
        store.category_name(&link.category),
        link.visits,
        link.url,
    )
}

pub fn format_category_line(category: &Category, links: &[Link]) -> String {
    let count = links.iter().filter(|l| l.category == category.id).count();
    format!("{:<12} {} ({count})", category.id, category.name)
}

pub fn format_merge_report(report: &MergeReport) -> String {
    if report.added_links == 0 {
        "no new links".to_string()
    } else {
        format!(
            "added {} links, {} new categories",
            report.added_links, report.added_categories
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::kv::MemoryKvStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn link_json_resolves_category_name() {
        let store = LinkStore::open(MemoryKvStore::new());
        let link = store.find("1").unwrap();
        let json = serde_json::to_value(link_to_json(&store, link)).unwrap();
        assert_eq!(json["category_name"], "开发");
        assert_eq!(json["icon"], "🐙");
        assert_eq!(json["visits"], 120);
    }

    #[test]
    fn category_counts() {
        let store = LinkStore::open(MemoryKvStore::new());
        let dev = &store.categories()[0];
        assert_eq!(format_category_line(dev, store.links()), "dev          开发 (2)");
        assert_eq!(category_to_json(dev, store.links()).links, 2);
    }

    #[test]
    fn link_line_aligns_columns() {
        let store = LinkStore::open(MemoryKvStore::new());
        let line = format_link_line(&store, store.find("1").unwrap(), 1);
        assert!(line.starts_with("1  🐙 GitHub"));
        assert!(line.ends_with("  120  https://github.com"));
    }

    #[test]
    fn merge_report_text() {
        assert_eq!(format_merge_report(&MergeReport::default()), "no new links");
        let report = MergeReport {
            added_links: 2,
            added_categories: 1,
        };
        assert_eq!(format_merge_report(&report), "added 2 links, 1 new categories");
    }
}
