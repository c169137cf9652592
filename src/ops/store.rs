use std::collections::HashSet;

use indexmap::IndexSet;

use crate::io::kv::{self, CATEGORIES_KEY, KvStore, LINKS_KEY};
use crate::model::link::{Category, Link, LinkDraft, OTHER_CATEGORY};
use crate::model::seed::{seed_categories, seed_links};
use crate::ops::ids::{ClockIds, IdSource};

/// What a remote merge contributed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added_links: usize,
    pub added_categories: usize,
}

/// Owns the link and category lists and persists every change.
///
/// Links keep insertion order. Categories are only ever appended.
pub struct LinkStore<S: KvStore> {
    kv: S,
    links: Vec<Link>,
    categories: Vec<Category>,
    ids: Box<dyn IdSource>,
    /// Every id this store has held, so deleted ids are never handed out again
    seen_ids: HashSet<String>,
}

impl<S: KvStore> LinkStore<S> {
    /// Load persisted state, falling back to the seed set per document
    pub fn open(kv: S) -> Self {
        Self::open_with_ids(kv, Box::new(ClockIds::default()))
    }

    pub fn open_with_ids(kv: S, ids: Box<dyn IdSource>) -> Self {
        let links: Vec<Link> = kv::load(&kv, LINKS_KEY, seed_links);
        let categories: Vec<Category> = kv::load(&kv, CATEGORIES_KEY, seed_categories);
        let seen_ids = links.iter().map(|l| l.id.clone()).collect();
        log::debug!(
            "loaded {} links and {} categories",
            links.len(),
            categories.len()
        );
        LinkStore {
            kv,
            links,
            categories,
            ids,
            seen_ids,
        }
    }

    /// Open, then merge the candidates produced by `fetch` exactly once
    pub fn initialize(kv: S, fetch: impl FnOnce() -> Vec<LinkDraft>) -> (Self, MergeReport) {
        let mut store = Self::open(kv);
        let report = store.merge_remote(fetch());
        (store, report)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Categories in creation order (the "all" pseudo-category is not stored)
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn list_categories(&self) -> &[Category] {
        self.categories()
    }

    pub fn find(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Display name for a category id; unknown ids are shown verbatim
    pub fn category_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or(id)
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Merge remote candidates, skipping any whose url is already present
    /// (case-insensitive). Nothing is written when no candidate survives.
    pub fn merge_remote(&mut self, drafts: Vec<LinkDraft>) -> MergeReport {
        let mut known_urls: HashSet<String> =
            self.links.iter().map(|l| l.url.to_lowercase()).collect();
        let survivors: Vec<LinkDraft> = drafts
            .into_iter()
            .filter(|d| known_urls.insert(d.url.to_lowercase()))
            .collect();

        if survivors.is_empty() {
            log::debug!("remote merge contributed nothing");
            return MergeReport::default();
        }

        let added_categories =
            self.resolve_categories(survivors.iter().map(|d| d.category.as_str()));
        let added_links = survivors.len();
        for draft in survivors {
            let id = self.fresh_id();
            self.links.push(draft.into_link(id));
        }

        self.save_links();
        if added_categories > 0 {
            self.save_categories();
        }
        log::info!("merged {added_links} remote links, {added_categories} new categories");
        MergeReport {
            added_links,
            added_categories,
        }
    }

    /// Add a link entered by the user. The url is stored exactly as given.
    pub fn add_manual_link(&mut self, draft: LinkDraft) -> &Link {
        let added_categories = self.resolve_categories(std::iter::once(draft.category.as_str()));
        let id = self.fresh_id();
        self.links.push(draft.into_link(id));

        self.save_links();
        if added_categories > 0 {
            self.save_categories();
        }
        &self.links[self.links.len() - 1]
    }

    /// Remove a link. Unknown ids are a no-op.
    pub fn delete_link(&mut self, id: &str) -> Option<Link> {
        let idx = self.links.iter().position(|l| l.id == id)?;
        let removed = self.links.remove(idx);
        self.save_links();
        Some(removed)
    }

    /// Count one confirmed visit. Returns the new count, or `None` for an unknown id.
    pub fn record_visit(&mut self, id: &str) -> Option<u64> {
        let link = self.links.iter_mut().find(|l| l.id == id)?;
        link.visits += 1;
        let visits = link.visits;
        self.save_links();
        Some(visits)
    }

    /// Append a derived category for each distinct, unknown, non-`other` id.
    /// Returns how many were created.
    fn resolve_categories<'a>(&mut self, ids: impl Iterator<Item = &'a str>) -> usize {
        let known: HashSet<&str> = self.categories.iter().map(|c| c.id.as_str()).collect();
        let fresh: IndexSet<String> = ids
            .filter(|id| !id.is_empty() && *id != OTHER_CATEGORY && !known.contains(id))
            .map(str::to_string)
            .collect();
        let count = fresh.len();
        self.categories
            .extend(fresh.iter().map(|id| Category::derived(id)));
        count
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if self.seen_ids.insert(id.clone()) {
                return id;
            }
        }
    }

    fn save_links(&self) {
        kv::save(&self.kv, LINKS_KEY, &self.links);
    }

    fn save_categories(&self) {
        kv::save(&self.kv, CATEGORIES_KEY, &self.categories);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::kv::MemoryKvStore;
    use crate::ops::filter::{CategoryFilter, filter_links};
    use crate::ops::ids::SequentialIds;
    use crate::ops::normalize::normalize;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn draft(title: &str, url: &str, category: &str) -> LinkDraft {
        LinkDraft {
            title: title.into(),
            url: url.into(),
            description: String::new(),
            category: category.into(),
            icon: None,
        }
    }

    /// A store persisted with no links and the given categories
    fn empty_store(categories: &[(&str, &str)]) -> LinkStore<MemoryKvStore> {
        let cats: Vec<Category> = categories
            .iter()
            .map(|(id, name)| Category {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect();
        let kv = MemoryKvStore::new()
            .with_entry(LINKS_KEY, "[]")
            .with_entry(CATEGORIES_KEY, &serde_json::to_string(&cats).unwrap());
        LinkStore::open_with_ids(kv, Box::new(SequentialIds::new("id")))
    }

    fn seeded_store() -> LinkStore<MemoryKvStore> {
        LinkStore::open_with_ids(MemoryKvStore::new(), Box::new(SequentialIds::new("id")))
    }

    #[test]
    fn empty_storage_falls_back_to_seed() {
        let store = seeded_store();
        assert_eq!(store.links(), seed_links().as_slice());
        assert_eq!(store.categories(), seed_categories().as_slice());
        assert!(store.kv().writes().is_empty());
    }

    #[test]
    fn corrupt_document_falls_back_independently() {
        let kv = MemoryKvStore::new()
            .with_entry(LINKS_KEY, "{{{ nope")
            .with_entry(CATEGORIES_KEY, r#"[{"id":"x","name":"X"}]"#);
        let store = LinkStore::open(kv);
        assert_eq!(store.links().len(), seed_links().len());
        assert_eq!(store.categories().len(), 1);
        assert_eq!(store.categories()[0].id, "x");
    }

    #[test]
    fn scenario_a_remote_merge_into_empty_store() {
        let mut store = empty_store(&[]);
        let payload = json!({"data":[{"site_name":"Foo","site_url":"https://foo.com","belong":"dev"}]});
        let report = store.merge_remote(normalize(&payload));

        assert_eq!(
            report,
            MergeReport {
                added_links: 1,
                added_categories: 1
            }
        );
        let link = &store.links()[0];
        assert_eq!(link.title, "Foo");
        assert_eq!(link.url, "https://foo.com");
        assert_eq!(link.category, "dev");
        assert_eq!(link.visits, 0);
        assert_eq!(
            store.categories(),
            &[Category {
                id: "dev".into(),
                name: "Dev".into()
            }]
        );
    }

    #[test]
    fn scenario_a_existing_category_not_duplicated() {
        let mut store = empty_store(&[("dev", "开发")]);
        let payload = json!({"data":[{"site_name":"Foo","site_url":"https://foo.com","belong":"dev"}]});
        let report = store.merge_remote(normalize(&payload));
        assert_eq!(report.added_categories, 0);
        assert_eq!(store.categories().len(), 1);
        assert_eq!(store.categories()[0].name, "开发");
        assert_eq!(store.kv().writes(), vec![LINKS_KEY.to_string()]);
    }

    #[test]
    fn scenario_b_case_insensitive_url_dedup() {
        let mut store = seeded_store();
        let before = store.links().len();
        let payload = json!([{"site_url": "https://GitHub.com", "site_name": "GH", "belong": "code"}]);
        let report = store.merge_remote(normalize(&payload));
        assert_eq!(report, MergeReport::default());
        assert_eq!(store.links().len(), before);
        assert!(store.categories().iter().all(|c| c.id != "code"));
        assert!(store.kv().writes().is_empty());
    }

    #[test]
    fn merging_same_payload_twice_is_idempotent() {
        let mut store = empty_store(&[]);
        let payload = json!({"links": [
            {"url": "https://a.io", "category": "x"},
            "https://b.io",
            {"href": "https://c.io", "belong": "y"}
        ]});
        let first = store.merge_remote(normalize(&payload));
        assert_eq!(first.added_links, 3);
        assert_eq!(first.added_categories, 2);
        store.kv().clear_writes();

        let second = store.merge_remote(normalize(&payload));
        assert_eq!(second, MergeReport::default());
        assert_eq!(store.links().len(), 3);
        assert_eq!(store.categories().len(), 2);
        assert!(store.kv().writes().is_empty());
    }

    #[test]
    fn duplicate_urls_within_one_batch_are_merged_once() {
        let mut store = empty_store(&[]);
        let report = store.merge_remote(vec![
            draft("A", "https://a.io", OTHER_CATEGORY),
            draft("A again", "HTTPS://A.IO", OTHER_CATEGORY),
        ]);
        assert_eq!(report.added_links, 1);
        assert_eq!(store.links()[0].title, "A");
    }

    #[test]
    fn shared_new_category_created_once_in_order() {
        let mut store = empty_store(&[]);
        store.merge_remote(vec![
            draft("1", "https://1.io", "zeta"),
            draft("2", "https://2.io", "alpha"),
            draft("3", "https://3.io", "zeta"),
            draft("4", "https://4.io", OTHER_CATEGORY),
        ]);
        let ids: Vec<&str> = store.categories().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
    }

    #[test]
    fn remote_links_get_fresh_ids_and_zero_visits() {
        let mut store = seeded_store();
        store.merge_remote(vec![draft("New", "https://new.io", "dev")]);
        let link = store.links().last().unwrap();
        assert_eq!(link.id, "id1");
        assert_eq!(link.visits, 0);
    }

    #[test]
    fn initialize_merges_fetch_once() {
        let kv = MemoryKvStore::new().with_entry(LINKS_KEY, "[]");
        let mut calls = 0;
        let (store, report) = LinkStore::initialize(kv, || {
            calls += 1;
            vec![draft("R", "https://r.io", "remote")]
        });
        assert_eq!(calls, 1);
        assert_eq!(report.added_links, 1);
        assert!(store.categories().iter().any(|c| c.id == "remote" && c.name == "Remote"));
    }

    #[test]
    fn scenario_e_malformed_payload_imports_nothing() {
        let mut store = empty_store(&[]);
        let report = store.merge_remote(normalize(&json!({"status": "ok", "count": 3})));
        assert_eq!(report, MergeReport::default());
        assert!(store.links().is_empty());
    }

    #[test]
    fn manual_add_stores_url_verbatim_and_creates_category() {
        let mut store = empty_store(&[("dev", "开发")]);
        let link = store.add_manual_link(draft("Test", "example.com", "tools")).clone();
        assert_eq!(link.url, "example.com");
        assert_eq!(link.visits, 0);
        assert_eq!(store.categories().last().unwrap(), &Category::derived("tools"));
        assert_eq!(
            store.kv().writes(),
            vec![LINKS_KEY.to_string(), CATEGORIES_KEY.to_string()]
        );
    }

    #[test]
    fn manual_add_to_other_or_known_category_skips_category_write() {
        let mut store = empty_store(&[("dev", "开发")]);
        store.add_manual_link(draft("A", "https://a.io", OTHER_CATEGORY));
        store.add_manual_link(draft("B", "https://b.io", "dev"));
        assert_eq!(store.categories().len(), 1);
        assert_eq!(
            store.kv().writes(),
            vec![LINKS_KEY.to_string(), LINKS_KEY.to_string()]
        );
    }

    #[test]
    fn manual_add_allows_duplicate_urls() {
        let mut store = seeded_store();
        let before = store.links().len();
        store.add_manual_link(draft("GitHub 2", "https://github.com", "dev"));
        assert_eq!(store.links().len(), before + 1);
    }

    #[test]
    fn delete_removes_and_persists() {
        let mut store = seeded_store();
        let removed = store.delete_link("3").unwrap();
        assert_eq!(removed.title, "Figma");
        assert!(store.find("3").is_none());
        assert_eq!(store.kv().writes(), vec![LINKS_KEY.to_string()]);

        let hits = filter_links(store.links(), &CategoryFilter::All, "Figma");
        assert!(hits.is_empty());
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let mut store = seeded_store();
        assert!(store.delete_link("nope").is_none());
        assert_eq!(store.links().len(), seed_links().len());
        assert!(store.kv().writes().is_empty());
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut store = empty_store(&[]);
        let first = store.add_manual_link(draft("A", "https://a.io", OTHER_CATEGORY)).id.clone();
        store.delete_link(&first);
        let second = store.add_manual_link(draft("B", "https://b.io", OTHER_CATEGORY)).id.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn generated_ids_skip_persisted_ones() {
        let kv = MemoryKvStore::new().with_entry(
            LINKS_KEY,
            r#"[{"id":"id1","title":"A","url":"https://a.io","category":"other","visits":0}]"#,
        );
        let mut store = LinkStore::open_with_ids(kv, Box::new(SequentialIds::new("id")));
        let id = store.add_manual_link(draft("B", "https://b.io", OTHER_CATEGORY)).id.clone();
        assert_eq!(id, "id2");
    }

    #[test]
    fn record_visit_increments_by_one() {
        let mut store = seeded_store();
        assert_eq!(store.record_visit("1"), Some(121));
        assert_eq!(store.find("1").unwrap().visits, 121);
        assert_eq!(store.record_visit("missing"), None);
        assert_eq!(store.kv().writes(), vec![LINKS_KEY.to_string()]);
    }

    #[test]
    fn persisted_state_reloads() {
        let mut store = empty_store(&[]);
        store.add_manual_link(draft("A", "https://a.io", "misc"));
        let links_doc = store.kv().raw(LINKS_KEY).unwrap();
        let cats_doc = store.kv().raw(CATEGORIES_KEY).unwrap();

        let kv = MemoryKvStore::new()
            .with_entry(LINKS_KEY, &links_doc)
            .with_entry(CATEGORIES_KEY, &cats_doc);
        let reloaded = LinkStore::open(kv);
        assert_eq!(reloaded.links(), store.links());
        assert_eq!(reloaded.categories(), store.categories());
    }

    #[test]
    fn category_name_falls_back_to_id() {
        let store = seeded_store();
        assert_eq!(store.category_name("dev"), "开发");
        assert_eq!(store.category_name("ghost"), "ghost");
    }
}
