use serde_json::{Map, Value};
use url::Url;

use crate::model::link::{DEFAULT_ICON, LinkDraft, OTHER_CATEGORY};

/// Title used when a remote record names no site
pub const UNNAMED_TITLE: &str = "未命名站点";
/// Url used when a remote record carries no address
pub const PLACEHOLDER_URL: &str = "#";
/// Description used when a remote record has none
pub const REMOTE_DESCRIPTION: &str = "来自远程 API 的推荐链接。";

/// Where a rule reads its value from
#[derive(Debug, Clone, Copy)]
enum Source {
    /// A named property of an object element
    Field(&'static str),
    /// The element itself (bare url strings)
    Element,
}

/// One candidate in a field's resolution chain
#[derive(Debug, Clone, Copy)]
struct Rule {
    source: Source,
    extract: fn(&Value) -> Option<String>,
}

const fn field(name: &'static str) -> Rule {
    Rule {
        source: Source::Field(name),
        extract: text_value,
    }
}

const TITLE_RULES: &[Rule] = &[
    field("site_name"),
    field("title"),
    field("name"),
    field("siteName"),
];

const URL_RULES: &[Rule] = &[
    field("site_url"),
    field("url"),
    field("link"),
    field("href"),
    field("siteUrl"),
    Rule {
        source: Source::Element,
        extract: string_value,
    },
];

const DESCRIPTION_RULES: &[Rule] = &[
    field("opinion"),
    field("site_tips"),
    field("description"),
    field("desc"),
];

const CATEGORY_RULES: &[Rule] = &[field("belong"), field("category")];

const ICON_RULES: &[Rule] = &[field("icon")];

/// A loosely-typed value counts as present when it is a non-empty string or
/// a non-zero number.
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn string_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Evaluate rules in priority order; first present value wins
fn resolve(element: &Value, fields: Option<&Map<String, Value>>, rules: &[Rule]) -> Option<String> {
    rules.iter().find_map(|rule| match rule.source {
        Source::Field(name) => fields.and_then(|m| m.get(name)).and_then(rule.extract),
        Source::Element => (rule.extract)(element),
    })
}

/// Locate the record array: the payload itself, or its `data` / `links` property
fn record_array(raw: &Value) -> &[Value] {
    if let Value::Array(items) = raw {
        return items;
    }
    for key in ["data", "links"] {
        if let Some(Value::Array(items)) = raw.get(key) {
            return items;
        }
    }
    &[]
}

/// Hostname of a url, if it parses and has one
pub fn url_host(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .filter(|h| !h.is_empty())
}

/// Map one remote element to a draft, filling every gap from the fallback chain
pub fn normalize_record(element: &Value) -> LinkDraft {
    let fields = element.as_object();

    let url = resolve(element, fields, URL_RULES).unwrap_or_else(|| PLACEHOLDER_URL.to_string());

    let title = match resolve(element, fields, TITLE_RULES) {
        Some(title) if title != UNNAMED_TITLE => title,
        _ if url != PLACEHOLDER_URL => url_host(&url).unwrap_or_else(|| UNNAMED_TITLE.to_string()),
        _ => UNNAMED_TITLE.to_string(),
    };

    let description = resolve(element, fields, DESCRIPTION_RULES)
        .unwrap_or_else(|| REMOTE_DESCRIPTION.to_string());
    let category =
        resolve(element, fields, CATEGORY_RULES).unwrap_or_else(|| OTHER_CATEGORY.to_string());
    let icon = resolve(element, fields, ICON_RULES).unwrap_or_else(|| DEFAULT_ICON.to_string());

    LinkDraft {
        title,
        url,
        description,
        category,
        icon: Some(icon),
    }
}

/// Normalize an arbitrary remote payload into link drafts.
///
/// Unrecognized payload shapes yield nothing; individual malformed records are
/// kept and patched with fallbacks.
pub fn normalize(raw: &Value) -> Vec<LinkDraft> {
    record_array(raw).iter().map(normalize_record).collect()
}
