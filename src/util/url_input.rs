/// Prepare a url typed into the add form.
///
/// The input is trimmed; with `auto_https` a missing `http://` or `https://`
/// scheme (case-insensitive) is replaced by `https://`. Blank input stays
/// empty so callers can reject it.
pub fn prepare_url(input: &str, auto_https: bool) -> String {
    let url = input.trim();
    if auto_https && !url.is_empty() && !has_http_scheme(url) {
        format!("https://{url}")
    } else {
        url.to_string()
    }
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
