// Utility functions

pub const ELLIPSIS: &str = "...";

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cuts `text` to at most `max_chars` characters, ellipsis included.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Store search link used when no canonical page is known.
pub fn search_url(store_base: &str, term: &str) -> String {
    format!(
        "{}/search/?term={}",
        store_base.trim_end_matches('/'),
        urlencoding::encode(term)
    )
}

/// Resolves a possibly relative `href` against the store base.
pub fn absolute_url(store_base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        format!(
            "{}/{}",
            store_base.trim_end_matches('/'),
            href.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let name = "Ōkami HD ".repeat(10);
        let cut = truncate_chars(&name, 30);
        assert_eq!(cut.chars().count(), 30);
        assert!(cut.ends_with(ELLIPSIS));
        assert_eq!(truncate_chars("short", 30), "short");
    }

    #[test]
    fn search_url_encodes_the_term() {
        assert_eq!(
            search_url("https://store.steampowered.com/", "Half-Life: Alyx"),
            "https://store.steampowered.com/search/?term=Half-Life%3A%20Alyx"
        );
    }

    #[test]
    fn absolute_url_handles_relative_and_protocol_relative() {
        let base = "https://store.steampowered.com";
        assert_eq!(
            absolute_url(base, "/app/620/Portal_2/"),
            "https://store.steampowered.com/app/620/Portal_2/"
        );
        assert_eq!(absolute_url(base, "//cdn.example.com/x"), "https://cdn.example.com/x");
        assert_eq!(absolute_url(base, "https://a.b/c"), "https://a.b/c");
    }
}
