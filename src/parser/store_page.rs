// Store and search page helpers used by the description lookup
use crate::utils::{absolute_url, collapse_whitespace};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static DIVS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div[class]").unwrap());
static ANCHORS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static APP_HREF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/app/\d+/").unwrap());

// Tried in order; the first class pattern with a non-empty match wins.
static DESCRIPTION_CLASS_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)game.*description").unwrap(),
        Regex::new(r"(?i)short.*description").unwrap(),
        Regex::new(r"(?i)summary").unwrap(),
    ]
});

/// Short description block of a game page, whitespace-collapsed.
pub fn parse_store_description(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    DESCRIPTION_CLASS_RES.iter().find_map(|pattern| {
        document
            .select(&DIVS)
            .filter(|el| el.value().attr("class").is_some_and(|c| pattern.is_match(c)))
            .map(|el| collapse_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
            .find(|text| !text.is_empty())
    })
}

/// First `/app/<id>/` link on a search results page, made absolute.
pub fn find_app_link(html: &str, store_base: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHORS)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| APP_HREF_RE.is_match(href))
        .map(|href| absolute_url(store_base, href))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_snippet_block() {
        let html = r#"<div class="glance_ctn">
            <div class="game_description_snippet">
                Explore a vast,   ruined kingdom of insects and heroes.
            </div></div>"#;
        assert_eq!(
            parse_store_description(html).as_deref(),
            Some("Explore a vast, ruined kingdom of insects and heroes.")
        );
    }

    #[test]
    fn falls_back_to_summary_blocks() {
        let html = r#"<div class="review_summary"></div><div class="user_reviews_summary_row">Very Positive</div>"#;
        assert_eq!(parse_store_description(html).as_deref(), Some("Very Positive"));
        assert_eq!(parse_store_description("<p>nothing</p>"), None);
    }

    #[test]
    fn resolves_first_app_link() {
        let html = r#"<a href="/about/">About</a>
            <a href="/app/367520/Hollow_Knight/?snr=1">Hollow Knight</a>
            <a href="/app/1/Other/">Other</a>"#;
        assert_eq!(
            find_app_link(html, "https://store.steampowered.com").as_deref(),
            Some("https://store.steampowered.com/app/367520/Hollow_Knight/?snr=1")
        );
        assert_eq!(find_app_link("<a href='/about/'>x</a>", "https://s"), None);
    }
}
