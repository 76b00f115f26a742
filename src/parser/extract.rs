//! Heuristic field extraction shared by the listing parsers.
//!
//! Every rule here is a best-effort filter over noisy markup text: a `None`
//! means the candidate should be dropped, never that something went wrong.

use crate::utils::{ELLIPSIS, collapse_whitespace};
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static DISCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-\d+%").unwrap());
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[$€£]\d+(?:[.,]\d+)*|Rp\s*\d+(?:[.,]\d{3})*").unwrap()
});
static PRICE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[$€£]\d|Rp\s*\d)").unwrap());
static DISCOUNT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-\d+%").unwrap());

const MONTH: &str = concat!(
    r"\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|",
    r"aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b\.?",
);

// Sibling text that bleeds into a container's title: "10 January, 2024" and "Jan 10, 2024".
static DATE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\s*(?:\b\d{{1,2}}\s+{MONTH}|{MONTH}\s+\d{{1,2}}),?\s+\d{{4}}.*$"
    ))
    .unwrap()
});
static DISCOUNT_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*-\d+%.*$").unwrap());
static PRICE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:Rp|[$€£])\s*\d.*$").unwrap());
static DIGIT_RUN_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\d[\d.,]{2,}$").unwrap());

static APP_HREF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/app/\d+").unwrap());
static CLASSED: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[class]").unwrap());
static ANCHORS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

pub const MIN_LINE_NAME_LEN: usize = 5;
pub const MAX_LINE_NAME_LEN: usize = 100;
pub const DEFAULT_DESCRIPTION_LEN: usize = 200;

/// First `-NN%` marker in the text.
pub fn extract_discount(text: &str) -> Option<String> {
    DISCOUNT_RE.find(text).map(|m| m.as_str().to_string())
}

/// The single rule turning discount text into a percentage: strip `-` and `%`,
/// parse, fall back to 0.
pub fn parse_discount_percent(text: &str) -> u32 {
    text.replace(['-', '%'], "").trim().parse().unwrap_or(0)
}

/// First currency-prefixed amount (`$`, `€`, `£`, `Rp`).
pub fn extract_price(text: &str) -> Option<String> {
    PRICE_RE.find(text).map(|m| m.as_str().to_string())
}

/// First line that looks like a title rather than a price or discount.
pub fn name_from_lines(text: &str) -> Option<String> {
    text.lines().map(str::trim).find_map(|line| {
        let len = line.chars().count();
        let plausible = (MIN_LINE_NAME_LEN..MAX_LINE_NAME_LEN).contains(&len)
            && !PRICE_LINE_RE.is_match(line)
            && !DISCOUNT_LINE_RE.is_match(line);
        plausible.then(|| line.to_string())
    })
}

/// Name and store link found in a listing container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub name: String,
    pub href: Option<String>,
}

/// Text nodes of an element, trimmed, one per line.
pub fn container_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Recovers a game name from a listing container.
///
/// Preference order: an element whose class mentions `title` or `name`, then
/// the text of an `/app/<id>` link, then (when `allow_line_scan`) the first
/// plausible text line.
pub fn extract_name(container: ElementRef<'_>, allow_line_scan: bool) -> Option<NameMatch> {
    let own_href = container
        .value()
        .attr("href")
        .filter(|href| APP_HREF_RE.is_match(href));
    let app_anchor = container
        .select(&ANCHORS)
        .find(|a| a.value().attr("href").is_some_and(|h| APP_HREF_RE.is_match(h)));
    let href = own_href
        .or_else(|| app_anchor.and_then(|a| a.value().attr("href")))
        .map(str::to_string);

    let titled = container.select(&CLASSED).find_map(|el| {
        let class = el.value().attr("class")?.to_lowercase();
        if !(class.contains("title") || class.contains("name")) {
            return None;
        }
        let text = collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "));
        (text.chars().count() >= 3).then_some(text)
    });
    if let Some(name) = titled {
        return Some(NameMatch { name, href });
    }

    let linked = app_anchor
        .map(|a| collapse_whitespace(&a.text().collect::<Vec<_>>().join(" ")))
        .filter(|text| text.chars().count() >= 3);
    if let Some(name) = linked {
        return Some(NameMatch { name, href });
    }

    if allow_line_scan {
        return name_from_lines(&container_text(container)).map(|name| NameMatch { name, href });
    }
    None
}

/// Strips the artifacts sibling elements leave on a scraped title.
///
/// Dates go first: the generic digit-run rule would otherwise eat the year and
/// leave `"10 January,"` behind.
pub fn clean_name(raw: &str) -> String {
    let mut name = collapse_whitespace(raw);
    name = DATE_SUFFIX_RE.replace(&name, "").into_owned();
    name = DISCOUNT_SUFFIX_RE.replace(&name, "").into_owned();
    name = PRICE_SUFFIX_RE.replace(&name, "").into_owned();
    while DIGIT_RUN_SUFFIX_RE.is_match(&name) {
        name = DIGIT_RUN_SUFFIX_RE.replace(&name, "").into_owned();
    }
    name.trim().to_string()
}

/// Bounds a description to `max_len` characters plus an ellipsis, cutting on a
/// word boundary.
///
/// Every non-empty result ends in `.`, `!`, `?` or the ellipsis. Empty (or
/// whitespace-only) input is the one exception: it comes back empty, and
/// callers treat that as "no description" and substitute a placeholder.
pub fn truncate_description(text: &str, max_len: usize) -> String {
    let text = collapse_whitespace(text);
    if text.is_empty() {
        return text;
    }
    if text.chars().count() <= max_len {
        return if text.ends_with(['.', '!', '?']) {
            text
        } else {
            format!("{text}.")
        };
    }

    let head: String = text.chars().take(max_len).collect();
    let breaks_cleanly = text.chars().nth(max_len).is_some_and(char::is_whitespace);
    let cut = match head.rfind(' ') {
        _ if breaks_cleanly => head.as_str(),
        Some(idx) if idx > 0 => &head[..idx],
        _ => head.as_str(),
    };
    let cut = cut.trim_end_matches(|c: char| {
        c.is_whitespace() || matches!(c, ',' | ';' | ':' | '-' | '.')
    });
    format!("{cut}{ELLIPSIS}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn fragment(html: &str) -> Html {
        Html::parse_fragment(html)
    }

    #[test]
    fn discount_is_the_first_minus_percent_marker() {
        assert_eq!(extract_discount("Sale -75% then -10%").as_deref(), Some("-75%"));
        assert_eq!(extract_discount("Free weekend"), None);
        assert_eq!(extract_discount("75% off"), None);
    }

    #[test]
    fn percent_parsing_round_trips() {
        for pct in [0u32, 5, 33, 50, 90, 100] {
            let text = format!("-{pct}%");
            assert_eq!(parse_discount_percent(&text), pct);
            assert_eq!(parse_discount_percent(&text), parse_discount_percent(&text));
            let found = extract_discount(&format!("Game {text} $1.99")).unwrap();
            assert_eq!(format!("-{}%", parse_discount_percent(&found)), text);
        }
        assert_eq!(parse_discount_percent("Unknown"), 0);
        assert_eq!(parse_discount_percent(""), 0);
    }

    #[test]
    fn price_matches_each_currency() {
        assert_eq!(extract_price("now $19.99 only").as_deref(), Some("$19.99"));
        assert_eq!(extract_price("€5,49").as_deref(), Some("€5,49"));
        assert_eq!(extract_price("£12").as_deref(), Some("£12"));
        assert_eq!(extract_price("-20% Rp 50000").as_deref(), Some("Rp 50000"));
        assert_eq!(extract_price("Rp 129.999").as_deref(), Some("Rp 129.999"));
        assert_eq!(extract_price("-20% Free to Play"), None);
    }

    #[test]
    fn line_scan_skips_prices_discounts_and_short_lines() {
        let text = "-40%\n$9.99\nRPG\n  Baldur's Gate 3  \nOther";
        assert_eq!(name_from_lines(text).as_deref(), Some("Baldur's Gate 3"));
        assert_eq!(name_from_lines("-40%\n$9.99\nabc"), None);
        let long = "x".repeat(MAX_LINE_NAME_LEN);
        assert_eq!(name_from_lines(&long), None);
        assert_eq!(name_from_lines("Hades").as_deref(), Some("Hades"));
    }

    #[test]
    fn cleans_dates_discounts_and_prices() {
        assert_eq!(clean_name("Great Game  10 January, 2024 -20% Rp 50000"), "Great Game");
        assert_eq!(clean_name("Hades Sep 17, 2020"), "Hades");
        assert_eq!(clean_name("Celeste -75% $4.99"), "Celeste");
        assert_eq!(clean_name("Celeste €4,99"), "Celeste");
        assert_eq!(clean_name("Terraria 1,234,567"), "Terraria");
        assert_eq!(clean_name("Octopath Traveler 2"), "Octopath Traveler 2");
    }

    #[test]
    fn keeps_short_sequel_numbers() {
        assert_eq!(clean_name("Portal 2"), "Portal 2");
        assert_eq!(clean_name("Half-Life 2: Episode One"), "Half-Life 2: Episode One");
    }

    #[test]
    fn only_month_names_make_a_date() {
        assert_eq!(clean_name("Persona 5 Royal 2022"), "Persona 5 Royal");
        assert_eq!(clean_name("Yakuza 0 Director's Cut 2024"), "Yakuza 0 Director's Cut");
        assert_eq!(clean_name("Persona 5 Royal 21 Oct, 2022"), "Persona 5 Royal");
        assert_eq!(clean_name("Persona 5 Royal 21 Oct. 2022"), "Persona 5 Royal");
        assert_eq!(clean_name("Hitman 3 Marching Band 2021"), "Hitman 3 Marching Band");
    }

    #[test]
    fn description_within_budget_gets_terminal_punctuation() {
        assert_eq!(
            truncate_description("A roguelike  dungeon crawler", 200),
            "A roguelike dungeon crawler."
        );
        assert_eq!(truncate_description("Fight!", 200), "Fight!");
        assert_eq!(truncate_description("   ", 200), "");
    }

    #[test]
    fn non_empty_descriptions_end_in_terminal_punctuation() {
        let long = "word ".repeat(80);
        for input in ["Climb", "Climb.", "Why?", long.as_str(), " a ", "x"] {
            let out = truncate_description(input, 50);
            assert!(!out.is_empty());
            assert!(out.ends_with(['.', '!', '?']), "{out:?}");
        }
        assert!(truncate_description("", 50).is_empty());
    }

    #[test]
    fn long_description_is_cut_on_a_word_boundary() {
        let text = "word ".repeat(80);
        let out = truncate_description(&text, 200);
        assert!(out.chars().count() <= 200 + ELLIPSIS.len());
        assert!(out.ends_with(ELLIPSIS));
        assert!(out.trim_end_matches(ELLIPSIS).ends_with("word"));

        let unbroken = "a".repeat(500);
        let out = truncate_description(&unbroken, 50);
        assert_eq!(out.chars().count(), 50 + ELLIPSIS.len());
    }

    #[test]
    fn name_prefers_title_elements() {
        let doc = fragment(
            r#"<div class="game_item">
                 <a href="/app/620/Portal_2/"><img src="x.jpg"></a>
                 <div class="tab_item_name">Portal 2</div>
                 <div>-90%</div><div>$0.99</div>
               </div>"#,
        );
        let container = doc.select(&Selector::parse("div.game_item").unwrap()).next().unwrap();
        let found = extract_name(container, true).unwrap();
        assert_eq!(found.name, "Portal 2");
        assert_eq!(found.href.as_deref(), Some("/app/620/Portal_2/"));
    }

    #[test]
    fn name_falls_back_to_link_then_lines() {
        let doc = fragment(
            r#"<div class="a"><a href="https://store.steampowered.com/app/105600/">Terraria</a> -50% $4.99</div>
               <div class="b"><span>-50%</span><span>$4.99</span><span>Stardew Valley</span></div>"#,
        );
        let a = doc.select(&Selector::parse("div.a").unwrap()).next().unwrap();
        assert_eq!(extract_name(a, false).unwrap().name, "Terraria");

        let b = doc.select(&Selector::parse("div.b").unwrap()).next().unwrap();
        assert_eq!(extract_name(b, false), None);
        let scanned = extract_name(b, true).unwrap();
        assert_eq!(scanned.name, "Stardew Valley");
        assert_eq!(scanned.href, None);
    }
}
