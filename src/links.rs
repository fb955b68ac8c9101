// Outbound marketplace links
use regex::Regex;
use reqwest::Url;
use std::sync::LazyLock;

/// Completed, sold, used-condition listings between $150 and $600, 240 per page.
const SOLD_USED_PARAMS: [(&str, &str); 8] = [
    ("_sacat", "6000"),
    ("LH_Sold", "1"),
    ("LH_Complete", "1"),
    ("_udlo", "150"),
    ("_udhi", "600"),
    ("rt", "nc"),
    ("LH_ItemCondition", "4"),
    ("_ipg", "240"),
];

static SEARCH_ENDPOINT: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://www.ebay.com/sch/i.html").expect("static endpoint URL"));

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_\s]").expect("static pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

/// Reduces a free-text title to the `_nkw` search term: punctuation dropped,
/// whitespace runs joined with `+`. Edge whitespace becomes a `+` too.
pub fn search_term(title: &str) -> String {
    let stripped = NON_WORD.replace_all(title, "");
    WHITESPACE_RUN
        .replace_all(&stripped, "+")
        .trim()
        .to_string()
}

/// Sold-listings search URL for a title. The same title always yields the same URL.
pub fn build_search_url(title: &str) -> String {
    let mut url = SEARCH_ENDPOINT.clone();
    url.query_pairs_mut()
        .append_pair("_nkw", &search_term(title))
        .extend_pairs(SOLD_USED_PARAMS);
    url.into()
}
