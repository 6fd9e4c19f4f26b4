use regex::Regex;
use std::num::ParseIntError;

/// Patterns scraped out of AllKeyShop pages. Compiled once per client and only
/// read afterwards.
pub struct PagePatterns {
    product_id: Regex,
    wishlist_link: Regex,
}

impl PagePatterns {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // Product pages embed `productId = 12345` in an inline script
            product_id: Regex::new(r"(?i)productId\s*=\s*(\d+)")?,
            // The profile page links to /list/<nickname>/<wishlistID>
            wishlist_link: Regex::new(r#"href="[^"]*/list/([^/"]+)/(\d+)/?""#)?,
        })
    }

    /// Digits of the first `productId = N` in the page
    pub fn product_id<'a>(&self, body: &'a str) -> Option<&'a str> {
        self.product_id
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// `(nickname, wishlist ID digits)` from the first wishlist link
    pub fn wishlist_handle<'a>(&self, body: &'a str) -> Option<(&'a str, &'a str)> {
        let caps = self.wishlist_link.captures(body)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }
}

/// `\d` also matches non-ASCII digits and long runs can overflow, so the
/// captured text still has to be parsed
pub fn parse_id(digits: &str) -> Result<u64, ParseIntError> {
    digits.parse::<u64>()
}

/// URL slug AllKeyShop uses for a game title: transliterated to ASCII,
/// lowercased, with every run of other characters collapsed into one hyphen.
/// `&` and `@` are spelled out first and quotes are dropped, so possessives
/// stay in one word (`baldurs-gate-3`).
pub fn make_slug(title: &str) -> String {
    let mut expanded = String::with_capacity(title.len());
    for c in title.chars() {
        match c {
            '&' => expanded.push_str(" and "),
            '@' => expanded.push_str(" at "),
            '\'' | '"' | '\u{2019}' => {}
            '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}' => expanded.push('-'),
            _ => expanded.push(c),
        }
    }
    slug::slugify(expanded)
}
