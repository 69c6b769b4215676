//! HTML result page parsing
//!
//! Extracts hits from the DuckDuckGo HTML endpoint. Result blocks carry a
//! `result` or `result__body` class; inside each block the title anchor has
//! `result__a`, the display URL `result__url` and the summary
//! `result__snippet`. Links are usually `//duckduckgo.com/l/?uddg=<target>`
//! redirects and are resolved to the target.

use regex::Regex;

use crate::domain::SearchHit;

#[derive(Debug, Clone)]
pub struct ResultPageParser {
    block: Regex,
    title: Regex,
    url: Regex,
    snippet: Regex,
    href: Regex,
    tag: Regex,
    whitespace: Regex,
}

impl ResultPageParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            block: Regex::new(r#"class="[^"]*\bresult(?:__body)?\b[^"]*""#)?,
            title: Regex::new(r#"(?s)<a\s([^>]*\bresult__a\b[^>]*)>(.*?)</a>"#)?,
            url: Regex::new(r#"(?s)<a\s([^>]*\bresult__url\b[^>]*)>"#)?,
            snippet: Regex::new(
                r#"(?s)<(?:a|div|td)\s[^>]*\bresult__snippet\b[^>]*>(.*?)</(?:a|div|td)>"#,
            )?,
            href: Regex::new(r#"\bhref\s*=\s*"([^"]*)""#)?,
            tag: Regex::new(r"<[^>]*>")?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Parse at most `limit` hits with absolute http(s) links
    pub fn parse(&self, html: &str, limit: usize) -> Vec<SearchHit> {
        let starts: Vec<usize> = self.block.find_iter(html).map(|m| m.start()).collect();
        let mut hits = Vec::new();

        for (i, start) in starts.iter().enumerate() {
            if hits.len() >= limit {
                break;
            }
            let end = starts.get(i + 1).copied().unwrap_or(html.len());
            if let Some(hit) = self.parse_block(&html[*start..end]) {
                hits.push(hit);
            }
        }
        hits
    }

    fn parse_block(&self, block: &str) -> Option<SearchHit> {
        let title = self.title.captures(block)?;
        let title_text = self.text(title.get(2)?.as_str());
        if title_text.is_empty() {
            return None;
        }

        let url_href = self
            .url
            .captures(block)
            .and_then(|c| c.get(1).and_then(|attrs| self.attr_href(attrs.as_str())));
        let title_href = title.get(1).and_then(|attrs| self.attr_href(attrs.as_str()));

        let link = url_href
            .and_then(|href| resolve_link(&href))
            .or_else(|| title_href.and_then(|href| resolve_link(&href)))?;

        let snippet = self
            .snippet
            .captures(block)
            .and_then(|c| c.get(1))
            .map(|m| self.text(m.as_str()))
            .unwrap_or_default();

        Some(SearchHit::new(&title_text, link, &snippet))
    }

    fn attr_href(&self, attrs: &str) -> Option<String> {
        self.href
            .captures(attrs)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Inner HTML to plain text
    fn text(&self, fragment: &str) -> String {
        let stripped = self.tag.replace_all(fragment, "");
        let decoded = decode_entities(&stripped);
        self.whitespace.replace_all(decoded.trim(), " ").into_owned()
    }
}

/// Resolve a result href to an absolute http(s) target
fn resolve_link(raw: &str) -> Option<String> {
    let href = decode_entities(raw.trim());
    let absolute = match href.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => href,
    };
    let target = redirect_target(&absolute).unwrap_or(absolute);

    (target.starts_with("http://") || target.starts_with("https://")).then_some(target)
}

/// Target of a `uddg=` redirect, if present
fn redirect_target(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let encoded = query.split('&').find_map(|pair| pair.strip_prefix("uddg="))?;
    urlencoding::decode(encoded).ok().map(|decoded| decoded.into_owned())
}

/// Named, decimal and hex character references
fn decode_entities(value: &str) -> String {
    html_escape::decode_html_entities(value).into_owned()
}
