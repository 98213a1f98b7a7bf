//! Text-pattern scanning of step markup.
//!
//! Steps carry HTML fragments that may embed `data-next` and `data-popup`
//! attributes. Only the validator and the presentation adapter look inside
//! markup; the navigation engine works on resolved buttons.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedAnchor {
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub href: String,
    pub label: String,
}

fn next_attr_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"data-next=["']([^"']+)["']"#).expect("data-next pattern"))
}

fn popup_attr_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r#"data-popup=["']([^"']+)["']"#).expect("data-popup pattern"))
}

fn open_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)<([a-z][a-z0-9]*)\b([^>]*)>").expect("open tag pattern")
    })
}

fn href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"(?i)\bhref\s*=\s*["']([^"']*)["']"#).expect("href pattern"))
}

fn blank_target_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)\btarget\s*=\s*["']_blank["']"#).expect("target pattern")
    })
}

fn any_tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern"))
}

fn block_break_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6])\s*>").expect("block break pattern")
    })
}

pub fn next_targets(html: &str) -> Vec<String> {
    next_attr_pattern()
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

pub fn popup_keys(html: &str) -> Vec<String> {
    popup_attr_pattern()
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

struct Element<'a> {
    tag: &'a str,
    attrs: &'a str,
    inner: &'a str,
}

fn elements(html: &str) -> Vec<Element<'_>> {
    let lower = html.to_ascii_lowercase();
    let mut found = Vec::new();
    for caps in open_tag_pattern().captures_iter(html) {
        let (Some(whole), Some(tag), Some(attrs)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let closing = format!("</{}", tag.as_str().to_ascii_lowercase());
        let inner = match lower[whole.end()..].find(&closing) {
            Some(offset) => &html[whole.end()..whole.end() + offset],
            None => "",
        };
        found.push(Element {
            tag: tag.as_str(),
            attrs: attrs.as_str(),
            inner,
        });
    }
    found
}

pub fn embedded_anchors(html: &str) -> Vec<EmbeddedAnchor> {
    elements(html)
        .into_iter()
        .filter_map(|element| {
            let caps = next_attr_pattern().captures(element.attrs)?;
            let target = caps[1].to_string();
            let label = to_plain_text(element.inner);
            Some(EmbeddedAnchor {
                label: if label.is_empty() {
                    target.clone()
                } else {
                    label
                },
                target,
            })
        })
        .collect()
}

pub fn external_links(html: &str) -> Vec<ExternalLink> {
    elements(html)
        .into_iter()
        .filter(|element| element.tag.eq_ignore_ascii_case("a"))
        .filter_map(|element| external_link(element.attrs, element.inner))
        .collect()
}

fn external_link(attrs: &str, inner: &str) -> Option<ExternalLink> {
    let href = href_pattern()
        .captures(attrs)
        .map(|caps| caps[1].to_string())?;
    let opens_elsewhere = href.starts_with("http") || blank_target_pattern().is_match(attrs);
    if !opens_elsewhere {
        return None;
    }
    let label = to_plain_text(inner);
    Some(ExternalLink {
        href,
        label: if label.is_empty() {
            "link".to_string()
        } else {
            label
        },
    })
}

pub fn to_plain_text(html: &str) -> String {
    let with_breaks = block_break_pattern().replace_all(html, "\n");
    let stripped = any_tag_pattern().replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);
    decoded
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_targets_accepts_both_quote_styles() {
        let html = r#"<a data-next="s2">Two</a> or <span data-next='__back__'>back</span>"#;
        assert_eq!(next_targets(html), vec!["s2", "__back__"]);
    }

    #[test]
    fn popup_keys_are_collected_in_order() {
        let html = r#"<a data-popup="lawful-basis">basis</a><b data-popup='retention'>r</b>"#;
        assert_eq!(popup_keys(html), vec!["lawful-basis", "retention"]);
    }

    #[test]
    fn plain_text_keeps_block_breaks() {
        let html = "<p>First&nbsp;line</p><p>Second <strong>bold</strong> &amp; more</p>";
        assert_eq!(to_plain_text(html), "First line\nSecond bold & more");
    }
}
