//! Compound CSS selectors for the in-memory document.
//!
//! Supports a single compound selector: an optional tag name followed by any
//! number of `#id`, `.class`, `[attr]` and `[attr="value"]` parts. Combinators
//! and pseudo-classes are not supported.

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Selector {
    /// Parse `input`, returning `None` for anything outside the supported
    /// subset.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut selector = Self::default();
        let mut rest = input;

        let tag_len = ident_len(rest);
        if tag_len > 0 {
            selector.tag = Some(rest[..tag_len].to_ascii_lowercase());
            rest = &rest[tag_len..];
        }

        while let Some(first) = rest.chars().next() {
            match first {
                '#' | '.' => {
                    let len = ident_len(&rest[1..]);
                    if len == 0 {
                        return None;
                    }
                    let name = rest[1..=len].to_string();
                    if first == '#' {
                        selector.id = Some(name);
                    } else {
                        selector.classes.push(name);
                    }
                    rest = &rest[1 + len..];
                }
                '[' => {
                    let close = rest.find(']')?;
                    let body = &rest[1..close];
                    selector.attributes.push(parse_attribute(body)?);
                    rest = &rest[close + 1..];
                }
                _ => return None,
            }
        }

        Some(selector)
    }

    /// Whether an element with these properties matches.
    pub fn matches(&self, tag: &str, attribute: impl Fn(&str) -> Option<String>) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if let Some(expected) = &self.id {
            if attribute("id").as_deref() != Some(expected.as_str()) {
                return false;
            }
        }

        if !self.classes.is_empty() {
            let class_attr = attribute("class").unwrap_or_default();
            let present: Vec<&str> = class_attr.split_whitespace().collect();
            if !self.classes.iter().all(|c| present.contains(&c.as_str())) {
                return false;
            }
        }

        self.attributes
            .iter()
            .all(|(name, expected)| match (attribute(name), expected) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == *expected,
            })
    }
}

fn ident_len(s: &str) -> usize {
    s.char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        .map_or(s.len(), |(i, _)| i)
}

fn parse_attribute(body: &str) -> Option<(String, Option<String>)> {
    let Some((name, value)) = body.split_once('=') else {
        let name = body.trim();
        return (!name.is_empty() && ident_len(name) == name.len())
            .then(|| (name.to_string(), None));
    };

    let name = name.trim();
    if name.is_empty() || ident_len(name) != name.len() {
        return None;
    }

    let value = value.trim();
    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);

    Some((name.to_string(), Some(unquoted.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_class_selector() {
        let selector = Selector::parse(".flash-message").unwrap();
        assert!(selector.matches("div", attrs(&[("class", "flash-message success")])));
        assert!(!selector.matches("div", attrs(&[("class", "flash")])));
        assert!(!selector.matches("div", attrs(&[])));
    }

    #[test]
    fn test_tag_with_attribute_value() {
        let selector = Selector::parse("input[type=\"file\"]").unwrap();
        assert!(selector.matches("INPUT", attrs(&[("type", "file")])));
        assert!(!selector.matches("input", attrs(&[("type", "text")])));
        assert!(!selector.matches("select", attrs(&[("type", "file")])));
    }

    #[test]
    fn test_presence_attribute() {
        let selector = Selector::parse("[required]").unwrap();
        assert!(selector.matches("input", attrs(&[("required", "")])));
        assert!(!selector.matches("input", attrs(&[("name", "x")])));
    }

    #[test]
    fn test_id_and_class_compound() {
        let selector = Selector::parse("form#competitionForm.wide").unwrap();
        assert!(selector.matches(
            "form",
            attrs(&[("id", "competitionForm"), ("class", "wide card")])
        ));
        assert!(!selector.matches("form", attrs(&[("id", "competitionForm")])));
    }

    #[test]
    fn test_unsupported_selectors() {
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("form input").is_none());
        assert!(Selector::parse("a:hover").is_none());
        assert!(Selector::parse("[unterminated").is_none());
        assert!(Selector::parse(".").is_none());
    }
}
