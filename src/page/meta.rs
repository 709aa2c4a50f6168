// src/page/meta.rs
use lazy_static::lazy_static;
use regex_lite::Regex;

lazy_static! {
    static ref META_TAG: Regex = Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex");
    static ref ATTRIBUTE: Regex =
        Regex::new(r#"(?is)([a-z_:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex");
}

/// Find `<meta name="{name}" content="...">` in a served page and return the
/// decoded content. Attribute order and quoting style don't matter.
pub fn extract_meta_content(html: &str, name: &str) -> Option<String> {
    for tag in META_TAG.find_iter(html) {
        let mut meta_name = None;
        let mut content = None;

        for caps in ATTRIBUTE.captures_iter(tag.as_str()) {
            let value = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());
            match caps.get(1).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
                Some("name") => meta_name = value,
                Some("content") => content = value,
                _ => {}
            }
        }

        if meta_name.is_some_and(|n| n.eq_ignore_ascii_case(name)) {
            return content.map(decode_entities);
        }
    }
    None
}

// Entities html/template emits inside attribute values
fn decode_entities(raw: &str) -> String {
    raw.replace("&#43;", "+")
        .replace("&#61;", "=")
        .replace("&#34;", "\"")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
