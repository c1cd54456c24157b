//! Plain-text payload handed to the platform share sheet.

/// Subject line and body for sharing a single resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub subject: String,
    pub text: String,
}

/// Footer appended to every shared resource.
pub const SHARE_FOOTER: &str = "Shared from Impulso - Organize your universe";

/// Compose the share payload for a resource.
///
/// The category line is included only when a name is known and the link line
/// only when the link is non-blank.
pub fn share_payload(
    name: &str,
    description: &str,
    link: Option<&str>,
    category_name: Option<&str>,
) -> SharePayload {
    let mut text = format!("{name}\n\nDescription:\n{description}\n");

    if let Some(category) = category_name {
        text.push_str(&format!("Category: {category}\n"));
    }
    if let Some(link) = link.map(str::trim).filter(|l| !l.is_empty()) {
        text.push_str(&format!("Link: {link}\n"));
    }
    text.push_str(SHARE_FOOTER);
    text.push('\n');

    SharePayload {
        subject: format!("Resource: {name}"),
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_payload() {
        let p = share_payload("Docs", "Reference", Some("https://a.b"), Some("Web"));
        assert_eq!(p.subject, "Resource: Docs");
        assert!(p.text.starts_with("Docs\n\nDescription:\nReference\n"));
        assert!(p.text.contains("Category: Web\n"));
        assert!(p.text.contains("Link: https://a.b\n"));
        assert!(p.text.ends_with(&format!("{SHARE_FOOTER}\n")));
    }

    #[test]
    fn blank_link_and_missing_category_are_omitted() {
        let p = share_payload("Docs", "Reference", Some("  "), None);
        assert!(!p.text.contains("Link:"));
        assert!(!p.text.contains("Category:"));
    }
}
