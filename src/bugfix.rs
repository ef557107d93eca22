use std::collections::HashMap;

use crate::types::DraftFixResponse;

const DEFAULT_TITLE: &str = "Unknown issue";
const DEFAULT_REPOSITORY: &str = "platform";
const FALLBACK_SLUG: &str = "issue";

/// Mock bug-fix draft: a branch name slugged from the title plus a canned
/// summary. Same fields in, same draft out, nothing external touched.
pub fn draft_fix(fields: &HashMap<String, String>) -> DraftFixResponse {
    let raw_title = fields.get("title").map(String::as_str);
    let title = raw_title.unwrap_or(DEFAULT_TITLE);
    let repository = fields
        .get("repository")
        .map(String::as_str)
        .unwrap_or(DEFAULT_REPOSITORY);

    DraftFixResponse {
        status: "placeholder".to_string(),
        summary: format!(
            "Draft fix for '{title}' in {repository} prepared. Awaiting developer approval."
        ),
        // The branch slug comes from the title as sent; an absent or blank
        // title maps to the fixed "issue" token.
        branch: format!("demo/fix-{}", branch_slug(raw_title.unwrap_or(""))),
    }
}

/// Trimmed, lowercased, spaces to hyphens; an empty result falls back to
/// the literal "issue".
fn branch_slug(title: &str) -> String {
    let slug = title.trim().to_lowercase().replace(' ', "-");
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}
