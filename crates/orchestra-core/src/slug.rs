use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

pub const MAX_SLUG_LEN: usize = 60;

static NON_ALNUM_RE: OnceLock<Regex> = OnceLock::new();

fn non_alnum_re() -> &'static Regex {
    NON_ALNUM_RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap())
}

/// Lower-case `s`, collapse every run of non `[a-z0-9]` characters into one
/// hyphen, strip hyphens at both ends and cut to 60 characters.
///
/// Symbol-only input yields an empty string; see [`branch_slug`].
pub fn slugify(s: &str) -> String {
    let lowered = s.to_lowercase();
    let replaced = non_alnum_re().replace_all(&lowered, "-");
    let trimmed = replaced.trim_matches('-');
    // Output is pure ASCII at this point, so byte slicing is char slicing.
    trimmed[..trimmed.len().min(MAX_SLUG_LEN)].to_string()
}

/// Slug used as a branch suffix. Never empty: titles that slugify to nothing
/// get `untitled-` plus the first 8 hex chars of the title's SHA-256.
pub fn branch_slug(title: &str) -> String {
    let slug = slugify(title);
    if !slug.is_empty() {
        return slug;
    }
    let digest = Sha256::digest(title.as_bytes());
    let short: String = digest.iter().take(4).map(|b| format!("{b:02x}")).collect();
    format!("untitled-{short}")
}
