//! Reference (slug) derivation for channels and categories.
//!
//! References are composed from an ancestry chain: a category's slug source
//! is `[parent_reference, name]` (or `[channel_reference, name]` for roots),
//! so every reference transitively embeds the path from the channel down to
//! the node. Distinct branches can only collide through truncation; the
//! unique index on `reference` is the final guard.

/// Matches the `reference` column width in the schema.
pub const MAX_REFERENCE_LEN: usize = 100;

/// Ordered list of strings a reference is derived from.
///
/// Replaces dotted-path attribute lookup with an explicit accessor: the
/// parent reference already carries the full ancestor chain, so the channel
/// reference is only prepended for root categories.
pub fn slug_source<'a>(
    channel_reference: &'a str,
    parent_reference: Option<&'a str>,
    name: &'a str,
) -> [&'a str; 2] {
    match parent_reference {
        Some(parent) => [parent, name],
        None => [channel_reference, name],
    }
}

/// Derives the reference for a category from its ancestry chain.
pub fn compose_reference(
    channel_reference: &str,
    parent_reference: Option<&str>,
    name: &str,
) -> String {
    let source = slug_source(channel_reference, parent_reference, name);
    slugify(&source.join("-"), MAX_REFERENCE_LEN)
}

/// Turns an arbitrary string into a lowercase, hyphen-delimited,
/// URL-safe token of at most `max_len` characters.
///
/// Runs of non-alphanumeric characters collapse to a single hyphen;
/// leading and trailing hyphens are trimmed; truncation is a hard cut
/// (not word-aware). Latin accented letters fold to their ASCII base,
/// anything else non-ASCII is treated as a separator.
pub fn slugify(source: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(source.len().min(max_len));
    let mut pending_hyphen = false;

    for c in source.chars() {
        let folded = if c.is_ascii_alphanumeric() {
            Some(c.to_ascii_lowercase())
        } else {
            ascii_fold(c)
        };

        match folded {
            Some(c) => {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c);
            }
            None => pending_hyphen = true,
        }
    }

    // Output is ASCII, so byte truncation is char truncation.
    if out.len() > max_len {
        out.truncate(max_len);
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Folds common Latin accented letters to their lowercase ASCII base.
fn ascii_fold(c: char) -> Option<char> {
    let folded = match c.to_lowercase().next().unwrap_or(c) {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ç' => 'c',
        'ñ' => 'n',
        _ => return None,
    };
    Some(folded)
}
