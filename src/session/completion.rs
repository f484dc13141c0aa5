//! Tab completion over verb names and the current directory's children.

/// Byte offset where the last whitespace-delimited token of `input` starts.
fn last_token_start(input: &str) -> usize {
    input
        .char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8())
}

/// Replace the last token of `input` with the first candidate it prefixes.
///
/// Candidates are tried in the order given. Returns `None` when the token is
/// empty or nothing matches.
pub fn complete<'a, I>(input: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let start = last_token_start(input);
    let prefix = &input[start..];
    if prefix.is_empty() {
        return None;
    }
    candidates
        .into_iter()
        .find(|candidate| candidate.starts_with(prefix))
        .map(|candidate| format!("{}{}", &input[..start], candidate))
}
