//! Path helpers for the `file` and `sources` fields

fn split_path(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).collect()
}

/// Last component of a `/` or `\` separated path
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Path of `to` relative to the directory containing `from`
///
/// Both paths are treated as plain `/` or `\` separated strings; nothing
/// touches the filesystem. The result always uses `/`.
pub fn relative_path(from: &str, to: &str) -> String {
    let mut from_parts = split_path(from);
    let to_parts = split_path(to);
    from_parts.pop();

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_parts.len() - common];
    parts.extend_from_slice(&to_parts[common..]);
    parts.join("/")
}
