use crate::foundation::value::ParamValues;

/// Substitute every `{name}` placeholder whose name is present in `values`.
///
/// The template is scanned once from left to right; substituted text is never scanned
/// again, so a value that itself looks like a placeholder is emitted verbatim. Tokens whose
/// name is missing from `values` (including JSX such as `{text}` and object literals such
/// as `{{ opacity: 0 }}`) pass through untouched.
pub fn render(template: &str, values: &ParamValues) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let hit = placeholder_at(after).and_then(|name| values.get(name).map(|v| (name, v)));
        match hit {
            Some((name, value)) => {
                out.push_str(&value.render_literal());
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Placeholder-shaped tokens in `template`, in order of first appearance, without duplicates.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        if let Some(name) = placeholder_at(after)
            && !names.contains(&name)
        {
            names.push(name);
        }
        rest = after;
    }
    names
}

// `s` starts right after a '{'. Returns the name when `s` continues with `name}`.
fn placeholder_at(s: &str) -> Option<&str> {
    let close = s.find('}')?;
    let name = &s[..close];
    if name.is_empty() || name.chars().any(|c| c == '{' || c.is_whitespace()) {
        return None;
    }
    Some(name)
}

#[cfg(test)]
#[path = "../../tests/unit/template/render.rs"]
mod tests;
