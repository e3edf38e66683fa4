//! Independent recognizers for the code shapes that generated templates contain.
//!
//! Every recognizer is total: it either matches and returns the values it could read, or
//! returns `None`. Numeric captures that do not parse as finite numbers are dropped.

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::value::{ParamValue, ParamValues};

// Patterns are literals; a pattern that failed to compile would only disable its recognizer.
static ENTRY_POINT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\bexport\s+(?:default\s+)?(?:async\s+)?function\s+([A-Za-z_$][\w$]*)").ok()
});
static TRANSITION_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\btransition\s*=\s*\{\{([^{}]*)\}\}").ok());
static DURATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bduration\s*:\s*([^,\s}]+)").ok());
static STAGGER_CHILDREN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bstaggerChildren\s*:\s*([^,\s}]+)").ok());
static INDEX_DELAY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bdelay\s*:\s*index\s*\*\s*([^,\s}]+)").ok());
static STYLE_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bstyle\s*=\s*\{\{([^{}]*)\}\}").ok());
static COLOR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"\bcolor\s*:\s*(?:'([^'\n]*)'|"([^"\n]*)")"#).ok()
});
static LAYERED_SHADOW: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"\btextShadow\s*:\s*\[?\s*['"`]\s*([^\s'"`]+?)px\s+([^\s'"`]+?)px\s+([^\s'"`]+?)px\s+'?([^'"`\n]+?)'?['"`]"#,
    )
    .ok()
});

/// Exported function name declared by the source, e.g. `Fader` in
/// `export default function Fader({ text })`.
pub fn match_entry_point(source: &str) -> Option<String> {
    capture(&ENTRY_POINT, source, 1).map(str::to_owned)
}

/// `transition={{ ... }}` blocks: `duration`, and `stagger` from either
/// `staggerChildren: n` or `delay: index * n`. The first occurrence of each key wins.
pub fn match_timing_block(source: &str) -> Option<ParamValues> {
    let re = (*TRANSITION_BLOCK).as_ref()?;
    let bodies: Vec<&str> = re
        .captures_iter(source)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    if bodies.is_empty() {
        return None;
    }

    let mut out = ParamValues::new();
    if let Some(v) = first_in(&bodies, &DURATION).and_then(parse_number) {
        out.insert("duration".to_owned(), v);
    }
    let stagger = first_in(&bodies, &STAGGER_CHILDREN).or_else(|| first_in(&bodies, &INDEX_DELAY));
    if let Some(v) = stagger.and_then(parse_number) {
        out.insert("stagger".to_owned(), v);
    }
    Some(out)
}

/// `style={{ ... }}` blocks: a quoted `color`.
pub fn match_style_block(source: &str) -> Option<ParamValues> {
    let re = (*STYLE_BLOCK).as_ref()?;
    let bodies: Vec<&str> = re
        .captures_iter(source)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    if bodies.is_empty() {
        return None;
    }

    let mut out = ParamValues::new();
    let color = bodies.iter().find_map(|&body| {
        let caps = (*COLOR).as_ref()?.captures(body)?;
        caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
    });
    if let Some(c) = color.map(str::trim).filter(|c| !c.is_empty()) {
        out.insert("color".to_owned(), ParamValue::String(c.to_owned()));
    }
    Some(out)
}

/// `textShadow: '<x>px <y>px <blur>px <color>'`, with the color optionally quoted on its own.
/// Yields `glowStrength` from the x offset, `glowBlur` and `glowColor`.
///
/// The color runs to the closing quote of the shadow literal, so functional notations such
/// as `rgb(255, 0, 255)` are read whole.
pub fn match_layered_shadow(source: &str) -> Option<ParamValues> {
    let caps = (*LAYERED_SHADOW).as_ref()?.captures(source)?;
    let mut out = ParamValues::new();
    if let Some(v) = caps.get(1).and_then(|m| parse_number(m.as_str())) {
        out.insert("glowStrength".to_owned(), v);
    }
    if let Some(v) = caps.get(3).and_then(|m| parse_number(m.as_str())) {
        out.insert("glowBlur".to_owned(), v);
    }
    if let Some(c) = caps.get(4).map(|m| m.as_str().trim()).filter(|c| !c.is_empty()) {
        out.insert("glowColor".to_owned(), ParamValue::String(c.to_owned()));
    }
    Some(out)
}

fn capture<'t>(re: &LazyLock<Option<Regex>>, text: &'t str, group: usize) -> Option<&'t str> {
    let re = (**re).as_ref()?;
    re.captures(text)?.get(group).map(|m| m.as_str())
}

fn first_in<'t>(bodies: &[&'t str], re: &LazyLock<Option<Regex>>) -> Option<&'t str> {
    bodies.iter().find_map(|&body| capture(re, body, 1))
}

fn parse_number(raw: &str) -> Option<ParamValue> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(ParamValue::Number)
}

#[cfg(test)]
#[path = "../../tests/unit/extract/matchers.rs"]
mod tests;
