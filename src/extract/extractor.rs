use crate::{
    extract::matchers::{
        match_entry_point, match_layered_shadow, match_style_block, match_timing_block,
    },
    foundation::value::ParamValues,
};

type Recognizer = fn(&str) -> Option<ParamValues>;

// Applied in order; a key recovered by an earlier recognizer is kept.
const RECOGNIZERS: &[Recognizer] = &[match_timing_block, match_style_block, match_layered_shadow];

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// What could be read back out of edited source text.
///
/// An empty extraction means "nothing learned", not "reset to defaults".
pub struct Extraction {
    /// Exported entry-point identifier, when one was declared.
    pub effect_name_guess: Option<String>,
    /// Partial parameter values. Keys that could not be read are absent.
    pub recovered: ParamValues,
}

impl Extraction {
    /// Return `true` when neither an entry point nor any value was recovered.
    pub fn is_empty(&self) -> bool {
        self.effect_name_guess.is_none() && self.recovered.is_empty()
    }
}

/// Recover the entry-point name and parameter values from arbitrary source text.
///
/// Never fails: unmatched or malformed regions simply contribute nothing.
pub fn extract(source: &str) -> Extraction {
    let mut recovered = ParamValues::new();
    for recognize in RECOGNIZERS {
        let Some(values) = recognize(source) else {
            continue;
        };
        for (key, value) in values {
            recovered.entry(key).or_insert(value);
        }
    }

    Extraction {
        effect_name_guess: match_entry_point(source),
        recovered,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/extract/extractor.rs"]
mod tests;
