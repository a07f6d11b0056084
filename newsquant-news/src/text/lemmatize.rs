//! Lightweight lemmatizer: irregular-form lookup table, then regular plural rules.
//!
//! Only nouns and a handful of common verb forms seen in financial headlines
//! are covered. Anything not matched is returned unchanged.

use std::collections::HashMap;
use std::sync::LazyLock;

const IRREGULAR: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("indices", "index"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("knives", "knife"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("wolves", "wolf"),
    ("caches", "cache"),
    ("niches", "niche"),
    ("headaches", "headache"),
    ("quizzes", "quiz"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("sold", "sell"),
    ("bought", "buy"),
    ("went", "go"),
    ("gone", "go"),
    ("took", "take"),
    ("taken", "take"),
    ("made", "make"),
    ("said", "say"),
    ("won", "win"),
    ("lost", "lose"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("hit", "hit"),
    ("cut", "cut"),
    ("news", "news"),
    ("series", "series"),
    ("species", "species"),
    ("earnings", "earnings"),
    ("sales", "sale"),
    ("gas", "gas"),
    ("bias", "bias"),
    ("analysis", "analysis"),
    ("crisis", "crisis"),
    ("basis", "basis"),
    ("thesis", "thesis"),
    ("status", "status"),
    ("bonus", "bonus"),
    ("census", "census"),
    ("virus", "virus"),
    ("focus", "focus"),
    ("stimulus", "stimulus"),
    ("consensus", "consensus"),
    ("surplus", "surplus"),
    ("us", "us"),
];

static LOOKUP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR.iter().copied().collect());

/// Reduce a lowercased token to its base form.
pub fn lemmatize(token: &str) -> String {
    if let Some(base) = LOOKUP.get(token) {
        return (*base).to_string();
    }
    strip_plural(token).unwrap_or_else(|| token.to_string())
}

fn strip_plural(token: &str) -> Option<String> {
    let len = token.chars().count();
    if len <= 3 || token.ends_with("ss") || token.ends_with("us") || token.ends_with("is") {
        return None;
    }

    if let Some(stem) = token.strip_suffix("ies") {
        if len > 4 {
            return Some(format!("{stem}y"));
        }
    }
    for suffix in ["sses", "xes", "ches", "shes", "zzes"] {
        if let Some(stem) = token.strip_suffix("es") {
            if token.ends_with(suffix) {
                return Some(stem.to_string());
            }
        }
    }
    token.strip_suffix('s').map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_forms() {
        assert_eq!(lemmatize("indices"), "index");
        assert_eq!(lemmatize("fell"), "fall");
        assert_eq!(lemmatize("people"), "person");
    }

    #[test]
    fn regular_plurals() {
        assert_eq!(lemmatize("stocks"), "stock");
        assert_eq!(lemmatize("companies"), "company");
        assert_eq!(lemmatize("taxes"), "tax");
        assert_eq!(lemmatize("searches"), "search");
        assert_eq!(lemmatize("markets"), "market");
        assert_eq!(lemmatize("classes"), "class");
        assert_eq!(lemmatize("buzzes"), "buzz");
    }

    #[test]
    fn plurals_of_words_ending_in_e() {
        assert_eq!(lemmatize("prizes"), "prize");
        assert_eq!(lemmatize("sizes"), "size");
        assert_eq!(lemmatize("seizes"), "seize");
        assert_eq!(lemmatize("caches"), "cache");
        assert_eq!(lemmatize("niches"), "niche");
        assert_eq!(lemmatize("prices"), "price");
        assert_eq!(lemmatize("quizzes"), "quiz");
    }

    #[test]
    fn non_plurals_unchanged() {
        for word in ["stock", "business", "status", "news", "earnings", "gas", "its"] {
            assert_eq!(lemmatize(word), word, "{word}");
        }
    }

    #[test]
    fn short_words_unchanged() {
        assert_eq!(lemmatize("ads"), "ads");
        assert_eq!(lemmatize("ies"), "ies");
    }
}
