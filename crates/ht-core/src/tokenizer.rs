use regex::Regex;
use std::sync::LazyLock;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}|[^\w\s']").unwrap());
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.!?]+["'”’)\]]*\s+"#).unwrap());
static APOSTROPHE_TRIM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^'+|'+$").unwrap());
static LAST_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)\W*$").unwrap());

/// Clitics split off the end of a token, longest first.
const CLITICS: &[&str] = &["n't", "'ll", "'re", "'ve", "'s", "'d", "'m"];

/// Words that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &["mr", "mrs", "ms", "dr", "st", "jr", "sr", "prof", "vs", "etc"];

/// Tokenize text into lowercase words and punctuation marks.
///
/// Every punctuation mark other than an apostrophe is its own token (an
/// ellipsis counts once), so a clause break occupies a slot in the modifier
/// window. Contractions are split the way treebank tokenizers do it:
/// `wasn't` yields `was`, `n't` and `cannot` yields `can`, `not`.
pub fn tokenize(text: &str) -> Vec<String> {
    let spaced = PUNCTUATION
        .replace_all(&text.replace('’', "'"), " $0 ")
        .to_lowercase();
    let mut tokens = Vec::new();
    for raw in spaced.split_whitespace() {
        let word = APOSTROPHE_TRIM.replace_all(raw, "");
        if word.is_empty() {
            continue;
        }
        if word == "cannot" {
            tokens.push("can".to_string());
            tokens.push("not".to_string());
            continue;
        }
        match split_clitic(&word) {
            Some((stem, clitic)) => {
                tokens.push(stem.to_string());
                tokens.push(clitic.to_string());
            }
            None => tokens.push(word.into_owned()),
        }
    }
    tokens
}

fn split_clitic(word: &str) -> Option<(&str, &str)> {
    CLITICS.iter().find_map(|clitic| {
        word.strip_suffix(clitic)
            .filter(|stem| !stem.is_empty() && !stem.ends_with('\''))
            .map(|stem| (stem, *clitic))
    })
}

/// Split text into sentences at sentence-ending punctuation (plus any closing
/// quotes or brackets) followed by whitespace. Order is preserved; empty
/// fragments are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut last = 0;

    for m in SENTENCE_END.find_iter(text) {
        let end = m.start() + m.as_str().trim_end().len();
        if ends_with_abbreviation(&text[last..end]) {
            continue;
        }
        let sentence = text[last..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        last = m.end();
    }

    let remainder = text[last..].trim();
    if !remainder.is_empty() {
        sentences.push(remainder.to_string());
    }

    sentences
}

fn ends_with_abbreviation(fragment: &str) -> bool {
    if !fragment.ends_with('.') {
        return false;
    }
    LAST_WORD
        .captures(fragment)
        .and_then(|c| c.get(1))
        .is_some_and(|w| ABBREVIATIONS.contains(&w.as_str().to_lowercase().as_str()))
}
