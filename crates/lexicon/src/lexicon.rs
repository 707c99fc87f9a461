use crate::error::{LexiconError, Result};
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Token separator class applied after phrase stripping.
const TOKEN_SEPARATORS: &str = r#"[!,.?'" ]+"#;

/// Word and phrase sentiment tables with a precompiled phrase matcher.
///
/// Built once at startup and passed by reference into every worker;
/// read-only thereafter.
pub struct Lexicon {
    words: HashMap<String, i64>,
    phrases: HashMap<String, i64>,
    /// `None` when the score file defines no phrases.
    phrase_matcher: Option<Regex>,
    token_splitter: Regex,
}

impl Lexicon {
    /// Build a lexicon from already-parsed tables.
    ///
    /// Fails with [`LexiconError::Empty`] when both tables are empty.
    pub fn new(words: HashMap<String, i64>, phrases: HashMap<String, i64>) -> Result<Self> {
        if words.is_empty() && phrases.is_empty() {
            return Err(LexiconError::Empty);
        }

        let phrase_matcher = if phrases.is_empty() {
            None
        } else {
            // Longest key first so an overlapping shorter phrase never
            // shadows a longer one at the same position.
            let mut keys: Vec<&str> = phrases.keys().map(String::as_str).collect();
            keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            let alternation = keys
                .iter()
                .map(|key| regex::escape(key))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"\b({alternation})\b"))?)
        };

        Ok(Self {
            words,
            phrases,
            phrase_matcher,
            token_splitter: Regex::new(TOKEN_SEPARATORS)?,
        })
    }

    /// Load a score file: one entry per line, whitespace-tokenized, final
    /// token an integer score. Two tokens define a word; more than two
    /// define a phrase (all tokens but the last joined by single spaces).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);

        let mut words = HashMap::new();
        let mut phrases = HashMap::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.as_slice() {
                [] => continue,
                [only] => {
                    return Err(LexiconError::InvalidEntry {
                        line: index + 1,
                        reason: format!("single token {only:?} has no score"),
                    })
                }
                [head @ .., last] => {
                    let score: i64 =
                        last.parse().map_err(|_| LexiconError::InvalidEntry {
                            line: index + 1,
                            reason: format!("score {last:?} is not an integer"),
                        })?;
                    if head.len() == 1 {
                        words.insert(head[0].to_string(), score);
                    } else {
                        phrases.insert(head.join(" "), score);
                    }
                }
            }
        }

        let lexicon = Self::new(words, phrases)?;
        log::info!(
            "Loaded {} words and {} phrases from {}",
            lexicon.word_count(),
            lexicon.phrase_count(),
            path.display()
        );
        Ok(lexicon)
    }

    /// Sentiment score of a text body.
    ///
    /// The text is lower-cased and trimmed, every phrase occurrence is
    /// scored and stripped, then the remainder is split on the
    /// punctuation/space class and each word-table hit is scored. Unknown
    /// tokens contribute nothing; the sum is signed and unclamped.
    pub fn score(&self, text: &str) -> i64 {
        let lowered = text.to_lowercase();
        let trimmed = lowered.trim();

        let mut score = 0;
        let remainder: Cow<'_, str> = match &self.phrase_matcher {
            Some(matcher) => {
                for found in matcher.find_iter(trimmed) {
                    if let Some(value) = self.phrases.get(found.as_str()) {
                        score += value;
                    }
                }
                matcher.replace_all(trimmed, "")
            }
            None => Cow::Borrowed(trimmed),
        };

        for token in self.token_splitter.split(&remainder) {
            if let Some(value) = self.words.get(token) {
                score += value;
            }
        }
        score
    }

    /// Number of single-word entries
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of phrase entries
    #[must_use]
    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Lexicon;
    use crate::error::LexiconError;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    fn lexicon(words: &[(&str, i64)], phrases: &[(&str, i64)]) -> Lexicon {
        let words: HashMap<String, i64> =
            words.iter().map(|(w, s)| (w.to_string(), *s)).collect();
        let phrases: HashMap<String, i64> =
            phrases.iter().map(|(p, s)| (p.to_string(), *s)).collect();
        Lexicon::new(words, phrases).unwrap()
    }

    #[test]
    fn phrase_scored_before_word_tokenization() {
        let lex = lexicon(&[("good", 2), ("bad", -3)], &[("not bad", 1)]);
        // "not bad" matches as a phrase (1) and is stripped, so "bad" is
        // never seen as a standalone token; "good" adds 2.
        assert_eq!(lex.score("not bad, but good!"), 3);
    }

    #[test]
    fn phrase_components_not_double_counted() {
        let lex = lexicon(&[("stand", 1)], &[("can't stand", -3)]);
        assert_eq!(lex.score("I can't stand this"), -3);
    }

    #[test]
    fn words_split_on_punctuation_class() {
        let lex = lexicon(&[("good", 2)], &[]);
        assert_eq!(lex.score(r#"good!good,good.good?good'good"good good"#), 16);
    }

    #[test]
    fn scoring_is_case_insensitive() {
        let lex = lexicon(&[("awful", -3)], &[]);
        assert_eq!(lex.score("AWFUL, just Awful"), -6);
    }

    #[test]
    fn unknown_tokens_score_nothing() {
        let lex = lexicon(&[("good", 2)], &[]);
        assert_eq!(lex.score("nothing to see here"), 0);
    }

    #[test]
    fn net_score_may_be_negative() {
        let lex = lexicon(&[("good", 2), ("awful", -3)], &[]);
        assert_eq!(lex.score("good but awful awful"), -4);
    }

    #[test]
    fn longer_phrase_wins_over_shorter_prefix() {
        let lex = lexicon(&[], &[("not bad", 1), ("not bad at all", 4)]);
        assert_eq!(lex.score("that was not bad at all"), 4);
        assert_eq!(lex.score("that was not bad"), 1);
    }

    #[test]
    fn repeated_phrase_scored_per_occurrence() {
        let lex = lexicon(&[], &[("so good", 3)]);
        assert_eq!(lex.score("so good, so good"), 6);
    }

    #[test]
    fn empty_tables_are_rejected() {
        let result = Lexicon::new(HashMap::new(), HashMap::new());
        assert!(matches!(result, Err(LexiconError::Empty)));
    }

    #[test]
    fn load_parses_words_and_phrases() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("scores.txt");
        fs::write(&path, "abandon\t-2\ncan't stand\t-3\n\ncool stuff\t3\n").unwrap();

        let lex = Lexicon::load(&path).unwrap();
        assert_eq!(lex.word_count(), 1);
        assert_eq!(lex.phrase_count(), 2);
        assert_eq!(lex.score("abandon"), -2);
        assert_eq!(lex.score("cool stuff"), 3);
    }

    #[test]
    fn load_rejects_non_integer_score() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("scores.txt");
        fs::write(&path, "good two\n").unwrap();

        let result = Lexicon::load(&path);
        assert!(matches!(
            result,
            Err(LexiconError::InvalidEntry { line: 1, .. })
        ));
    }

    #[test]
    fn load_rejects_single_token_line() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("scores.txt");
        fs::write(&path, "good 2\norphan\n").unwrap();

        let result = Lexicon::load(&path);
        assert!(matches!(
            result,
            Err(LexiconError::InvalidEntry { line: 2, .. })
        ));
    }

    #[test]
    fn load_rejects_empty_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("scores.txt");
        fs::write(&path, "\n\n").unwrap();

        assert!(matches!(Lexicon::load(&path), Err(LexiconError::Empty)));
    }

    #[test]
    fn words_only_lexicon_skips_phrase_pass() {
        let lex = lexicon(&[("fine", 1)], &[]);
        assert_eq!(lex.score("fine, just fine"), 2);
    }
}
