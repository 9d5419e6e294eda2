//! 어휘 사전 기반 감성 분석
//!
//! 단어별 극성(-1.0 ~ 1.0)을 사전에서 찾아 평균을 냅니다.
//! 강조어("very")는 다음 감성 단어를 증폭하고, 부정어("not")는 극성을 뒤집어 절반으로 줄입니다.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// 메시지 한 줄의 극성을 계산하는 백엔드
pub trait SentimentScorer: Send + Sync {
    /// -1.0(가장 부정) ~ 1.0(가장 긍정)
    fn score_sentiment(&self, text: &str) -> f64;
}

/// 단어와 이모티콘 토큰
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[:;=8][-o^']?[)(DPp/\\|3]|<3|[A-Za-z]+(?:'[A-Za-z]+)?")
        .expect("Invalid token regex")
});

const POLARITY: &[(&str, f64)] = &[
    // 긍정
    ("good", 0.7),
    ("great", 0.8),
    ("best", 1.0),
    ("better", 0.5),
    ("awesome", 1.0),
    ("amazing", 0.6),
    ("excellent", 1.0),
    ("perfect", 1.0),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("incredible", 0.9),
    ("brilliant", 0.9),
    ("beautiful", 0.85),
    ("lovely", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("like", 0.1),
    ("nice", 0.6),
    ("cool", 0.35),
    ("fun", 0.3),
    ("funny", 0.25),
    ("hilarious", 0.5),
    ("happy", 0.8),
    ("glad", 0.5),
    ("excited", 0.375),
    ("exciting", 0.3),
    ("interesting", 0.5),
    ("epic", 0.1),
    ("hype", 0.4),
    ("win", 0.8),
    ("wins", 0.8),
    ("won", 0.8),
    ("clean", 0.37),
    ("insane", 0.5),
    ("legendary", 0.6),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("welcome", 0.8),
    ("congrats", 0.8),
    ("congratulations", 0.8),
    ("pog", 0.6),
    ("poggers", 0.6),
    ("gg", 0.5),
    ("lol", 0.8),
    ("lmao", 0.6),
    ("haha", 0.2),
    ("yes", 0.2),
    ("yay", 0.5),
    ("wow", 0.1),
    ("sweet", 0.35),
    ("smart", 0.21),
    ("helpful", 0.5),
    ("useful", 0.3),
    ("easy", 0.43),
    ("right", 0.29),
    ("correct", 0.2),
    ("true", 0.35),
    ("free", 0.4),
    ("new", 0.14),
    // 부정
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("horrible", -1.0),
    ("awful", -1.0),
    ("boring", -1.0),
    ("hate", -0.8),
    ("hated", -0.9),
    ("sad", -0.5),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("stupid", -0.8),
    ("dumb", -0.375),
    ("ugly", -0.7),
    ("wrong", -0.5),
    ("lame", -0.5),
    ("sucks", -0.3),
    ("cringe", -0.6),
    ("lag", -0.4),
    ("laggy", -0.5),
    ("broken", -0.4),
    ("fail", -0.5),
    ("failed", -0.5),
    ("lose", -0.4),
    ("lost", -0.4),
    ("loss", -0.4),
    ("dead", -0.2),
    ("rip", -0.3),
    ("poor", -0.4),
    ("hard", -0.29),
    ("difficult", -0.5),
    ("slow", -0.3),
    ("scary", -0.5),
    ("weird", -0.5),
    ("sick", -0.71),
    ("tired", -0.4),
    ("sorry", -0.5),
    ("mad", -0.625),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("useless", -0.5),
    ("fake", -0.5),
    ("rude", -0.3),
    ("toxic", -0.6),
    ("no", -0.1),
    // 이모티콘
    (":)", 0.5),
    (":-)", 0.5),
    (";)", 0.5),
    (";-)", 0.5),
    (":d", 1.0),
    (":-d", 1.0),
    (":p", 0.5),
    ("<3", 1.0),
    (":(", -0.75),
    (":-(", -0.75),
    (":/", -0.25),
    (":|", 0.0),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("super", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("too", 1.2),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("slightly", 0.7),
    ("somewhat", 0.8),
    ("kinda", 0.8),
];

const NEGATIONS: &[&str] = &[
    "not", "never", "neither", "nor", "nobody", "nothing", "none", "isn't", "aren't", "wasn't",
    "weren't", "don't", "doesn't", "didn't", "can't", "couldn't", "won't", "wouldn't", "shouldn't",
    "ain't", "cannot",
];

/// 사전 기반 감성 분석기
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    polarity: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: Vec<String>,
    /// 부정어가 영향을 주는 최대 단어 수
    negation_window: usize,
}

impl LexiconSentiment {
    pub fn new() -> Self {
        Self {
            polarity: POLARITY.iter().map(|(w, p)| (w.to_string(), *p)).collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(w, m)| (w.to_string(), *m))
                .collect(),
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
            negation_window: 3,
        }
    }

    /// 사전에 단어 극성을 추가하거나 덮어씁니다.
    #[cfg(test)]
    fn with_word(mut self, word: &str, polarity: f64) -> Self {
        self.polarity
            .insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
        self
    }

    fn is_negation(&self, token: &str) -> bool {
        self.negations.iter().any(|n| n == token) || token.ends_with("n't")
    }
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconSentiment {
    fn score_sentiment(&self, text: &str) -> f64 {
        let mut assessed = Vec::new();
        let mut modifier = 1.0;
        let mut negation_active = false;
        let mut words_since_negation = 0;

        for token in TOKEN_REGEX.find_iter(text) {
            let token = token.as_str().to_lowercase();

            if self.is_negation(&token) {
                negation_active = true;
                words_since_negation = 0;
                continue;
            }

            if let Some(&m) = self.intensifiers.get(&token) {
                modifier = m;
                continue;
            }

            if let Some(&base) = self.polarity.get(&token) {
                let mut score = base * modifier;
                if negation_active && words_since_negation < self.negation_window {
                    score *= -0.5;
                    negation_active = false;
                }
                assessed.push(score.clamp(-1.0, 1.0));
            }

            modifier = 1.0;
            if negation_active {
                words_since_negation += 1;
                if words_since_negation >= self.negation_window {
                    negation_active = false;
                }
            }
        }

        if assessed.is_empty() {
            return 0.0;
        }
        (assessed.iter().sum::<f64>() / assessed.len() as f64).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconSentiment::new().score_sentiment(text)
    }

    #[test]
    fn test_neutral_text() {
        assert_eq!(score("hello"), 0.0);
        assert_eq!(score(""), 0.0);
        assert_eq!(score("hi there?"), 0.0);
    }

    #[test]
    fn test_polarity_direction() {
        assert!(score("this stream is great") > 0.0);
        assert!(score("this is terrible") < 0.0);
        assert!(score("love it :)") > 0.0);
        assert!(score("so sad :(") < 0.0);
    }

    #[test]
    fn test_intensifier_and_negation() {
        assert!(score("very good") > score("good"));
        assert!((score("not good") - (-0.35)).abs() < 1e-9);
        assert!(score("don't like this") < 0.0);
        // 부정어 영향은 창 밖으로 넘어가지 않음
        assert!(score("not that this or that is good") > 0.0);
    }

    #[test]
    fn test_score_is_bounded() {
        for text in [
            "extremely best best best awesome",
            "extremely worst terrible awful",
            "not not not bad",
        ] {
            let s = score(text);
            assert!((-1.0..=1.0).contains(&s), "{text}: {s}");
        }
    }

    #[test]
    fn test_custom_word() {
        let scorer = LexiconSentiment::new().with_word("kekw", 0.9);
        assert!((scorer.score_sentiment("KEKW") - 0.9).abs() < 1e-9);
    }
}
