use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::models::ChatRow;
use crate::error::{AnalysisError, AnalysisResult};

/// 영어 표준 불용어 목록 (NLTK english)
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// 필터 단어 YAML 문서
/// 문자열 목록 또는 `키: [단어...]` 형태의 매핑을 모두 허용합니다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FilterWordsDocument {
    List(Vec<String>),
    Groups(BTreeMap<String, Vec<String>>),
}

impl FilterWordsDocument {
    fn into_words(self) -> Vec<String> {
        match self {
            FilterWordsDocument::List(words) => words,
            FilterWordsDocument::Groups(groups) => groups.into_values().flatten().collect(),
        }
    }
}

/// 불용어 집합 (표준 목록 + 사용자 정의 목록)
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// 표준 영어 불용어만 담은 집합
    pub fn english() -> Self {
        Self::with_custom(std::iter::empty::<String>())
    }

    pub fn with_custom<I, S>(custom: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: HashSet<String> =
            ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect();
        words.extend(custom.into_iter().map(Into::into));
        Self { words }
    }

    /// YAML 설정 파일에서 사용자 정의 불용어를 읽어 표준 목록과 합칩니다.
    pub fn load<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AnalysisError::ConfigMissing(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AnalysisError::io(format!("Failed to read {:?}", path), e))?;

        if content.trim().is_empty() {
            return Ok(Self::english());
        }

        let document: Option<FilterWordsDocument> =
            serde_yaml::from_str(&content).map_err(|source| AnalysisError::Config {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::with_custom(
            document.map(FilterWordsDocument::into_words).unwrap_or_default(),
        ))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// 메시지에서 불용어를 제거하고 공백 하나로 다시 잇습니다.
    pub fn filter_message(&self, message: &str) -> String {
        message
            .split_whitespace()
            .filter(|word| !self.contains(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 모든 줄의 `filtered_message`를 채웁니다.
    pub fn apply(&self, rows: &mut [ChatRow]) {
        for row in rows.iter_mut() {
            row.filtered_message = self.filter_message(&row.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_filter_message() {
        let stop = StopWordSet::english();
        assert_eq!(stop.filter_message("this is   a great stream"), "great stream");
        assert_eq!(stop.filter_message("the and of"), "");
        assert_eq!(stop.filter_message(""), "");
        // 대소문자 구분
        assert_eq!(stop.filter_message("The stream"), "The stream");
    }

    #[test]
    fn test_load_list_document() {
        let file = yaml_file("- lol\n- pog\n");
        let stop = StopWordSet::load(file.path()).unwrap();
        assert!(stop.contains("lol"));
        assert!(stop.contains("pog"));
        assert!(stop.contains("the"));
        assert_eq!(stop.filter_message("lol that was pog hype"), "hype");
    }

    #[test]
    fn test_load_grouped_document() {
        let file = yaml_file("emotes:\n  - kappa\nspam:\n  - first\n");
        let stop = StopWordSet::load(file.path()).unwrap();
        assert!(stop.contains("kappa"));
        assert!(stop.contains("first"));
    }

    #[test]
    fn test_load_empty_document() {
        let file = yaml_file("");
        let stop = StopWordSet::load(file.path()).unwrap();
        assert_eq!(stop.len(), StopWordSet::english().len());
    }

    #[test]
    fn test_missing_config() {
        let err = StopWordSet::load("/no/such/filter_words.yaml").unwrap_err();
        assert!(matches!(err, AnalysisError::ConfigMissing(_)));
    }

    #[test]
    fn test_invalid_config() {
        let file = yaml_file("just a scalar");
        let err = StopWordSet::load(file.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::Config { .. }));
    }
}
