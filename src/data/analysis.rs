use std::collections::{BTreeMap, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;

use crate::data::classifier::message_type;
use crate::data::models::{ChatRow, MessageType, SummaryStatistics, UserProfile};
use crate::data::sentiment::SentimentScorer;
use crate::utils;

/// 프로필에 담을 상위 단어 수
const COMMON_WORDS_LIMIT: usize = 5;
/// 프로필에 담을 샘플 메시지 수
const SAMPLE_MESSAGES_LIMIT: usize = 3;
/// 요약 통계의 상위 사용자 수
const TOP_USERS_LIMIT: usize = 5;

/// 처음 등장한 순서를 기억하는 빈도 카운터
#[derive(Debug, Default, Clone)]
pub struct OrderedCounter {
    index: HashMap<String, usize>,
    counts: Vec<(String, usize)>,
}

impl OrderedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.counts.len());
                self.counts.push((key.to_string(), 1));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// 빈도 내림차순. 같은 빈도는 먼저 등장한 키가 앞에 옵니다.
    pub fn most_common(&self, limit: Option<usize>) -> Vec<(String, usize)> {
        let mut sorted = self.counts.clone();
        // 안정 정렬이므로 동률은 등장 순서를 유지
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(limit) = limit {
            sorted.truncate(limit);
        }
        sorted
    }
}

/// 공백 기준으로 단어 빈도를 셉니다.
pub fn count_words<'a, I>(texts: I) -> OrderedCounter
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counter = OrderedCounter::new();
    for text in texts {
        for word in text.split_whitespace() {
            counter.add(word);
        }
    }
    counter
}

/// 메시지 수 상위 5명과 고유 사용자 수를 계산합니다.
pub fn summary_statistics(rows: &[ChatRow]) -> SummaryStatistics {
    let mut counter = OrderedCounter::new();
    for row in rows {
        counter.add(&row.user);
    }

    SummaryStatistics {
        top_users: counter.most_common(Some(TOP_USERS_LIMIT)),
        unique_users: counter.len(),
    }
}

/// 요약 통계를 출력합니다.
pub fn print_summary_statistics(stats: &SummaryStatistics) {
    println!("\n고유 사용자 수: {}", stats.unique_users);
    println!("상위 {}명의 활성 사용자:", TOP_USERS_LIMIT);
    for (i, (user, count)) in stats.top_users.iter().enumerate() {
        println!("  {}. {}: {} 메시지", i + 1, user, count);
    }
    println!();
}

/// 사용자 등장 순서대로 해당 사용자의 줄을 묶습니다.
fn group_by_user(rows: &[ChatRow]) -> Vec<(&str, Vec<&ChatRow>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&ChatRow>)> = Vec::new();

    for row in rows {
        match index.get(row.user.as_str()) {
            Some(&i) => groups[i].1.push(row),
            None => {
                index.insert(row.user.as_str(), groups.len());
                groups.push((row.user.as_str(), vec![row]));
            }
        }
    }

    groups
}

/// 샘플링 전 단계의 사용자 통계
struct UserStats<'a> {
    user: &'a str,
    total_messages: usize,
    messages: Vec<&'a str>,
    common_words: Vec<(String, usize)>,
    message_types: BTreeMap<MessageType, usize>,
    average_sentiment: f64,
}

fn compute_user_stats<'a>(
    user: &'a str,
    rows: &[&'a ChatRow],
    scorer: &dyn SentimentScorer,
) -> UserStats<'a> {
    // 빈 메시지는 결측값으로 취급
    let messages: Vec<&str> = rows
        .iter()
        .map(|row| row.message.as_str())
        .filter(|msg| !msg.is_empty())
        .collect();

    let mut message_types = BTreeMap::new();
    for row in rows {
        *message_types.entry(message_type(&row.message)).or_insert(0) += 1;
    }

    let sentiments: Vec<f64> = messages
        .iter()
        .map(|msg| scorer.score_sentiment(msg))
        .collect();
    let average_sentiment = if sentiments.is_empty() {
        0.0
    } else {
        sentiments.iter().sum::<f64>() / sentiments.len() as f64
    };

    let common_words = count_words(messages.iter().copied()).most_common(Some(COMMON_WORDS_LIMIT));

    UserStats {
        user,
        total_messages: rows.len(),
        messages,
        common_words,
        message_types,
        average_sentiment,
    }
}

/// 사용자별 프로필을 만듭니다.
///
/// 결과 순서는 사용자가 처음 등장한 순서입니다.
/// 샘플 메시지는 `rng`로 뽑으므로 시드를 고정하면 결과도 고정됩니다.
pub fn user_profiles<R: Rng + ?Sized>(
    rows: &[ChatRow],
    scorer: &dyn SentimentScorer,
    rng: &mut R,
) -> Vec<UserProfile> {
    let groups = group_by_user(rows);

    let pb = utils::create_progress_bar(groups.len() as u64, "Building user profiles...");

    // 감성 분석은 병렬로, 샘플링은 순서대로
    let stats: Vec<UserStats> = groups
        .par_iter()
        .map(|(user, user_rows)| {
            let stats = compute_user_stats(*user, user_rows, scorer);
            pb.inc(1);
            stats
        })
        .collect();

    pb.finish_with_message("User profiles built!");

    stats
        .into_iter()
        .map(|stats| {
            let sample_size = SAMPLE_MESSAGES_LIMIT.min(stats.messages.len());
            let sample_messages = stats
                .messages
                .choose_multiple(&mut *rng, sample_size)
                .map(|msg| msg.to_string())
                .collect();

            UserProfile {
                user: stats.user.to_string(),
                total_messages: stats.total_messages,
                common_words: stats.common_words,
                sample_messages,
                message_types: stats.message_types,
                average_sentiment: stats.average_sentiment,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::data::sentiment::LexiconSentiment;

    fn row(user: &str, second: u32, message: &str) -> ChatRow {
        ChatRow {
            user: user.to_string(),
            username: user.to_string(),
            user_id: format!("id-{user}"),
            message_id: format!("m{second}"),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, second)
                .unwrap(),
            message: message.to_string(),
            profile_url: "u".to_string(),
            filtered_message: String::new(),
        }
    }

    struct FixedScorer(f64);

    impl SentimentScorer for FixedScorer {
        fn score_sentiment(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_ordered_counter_tie_break() {
        let counter = count_words(["b a", "c a b", "d"]);
        assert_eq!(
            counter.most_common(None),
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
        assert_eq!(counter.most_common(Some(1)).len(), 1);
    }

    #[test]
    fn test_summary_statistics() {
        let rows: Vec<ChatRow> = ["a", "b", "b", "c", "d", "e", "f", "f", "f", "g"]
            .iter()
            .enumerate()
            .map(|(i, user)| row(user, i as u32, "hi"))
            .collect();

        let stats = summary_statistics(&rows);
        assert_eq!(stats.unique_users, 7);
        assert_eq!(stats.top_users.len(), 5);
        assert_eq!(stats.top_users[0], ("f".to_string(), 3));
        assert_eq!(stats.top_users[1], ("b".to_string(), 2));
        // 동률은 등장 순서
        assert_eq!(stats.top_users[2], ("a".to_string(), 1));
        assert_eq!(stats.top_users[3], ("c".to_string(), 1));
        assert!(stats
            .top_users
            .windows(2)
            .all(|pair| pair[0].1 >= pair[1].1));
    }

    #[test]
    fn test_summary_statistics_empty() {
        let stats = summary_statistics(&[]);
        assert!(stats.top_users.is_empty());
        assert_eq!(stats.unique_users, 0);
    }

    #[test]
    fn test_user_profiles_scenario() {
        let rows = vec![row("alice", 0, "hi there?"), row("bob", 30, "hello")];
        let mut rng = StdRng::seed_from_u64(7);
        let profiles = user_profiles(&rows, &LexiconSentiment::new(), &mut rng);

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].user, "alice");
        assert_eq!(profiles[0].total_messages, 1);
        assert_eq!(profiles[0].message_types.get(&MessageType::Question), Some(&1));
        assert_eq!(profiles[0].message_types.get(&MessageType::Statement), None);
        assert_eq!(profiles[0].sample_messages, vec!["hi there?".to_string()]);
        assert_eq!(
            profiles[0].common_words,
            vec![("hi".to_string(), 1), ("there?".to_string(), 1)]
        );

        assert_eq!(profiles[1].user, "bob");
        assert_eq!(profiles[1].message_types.get(&MessageType::Statement), Some(&1));
        assert_eq!(profiles[1].average_sentiment, 0.0);
    }

    #[test]
    fn test_user_profiles_invariants() {
        let rows = vec![
            row("carol", 0, "great stream"),
            row("dave", 1, "why?"),
            row("carol", 2, ""),
            row("carol", 3, "terrible lag"),
            row("carol", 4, "ok?"),
            row("carol", 5, "gg"),
            row("dave", 6, "hello"),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let profiles = user_profiles(&rows, &LexiconSentiment::new(), &mut rng);

        assert_eq!(profiles[0].user, "carol");
        assert_eq!(profiles[0].total_messages, 5);
        // 빈 메시지는 샘플에서 제외
        assert_eq!(profiles[0].sample_messages.len(), 3);
        assert!(profiles[0].sample_messages.iter().all(|m| !m.is_empty()));

        for profile in &profiles {
            let typed: usize = profile.message_types.values().sum();
            assert_eq!(typed, profile.total_messages);
            assert!((-1.0..=1.0).contains(&profile.average_sentiment));
        }
    }

    #[test]
    fn test_user_with_only_empty_messages() {
        let rows = vec![row("eve", 0, ""), row("eve", 1, "")];
        let mut rng = StdRng::seed_from_u64(3);
        let profiles = user_profiles(&rows, &FixedScorer(0.9), &mut rng);

        assert_eq!(profiles[0].total_messages, 2);
        assert_eq!(profiles[0].average_sentiment, 0.0);
        assert!(profiles[0].sample_messages.is_empty());
        assert!(profiles[0].common_words.is_empty());
    }

    #[test]
    fn test_sampling_is_reproducible() {
        let rows: Vec<ChatRow> = (0..20)
            .map(|i| row("frank", i, &format!("message {i}")))
            .collect();

        let first = user_profiles(&rows, &FixedScorer(0.1), &mut StdRng::seed_from_u64(42));
        let second = user_profiles(&rows, &FixedScorer(0.1), &mut StdRng::seed_from_u64(42));
        assert_eq!(first[0].sample_messages, second[0].sample_messages);
        assert_eq!(first[0].sample_messages.len(), 3);
        assert!((first[0].average_sentiment - 0.1).abs() < 1e-9);
    }
}
