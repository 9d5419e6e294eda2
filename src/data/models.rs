use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

/// 작업 로그의 고정 헤더 (입력 스키마)
pub const CHAT_LOG_HEADERS: [&str; 7] = [
    "user",
    "username",
    "user_id",
    "message_id",
    "timestamp",
    "message",
    "profile_url",
];

/// ====== Chat Log 구조체 ======

/// 채팅 로그 한 줄
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRow {
    pub user: String,
    pub username: String,
    pub user_id: String,
    pub message_id: String,
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub profile_url: String,
    /// 불용어를 제거한 메시지 (필터 적용 전에는 빈 문자열)
    pub filtered_message: String,
}

/// 로드된 채팅 로그
#[derive(Debug, Clone)]
pub struct ChatLog {
    pub rows: Vec<ChatRow>,
    /// 열 개수가 맞지 않아 건너뛴 줄 수
    pub skipped_rows: usize,
}

/// ====== 분석 결과 구조체 ======

/// 메시지 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MessageType {
    Question,
    Statement,
}

/// 전체 요약 통계
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStatistics {
    /// 메시지 수 상위 5명 (사용자, 메시지 수)
    pub top_users: Vec<(String, usize)>,
    /// 고유 사용자 수
    pub unique_users: usize,
}

/// 사용자별 프로필
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub user: String,
    pub total_messages: usize,
    pub common_words: Vec<(String, usize)>,
    pub sample_messages: Vec<String>,
    pub message_types: BTreeMap<MessageType, usize>,
    pub average_sentiment: f64,
}
