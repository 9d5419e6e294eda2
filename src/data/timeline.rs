use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::data::models::ChatRow;

/// 1분 단위 메시지 빈도
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyEntry {
    /// 구간 시작 시각 (분 단위로 내림)
    pub minute: NaiveDateTime,
    /// 해당 구간의 메시지 개수
    pub count: usize,
}

/// 시각을 분 단위로 내립니다.
fn floor_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}

/// 메시지를 1분 단위로 묶어 개수를 셉니다.
///
/// 첫 구간부터 마지막 구간까지 메시지가 없는 분도 0으로 채워 포함합니다.
pub fn message_frequency(rows: &[ChatRow]) -> Vec<FrequencyEntry> {
    let mut bucket_map: HashMap<NaiveDateTime, usize> = HashMap::new();
    for row in rows {
        *bucket_map.entry(floor_to_minute(row.timestamp)).or_insert(0) += 1;
    }

    let (Some(&first), Some(&last)) = (bucket_map.keys().min(), bucket_map.keys().max()) else {
        return Vec::new();
    };

    let mut timeline = Vec::new();
    let mut minute = first;
    while minute <= last {
        timeline.push(FrequencyEntry {
            minute,
            count: bucket_map.get(&minute).copied().unwrap_or(0),
        });
        minute += Duration::minutes(1);
    }

    timeline
}
