use chrono::{DateTime, NaiveDateTime};

/// 채팅 로그의 타임스탬프 문자열을 파싱합니다.
/// ISO 8601 형식 또는 공백 구분 형식을 지원합니다.
/// 예: "2024-01-01T00:00:00+09:00", "2024-01-01T00:00:00", "2024-01-01 00:00:00.123"
///
/// 오프셋이 포함된 경우 UTC로 맞춥니다. 오프셋이 없는 값은 그대로 사용합니다.
pub fn parse_timestamp(time_str: &str) -> Option<NaiveDateTime> {
    let time_str = time_str.trim();

    // 먼저 RFC 3339 형식 시도
    if let Ok(dt) = DateTime::parse_from_rfc3339(time_str) {
        return Some(dt.naive_utc());
    }

    // 공백 구분 + 오프셋
    if let Ok(dt) = DateTime::parse_from_str(time_str, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_utc());
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(time_str, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(parse_timestamp("2024-01-01T00:00:30"), Some(at(0, 0, 30)));
        assert_eq!(parse_timestamp("2024-01-01 12:34:56"), Some(at(12, 34, 56)));
        assert_eq!(
            parse_timestamp("2024-01-01T09:00:00+09:00"),
            Some(at(0, 0, 0))
        );
        assert_eq!(parse_timestamp("2024-01-01 10:05"), Some(at(10, 5, 0)));

        let fractional = parse_timestamp("2024-01-01 00:00:01.250").unwrap();
        assert_eq!(fractional.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_mixed_offsets_share_one_clock() {
        let kst = parse_timestamp("2024-01-01T09:30:00+09:00").unwrap();
        let utc = parse_timestamp("2024-01-01T00:30:00Z").unwrap();
        let spaced = parse_timestamp("2024-01-01 01:30:00+01:00").unwrap();
        assert_eq!(kst, utc);
        assert_eq!(spaced, utc);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("not a time"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
