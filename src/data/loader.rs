use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::data::models::{ChatLog, ChatRow};
use crate::data::utils::parse_timestamp;
use crate::error::{AnalysisError, AnalysisResult};

/// 헤더 이름으로 찾은 열 위치
struct ColumnIndex {
    user: Option<usize>,
    username: Option<usize>,
    user_id: Option<usize>,
    message_id: Option<usize>,
    timestamp: usize,
    message: Option<usize>,
    profile_url: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, path: &Path) -> AnalysisResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let timestamp = find("timestamp").ok_or_else(|| AnalysisError::Parse {
            path: path.to_path_buf(),
            reason: "missing 'timestamp' column".to_string(),
        })?;

        Ok(Self {
            user: find("user"),
            username: find("username"),
            user_id: find("user_id"),
            message_id: find("message_id"),
            timestamp,
            message: find("message"),
            profile_url: find("profile_url"),
        })
    }
}

fn field(record: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|i| record.get(i))
        .unwrap_or_default()
        .to_string()
}

/// 채팅 로그 CSV 파일을 로드합니다.
///
/// 헤더와 열 개수가 다른 줄은 에러 없이 건너뜁니다.
/// UTF-8이 아닌 바이트는 U+FFFD로 바꿔서 읽습니다.
/// 타임스탬프를 파싱할 수 없는 줄은 치명적인 에러입니다.
pub fn load_chat_log<P: AsRef<Path>>(path: P) -> AnalysisResult<ChatLog> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AnalysisError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path)
        .map_err(|e| AnalysisError::io(format!("Failed to open chat log {:?}", path), e))?;

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(AnalysisError::Parse {
            path: path.to_path_buf(),
            reason: "file has no header row".to_string(),
        });
    }
    let columns = ColumnIndex::from_headers(&headers, path)?;

    let mut rows = Vec::new();
    let mut skipped_rows = 0;

    // 읽기 에러는 그대로 전파, UTF-8이 아닌 바이트는 대체 문자로 바꿈
    for result in reader.byte_records() {
        let record = result?;

        // 열 개수가 맞지 않는 줄은 건너뜀
        if record.len() != headers.len() {
            skipped_rows += 1;
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let record = StringRecord::from_byte_record_lossy(record);

        let raw_timestamp = &record[columns.timestamp];
        let timestamp = parse_timestamp(raw_timestamp).ok_or_else(|| {
            AnalysisError::Parse {
                path: path.to_path_buf(),
                reason: format!("invalid timestamp {:?} on line {}", raw_timestamp, line),
            }
        })?;

        rows.push(ChatRow {
            user: field(&record, columns.user),
            username: field(&record, columns.username),
            user_id: field(&record, columns.user_id),
            message_id: field(&record, columns.message_id),
            timestamp,
            message: field(&record, columns.message),
            profile_url: field(&record, columns.profile_url),
            filtered_message: String::new(),
        });
    }

    Ok(ChatLog { rows, skipped_rows })
}
