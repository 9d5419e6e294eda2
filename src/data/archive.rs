use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::data::models::{ChatRow, CHAT_LOG_HEADERS};
use crate::error::{AnalysisError, AnalysisResult};
use crate::utils;

/// 마스터 로그 타임스탬프 형식
const MASTER_LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// 원본 로그를 `{YYMMDD}-{방송 제목}.csv`로 복사합니다.
/// 날짜는 첫 줄의 타임스탬프를 따릅니다.
pub fn archive_copy(
    source: &Path,
    rows: &[ChatRow],
    stream_title: &str,
    output_dir: &Path,
) -> AnalysisResult<PathBuf> {
    let first = rows
        .first()
        .ok_or_else(|| AnalysisError::EmptyLog(source.to_path_buf()))?;

    let target = output_dir.join(utils::archive_file_name(first.timestamp.date(), stream_title));
    fs::copy(source, &target).map_err(|e| {
        AnalysisError::io(format!("Failed to copy {:?} to {:?}", source, target), e)
    })?;

    Ok(target)
}

/// 마스터 로그 헤더: 입력 열 + filtered_message + stream_title
pub fn master_log_headers() -> Vec<&'static str> {
    CHAT_LOG_HEADERS
        .iter()
        .copied()
        .chain(["filtered_message", "stream_title"])
        .collect()
}

/// 방송 제목을 붙여 마스터 로그에 추가합니다.
/// 파일이 없거나 비어 있을 때만 헤더를 씁니다.
pub fn append_master_log(
    master_log_path: &Path,
    rows: &[ChatRow],
    stream_title: &str,
) -> AnalysisResult<usize> {
    let needs_header = fs::metadata(master_log_path)
        .map(|meta| meta.len() == 0)
        .unwrap_or(true);

    // 메모리에서 직렬화한 뒤 한 번에 기록
    let mut writer = csv::Writer::from_writer(Vec::new());
    if needs_header {
        writer.write_record(master_log_headers())?;
    }
    for row in rows {
        let timestamp = row.timestamp.format(MASTER_LOG_TIMESTAMP_FORMAT).to_string();
        writer.write_record([
            row.user.as_str(),
            row.username.as_str(),
            row.user_id.as_str(),
            row.message_id.as_str(),
            timestamp.as_str(),
            row.message.as_str(),
            row.profile_url.as_str(),
            row.filtered_message.as_str(),
            stream_title,
        ])?;
    }
    let buffer = writer.into_inner().map_err(|e| {
        AnalysisError::io(
            "Failed to serialize master log rows",
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        )
    })?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(master_log_path)
        .map_err(|e| AnalysisError::io(format!("Failed to open {:?}", master_log_path), e))?;
    file.write_all(&buffer)
        .map_err(|e| AnalysisError::io(format!("Failed to append to {:?}", master_log_path), e))?;

    Ok(rows.len())
}

/// 작업 로그를 헤더만 남기고 비웁니다.
/// 파일을 교체하지 않고 제자리에서 덮어쓰므로, 로그를 열어 둔 채 이어 쓰는 쪽도 같은 파일에 기록합니다.
pub fn clear_chat_log(path: &Path, headers: &[&str]) -> AnalysisResult<()> {
    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| AnalysisError::io(format!("Failed to truncate {:?}", path), e))?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(headers)?;
    writer
        .flush()
        .map_err(|e| AnalysisError::io(format!("Failed to write header for {:?}", path), e))?;

    Ok(())
}
