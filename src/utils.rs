use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::Regex;

/// 파일 이름에 쓸 수 없는 문자 (공백, 슬래시, 물음표, 느낌표)
static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ /?!]").expect("Invalid filename regex"));

/// ====== 공통 로그 함수 (로컬 시간 기준) ======
pub fn log(msg: impl AsRef<str>) {
    let now = Local::now();
    println!("{} {}", now.format("%Y-%m-%d %H:%M:%S"), msg.as_ref());
}

/// ====== 공통 Progress Bar 생성 함수 ======
/// 표준 스타일의 ProgressBar를 생성합니다.
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} ({eta}) {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// 방송 제목을 파일 이름으로 쓸 수 있게 바꿉니다.
/// 공백, `/`, `?`, `!`는 `_`로 치환됩니다.
pub fn sanitize_file_name(original: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(original, "_").into_owned()
}

/// 그래프 파일 이름: `{YYYYMMDD}-{방송 제목}-{plot_type}.png`
pub fn plot_file_name(date: NaiveDate, stream_title: &str, plot_type: &str) -> String {
    format!(
        "{}-{}-{}.png",
        date.format("%Y%m%d"),
        sanitize_file_name(stream_title),
        plot_type
    )
}

/// 보관용 복사본 파일 이름: `{YYMMDD}-{방송 제목}.csv`
pub fn archive_file_name(date: NaiveDate, stream_title: &str) -> String {
    format!(
        "{}-{}.csv",
        date.format("%y%m%d"),
        sanitize_file_name(stream_title)
    )
}
