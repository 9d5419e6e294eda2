use std::path::PathBuf;

use color_eyre::eyre::Result;
use mimalloc::MiMalloc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

use crate::command::analyze_stream::{self, AnalysisConfig, Backends, DEFAULT_CHAT_LOG_PATH};
use crate::data::sentiment::LexiconSentiment;
use crate::plot::PlottersRenderer;

mod command;
mod data;
mod error;
mod plot;
mod utils;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// ====== CLI 구조체 ======

#[derive(StructOpt, Debug)]
#[structopt(
    name = "chat-profiler",
    about = "Analyze a livestream chat log, archive it to the master log and reset the working log. \
             Run one instance at a time per chat log file."
)]
pub struct Opt {
    /// Chat log path, or the stream title when it is the only argument
    #[structopt(name = "FILE_PATH_OR_TITLE")]
    pub first: String,

    /// Stream title (the chat log path defaults to ./chat-log.csv when omitted)
    #[structopt(name = "STREAM_TITLE")]
    pub stream_title: Option<String>,
}

impl Opt {
    /// 위치 인자를 (작업 로그 경로, 방송 제목)으로 나눕니다.
    pub fn file_path_and_title(&self) -> (PathBuf, String) {
        match &self.stream_title {
            Some(stream_title) => (PathBuf::from(&self.first), stream_title.clone()),
            None => (PathBuf::from(DEFAULT_CHAT_LOG_PATH), self.first.clone()),
        }
    }
}

/// ====== 엔트리포인트 ======

fn main() -> Result<()> {
    color_eyre::install()?;
    let opt = Opt::from_args();
    let (file_path, stream_title) = opt.file_path_and_title();

    utils::log(format!(
        "채팅 분석 시작: {:?} (방송 제목: {})",
        file_path, stream_title
    ));

    let config = AnalysisConfig::default();
    let scorer = LexiconSentiment::new();
    let renderer = PlottersRenderer::new(config.font_path.clone());
    let backends = Backends {
        scorer: &scorer,
        renderer: &renderer,
    };

    let report = analyze_stream::analyze_stream(
        &file_path,
        &stream_title,
        &config,
        &backends,
        &mut StdRng::from_entropy(),
        analyze_stream::today(),
    )?;

    analyze_stream::print_profiles(&report.profiles)?;

    utils::log(format!(
        "완료: 사용자 {}명, 보관 {}줄 (건너뛴 줄 {}), 그래프 {:?} / {:?}, 복사본 {:?}",
        report.summary.unique_users,
        report.rows_archived,
        report.skipped_rows,
        report.frequency_plot,
        report.word_plot,
        report.archive_copy
    ));

    Ok(())
}
