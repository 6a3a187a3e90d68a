use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use serde::Serialize;

use hatewatch::analysis::{AnalysisResult, ResultSummary, parse_batch_file};
use hatewatch::monitor::{MonitorPoller, RecentWindow, fetch_snapshot};
use hatewatch::render::{
    ApiInfoView, AugmentationView, ExperimentsView, HealthView, HistoryView, ModelCardView,
    ModelComparisonView, ResultsView, SnapshotView, StatsView, SummaryView, VideoHeaderView,
};
use hatewatch::session::{AnalysisSession, InputMode, SubmitOutcome};
use hatewatch::telemetry::{SubscriberConfig, init_subscriber};
use hatewatch::types::PredictionFilters;
use hatewatch::youtube::extract_video_id;
use hatewatch::{ClientConfig, HateSpeechClient, reports};

mod cli;

use cli::{Cli, Command, GlobalArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = SubscriberConfig::builder()
        .log_level(cli.global.log_level)
        .output_format(cli.global.log_format);
    if let Some(path) = &cli.global.log_file {
        logging = logging.log_file(path.clone());
    }
    let _guard = init_subscriber(logging.build())?;

    let client = build_client(&cli.global)?;
    tracing::debug!(base_url = client.base_url(), command = ?cli.command, "starting");

    run(client, cli.command, cli.global.json).await
}

fn build_client(global: &GlobalArgs) -> anyhow::Result<HateSpeechClient> {
    let mut builder = ClientConfig::builder().base_url(&global.api_url);
    if let Some(secs) = global.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let config = builder.build().context("invalid client configuration")?;
    Ok(HateSpeechClient::new(config)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_results(results: &[AnalysisResult], json: bool) -> anyhow::Result<()> {
    let summary = ResultSummary::from_results(results);
    if json {
        #[derive(Serialize)]
        struct Output<'a> {
            results: &'a [AnalysisResult],
            summary: &'a ResultSummary,
        }
        return print_json(&Output {
            results,
            summary: &summary,
        });
    }
    println!("{}", ResultsView(results));
    print!("{}", SummaryView(&summary));
    Ok(())
}

async fn run(client: HateSpeechClient, command: Command, json: bool) -> anyhow::Result<()> {
    match command {
        Command::Predict { text } => {
            let prediction = client.analyze_text(&text.join(" ")).await?;
            if json {
                return print_json(&prediction);
            }
            print!("{}", ResultsView(&[AnalysisResult::from(&prediction)]));
        }

        Command::Batch { file } => {
            let contents = parse_batch_file(&file).await?;
            let mut session = AnalysisSession::new(InputMode::Batch);
            session.set_batch(contents);
            match session.submit(&client).await {
                SubmitOutcome::Skipped => bail!("{} contains no comments", file.display()),
                SubmitOutcome::Failed => {
                    bail!("{}", session.error().unwrap_or("Batch analysis failed"))
                }
                SubmitOutcome::Completed(_) => print_results(session.results(), json)?,
            }
        }

        Command::Youtube {
            url,
            max_comments,
            sort_by,
        } => {
            if extract_video_id(&url).is_none() {
                bail!("Could not extract a video id from '{url}'");
            }
            let video = client.analyze_youtube(&url, max_comments, sort_by).await?;
            if json {
                return print_json(&video);
            }
            println!("{}", VideoHeaderView(&video));
            let results: Vec<AnalysisResult> =
                video.comments.iter().map(AnalysisResult::from).collect();
            print_results(&results, false)?;
        }

        Command::Stats => {
            let stats = client.get_stats().await?;
            if json {
                return print_json(&stats);
            }
            print!("{}", StatsView(&stats));
        }

        Command::History {
            limit,
            offset,
            toxic,
            source,
            video_id,
        } => {
            let mut filters = PredictionFilters::new().limit(limit).offset(offset);
            if let Some(toxic) = toxic {
                filters = filters.toxic(toxic);
            }
            if let Some(source) = source {
                filters = filters.source(source);
            }
            if let Some(video_id) = video_id {
                filters = filters.video_id(video_id);
            }
            let page = client.get_predictions(&filters).await?;
            if json {
                return print_json(&page);
            }
            print!("{}", HistoryView(&page));
        }

        Command::Health => {
            let health = client.check_health().await?;
            if json {
                return print_json(&health);
            }
            print!("{}", HealthView(&health));
            if !health.is_healthy() {
                bail!("The model is not loaded");
            }
        }

        Command::Monitor {
            recent_limit,
            watch,
        } => {
            let window = RecentWindow::new(recent_limit)?;
            if !watch {
                let snapshot = fetch_snapshot(&client, window).await;
                let report = snapshot.outcome.clone()?;
                if json {
                    return print_json(&report);
                }
                print!("{}", SnapshotView(&snapshot));
                return Ok(());
            }

            let mut handle = MonitorPoller::new(Arc::new(client))
                .with_window(window)
                .spawn();
            loop {
                tokio::select! {
                    snapshot = handle.next() => {
                        let Some(snapshot) = snapshot else { break };
                        if json {
                            match &snapshot.outcome {
                                Ok(report) => print_json(report)?,
                                Err(err) => eprintln!("{}", err.user_message()),
                            }
                        } else {
                            println!("{}", SnapshotView(&snapshot));
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::debug!("interrupted");
                        break;
                    }
                }
            }
            handle.stop();
        }

        Command::Models => {
            if json {
                #[derive(Serialize)]
                struct Output {
                    models: &'static [reports::ModelReport],
                    model_card: reports::ModelCard,
                    augmentation: [reports::AugmentationTechnique; 3],
                }
                return print_json(&Output {
                    models: &reports::MODELS,
                    model_card: reports::MODEL_CARD,
                    augmentation: reports::AUGMENTATION_TECHNIQUES,
                });
            }
            println!("{}", ModelComparisonView);
            println!("{}", ModelCardView);
            print!("{}", AugmentationView);
        }

        Command::Info => {
            let info = client.api_info().await?;
            if json {
                return print_json(&info);
            }
            print!("{}", ApiInfoView(&info));
        }

        Command::Experiments => {
            let experiments = client.list_experiments().await?;
            if json {
                return print_json(&experiments);
            }
            print!("{}", ExperimentsView(&experiments));
        }
    }
    Ok(())
}
