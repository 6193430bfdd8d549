use clap::Parser;
use enroll::config::command_words;
use enroll::{
    Camera, Cli, Detectors, Enrollment, FileCamera, FilePreview, NoPreview, Outcome, Preview,
    SnapshotCamera, init_logging,
};
use std::sync::Arc;
use tracing::info;
use voice::whisper::default_recorder;
use voice::{ConsoleEar, ConsoleMouth, CoquiMouth, Ear, Mouth, VoiceChannel, WhisperEar};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging();

    let config = cli.enroll_config();
    let detectors = Detectors::load(&cli.frontal_model, &cli.profile_model, &cli.detector_params())?;

    let mouth: Arc<dyn Mouth> = match &cli.tts_url {
        Some(url) => Arc::new(
            CoquiMouth::new(url, cli.speaker_id.clone(), cli.language_id.clone())
                .with_player(command_words(&cli.player)),
        ),
        None => Arc::new(ConsoleMouth),
    };
    let ear: Arc<dyn Ear> = match &cli.asr_url {
        Some(url) => {
            let recorder = cli
                .recorder
                .as_deref()
                .map(command_words)
                .unwrap_or_else(|| default_recorder(cli.listen_seconds));
            Arc::new(WhisperEar::new(url).with_recorder(recorder))
        }
        None => Arc::new(ConsoleEar::new()),
    };
    let camera: Box<dyn Camera> = match &cli.frames {
        Some(pattern) => Box::new(FileCamera::new(pattern)?),
        None => Box::new(SnapshotCamera::new(&cli.snapshot_url)),
    };
    let preview: Box<dyn Preview> = if cli.no_preview {
        Box::new(NoPreview)
    } else {
        Box::new(FilePreview::new(&cli.preview))
    };

    let mut enrollment = Enrollment::new(
        config,
        VoiceChannel::new(mouth, ear),
        camera,
        detectors,
        preview,
    );
    match enrollment.run().await? {
        Outcome::Enrolled {
            record,
            captured,
            aborted,
            samples,
        } => info!(id = record.id, captured, aborted, samples, "enrollment complete"),
        outcome => info!(?outcome, "enrollment skipped"),
    }
    Ok(())
}
