use crate::abort::AbortSwitch;
use crate::camera::Camera;
use crate::capture::{Capture, Detectors};
use crate::config::{EnrollConfig, Relabel};
use crate::preview::Preview;
use crate::store::{IdentityRecord, IdentityStore};
use crate::Result;
use std::fs;
use tracing::info;
use vision::{FaceDetector, retrain};
use voice::VoiceChannel;

/// How an enrollment run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoName,
    NoPhone,
    Enrolled {
        record: IdentityRecord,
        captured: usize,
        aborted: bool,
        samples: usize,
    },
}

/// One enrollment session with every external collaborator injected.
pub struct Enrollment {
    config: EnrollConfig,
    voice: VoiceChannel,
    camera: Box<dyn Camera>,
    detectors: Detectors,
    preview: Box<dyn Preview>,
    abort: AbortSwitch,
}

impl Enrollment {
    pub fn new(
        config: EnrollConfig,
        voice: VoiceChannel,
        camera: Box<dyn Camera>,
        detectors: Detectors,
        preview: Box<dyn Preview>,
    ) -> Self {
        Self {
            config,
            voice,
            camera,
            detectors,
            preview,
            abort: AbortSwitch::new(),
        }
    }

    /// Switch that ends the capture step early when pressed.
    pub fn abort_switch(&self) -> &AbortSwitch {
        &self.abort
    }

    /// Ask for identity, capture crops and retrain.
    ///
    /// Stops early, without touching the store, when either question gets no
    /// answer. Training always covers every crop in the dataset directory,
    /// including those from earlier sessions.
    pub async fn run(&mut self) -> Result<Outcome> {
        fs::create_dir_all(&self.config.dataset_dir)?;
        if let Some(dir) = self
            .config
            .model_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(dir)?;
        }

        let Some(name) = self.voice.ask("Please say the name of the person.").await else {
            self.voice.say("Name not provided. Exiting.").await;
            return Ok(Outcome::NoName);
        };
        let Some(phone) = self.voice.ask("Now, please say the phone number.").await else {
            self.voice.say("Phone number not provided. Exiting.").await;
            return Ok(Outcome::NoPhone);
        };

        let store = IdentityStore::new(&self.config.names_path);
        let record = IdentityRecord::new(store.next_id()?, name, phone);
        store.append(&record)?;
        info!(id = record.id, name = %record.name, "enrolling");

        self.voice
            .say(&format!(
                "Collecting images for {}. Please look at the camera from different angles.",
                record.name
            ))
            .await;
        let mouth = self.voice.mouth().clone();
        let report = Capture {
            camera: self.camera.as_mut(),
            detectors: &mut self.detectors,
            mouth: mouth.as_ref(),
            preview: self.preview.as_mut(),
            abort: &self.abort,
        }
        .run(record.id, &self.config.dataset_dir, &self.config.capture)
        .await?;

        self.voice.say("Training the recognizer. Please wait...").await;
        let detector: &mut dyn FaceDetector = match self.config.relabel {
            Relabel::Frontal => self.detectors.frontal.as_mut(),
            Relabel::Profile => self.detectors.profile.as_mut(),
        };
        let model = retrain(
            &self.config.dataset_dir,
            &self.config.model_path,
            detector,
            self.config.lbph,
        )?;
        self.voice.say("Training completed successfully.").await;

        Ok(Outcome::Enrolled {
            record,
            captured: report.saved.len(),
            aborted: report.aborted,
            samples: model.len(),
        })
    }
}
