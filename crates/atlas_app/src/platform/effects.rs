use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use atlas_core::{Country, Effect, LoadFailure, LoadFailureKind, LoadStage, Msg};
use atlas_engine::{
    CountryRecord, EngineEvent, EngineHandle, FailureKind, FetchError, FetchSettings, Stage,
};
use atlas_logging::atlas_info;

use super::config::Config;

pub struct EffectRunner {
    engine: EngineHandle,
    endpoint: String,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, config: &Config) -> Self {
        let settings = FetchSettings {
            request_timeout: config.request_timeout,
            ..FetchSettings::default()
        };
        let engine = EngineHandle::new(settings);
        let runner = Self {
            engine,
            endpoint: config.endpoint.clone(),
        };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchCountries => {
                    atlas_info!("fetching country list from {}", self.endpoint);
                    self.engine.load(self.endpoint.clone());
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    return;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(progress) => Msg::LoadProgress {
            stage: map_stage(progress.stage),
            bytes: progress.bytes,
        },
        EngineEvent::LoadCompleted { result } => match result {
            Ok(outcome) => {
                Msg::CountriesLoaded(outcome.records.into_iter().map(map_record).collect())
            }
            Err(err) => Msg::LoadFailed(map_failure(err)),
        },
    }
}

fn map_stage(stage: Stage) -> LoadStage {
    match stage {
        Stage::Downloading => LoadStage::Downloading,
        Stage::Decoding => LoadStage::Decoding,
    }
}

fn map_record(record: CountryRecord) -> Country {
    Country {
        name: record.name,
        region: record.region,
        area_sq_km: record.area_sq_km,
        flag_url: record.flag_url,
    }
}

fn map_failure(err: FetchError) -> LoadFailure {
    let kind = match err.kind {
        FailureKind::Timeout => LoadFailureKind::Timeout,
        FailureKind::HttpStatus(code) => LoadFailureKind::HttpStatus(code),
        FailureKind::MalformedPayload => LoadFailureKind::MalformedPayload,
        FailureKind::InvalidUrl
        | FailureKind::RedirectLimitExceeded
        | FailureKind::TooLarge { .. }
        | FailureKind::UnsupportedContentType { .. }
        | FailureKind::Network => LoadFailureKind::Network,
    };
    LoadFailure {
        kind,
        message: err.message,
    }
}
