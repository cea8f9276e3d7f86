//! Shared helpers for control integration tests

#![allow(dead_code)]

use std::sync::Arc;

use filepick_control::{ChannelSink, ControlEvent, UploadControl};
use filepick_core::{ControlConfig, SystemFile};
use tokio::sync::mpsc::UnboundedReceiver;

pub struct TestControl {
    pub control: UploadControl,
    pub events: UnboundedReceiver<ControlEvent>,
}

impl TestControl {
    /// Drain every event emitted so far
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }

    pub fn names(&self) -> Vec<String> {
        self.control
            .selection()
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }
}

/// Build and activate a control wired to a channel sink
pub fn setup_control(config: ControlConfig) -> TestControl {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let (sink, events) = ChannelSink::new();
    let mut control = UploadControl::new(config).with_sink(Arc::new(sink));
    control.activate();
    TestControl { control, events }
}

pub fn multiple() -> ControlConfig {
    ControlConfig {
        multiple: true,
        ..Default::default()
    }
}

pub mod fixtures {
    use super::*;

    pub fn text_file(name: &str) -> SystemFile {
        SystemFile::new(name, 3, "text/plain")
    }

    pub fn sized_file(name: &str, size: u64) -> SystemFile {
        SystemFile::new(name, size, "text/plain")
    }

    pub fn image_file(name: &str) -> SystemFile {
        SystemFile::new(name, 1024, "image/jpeg")
    }
}
