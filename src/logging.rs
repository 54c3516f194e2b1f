//! Tracing output as runner workflow commands
//!
//! `debug!` becomes `::debug::`, `warn!` becomes `::warning::` and `error!`
//! becomes `::error::`, so the runner applies its own visibility rules.
//! `info!` lines are printed as they are.

use crate::env::command::escape_data;
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Event formatter producing one workflow command per event
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowCommandFormat;

impl<S, N> FormatEvent<S, N> for WorkflowCommandFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;
        writeln!(writer, "{}", render_line(*event.metadata().level(), &message))
    }
}

/// Render one log line for the given level
pub fn render_line(level: Level, message: &str) -> String {
    if level == Level::ERROR {
        format!("::error::{}", escape_data(message))
    } else if level == Level::WARN {
        format!("::warning::{}", escape_data(message))
    } else if level == Level::INFO {
        message.to_string()
    } else {
        format!("::debug::{}", escape_data(message))
    }
}

/// Filter used when `RUST_LOG` is not set
///
/// Inside the runner debug lines are always emitted; the runner hides them
/// unless step debugging is enabled.
pub fn default_filter(verbosity: u8, in_runner: bool) -> &'static str {
    match verbosity {
        0 if !in_runner => "warn,release_env=info",
        0 | 1 => "warn,release_env=debug",
        2 => "info,release_env=trace",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbosity: u8) {
    let in_runner = std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity, in_runner)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(WorkflowCommandFormat)
        .with_writer(std::io::stdout)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_render_line_per_level() {
        assert_eq!(render_line(Level::ERROR, "bad"), "::error::bad");
        assert_eq!(render_line(Level::WARN, "careful"), "::warning::careful");
        assert_eq!(render_line(Level::INFO, "Exports is: true"), "Exports is: true");
        assert_eq!(render_line(Level::DEBUG, "a\nb"), "::debug::a%0Ab");
        assert_eq!(render_line(Level::TRACE, "t"), "::debug::t");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_events_are_formatted_as_workflow_commands() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .event_format(WorkflowCommandFormat)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Exports is: {}", true);
            tracing::debug!("Artifact name: '{}'", "build-42");
            tracing::warn!("disk 90% full");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(
            output,
            "Exports is: true\n\
             ::debug::Artifact name: 'build-42'\n\
             ::warning::disk 90%25 full\n"
        );
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(0, false), "warn,release_env=info");
        assert_eq!(default_filter(0, true), "warn,release_env=debug");
        assert_eq!(default_filter(1, false), "warn,release_env=debug");
        assert_eq!(default_filter(2, true), "info,release_env=trace");
        assert_eq!(default_filter(5, false), "trace");
    }
}
