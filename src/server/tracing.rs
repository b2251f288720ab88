use tracing::Event;
use tracing_subscriber::fmt::{
    format::{DefaultFields, FormatEvent, FormatFields, Writer},
    FmtContext,
};
use tracing_subscriber::{fmt, prelude::*, registry::LookupSpan, EnvFilter};

use crate::config::Config;
use crate::error::Result;

struct AppIdWrapper<F> {
    inner: F,
    app: &'static str,
}

impl<F> AppIdWrapper<F> {
    const fn new(inner: F, app: &'static str) -> Self {
        Self { inner, app }
    }
}

impl<S, N, F> FormatEvent<S, N> for AppIdWrapper<F>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
    F: FormatEvent<S, N>,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(writer, "application={} ", self.app)?;
        self.inner.format_event(ctx, writer, event)
    }
}

/// Install the global subscriber: `RUST_LOG` filter, compact stdout lines
/// tagged with the application name.
pub fn init_tracing_logging(cfg: &Config) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(cfg.default_log_filter))?;

    let app_format = AppIdWrapper::new(fmt::format().compact(), cfg.app_name);

    let fmt_layer = fmt::layer()
        .fmt_fields(DefaultFields::new())
        .event_format(app_format);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
