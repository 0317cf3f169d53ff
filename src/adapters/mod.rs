mod tracing_presenter;

pub use tracing_presenter::TracingEventPresenter;
