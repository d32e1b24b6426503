/// Sweep lifecycle events, outermost first. Each cell brackets one task whose steps are chains.
#[derive(Debug, Clone)]
pub enum Progress {
    SweepStart {
        total_cells: u64,
    },
    CellStart {
        index: usize,
        linear_density: f64,
        persistence_length: f64,
        link_diameter: f64,
        localization_precision: f64,
    },
    CellFinish {
        index: usize,
        failures: usize,
    },
    SweepFinish,

    TaskStart {
        total_steps: u64,
    },
    TaskIncrement,
    TaskFinish,

    Message(String),
}

/// Receives every event of a sweep. Called from worker threads for `TaskIncrement`.
pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards sweep events to an optional observer. A reporter without a callback is free to pass
/// around and drops every event.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    observer: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(observer: ProgressCallback<'a>) -> Self {
        Self {
            observer: Some(observer),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.observer.is_none()
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        let Some(observer) = &self.observer else {
            return;
        };
        observer(event);
    }
}
