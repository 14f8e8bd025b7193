//! Core library for arruma - simulated file-organization progress
//!
//! # Overview
//!
//! This library provides the process catalog (static step tables and result
//! stats for the screenshots / recordings / cleanup flows) and the step
//! `Sequencer` that both frontends drive. There is no real file discovery,
//! deduplication or disk-space analysis anywhere in this crate: every number
//! shown is a compiled-in placeholder, and "progress" is a fixed countdown
//! through the configured step durations.
//!
//! # Multi-Frontend Architecture
//!
//! The sequencer never owns a thread or an OS timer. Hosts (TUI/GUI) call
//! [`Sequencer::poll`] with `Instant::now()` from their own loop and redraw
//! from the observable `(current_step, is_complete)` pair. At most one
//! deadline is armed at any time; closing the modal clears it synchronously.
//!
//! # Usage
//!
//! ```rust
//! use arruma::{ProcessType, Sequencer};
//! use std::time::Instant;
//!
//! let mut seq = Sequencer::new(ProcessType::Cleanup);
//! seq.open_at(Instant::now());
//! assert_eq!(seq.current_step(), 0);
//! assert!(!seq.is_complete());
//! ```

use std::time::{Duration, Instant};

// ============================================================================
// PROCESS CATALOG (Static Configuration)
// ============================================================================

/// One of the three canned operations the modal can simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessType {
    Screenshots,
    Recordings,
    Cleanup,
}

/// A single labeled phase with a fixed display duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStep {
    pub label: &'static str,
    pub duration: Duration,
    pub icon: Option<&'static str>,
}

/// Per-process presentation bundle: title, subtitle, icon, accent color and
/// the ordered step table. Frontends map `accent` to their own color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessConfig {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: &'static str,
    pub accent: (u8, u8, u8),
    pub steps: &'static [ProcessStep],
}

/// Hardcoded completion stat shown when a sequence finishes.
///
/// Displayed as "`value` `label`" (e.g. "1.2 GB de espaço liberado"). Not
/// derived from any computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultStat {
    pub value: &'static str,
    pub label: &'static str,
}

const SCREENSHOT_STEPS: &[ProcessStep] = &[
    ProcessStep {
        label: "Procurando capturas de tela...",
        duration: Duration::from_millis(1200),
        icon: Some("🔍"),
    },
    ProcessStep {
        label: "Lendo datas e metadados...",
        duration: Duration::from_millis(900),
        icon: Some("🏷"),
    },
    ProcessStep {
        label: "Agrupando por mês...",
        duration: Duration::from_millis(1100),
        icon: Some("🗓"),
    },
    ProcessStep {
        label: "Criando pastas...",
        duration: Duration::from_millis(800),
        icon: Some("📁"),
    },
    ProcessStep {
        label: "Movendo arquivos...",
        duration: Duration::from_millis(1400),
        icon: Some("📦"),
    },
];

const RECORDING_STEPS: &[ProcessStep] = &[
    ProcessStep {
        label: "Procurando gravações...",
        duration: Duration::from_millis(1300),
        icon: Some("🔍"),
    },
    ProcessStep {
        label: "Verificando duração dos vídeos...",
        duration: Duration::from_millis(1500),
        icon: Some("⏱"),
    },
    ProcessStep {
        label: "Agrupando por projeto...",
        duration: Duration::from_millis(1000),
        icon: Some("🗂"),
    },
    ProcessStep {
        label: "Criando pastas...",
        duration: Duration::from_millis(800),
        icon: Some("📁"),
    },
    ProcessStep {
        label: "Movendo arquivos...",
        duration: Duration::from_millis(1600),
        icon: Some("📦"),
    },
];

const CLEANUP_STEPS: &[ProcessStep] = &[
    ProcessStep {
        label: "Analisando arquivos...",
        duration: Duration::from_millis(1000),
        icon: Some("🔍"),
    },
    ProcessStep {
        label: "Procurando duplicatas...",
        duration: Duration::from_millis(1400),
        icon: Some("🗃"),
    },
    ProcessStep {
        label: "Comparando conteúdo...",
        duration: Duration::from_millis(1600),
        icon: Some("⚖"),
    },
    ProcessStep {
        label: "Identificando temporários...",
        duration: Duration::from_millis(900),
        icon: Some("🕒"),
    },
    ProcessStep {
        label: "Removendo duplicatas...",
        duration: Duration::from_millis(1200),
        icon: Some("🗑"),
    },
    ProcessStep {
        label: "Liberando espaço...",
        duration: Duration::from_millis(1100),
        icon: Some("✨"),
    },
];

static SCREENSHOTS_CONFIG: ProcessConfig = ProcessConfig {
    title: "Organizar capturas de tela",
    subtitle: "Suas capturas serão agrupadas por mês",
    icon: "📸",
    accent: (66, 135, 245),
    steps: SCREENSHOT_STEPS,
};

static RECORDINGS_CONFIG: ProcessConfig = ProcessConfig {
    title: "Organizar gravações",
    subtitle: "Suas gravações serão agrupadas por projeto",
    icon: "🎬",
    accent: (168, 85, 247),
    steps: RECORDING_STEPS,
};

static CLEANUP_CONFIG: ProcessConfig = ProcessConfig {
    title: "Limpeza inteligente",
    subtitle: "Duplicatas e arquivos temporários serão removidos",
    icon: "🧹",
    accent: (34, 197, 94),
    steps: CLEANUP_STEPS,
};

static SCREENSHOTS_RESULT: ResultStat = ResultStat {
    value: "234",
    label: "capturas organizadas",
};

static RECORDINGS_RESULT: ResultStat = ResultStat {
    value: "156",
    label: "gravações organizadas",
};

static CLEANUP_RESULT: ResultStat = ResultStat {
    value: "1.2 GB",
    label: "de espaço liberado",
};

impl ProcessType {
    /// All process types, in launcher display order.
    pub const ALL: [ProcessType; 3] = [
        ProcessType::Screenshots,
        ProcessType::Recordings,
        ProcessType::Cleanup,
    ];

    /// Parse a CLI key. The set is closed; anything else is `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "screenshots" => Some(Self::Screenshots),
            "recordings" => Some(Self::Recordings),
            "cleanup" => Some(Self::Cleanup),
            _ => None,
        }
    }

    /// Stable key used on the command line and in log events.
    pub fn key(self) -> &'static str {
        match self {
            Self::Screenshots => "screenshots",
            Self::Recordings => "recordings",
            Self::Cleanup => "cleanup",
        }
    }

    /// Presentation bundle for this process.
    pub fn config(self) -> &'static ProcessConfig {
        match self {
            Self::Screenshots => &SCREENSHOTS_CONFIG,
            Self::Recordings => &RECORDINGS_CONFIG,
            Self::Cleanup => &CLEANUP_CONFIG,
        }
    }

    /// Completion stat for this process.
    pub fn result_stat(self) -> &'static ResultStat {
        match self {
            Self::Screenshots => &SCREENSHOTS_RESULT,
            Self::Recordings => &RECORDINGS_RESULT,
            Self::Cleanup => &CLEANUP_RESULT,
        }
    }
}

// ============================================================================
// STEP SEQUENCER (Primary Interface)
// ============================================================================

/// Timer-driven state machine advancing through a process's steps.
///
/// Owns the session state `(current_step, complete)` plus at most one armed
/// deadline. Invariants:
///
/// * `is_complete()` is true iff `current_step() >= total_steps()`.
/// * `current_step()` never decreases while open and never exceeds
///   `total_steps()`.
/// * Closing resets to `(0, false)` and clears the deadline in the same call.
///
/// # Example
///
/// ```no_run
/// use arruma::{ProcessType, Sequencer};
/// use std::time::Instant;
///
/// let mut seq = Sequencer::new(ProcessType::Screenshots);
/// seq.open_at(Instant::now());
/// loop {
///     seq.poll(Instant::now());
///     if seq.is_complete() {
///         break;
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Sequencer {
    process: ProcessType,
    open: bool,
    current_step: usize,
    complete: bool,
    deadline: Option<Instant>,
}

impl Sequencer {
    /// Create a closed, idle sequencer for `process`.
    pub fn new(process: ProcessType) -> Self {
        Self {
            process,
            open: false,
            current_step: 0,
            complete: false,
            deadline: None,
        }
    }

    pub fn process(&self) -> ProcessType {
        self.process
    }

    /// Presentation bundle for the current process.
    pub fn config(&self) -> &'static ProcessConfig {
        self.process.config()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.config().steps.len()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The step currently animating, or `None` once the sequence finished
    /// (or while closed).
    pub fn active_step(&self) -> Option<&'static ProcessStep> {
        if !self.open || self.complete {
            return None;
        }
        self.config().steps.get(self.current_step)
    }

    /// The armed deadline, if any. Tick-loop hosts can use this to size
    /// their poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Open the modal: reset to step 0 and arm the first step's deadline.
    pub fn open_at(&mut self, now: Instant) {
        self.open = true;
        self.current_step = 0;
        self.complete = self.config().steps.is_empty();
        self.deadline = self.config().steps.first().map(|s| now + s.duration);
        tracing::debug!(
            process = self.process.key(),
            total = self.total_steps(),
            "sequence started"
        );
    }

    /// Close the modal: reset `(current_step, complete)` to `(0, false)` and
    /// clear any pending deadline. Always permitted, finished or not; the
    /// host reacts to the modal closing.
    pub fn close(&mut self) {
        self.open = false;
        self.current_step = 0;
        self.complete = false;
        self.deadline = None;
        tracing::debug!(process = self.process.key(), "sequence reset");
    }

    /// Switch process. While open this restarts the sequence from step 0
    /// with the new table (reset-on-dependency-change); while closed it just
    /// swaps the table for the next open.
    pub fn set_process(&mut self, process: ProcessType, now: Instant) {
        if process == self.process {
            return;
        }
        self.process = process;
        if self.open {
            self.open_at(now);
        }
    }

    /// Advance if the armed deadline has been reached. At most one step per
    /// call; the next deadline is armed relative to `now`, so a stalled host
    /// catches up one step per poll rather than jumping. Returns whether
    /// observable state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        self.deadline = None;
        self.current_step += 1;
        if self.current_step >= self.total_steps() {
            self.complete = true;
            tracing::debug!(process = self.process.key(), "sequence complete");
        } else {
            self.deadline = Some(now + self.config().steps[self.current_step].duration);
            tracing::trace!(
                process = self.process.key(),
                step = self.current_step,
                "step advanced"
            );
        }
        true
    }

    /// Derived progress in `[0.0, 1.0]`. `1.0` once complete.
    pub fn fraction(&self) -> f32 {
        if self.complete {
            return 1.0;
        }
        let total = self.total_steps();
        if total == 0 {
            return 1.0;
        }
        self.current_step as f32 / total as f32
    }

    /// Derived progress as a rounded percentage `0..=100`.
    pub fn percent(&self) -> u8 {
        (self.fraction() * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(process: ProcessType) -> (Sequencer, Instant) {
        let now = Instant::now();
        let mut seq = Sequencer::new(process);
        seq.open_at(now);
        (seq, now)
    }

    #[test]
    fn test_new_is_closed_and_idle() {
        let seq = Sequencer::new(ProcessType::Screenshots);
        assert!(!seq.is_open());
        assert_eq!(seq.current_step(), 0);
        assert!(!seq.is_complete());
        assert!(seq.next_deadline().is_none());
        assert!(seq.active_step().is_none());
    }

    #[test]
    fn test_open_arms_first_deadline() {
        let (seq, now) = opened(ProcessType::Screenshots);
        assert!(seq.is_open());
        assert_eq!(seq.current_step(), 0);
        assert!(!seq.is_complete());
        assert_eq!(seq.active_step(), Some(&seq.config().steps[0]));
        let first = seq.config().steps[0].duration;
        assert_eq!(seq.next_deadline(), Some(now + first));
    }

    #[test]
    fn test_poll_before_deadline_is_noop() {
        let (mut seq, now) = opened(ProcessType::Cleanup);
        assert!(!seq.poll(now + Duration::from_millis(1)));
        assert_eq!(seq.current_step(), 0);
    }

    #[test]
    fn test_poll_when_closed_is_noop() {
        let mut seq = Sequencer::new(ProcessType::Recordings);
        assert!(!seq.poll(Instant::now()));
        assert_eq!(seq.current_step(), 0);
        assert!(!seq.is_complete());
    }

    #[test]
    fn test_steps_advance_one_at_a_time() {
        for process in ProcessType::ALL {
            let (mut seq, _) = opened(process);
            let total = seq.total_steps();
            let mut fired = 0;
            while let Some(deadline) = seq.next_deadline() {
                let before = seq.current_step();
                assert!(seq.poll(deadline));
                fired += 1;
                assert_eq!(seq.current_step(), before + 1);
                assert!(seq.current_step() <= total);
            }
            assert_eq!(fired, total);
            assert!(seq.is_complete());
        }
    }

    #[test]
    fn test_cleanup_runs_six_steps_to_completion() {
        let (mut seq, _) = opened(ProcessType::Cleanup);
        assert_eq!(seq.total_steps(), 6);
        for _ in 0..6 {
            let deadline = seq.next_deadline().unwrap();
            seq.poll(deadline);
        }
        assert!(seq.is_complete());
        assert_eq!(seq.current_step(), 6);
        assert_eq!(seq.fraction(), 1.0);
        assert_eq!(seq.percent(), 100);

        let stat = seq.process().result_stat();
        assert_eq!(stat.value, "1.2 GB");
        assert_eq!(stat.label, "de espaço liberado");
    }

    #[test]
    fn test_complete_stays_true_until_close() {
        let (mut seq, _) = opened(ProcessType::Screenshots);
        while let Some(deadline) = seq.next_deadline() {
            seq.poll(deadline);
        }
        assert!(seq.is_complete());

        // No deadline armed anymore; further polls change nothing.
        assert!(!seq.poll(Instant::now() + Duration::from_secs(60)));
        assert!(seq.is_complete());
        assert!(seq.active_step().is_none());

        seq.close();
        assert!(!seq.is_complete());
        assert_eq!(seq.current_step(), 0);
    }

    #[test]
    fn test_close_mid_sequence_resets_and_cancels() {
        let (mut seq, _) = opened(ProcessType::Screenshots);
        for _ in 0..2 {
            let deadline = seq.next_deadline().unwrap();
            seq.poll(deadline);
        }
        assert_eq!(seq.current_step(), 2);

        seq.close();
        assert!(!seq.is_open());
        assert_eq!(seq.current_step(), 0);
        assert!(!seq.is_complete());
        assert!(seq.next_deadline().is_none());
    }

    #[test]
    fn test_reopen_restarts_from_zero() {
        let (mut seq, _) = opened(ProcessType::Recordings);
        let deadline = seq.next_deadline().unwrap();
        seq.poll(deadline);
        seq.close();

        let later = Instant::now() + Duration::from_secs(5);
        seq.open_at(later);
        assert_eq!(seq.current_step(), 0);
        assert!(!seq.is_complete());
        let first = seq.config().steps[0].duration;
        assert_eq!(seq.next_deadline(), Some(later + first));
    }

    #[test]
    fn test_late_poll_advances_single_step() {
        let (mut seq, now) = opened(ProcessType::Cleanup);
        // Poll long after every configured duration has elapsed.
        let late = now + Duration::from_secs(30);
        assert!(seq.poll(late));
        assert_eq!(seq.current_step(), 1);
        assert!(!seq.is_complete());
        // The next deadline re-arms relative to the poll that fired.
        let second = seq.config().steps[1].duration;
        assert_eq!(seq.next_deadline(), Some(late + second));
    }

    #[test]
    fn test_fraction_matches_step_ratio() {
        let (mut seq, _) = opened(ProcessType::Cleanup);
        let total = seq.total_steps();
        for step in 1..total {
            let deadline = seq.next_deadline().unwrap();
            seq.poll(deadline);
            assert_eq!(seq.fraction(), step as f32 / total as f32);
        }
    }

    #[test]
    fn test_set_process_while_open_restarts() {
        let (mut seq, _) = opened(ProcessType::Screenshots);
        let deadline = seq.next_deadline().unwrap();
        seq.poll(deadline);
        assert_eq!(seq.current_step(), 1);

        let now = Instant::now();
        seq.set_process(ProcessType::Cleanup, now);
        assert_eq!(seq.process(), ProcessType::Cleanup);
        assert!(seq.is_open());
        assert_eq!(seq.current_step(), 0);
        assert!(!seq.is_complete());
        let first = seq.config().steps[0].duration;
        assert_eq!(seq.next_deadline(), Some(now + first));
    }

    #[test]
    fn test_set_process_while_closed_swaps_only() {
        let mut seq = Sequencer::new(ProcessType::Screenshots);
        seq.set_process(ProcessType::Recordings, Instant::now());
        assert_eq!(seq.process(), ProcessType::Recordings);
        assert!(!seq.is_open());
        assert!(seq.next_deadline().is_none());
    }

    #[test]
    fn test_from_key_accepts_closed_set_only() {
        assert_eq!(
            ProcessType::from_key("screenshots"),
            Some(ProcessType::Screenshots)
        );
        assert_eq!(
            ProcessType::from_key("recordings"),
            Some(ProcessType::Recordings)
        );
        assert_eq!(ProcessType::from_key("cleanup"), Some(ProcessType::Cleanup));
        assert_eq!(ProcessType::from_key("Screenshots"), None);
        assert_eq!(ProcessType::from_key(""), None);
    }

    #[test]
    fn test_catalog_tables_are_well_formed() {
        for process in ProcessType::ALL {
            let config = process.config();
            assert!(!config.steps.is_empty());
            assert!(!config.title.is_empty());
            for step in config.steps {
                assert!(!step.label.is_empty());
                assert!(step.duration > Duration::ZERO);
            }
            let stat = process.result_stat();
            assert!(!stat.value.is_empty());
            assert!(!stat.label.is_empty());
            assert_eq!(ProcessType::from_key(process.key()), Some(process));
        }
    }
}
