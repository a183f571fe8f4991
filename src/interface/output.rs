use crate::analysis::declaration::Ambiguity;
use crate::generators::GenerationReport;
use crate::models::DescriptorKind;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::time::Duration;

/// How much of a build is reported on the console
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    #[default]
    Normal,
    Debug,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
    Verbose,
}

impl LogLevel {
    /// Lowest verbosity at which this level is shown
    fn threshold(self) -> Verbosity {
        match self {
            LogLevel::Error | LogLevel::Warning | LogLevel::Info => Verbosity::Normal,
            LogLevel::Debug => Verbosity::Debug,
            LogLevel::Verbose => Verbosity::Verbose,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Verbose => "verbose",
        })
    }
}

/// Console logger for build messages.
///
/// Errors and warnings go to stderr so generated listings on stdout stay clean.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    verbosity: Verbosity,
}

impl Logger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.verbosity >= level.threshold()
    }

    /// Console line for `message`; plain info lines carry no prefix
    pub fn format_line(level: LogLevel, message: &str) -> String {
        match level {
            LogLevel::Info => message.to_string(),
            _ => format!("[{}] {}", level, message),
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let line = Self::format_line(level, message);
        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(LogLevel::Verbose, message);
    }
}

/// The stages a build moves through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    LoadDeclarations,
    Analyze,
    MergeDependencies,
    Flatten,
    SaveMetadata,
    Generate,
}

impl BuildPhase {
    /// Phases of a metadata-only build
    pub const METADATA: [BuildPhase; 5] = [
        BuildPhase::LoadDeclarations,
        BuildPhase::Analyze,
        BuildPhase::MergeDependencies,
        BuildPhase::Flatten,
        BuildPhase::SaveMetadata,
    ];

    /// Phases of a build that also generates sources
    pub const GENERATION: [BuildPhase; 6] = [
        BuildPhase::LoadDeclarations,
        BuildPhase::Analyze,
        BuildPhase::MergeDependencies,
        BuildPhase::Flatten,
        BuildPhase::SaveMetadata,
        BuildPhase::Generate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BuildPhase::LoadDeclarations => "load declarations",
            BuildPhase::Analyze => "extract descriptors",
            BuildPhase::MergeDependencies => "merge dependency models",
            BuildPhase::Flatten => "flatten hierarchy",
            BuildPhase::SaveMetadata => "save metadata",
            BuildPhase::Generate => "generate sources",
        }
    }
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tracks a build through its phases.
///
/// Below verbose level a single spinner shows the running phase; at verbose
/// level every phase is logged as a line instead.
pub struct PhaseReporter {
    logger: Logger,
    phases: &'static [BuildPhase],
    current: Option<BuildPhase>,
    spinner: Option<ProgressBar>,
}

impl PhaseReporter {
    pub fn new(logger: Logger, phases: &'static [BuildPhase]) -> Self {
        let spinner = (!logger.enabled(LogLevel::Verbose)).then(|| {
            let spinner = ProgressBar::new_spinner();
            let style = ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            spinner.set_style(style);
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner
        });

        Self {
            logger,
            phases,
            current: None,
            spinner,
        }
    }

    pub fn current(&self) -> Option<BuildPhase> {
        self.current
    }

    /// `[n/total] label` for a phase of this build
    pub fn heading(&self, phase: BuildPhase) -> String {
        let position = self
            .phases
            .iter()
            .position(|p| *p == phase)
            .map_or(0, |index| index + 1);
        format!("[{}/{}] {}", position, self.phases.len(), phase)
    }

    pub fn begin(&mut self, phase: BuildPhase) {
        self.current = Some(phase);
        let heading = self.heading(phase);
        match &self.spinner {
            Some(spinner) => spinner.set_message(heading),
            None => self.logger.verbose(&heading),
        }
    }

    /// Close the running phase, with an optional detail for the verbose log
    pub fn done(&mut self, detail: Option<String>) {
        let Some(phase) = self.current.take() else {
            return;
        };
        match detail {
            Some(detail) => self.logger.verbose(&format!("{}: {}", phase, detail)),
            None => self.logger.verbose(&format!("{}: done", phase)),
        }
    }

    /// Abort the running phase and report why
    pub fn fail(&mut self, error: impl fmt::Display) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        match self.current.take() {
            Some(phase) => self.logger.error(&format!("{} failed: {}", phase, error)),
            None => self.logger.error(&error.to_string()),
        }
    }

    pub fn note(&self, message: &str) {
        self.logger.verbose(message);
    }

    pub fn finish(mut self, summary: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.logger.info(summary);
    }
}

impl Drop for PhaseReporter {
    fn drop(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Lines describing a generation run, broken down by descriptor kind
pub fn summary_lines(output_root: &str, report: &GenerationReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Generated {} into {}",
        counted(report.generated.len(), "source file"),
        output_root
    )];

    for kind in DescriptorKind::ALL {
        let count = report.generated.iter().filter(|g| g.kind == kind).count();
        if count > 0 {
            lines.push(format!("  {}: {}", kind, count));
        }
    }

    if !report.skipped.is_empty() {
        lines.push(format!("Skipped {}", counted(report.skipped.len(), "descriptor")));
    }
    if !report.failed.is_empty() {
        lines.push(format!("Failed {}:", counted(report.failed.len(), "descriptor")));
        for failure in &report.failed {
            lines.push(format!("  {} {}: {}", failure.kind, failure.key, failure.error));
        }
    }
    lines
}

pub fn print_generation_summary(output_root: &str, report: &GenerationReport) {
    for line in summary_lines(output_root, report) {
        println!("{}", line);
    }
}

/// Warn about elements that declared the same tag in both encodings
pub fn print_ambiguities(logger: &Logger, ambiguities: &[Ambiguity]) {
    for ambiguity in ambiguities {
        logger.warning(&ambiguity.to_string());
    }
}
