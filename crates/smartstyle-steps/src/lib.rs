//! Smartstyle Steps
//!
//! This crate provides the compilation steps smartstyle runs over a
//! manuscript, and the pipeline that sequences them. A step receives the
//! text-bearing units of the kinds it declares, plus the option values the
//! host resolved for it, and rewrites their contents in place.
//!
//! # Step Behavior
//!
//! - A step never fails the pipeline; problems are reported through
//!   [`StepOutcome::Skipped`] and a log line
//! - Units are handed over in input order and come back in the same order
//! - Units whose kind the step does not declare are left alone
//!
//! # Example
//!
//! ```
//! use smartstyle_steps::{Pipeline, StepContext};
//! use smartstyle_core::{OptionValues, Scene};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let pipeline = Pipeline::with_builtins();
//! let ctx = StepContext::new().with_options(
//!     "smart-style",
//!     OptionValues::new().with("marker", ">r").with("styleName", "RightAligned"),
//! );
//!
//! let (scenes, _reports) = pipeline.run(vec![Scene::new(">r Hello there")], &ctx).await;
//! assert_eq!(
//!     scenes[0].contents.as_deref(),
//!     Some("::: {custom-style=\"RightAligned\" .RightAligned}\nHello there\n:::")
//! );
//! # }
//! ```

pub mod builtin;
pub mod description;
pub mod escape;
pub mod replacer;

pub use description::{OptionSpec, OptionType, StepDescription};
pub use replacer::SmartStyleReplacer;

use log::debug;
use smartstyle_core::{OptionValues, Scene, SmartStyleError};
use std::collections::HashMap;

/// Result of running one step.
#[derive(Debug)]
pub enum StepOutcome {
    /// The step ran over its units
    Applied {
        /// Units whose contents changed
        scenes_changed: usize,
        /// Individual rewrites performed
        replacements: usize,
    },
    /// The step did nothing; units are untouched
    Skipped {
        /// Why the step was skipped
        reason: SmartStyleError,
    },
}

impl StepOutcome {
    /// Whether the step actually ran.
    pub fn is_applied(&self) -> bool {
        matches!(self, StepOutcome::Applied { .. })
    }

    /// Number of rewrites performed (0 when skipped).
    pub fn replacements(&self) -> usize {
        match self {
            StepOutcome::Applied { replacements, .. } => *replacements,
            StepOutcome::Skipped { .. } => 0,
        }
    }
}

/// A compilation step.
pub trait Step: Send + Sync {
    /// Registry name for identification and logging.
    fn name(&self) -> &str;

    /// Metadata exposed to the host.
    fn describe(&self) -> StepDescription;

    /// Process the units this step applies to.
    ///
    /// `units` only holds units whose kind the step declares, in input
    /// order.
    fn process(&self, units: &mut [&mut Scene], options: &OptionValues) -> StepOutcome;
}

/// Option values for each step, keyed by step name.
#[derive(Debug, Clone, Default)]
pub struct StepContext {
    options: HashMap<String, OptionValues>,
}

impl StepContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`StepContext::set_options`].
    pub fn with_options(mut self, step: impl Into<String>, values: OptionValues) -> Self {
        self.set_options(step, values);
        self
    }

    /// Set the option values for a step.
    pub fn set_options(&mut self, step: impl Into<String>, values: OptionValues) {
        self.options.insert(step.into(), values);
    }

    /// Option values for a step, if any were set.
    pub fn options_for(&self, step: &str) -> Option<&OptionValues> {
        self.options.get(step)
    }
}

/// Outcome of one step within a pipeline run.
#[derive(Debug)]
pub struct StepReport {
    /// Step name
    pub step: String,
    /// What the step did
    pub outcome: StepOutcome,
}

/// Ordered list of steps run over a manuscript.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with the built-in steps.
    pub fn with_builtins() -> Self {
        let mut pipeline = Self::new();
        for step in builtin::builtin_steps() {
            pipeline.register(step);
        }
        pipeline
    }

    /// Append a step. Steps run in registration order.
    pub fn register(&mut self, step: Box<dyn Step>) {
        self.steps.push(step);
    }

    /// Get the number of registered steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step over `scenes`.
    ///
    /// Yields to the scheduler between steps. Returns the scenes in input
    /// order together with one report per step.
    pub async fn run(
        &self,
        mut scenes: Vec<Scene>,
        ctx: &StepContext,
    ) -> (Vec<Scene>, Vec<StepReport>) {
        let no_options = OptionValues::new();
        let mut reports = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let description = step.describe();
            let mut units: Vec<&mut Scene> = scenes
                .iter_mut()
                .filter(|s| description.applies_to(s.kind))
                .collect();

            let options = ctx.options_for(step.name()).unwrap_or(&no_options);
            let outcome = step.process(&mut units, options);
            debug!("Step {}: {:?}", step.name(), outcome);

            reports.push(StepReport {
                step: step.name().to_string(),
                outcome,
            });
            tokio::task::yield_now().await;
        }

        (scenes, reports)
    }
}
