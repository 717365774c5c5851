//! Sequential driver running every check against one gateway.

use chrono::Utc;

use super::checks::{
    CreationOutcome, create_fan_check, create_outfit_check, envelope_sweep_check, health_check,
    list_outfits_check, list_questions_check, list_wallpapers_check, status_check,
    submit_question_check, top_fans_check, unknown_route_check, validation_check, vote_check,
    wallpaper_categories_check, welcome_check,
};
use super::gateway::ApiGateway;
use super::models::{CheckResult, CreatedResource, RunSummary};

/// Runs the conformance checks in a fixed order and collects their results.
///
/// Liveness checks run first, then feature checks, then system-level checks,
/// so infrastructure failures show up before feature failures. The result log
/// and the created-resource tracker are append-only and owned by the suite.
pub struct ConformanceSuite<'gateway, G>
where
    G: ApiGateway + ?Sized,
{
    gateway: &'gateway G,
    run_stamp: i64,
    results: Vec<CheckResult>,
    created: Vec<CreatedResource>,
}

impl<'gateway, G> ConformanceSuite<'gateway, G>
where
    G: ApiGateway + ?Sized,
{
    /// Creates a suite stamped with the current epoch time.
    #[must_use]
    pub fn new(gateway: &'gateway G) -> Self {
        Self {
            gateway,
            run_stamp: Utc::now().timestamp(),
            results: Vec::new(),
            created: Vec::new(),
        }
    }

    /// Overrides the epoch stamp used to uniquify created fan profiles.
    #[must_use]
    pub fn with_run_stamp(mut self, run_stamp: i64) -> Self {
        self.run_stamp = run_stamp;
        self
    }

    /// Runs every check, calling `on_result` as each result is recorded.
    pub fn run_all<F>(mut self, mut on_result: F) -> RunSummary
    where
        F: FnMut(&CheckResult),
    {
        let gateway = self.gateway;

        // Core liveness.
        self.record(health_check(gateway), &mut on_result);
        self.record(welcome_check(gateway), &mut on_result);
        self.record(status_check(gateway), &mut on_result);

        // Features.
        self.record(list_outfits_check(gateway), &mut on_result);
        let outfit_id = self.record_creation(create_outfit_check(gateway), &mut on_result);
        self.record(vote_check(gateway, outfit_id.as_deref()), &mut on_result);

        self.record(list_questions_check(gateway), &mut on_result);
        self.record_creation(submit_question_check(gateway), &mut on_result);

        self.record(list_wallpapers_check(gateway), &mut on_result);
        self.record(wallpaper_categories_check(gateway), &mut on_result);

        self.record(top_fans_check(gateway), &mut on_result);
        let run_stamp = self.run_stamp;
        self.record_creation(create_fan_check(gateway, run_stamp), &mut on_result);

        // System level.
        self.record(unknown_route_check(gateway), &mut on_result);
        self.record(validation_check(gateway), &mut on_result);
        self.record(envelope_sweep_check(gateway), &mut on_result);

        RunSummary::from_results(self.results, self.created)
    }

    fn record<F>(&mut self, result: CheckResult, on_result: &mut F)
    where
        F: FnMut(&CheckResult),
    {
        if result.success() {
            tracing::info!(check = result.name(), "PASS: {}", result.message());
        } else {
            tracing::warn!(check = result.name(), "FAIL: {}", result.message());
        }
        on_result(&result);
        self.results.push(result);
    }

    /// Records a creation check and returns the created identifier, if any.
    fn record_creation<F>(&mut self, outcome: CreationOutcome, on_result: &mut F) -> Option<String>
    where
        F: FnMut(&CheckResult),
    {
        let CreationOutcome { result, resource } = outcome;
        self.record(result, on_result);
        resource.map(|created| {
            let id = created.id.clone();
            tracing::debug!(kind = %created.kind, id = %created.id, "tracking created resource");
            self.created.push(created);
            id
        })
    }
}
