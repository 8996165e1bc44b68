//! `apply` - converge every resource declared in a manifest

use anyhow::{Context as AnyhowContext, Result, bail};
use colored::Colorize;
use sentrykit::{OperationResult, Reconcile, ResourceClient};
use serde::Serialize;

use crate::Context;
use crate::cli::ApplyArgs;
use crate::config::Settings;
use crate::manifest::Manifest;
use crate::ui;

/// Outcome of one declared resource
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub resource: String,
    #[serde(flatten)]
    pub result: OperationResult,
}

/// Counts of outcomes across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub changed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl Summary {
    pub fn add(&mut self, result: &OperationResult) {
        if result.failed {
            self.failed += 1;
        } else if result.changed {
            self.changed += 1;
        } else {
            self.unchanged += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.changed + self.unchanged + self.failed
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

pub fn run(ctx: &Context, args: ApplyArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    if manifest.is_empty() {
        ui::warn("Manifest declares no resources");
        return Ok(());
    }

    let resources = manifest.resources();
    let reports = if args.check {
        check(&resources)
    } else {
        let settings = Settings::load(args.connection.config.as_deref())?.merge(&args.connection);
        let client = ResourceClient::new(settings.client_config()?);
        log::debug!("using {:?}", client.config());

        let mut reports = Vec::with_capacity(resources.len());
        let outcome = reconcile_all(&client, &resources, &mut reports);
        if let Err(err) = outcome {
            // Show what was already applied before the fatal error.
            print_reports(ctx, &reports, args.json)?;
            return Err(err);
        }
        reports
    };

    print_reports(ctx, &reports, args.json)?;

    let summary = summarize(&reports);
    if !summary.is_success() {
        bail!("{} of {} resources failed", summary.failed, summary.total());
    }
    Ok(())
}

/// Reconcile resources in order, stopping at the first error
pub fn reconcile_all(
    client: &ResourceClient,
    resources: &[&dyn Reconcile],
    reports: &mut Vec<Report>,
) -> Result<()> {
    for resource in resources {
        let description = resource.description();
        log::info!("reconciling {description}");

        let result = resource.reconcile(client).map_err(|err| {
            let advice = err.category().advice();
            anyhow::Error::new(err).context(format!("Failed to reconcile {description} ({advice})"))
        })?;

        reports.push(Report {
            resource: description,
            result,
        });
    }
    Ok(())
}

/// Check mode: report every resource as a no-op without contacting the API
pub fn check(resources: &[&dyn Reconcile]) -> Vec<Report> {
    resources
        .iter()
        .map(|resource| Report {
            resource: resource.description(),
            result: OperationResult::check_mode(),
        })
        .collect()
}

pub fn summarize(reports: &[Report]) -> Summary {
    let mut summary = Summary::default();
    for report in reports {
        summary.add(&report.result);
    }
    summary
}

fn print_reports(ctx: &Context, reports: &[Report], json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(reports).context("Could not encode results")?;
        println!("{out}");
        return Ok(());
    }

    for report in reports {
        if ctx.quiet && !report.result.failed {
            continue;
        }
        println!("{}", ui::result_line(&report.resource, &report.result));
        if let Some(detail) = ui::failure_detail(&report.result) {
            ui::dim(&detail);
        }
        if ctx.verbose > 0 && !report.result.url.is_empty() {
            ui::dim(&report.result.url);
        }
    }

    if !ctx.quiet {
        let summary = summarize(reports);
        println!();
        println!(
            "{} changed, {} unchanged, {} failed",
            summary.changed.to_string().green(),
            summary.unchanged,
            if summary.failed > 0 {
                summary.failed.to_string().red()
            } else {
                summary.failed.to_string().normal()
            }
        );
    }
    Ok(())
}
