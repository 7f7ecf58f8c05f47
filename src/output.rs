//! Colored terminal reporting for batch runs.

use crate::batch::{BatchEvent, BatchSummary, RepoReport, RepoStatus};
use crate::manifest::NotApplicableReason;
use crate::resolver::UpdateParams;
use colored::Colorize;

/// Render one progress event to the terminal.
pub fn print_event(event: &BatchEvent<'_>, params: &UpdateParams) {
    match event {
        BatchEvent::RepositoriesFetched { count } => {
            println!("Found {} repositories", count);
        }
        BatchEvent::Cloning { repo } => {
            println!("Cloning {} into temp directory...", repo.slug);
        }
        BatchEvent::Pushing { repo, branch } => {
            println!("Committing and pushing changes to {} in {}...", branch, repo.slug);
        }
        BatchEvent::RepoFinished { report } => print_report(report, params),
        BatchEvent::CleaningUp => {
            println!("Cleaning up temporary files...");
        }
    }
}

fn print_report(report: &RepoReport, params: &UpdateParams) {
    match &report.status {
        RepoStatus::Updated { branch } => {
            println!(
                "{} Pushed changes to {} in {}",
                "✓".green(),
                branch,
                report.slug
            );
        }
        RepoStatus::BranchAbsent => {
            println!(
                "Branch '{}' doesn't exist in {}",
                params.branch, report.full_name
            );
        }
        RepoStatus::NotApplicable(reason) => match reason {
            NotApplicableReason::ManifestMissing => {
                println!(
                    "{}: not a Node.js project (no {} found)",
                    report.slug,
                    crate::manifest::MANIFEST_FILE
                );
            }
            NotApplicableReason::DependencyMissing => {
                println!("{}: {} not found in dependencies", report.slug, params.library);
            }
            NotApplicableReason::AlreadyCurrent => {
                println!(
                    "{}: {} already at {}",
                    report.slug, params.library, params.version
                );
            }
        },
        RepoStatus::Failed(message) => {
            eprintln!("{} {} failed: {}", "✗".red(), report.full_name, message);
        }
    }
}

/// Render the end-of-run tally.
pub fn print_summary(summary: &BatchSummary) {
    println!();
    println!(
        "{} updated, {} without branch, {} not applicable, {} failed ({} total)",
        summary.updated.to_string().green(),
        summary.branch_absent,
        summary.not_applicable,
        summary.failed.to_string().red(),
        summary.total
    );
}
