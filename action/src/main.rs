//! Deploy Action - Entry Point
//!
//! Runs as a CI step on each commit: archives the build output and deploys it
//! through the control plane.

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing::{error, info, warn};

use deploy_action::app::run::{run, DeploymentReport};
use deploy_action::cli::{is_informational, Args};
use deploy_action::logs::init_logging;
use deploy_action::reporting::{set_failed, set_output};
use deploy_action::utils::version_info;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if is_informational(&e) => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            set_failed(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(args.log_options()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let version = version_info();
    info!(
        "deploy-action {} ({}, built {})",
        version.version, version.git_hash, version.build_time
    );

    let options = match args.into_options() {
        Ok(options) => options,
        Err(e) => {
            error!("{}", e);
            set_failed(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match run(&options).await {
        Ok(report) => {
            publish_outputs(&report).await;
            println!(
                "{}",
                format!(
                    "Deployed {} ({}) after {} status checks",
                    options.application_name, report.deployment_id, report.polls
                )
                .green()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Deployment failed: {}", e);
            set_failed(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn publish_outputs(report: &DeploymentReport) {
    let archive = report.archive.display().to_string();
    let outputs = [
        ("deployment-id", report.deployment_id.as_str()),
        ("application-id", report.application_id.as_str()),
        ("archive", archive.as_str()),
    ];
    for (name, value) in outputs {
        if let Err(e) = set_output(name, value).await {
            warn!("Unable to write step output {}: {}", name, e);
        }
    }
}
