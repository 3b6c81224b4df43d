use std::time::Duration;

use tabled::Table;

use crate::{
    Res, config, info,
    management::{SyncFlow, SyncOptions, SyncReport},
    success,
    types::TrackTableRow,
};

#[derive(Debug, Clone)]
pub struct SyncArgs {
    pub limit: u32,
    pub port: u16,
    pub timeout: Option<Duration>,
    pub dry_run: bool,
}

impl Default for SyncArgs {
    fn default() -> Self {
        SyncArgs {
            limit: config::DEFAULT_TOP_TRACKS,
            port: config::DEFAULT_PORT,
            timeout: None,
            dry_run: false,
        }
    }
}

/// Runs the whole sync: prints the authorization URL, waits for the
/// redirect, reconciles the playlist and prints what changed.
///
/// Credentials are checked before anything touches the network.
pub async fn sync(args: SyncArgs) -> Res<SyncReport> {
    let credentials = config::credentials()?;
    let endpoints = config::endpoints();

    let flow = SyncFlow::prepare(endpoints, credentials, args.port, args.timeout).await?;
    info!("Authenticate here: {}", flow.authorize_url()?);
    info!("Waiting for the authorization callback...");

    let options = SyncOptions {
        limit: args.limit,
        dry_run: args.dry_run,
        ..SyncOptions::default()
    };
    let report = flow.run(&options).await?;
    print_report(&report);

    Ok(report)
}

fn print_report(report: &SyncReport) {
    if report.created {
        success!("Created playlist {}", report.playlist.name);
    }

    if !report.has_changes() {
        success!("No changes to playlist.");
    } else {
        let rows: Vec<TrackTableRow> = report
            .added
            .iter()
            .map(|t| TrackTableRow::new("+", t))
            .chain(report.removed.iter().map(|t| TrackTableRow::new("-", t)))
            .collect();

        let table = Table::new(rows);
        println!("{}", table);
    }

    match &report.description {
        Some(description) => success!("{} synced. {}", report.playlist.name, description),
        None => info!("Dry run, {} was not modified.", report.playlist.name),
    }
}
