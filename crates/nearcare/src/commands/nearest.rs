//! Distance-ranked facility listing.

use std::time::Duration;

use tabled::Tabled;

use nearcare_core::{Coordinate, LocatorService, RankedFacility, filter, rank};
use nearcare_config::Config;

use crate::cli::{GlobalOpts, NearestArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct NearestRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "Address")]
    address: String,
}

fn to_row((index, r): (usize, &RankedFacility)) -> NearestRow {
    NearestRow {
        position: index + 1,
        name: r.facility.name.clone(),
        kind: r.facility.kind.to_string(),
        distance: r.distance_km.map(util::fmt_km).unwrap_or_default(),
        address: r.facility.address.clone(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    config: &Config,
    args: NearestArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.limit == 0 {
        return Err(CliError::Validation {
            field: "limit".into(),
            reason: "must be greater than zero".into(),
        });
    }

    let directory = nearcare_config::directory(config)?;

    let ranked = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => {
            let user = Coordinate::try_new(lat, lng)?;
            rank::rank(&directory, user)
        }
        _ if args.locate => {
            let mut settings = nearcare_config::locator_settings(config)?;
            if let Some(secs) = global.timeout {
                if secs == 0 {
                    return Err(CliError::Validation {
                        field: "timeout".into(),
                        reason: "must be greater than zero".into(),
                    });
                }
                settings.timeout = Duration::from_secs(secs);
            }

            let provider = settings.build_provider()?;
            let service = LocatorService::new(provider, directory.clone());

            let spinner = util::spinner("Resolving your location…", global.quiet);
            let result = service.locate().await;
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }

            let resolution = result?;
            if !global.quiet {
                let accuracy = resolution
                    .accuracy_km
                    .map(|a| format!(" (±{a:.0} km)"))
                    .unwrap_or_default();
                eprintln!(
                    "Position {} via {}{accuracy}",
                    resolution.user_location, resolution.source
                );
            }
            resolution.ranked
        }
        _ => {
            return Err(CliError::Validation {
                field: "position".into(),
                reason: "pass --lat/--lng, or --locate to use the configured provider".into(),
            });
        }
    };

    // Display-only narrowing: filter on top of the ranking, then cap.
    let mut displayed = match args.search {
        Some(ref term) => filter::apply(&ranked, term),
        None => ranked,
    };
    displayed.truncate(args.limit);

    // Row numbering: rows are built in display order.
    let row_index = std::cell::Cell::new(0usize);
    let out = output::render_list(
        &global.output,
        &displayed,
        |r| {
            let index = row_index.get();
            row_index.set(index + 1);
            to_row((index, r))
        },
        |r| r.facility.name.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
