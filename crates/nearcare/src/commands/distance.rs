//! Point-to-point distance command.

use serde::Serialize;

use nearcare_core::{Coordinate, geo};

use crate::cli::{DistanceArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct DistanceReport {
    from: Coordinate,
    to: Coordinate,
    distance_km: f64,
}

pub fn handle(args: &DistanceArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let from: Coordinate = args.from.parse()?;
    let to: Coordinate = args.to.parse()?;

    let report = DistanceReport {
        from,
        to,
        distance_km: geo::distance_km(from, to),
    };

    let out = output::render_single(
        &global.output,
        &report,
        |r| format!("{} ({} to {})", util::fmt_km(r.distance_km), r.from, r.to),
        |r| format!("{:.3}", r.distance_km),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
