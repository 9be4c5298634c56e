//! Facility directory command handlers.

use owo_colors::OwoColorize;
use tabled::Tabled;

use nearcare_core::{RankedFacility, filter};
use nearcare_config::Config;

use crate::cli::{FacilitiesArgs, FacilitiesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FacilityRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

impl From<&RankedFacility> for FacilityRow {
    fn from(r: &RankedFacility) -> Self {
        Self {
            name: r.facility.name.clone(),
            kind: r.facility.kind.to_string(),
            address: r.facility.address.clone(),
            phone: r.facility.phone.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    config: &Config,
    args: FacilitiesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let directory = nearcare_config::directory(config)?;

    match args.command {
        FacilitiesCommand::List { search } => {
            let mut entries = directory.unranked();
            if let Some(term) = search {
                entries = filter::apply(&entries, &term);
            }
            let out = output::render_list(
                &global.output,
                &entries,
                |r| FacilityRow::from(r),
                |r| r.facility.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FacilitiesCommand::Show { name } => {
            let facility = directory
                .get(&name)
                .ok_or(CliError::FacilityNotFound { name })?;

            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                facility.as_ref(),
                |f| {
                    let heading = if color {
                        f.name.bold().cyan().to_string()
                    } else {
                        f.name.clone()
                    };
                    let mut lines = vec![
                        heading,
                        format!("  Kind      {}", f.kind),
                        format!("  Address   {}", f.address),
                    ];
                    if let Some(ref phone) = f.phone {
                        lines.push(format!("  Phone     {phone}"));
                    }
                    lines.push(format!("  Location  {}", f.location));
                    lines.join("\n")
                },
                |f| f.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
