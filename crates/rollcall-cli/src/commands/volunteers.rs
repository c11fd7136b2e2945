use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::parse_volunteer_id;
use anyhow::Result;
use clap::{ArgAction, ArgGroup, Args};
use rollcall_core::dto::VolunteerListItemDto;
use rollcall_core::rules::{filter_volunteers, prepare_volunteer, VolunteerForm};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, value_name = "CEP")]
    pub postal_code: String,
    /// Skip the postal-code lookup and store this address instead
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show volunteers whose name, email or address contains this text
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["id", "position"])))]
pub struct RemoveArgs {
    pub id: Option<String>,
    /// Position as shown by the latest `list`
    #[arg(long)]
    pub position: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    #[arg(long, action = ArgAction::SetTrue)]
    pub yes: bool,
}

#[derive(Debug, Serialize)]
struct ClearReport {
    removed: usize,
}

pub fn add_volunteer(ctx: &Context<'_>, args: AddArgs) -> Result<()> {
    let form = VolunteerForm {
        name: args.name,
        email: args.email,
        postal_code: args.postal_code,
        address: args.address,
    };

    let existing = ctx.store.volunteers().load_all()?;
    let lookup = ctx.lookup_client()?;
    let new = prepare_volunteer(&form, &existing, &lookup)?;
    let volunteer = ctx.store.volunteers().append(new)?;
    debug!(id = %volunteer.id, "volunteer registered");

    if ctx.json {
        print_json(&volunteer)?;
    } else {
        println!(
            "created {} {} <{}> {}",
            volunteer.id, volunteer.name, volunteer.email, volunteer.address
        );
    }
    Ok(())
}

pub fn list_volunteers(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let records = ctx.store.volunteers().load_all()?;
    let query = args.filter.unwrap_or_default();
    let items: Vec<VolunteerListItemDto> = filter_volunteers(&records, &query)
        .into_iter()
        .map(|(position, volunteer)| VolunteerListItemDto {
            position,
            id: volunteer.id,
            name: volunteer.name.clone(),
            email: volunteer.email.clone(),
            address: volunteer.address.clone(),
        })
        .collect();

    if ctx.json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("no volunteers");
        return Ok(());
    }
    for item in items {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            item.position, item.id, item.name, item.email, item.address
        );
    }
    Ok(())
}

pub fn remove_volunteer(ctx: &Context<'_>, args: RemoveArgs) -> Result<()> {
    let removed = match (args.id, args.position) {
        (Some(raw), _) => {
            let id = parse_volunteer_id(&raw)?;
            ctx.store
                .volunteers()
                .remove_by_id(id)?
                .ok_or_else(|| not_found("volunteer not found"))?
        }
        (None, Some(position)) => ctx
            .store
            .volunteers()
            .remove_at(position)?
            .ok_or_else(|| not_found(format!("no volunteer at position {}", position)))?,
        (None, None) => return Err(invalid_input("provide a volunteer id or --position")),
    };

    if ctx.json {
        print_json(&removed)?;
    } else {
        println!("removed {} {}", removed.id, removed.name);
    }
    Ok(())
}

pub fn clear_volunteers(ctx: &Context<'_>, args: ClearArgs) -> Result<()> {
    if !args.yes {
        return Err(invalid_input(
            "clearing removes every volunteer and cannot be undone; pass --yes to confirm",
        ));
    }

    let removed = ctx.store.volunteers().count()?;
    ctx.store.volunteers().clear_all()?;

    if ctx.json {
        return print_json(&ClearReport { removed });
    }
    println!("cleared {} volunteers", removed);
    Ok(())
}
