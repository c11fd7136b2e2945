use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use clap::Args;
use rollcall_core::domain::PostalCode;
use rollcall_core::dto::AddressLookupDto;
use rollcall_core::rules::resolve_address;

#[derive(Debug, Args)]
pub struct LookupArgs {
    #[arg(value_name = "CEP")]
    pub postal_code: String,
}

pub fn lookup_address(ctx: &Context<'_>, args: LookupArgs) -> Result<()> {
    let postal_code = PostalCode::parse(&args.postal_code)
        .map_err(|_| invalid_input("postal code must have 8 digits"))?;
    let lookup = ctx.lookup_client()?;
    let address = resolve_address(&lookup, &postal_code)?;

    if ctx.json {
        return print_json(&AddressLookupDto {
            postal_code: postal_code.to_string(),
            address,
        });
    }
    println!("{}\t{}", postal_code, address);
    Ok(())
}
