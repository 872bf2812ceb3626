//! Command execution for the `stockroom` binary.

use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::Serialize;

use stockroom_inventory::Item;

use crate::cli::{Commands, ItemCommands};
use crate::{AppState, TracingNavigator};

pub async fn execute(command: Commands, state: &AppState) -> Result<ExitCode> {
    match command {
        Commands::Login { email, password } => {
            let response = state
                .session
                .login(&email, &password)
                .await
                .context("login failed")?;
            print_json(&response)?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let response = state
                .session
                .register(&name, &email, &password)
                .await
                .context("registration failed")?;
            print_json(&response)?;
            println!("Registered. Run `stockroom login` to start a session.");
        }
        Commands::Logout => {
            state.session.logout().context("logout failed")?;
            println!("Logged out.");
        }
        Commands::Whoami => match state.session.current_user() {
            Some(user) => print_json(&user)?,
            None => println!("anonymous"),
        },
        Commands::AdminCheck => {
            if !state.admin_guard(TracingNavigator).can_activate() {
                println!("denied");
                return Ok(ExitCode::FAILURE);
            }
            println!("allowed");
        }
        Commands::Items { command } => execute_items(command, state).await?,
    }

    Ok(ExitCode::SUCCESS)
}

async fn execute_items(command: ItemCommands, state: &AppState) -> Result<()> {
    match command {
        ItemCommands::List => {
            let items = state.items.list_items().await.context("listing items failed")?;
            print_json(&items)?;
        }
        ItemCommands::Create { json } => {
            let item = parse_item(&json)?;
            let created = state
                .items
                .create_item(&item)
                .await
                .context("creating item failed")?;
            print_json(&created)?;
        }
        ItemCommands::Update { json } => {
            let item = parse_item(&json)?;
            let updated = state
                .items
                .update_item(&item)
                .await
                .context("updating item failed")?;
            print_json(&updated)?;
        }
        ItemCommands::Delete { id } => {
            state
                .items
                .delete_item(&id)
                .await
                .context("deleting item failed")?;
            println!("Deleted {id}.");
        }
    }
    Ok(())
}

fn parse_item(json: &str) -> Result<Item> {
    serde_json::from_str(json).context("item must be a JSON object with an \"id\" field")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
