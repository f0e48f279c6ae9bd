//! Pelican panel API CLI binary.
//!
//! A command-line interface for inspecting what the panel reports and what
//! the provider would write into state.

use clap::Parser;
use pelicanapi::cli::{Cli, Command, Entity};
use pelicanapi::output::PrettyPrint;
use pelicanapi::{
    Get, List, Page, PelicanClient, ProviderConfig, StateStore, User, DEFAULT_PAGE_SIZE,
};
use std::process::ExitCode;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match ProviderConfig::resolve(cli.server.as_deref(), cli.token.as_deref())
        .and_then(|config| PelicanClient::from_config(&config))
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set PELICAN_SERVER and PELICAN_TOKEN, or pass --server and --token");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &PelicanClient, cli: Cli) -> pelicanapi::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, id, cli.json).await,
        Command::List {
            entity,
            page,
            per_page,
            all,
        } => handle_list(client, entity, page, per_page, all, cli.json).await,
        Command::State { entity } => handle_state(client, entity).await,
    }
}

async fn handle_get(
    client: &PelicanClient,
    entity: Entity,
    id: u64,
    json: bool,
) -> pelicanapi::Result<()> {
    match entity {
        Entity::User => {
            let user = User::get(client, id).await?;
            output_single(&user, json)?;
        }
    }
    Ok(())
}

async fn handle_list(
    client: &PelicanClient,
    entity: Entity,
    page: Option<u32>,
    per_page: Option<u32>,
    all: bool,
    json: bool,
) -> pelicanapi::Result<()> {
    let page = page.unwrap_or(1);
    let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE);

    match entity {
        Entity::User if all => {
            let users = User::list_all(client, &Default::default()).await?;
            if json {
                println!("{}", to_json(&users)?);
            } else {
                let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
                println!("{}", Table::new(rows));
                println!("\n{} users", users.len());
            }
        }
        Entity::User => {
            let users = User::list_page(client, &Default::default(), page, per_page).await?;
            output_page(&users, json, |u| UserRow::from(u))?;
        }
    }
    Ok(())
}

async fn handle_state(client: &PelicanClient, entity: Entity) -> pelicanapi::Result<()> {
    match entity {
        Entity::User => {
            let store = StateStore::new();
            store.refresh::<User>(client, &Default::default()).await?;
            let document = store.snapshot().await.to_document("users");
            println!("{}", to_json(&document)?);
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> pelicanapi::Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| pelicanapi::PelicanError::Mapping(e.to_string()))
}

fn output_single<T>(item: &T, json: bool) -> pelicanapi::Result<()>
where
    T: serde::Serialize + PrettyPrint,
{
    if json {
        println!("{}", to_json(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> pelicanapi::Result<()>
where
    T: serde::Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", to_json(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!(
            "\nPage {}/{} ({} total items)",
            page.page(),
            page.total_pages(),
            page.pagination.total
        );
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct UserRow {
    id: u64,
    username: String,
    email: String,
    admin: bool,
    #[tabled(rename = "2fa")]
    two_fa: bool,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
            admin: u.root_admin,
            two_fa: u.two_fa,
        }
    }
}
