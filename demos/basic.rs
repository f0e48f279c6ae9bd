//! Basic example demonstrating the Pelican panel client.
//!
//! Run with:
//! ```
//! PELICAN_SERVER=https://panel.example.com PELICAN_TOKEN=papp_... cargo run --example basic
//! ```

use pelicanapi::{Get, List, PelicanClient, StateStore, User, UserListQuery};

#[tokio::main]
async fn main() -> pelicanapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Creating Pelican client...");
    let client = PelicanClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List first page of users
    println!("\n--- Listing Users (first page) ---");
    let page = User::list_page(&client, &UserListQuery::default(), 1, 10).await?;
    println!(
        "Page {} of {}: {} users",
        page.page(),
        page.total_pages(),
        page.len()
    );

    for user in page.iter() {
        println!("  #{} {} <{}>", user.id, user.username, user.email);
    }

    // Get the first user in detail
    if let Some(first) = page.items.first() {
        println!("\n--- Getting User #{} ---", first.id);
        let user = User::get(&client, first.id).await?;
        println!("Name: {}", user.display_name());
        println!("Admin: {}", user.root_admin);
        println!("2FA: {}", user.two_fa);
    }

    // Replace declarative state with every user on the panel
    println!("\n--- Refreshing State ---");
    let store = StateStore::new();
    let count = store
        .refresh::<User>(&client, &UserListQuery::default())
        .await?;
    println!("Committed {count} users");

    let document = store.snapshot().await.to_document("users");
    println!(
        "{}",
        serde_json::to_string_pretty(&document).unwrap_or_default()
    );

    Ok(())
}
