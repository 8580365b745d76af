//! Basic example demonstrating the Coach API client.
//!
//! Run with:
//! ```
//! COACH_API_URL=https://api.example.com COACH_EMAIL=me@example.com COACH_PASSWORD=secret \
//!     cargo run --example basic
//! ```

use coachapi::{
    ClientListParams, CoachApi, ErrorKind, ListParams, LoginRequest, ProgramListParams,
};

#[tokio::main]
async fn main() -> coachapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create the API from environment variables
    let api = CoachApi::from_env()?;
    println!("Connected to: {}", api.http().base_url());

    // Log in and use the returned token for everything that follows
    let email = std::env::var("COACH_EMAIL").unwrap_or_default();
    let password = std::env::var("COACH_PASSWORD").unwrap_or_default();
    let session = api.auth().login(&LoginRequest::new(email, password)).await?;
    if let Some(token) = session["token"].as_str() {
        api.set_api_key(token);
    }

    // Who am I?
    let profile = api.users().profile().await?;
    println!("Logged in as: {}", profile["email"]);

    // First page of active clients
    println!("\n--- Active Clients ---");
    let clients = api
        .clients()
        .list(&ClientListParams {
            list: ListParams::for_page(1, 10),
            status: Some("active".to_string()),
            ..Default::default()
        })
        .await?;
    for client in clients["data"].as_array().into_iter().flatten() {
        println!("  - {} ({})", client["name"], client["id"]);
    }

    // Program templates
    println!("\n--- Program Templates ---");
    let templates = api.programs().templates(&ProgramListParams::default()).await?;
    for program in templates["data"].as_array().into_iter().flatten() {
        println!("  - {}", program["name"]);
    }

    // Errors carry a kind to branch on
    match api.clients().get("does-not-exist").await {
        Ok(client) => println!("\nUnexpectedly found: {client}"),
        Err(e) if e.kind() == ErrorKind::NotFound => println!("\nNo such client: {}", e.message()),
        Err(e) => return Err(e),
    }

    api.auth().logout().await?;
    println!("\nDone!");
    Ok(())
}
