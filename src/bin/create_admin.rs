//! Administrative provisioning: create one staff account from the command
//! line. Usage: `create_admin <username> <email> <password>`.

use lifedrop_backend::{config::Config, routes::auth::model::User, utils::hash_password};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [username, email, password] = match args.as_slice() {
        [u, e, p] => [u.clone(), e.clone(), p.clone()],
        _ => {
            eprintln!("Usage: create_admin <username> <email> <password>");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&username, &email, &password).await {
        eprintln!("Error creating admin user: {}", e);
        std::process::exit(1);
    }

    println!("Admin user {} created successfully.", username);
}

async fn run(username: &str, email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await?;

    let password_hash = hash_password(password)?;
    User::create(&pool, username, email, &password_hash).await?;

    Ok(())
}
