//! Interactive configuration wizard for `cylera init`.
//!
//! Walks the user through endpoint selection and credential entry,
//! verifies the credentials with a test login, then appends the three
//! `CYLERA_*` variables to `./.env`. Refuses to run when any of them is
//! already set, so an existing configuration is never silently
//! overwritten.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use cylera_core::config::{ENV_BASE_URL, ENV_PASSWORD, ENV_USERNAME};
use cylera_core::{Config, CyleraClient};

/// Available Cylera partner API endpoints.
const CYLERA_URLS: [&str; 3] = [
    "https://partner.us1.cylera.com/",
    "https://partner.uk1.cylera.com/",
    "https://partner.demo.cylera.com/",
];

pub async fn run() -> Result<()> {
    check_existing_config()?;

    println!("Cylera CLI Configuration");
    println!("{}", "=".repeat(40));
    println!();

    let base_url = prompt_base_url()?;
    println!();

    let username = prompt_line("Enter your Cylera username (email): ")?;
    if username.is_empty() {
        bail!("Username cannot be empty");
    }
    println!();

    let password = rpassword::prompt_password("Enter your Cylera password: ")?;
    if password.is_empty() {
        bail!("Password cannot be empty");
    }
    println!();

    test_auth(Config::new(&base_url, &username, &password)).await?;

    let env_path = save_env_config(&base_url, &username, &password)?;

    println!();
    println!("Configuration saved to {}", env_path.display());
    println!();
    println!("You can now use the Cylera CLI. Try:");
    println!("  cylera devices --page-size 5");
    Ok(())
}

/// Refuse to run while any Cylera variable is already set.
fn check_existing_config() -> Result<()> {
    let existing: Vec<&str> = [ENV_BASE_URL, ENV_USERNAME, ENV_PASSWORD]
        .into_iter()
        .filter(|name| std::env::var(name).is_ok_and(|v| !v.is_empty()))
        .collect();

    if !existing.is_empty() {
        bail!(
            "the following environment variables are already set: {}.\n\
             To reconfigure, unset them first or delete the .env file.",
            existing.join(", ")
        );
    }
    Ok(())
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_base_url() -> Result<String> {
    println!("Select your Cylera API endpoint:");
    for (i, url) in CYLERA_URLS.iter().enumerate() {
        println!("  {}. {}", i + 1, url);
    }
    println!();

    loop {
        let choice = prompt_line(&format!("Enter choice [1-{}]: ", CYLERA_URLS.len()))?;
        match choice.parse::<usize>() {
            Ok(n) if (1..=CYLERA_URLS.len()).contains(&n) => {
                return Ok(CYLERA_URLS[n - 1].to_string())
            }
            _ => println!("Please enter a number between 1 and {}", CYLERA_URLS.len()),
        }
    }
}

/// Verify the credentials with a live login and print the auth response
/// (minus the token itself).
async fn test_auth(config: Config) -> Result<()> {
    print!("Testing authentication... ");
    io::stdout().flush()?;

    let client = CyleraClient::new(config)?;
    match client.authenticate().await {
        Ok(response) => {
            println!("Success!");
            println!();
            println!("Authentication response:");
            if let Some(fields) = response.as_object() {
                for (key, value) in fields {
                    if key != "token" {
                        println!("  {key}: {value}");
                    }
                }
            }
            Ok(())
        }
        Err(err) => {
            println!("Failed!");
            Err(err).context("Please check your credentials and try again")
        }
    }
}

/// Append the configuration block to `./.env`, preserving any existing
/// content.
fn save_env_config(base_url: &str, username: &str, password: &str) -> Result<PathBuf> {
    let env_path = std::env::current_dir()?.join(".env");

    let mut contents = if env_path.exists() {
        std::fs::read_to_string(&env_path)
            .with_context(|| format!("failed to read {}", env_path.display()))?
    } else {
        String::new()
    };
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }

    contents.push_str(&format!(
        "\n# Cylera CLI Configuration\n\
         {ENV_BASE_URL}={base_url}\n\
         {ENV_USERNAME}={username}\n\
         {ENV_PASSWORD}={password}\n"
    ));

    std::fs::write(&env_path, contents)
        .with_context(|| format!("failed to write {}", env_path.display()))?;
    Ok(env_path)
}
