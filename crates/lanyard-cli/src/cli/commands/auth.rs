//! Auth command handlers.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;

use lanyard_core::api::types::{RegisterPayload, UserProfile};
use lanyard_core::session::mask_token;
use lanyard_core::validate;

use crate::cli::App;

pub async fn login(app: &App, email: Option<&str>) -> Result<()> {
    if app.session.is_authenticated() {
        let snapshot = app.session.snapshot();
        let who = snapshot.user.map(|u| u.email).unwrap_or_default();
        println!("Already logged in as {who}. Run `lanyard logout` first to switch accounts.");
        return Ok(());
    }

    let email = match email {
        Some(e) => e.to_string(),
        None => prompt("Email: ")?,
    };
    let password = prompt("Password: ")?;

    validate::login_form(&email, &password)?;

    app.session.login(&app.api, &email, &password).await?;

    println!("✓ Logged in as {email}");
    println!("  Credentials saved to: {}", app.store.path().display());
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    let had_credential = app.session.logout().map_err(anyhow::Error::new)?;

    if had_credential {
        println!("✓ Logged out");
        println!(
            "  Credentials removed from: {}",
            app.store.path().display()
        );
    } else {
        println!("Not logged in (no credentials found).");
    }

    Ok(())
}

pub async fn register(
    app: &App,
    email: &str,
    name: &str,
    company: &str,
    position: &str,
    phone: &str,
    cpf: &str,
) -> Result<()> {
    let profile = UserProfile {
        name: name.to_string(),
        company: company.to_string(),
        position: position.to_string(),
        phone: phone.to_string(),
        cpf: cpf.to_string(),
    };

    let password = prompt("Password: ")?;
    validate::register_form(email, &password, &profile)?;

    let message = app
        .api
        .register(&RegisterPayload {
            email: email.to_string(),
            password,
            profile,
        })
        .await?;

    println!("✓ {message}");
    println!("  You can now run `lanyard login --email {email}`.");
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    let snapshot = app.session.snapshot();

    let (Some(user), Some(token)) = (snapshot.user, snapshot.token) else {
        println!("Not logged in.");
        return Ok(());
    };

    println!("Logged in as {}", user.email);
    println!("  Name:     {}", user.profile.name);
    println!("  Company:  {}", user.profile.company);
    println!("  Position: {}", user.profile.position);
    println!("  Phone:    {}", user.profile.phone);
    println!("  Role:     {}", user.role);
    println!("  Token:    {}", mask_token(&token));
    Ok(())
}

/// Reads one line from stdin, prompting only on a terminal so piped input
/// (tests, scripts) stays clean.
fn prompt(label: &str) -> Result<String> {
    if io::stdin().is_terminal() {
        print!("{label}");
        io::stdout().flush()?;
    }

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
