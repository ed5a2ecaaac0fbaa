//! Digital credential (badge) and registration list handlers.

use anyhow::Result;

use lanyard_core::guard::Route;

use crate::cli::App;
use crate::render;

pub async fn badge(app: &App, event_id: &str) -> Result<()> {
    app.require(Route::Badge(event_id.to_string()))?;

    let registration = app.api.user_registration(event_id).await?;
    let snapshot = app.session.snapshot();
    let Some(user) = snapshot.user else {
        anyhow::bail!("No stored profile; log in again.");
    };

    println!("{} — Digital Credential", registration.event.title);
    println!();
    println!("  Participant: {}", user.profile.name);
    println!("  Company:     {}", user.profile.company);
    println!("  Number:      {}", registration.registration_number);
    println!("  Type:        {}", registration.registration_type);
    if let Some(date) = &registration.event.date {
        println!("  Event date:  {date}");
    }
    if let Some(location) = &registration.event.location {
        println!("  Location:    {location}");
    }
    Ok(())
}

pub async fn registrations(app: &App) -> Result<()> {
    app.require(Route::Registrations)?;

    let registrations = app.api.list_user_registrations().await?;
    if registrations.is_empty() {
        println!("No registrations.");
        return Ok(());
    }

    let mut table = render::table(&["EVENT", "DATE", "NUMBER", "TYPE"]);
    for registration in &registrations {
        table.add_row(vec![
            registration.event.title.clone(),
            registration.event.date.clone().unwrap_or_default(),
            registration.registration_number.clone(),
            registration.registration_type.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}
