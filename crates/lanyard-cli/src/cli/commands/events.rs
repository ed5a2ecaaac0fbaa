//! Event view handlers. Each is a fetch-once screen: one gateway call,
//! render the result, surface failures as the exit status (re-running the
//! command is the retry affordance).

use anyhow::Result;

use lanyard_core::api::types::{Section, SponsorTier};
use lanyard_core::guard::Route;
use lanyard_core::maps::{MapRenderer, StaticMapLink};

use crate::cli::App;
use crate::render;

pub async fn list(app: &App) -> Result<()> {
    app.require(Route::Events)?;

    let events = app.api.list_events().await?;
    if events.is_empty() {
        println!("No events.");
        return Ok(());
    }

    let mut table = render::table(&["ID", "TITLE", "DATE", "LOCATION", "TYPE"]);
    for event in &events {
        table.add_row(vec![
            event.id.clone(),
            event.title.clone(),
            event.date.clone().unwrap_or_default(),
            event.location.clone().unwrap_or_default(),
            event.kind.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn show(app: &App, id: &str) -> Result<()> {
    app.require(Route::Event(id.to_string()))?;

    let event = app.api.get_event(id).await?;
    // Detail entries are decorative; their failure doesn't sink the screen.
    let details = app.api.event_details(id).await.unwrap_or_default();

    println!("{}", event.title);
    if let Some(date) = &event.date {
        println!("  Date:     {date}");
    }
    if let Some(location) = &event.location {
        println!("  Location: {location}");
    }
    if let Some(description) = &event.description {
        println!("\n{description}");
    }

    if !details.is_empty() {
        let mut table = render::table(&["ENTRY", "OPENS", "DESCRIPTION"]);
        for detail in &details {
            table.add_row(vec![
                detail.title.clone(),
                detail.route.map(|r| r.label().to_string()).unwrap_or_else(|| "-".to_string()),
                detail.description.clone().unwrap_or_default(),
            ]);
        }
        println!("\n{table}");
        println!("Open a section with `lanyard events <section> {id}`.");
    }
    Ok(())
}

pub async fn schedule(app: &App, id: &str, day: Option<u32>) -> Result<()> {
    app.require(Route::Section {
        event_id: id.to_string(),
        section: Section::Schedule,
    })?;

    let schedule = app.api.schedule(id).await?;
    let Some(selected) = day.or_else(|| schedule.default_day()) else {
        println!("No schedule published for this event.");
        return Ok(());
    };

    let Some(current) = schedule.days.iter().find(|d| d.day == selected) else {
        anyhow::bail!(
            "No day {selected} in this schedule (days: {})",
            schedule
                .days
                .iter()
                .map(|d| d.day.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    println!("Day {} — {}", current.day, current.date);
    let mut table = render::table(&["START", "END", "TITLE", "TYPE", "SPEAKER"]);
    for item in &current.items {
        table.add_row(vec![
            item.start_time.clone(),
            item.end_time.clone(),
            item.title.clone(),
            item.kind.label().to_string(),
            item.speaker.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");

    if schedule.days.len() > 1 {
        println!("Other days: use --day <N>.");
    }
    Ok(())
}

pub async fn speakers(app: &App, id: &str) -> Result<()> {
    app.require(Route::Section {
        event_id: id.to_string(),
        section: Section::Speakers,
    })?;

    let speakers = app.api.speakers(id).await?;
    if speakers.is_empty() {
        println!("No speakers announced yet.");
        return Ok(());
    }

    let mut table = render::table(&["NAME", "TITLE", "TYPE"]);
    for speaker in &speakers {
        table.add_row(vec![
            speaker.name.clone(),
            speaker.title.clone(),
            speaker.kind.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn sponsors(app: &App, id: &str) -> Result<()> {
    app.require(Route::Section {
        event_id: id.to_string(),
        section: Section::Sponsors,
    })?;

    let sponsors = app.api.sponsors(id).await?;
    if sponsors.is_empty() {
        println!("No sponsors announced yet.");
        return Ok(());
    }

    for tier in [
        SponsorTier::Master,
        SponsorTier::Gold,
        SponsorTier::Silver,
        SponsorTier::Support,
    ] {
        let names: Vec<&str> = sponsors
            .iter()
            .filter(|s| s.category == tier)
            .map(|s| s.name.as_str())
            .collect();
        if !names.is_empty() {
            println!("{}: {}", tier.label(), names.join(", "));
        }
    }
    Ok(())
}

pub async fn venue(app: &App, id: &str) -> Result<()> {
    app.require(Route::Section {
        event_id: id.to_string(),
        section: Section::Venue,
    })?;

    let venue = app.api.venue(id).await?;

    println!("{}", venue.name);
    println!("  {}", venue.short_address);
    println!(
        "  {} — {} ({})",
        venue.neighborhood, venue.city, venue.zip_code
    );
    if let Some(description) = &venue.description {
        println!("\n{description}");
    }
    if let Some(phone) = &venue.phone {
        println!("  Phone:   {phone}");
    }
    if let Some(website) = &venue.website {
        println!("  Website: {website}");
    }
    if let Some(rating) = &venue.rating {
        println!("  Rating:  {rating}");
    }
    if !venue.facilities.is_empty() {
        println!("  Facilities: {}", venue.facilities.join(", "));
    }

    let renderer = StaticMapLink::new(app.config.maps_api_key.clone());
    println!("\nMap: {}", renderer.render_map(&venue.coordinates, &venue.name));
    Ok(())
}

pub async fn info(app: &App, id: &str) -> Result<()> {
    app.require(Route::Section {
        event_id: id.to_string(),
        section: Section::GeneralInfo,
    })?;

    let info = app.api.general_info(id).await?;

    println!("{}", info.title);
    for section in &info.sections {
        println!("\n{}", section.content);
    }
    if let Some(highlight) = &info.highlight {
        println!("\n{} {}", highlight.icon, highlight.title);
        println!("  {}", highlight.description);
    }
    for feature in info.features.iter().flatten() {
        println!("\n{} {}", feature.icon, feature.title);
        println!("  {}", feature.description);
    }
    Ok(())
}

pub async fn photos(app: &App, id: &str) -> Result<()> {
    app.require(Route::Section {
        event_id: id.to_string(),
        section: Section::EventDetails,
    })?;

    let url = app.api.drive_link(id).await?;
    println!("{url}");
    Ok(())
}
