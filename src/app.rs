/*
 * Responsibility
 * - init_tracing → Config → AppState wiring, token acquisition on startup
 * - Drive the screens for each command and render the outcome
 */
use anyhow::{Result, bail};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{BirdsCommand, Cli, Command, HabitatsCommand, RegionsCommand};
use crate::config::Config;
use crate::state::AppState;
use crate::ui::delete::DeleteControl;
use crate::ui::form::{BirdFormScreen, HabitatFormScreen, HabitatSubmit};
use crate::ui::list::{BirdListScreen, HabitatListScreen};
use crate::ui::nav::{Nav, Route};
use crate::ui::render;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise keep the console quiet.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let state = AppState::build(&config)?;
    let mut nav = Nav::new();

    // Acquire a token up front (nothing is held at process start). On
    // failure the console lands signed out on the root route; list screens
    // then render their no-data warning instead of fetching.
    if let Err(e) = state.session.ensure_token().await {
        tracing::error!(error = %e, "token acquisition failed");
        nav.replace(Route::Home);
    }

    dispatch(cli.command, &state, &mut nav).await?;
    println!("→ {}", nav.current());
    Ok(())
}

/// Advisory gate for mutating commands. Hides the affordance from viewers
/// the way the web UI hides its buttons; the backend re-authorizes every
/// request regardless.
fn require_owner(state: &AppState) -> Result<()> {
    if state.session.current().owner {
        Ok(())
    } else {
        bail!("this action requires the owner role");
    }
}

async fn dispatch(command: Command, state: &AppState, nav: &mut Nav) -> Result<()> {
    match command {
        Command::Whoami => {
            let session = state.session.current();
            print!("{}", render::session_summary(&session));
            Ok(())
        }
        Command::Birds { command } => birds(command, state, nav).await,
        Command::Habitats { command } => habitats(command, state, nav).await,
        Command::Regions { command } => regions(command, state, nav).await,
    }
}

async fn birds(command: BirdsCommand, state: &AppState, nav: &mut Nav) -> Result<()> {
    match command {
        BirdsCommand::List { page } => {
            nav.push(Route::Birds { page: page.max(1) });
            let mut screen = BirdListScreen::new(state.birds.clone(), state.session_handle());
            screen.set_page(page).await;

            if let Some(error) = screen.error.take() {
                bail!("{error}");
            }
            match &screen.data {
                Some(data) => {
                    print!("{}", render::birds_table(data));
                    print!("{}", render::pagination(screen.page, screen.page_count()));
                }
                None => println!("No bird data"),
            }
            Ok(())
        }

        BirdsCommand::Show { id } => {
            let bird = state.birds.get(id).await?;
            print!("{}", render::bird_detail(&bird));
            Ok(())
        }

        BirdsCommand::Add {
            common_name,
            species,
            image_link,
            habitats,
            new_habitat,
            new_habitat_region,
        } => {
            require_owner(state)?;
            nav.push(Route::BirdForm { bird: None });

            let mut form =
                BirdFormScreen::new(state.birds.clone(), state.habitats.clone(), None);
            form.draft.common_name = common_name;
            form.draft.species = species;
            form.draft.image_link = image_link;
            form.draft.habitats = habitats;

            if let Some(name) = new_habitat {
                let mut embedded =
                    HabitatFormScreen::new_embedded(state.habitats.clone(), state.regions.clone());
                embedded.load().await;
                embedded.draft.name = name;
                if let Some(region) = new_habitat_region {
                    embedded.select_region(region);
                }
                match embedded.submit(nav).await {
                    Some(HabitatSubmit::Created(habitat)) => form.attach_habitat(&habitat),
                    _ => bail!(
                        "{}",
                        embedded
                            .error
                            .unwrap_or_else(|| "inline habitat creation failed".to_string())
                    ),
                }
            }

            submit_bird_form(form, state, nav).await
        }

        BirdsCommand::Edit {
            id,
            common_name,
            species,
            image_link,
            habitats,
        } => {
            require_owner(state)?;
            nav.push(Route::BirdForm { bird: Some(id) });

            let mut form =
                BirdFormScreen::new(state.birds.clone(), state.habitats.clone(), Some(id));
            form.load().await;
            if let Some(error) = form.error.take() {
                bail!("{error}");
            }

            if let Some(value) = common_name {
                form.draft.common_name = value;
            }
            if let Some(value) = species {
                form.draft.species = value;
            }
            if let Some(value) = image_link {
                form.draft.image_link = value;
            }
            if !habitats.is_empty() {
                form.draft.habitats = habitats;
            }

            submit_bird_form(form, state, nav).await
        }

        BirdsCommand::Delete { id } => {
            require_owner(state)?;
            let mut control = DeleteControl::new();
            if !control.delete_bird(&state.birds, id, nav).await {
                bail!(
                    "{}",
                    control
                        .error
                        .unwrap_or_else(|| "delete failed".to_string())
                );
            }

            // Landed on the bird list; show it fresh.
            let mut screen = BirdListScreen::new(state.birds.clone(), state.session_handle());
            screen.load().await;
            if let Some(data) = &screen.data {
                print!("{}", render::birds_table(data));
            }
            Ok(())
        }
    }
}

/// Shared create/edit tail: submit, then re-query the canonical record the
/// shallow navigation points at.
async fn submit_bird_form(mut form: BirdFormScreen, state: &AppState, nav: &mut Nav) -> Result<()> {
    if !form.submit(nav).await {
        bail!(
            "{}",
            form.error
                .unwrap_or_else(|| "submission failed".to_string())
        );
    }
    let Some(id) = form.bird_id else {
        bail!("submission reported no bird id");
    };

    let bird = state.birds.get(id).await?;
    print!("{}", render::bird_detail(&bird));
    Ok(())
}

async fn habitats(command: HabitatsCommand, state: &AppState, nav: &mut Nav) -> Result<()> {
    match command {
        HabitatsCommand::List { page } => {
            nav.push(Route::Habitats { page: page.max(1) });
            let mut screen = HabitatListScreen::new(state.habitats.clone(), state.session_handle());
            screen.set_page(page).await;

            if let Some(error) = screen.error.take() {
                bail!("{error}");
            }
            match &screen.data {
                Some(data) => {
                    print!("{}", render::habitats_table(data));
                    print!("{}", render::pagination(screen.page, screen.page_count()));
                }
                None => println!("No habitat data"),
            }
            Ok(())
        }

        HabitatsCommand::Show { id } => {
            let habitat = state.habitats.get(id).await?;
            print!("{}", render::habitat_detail(&habitat));
            Ok(())
        }

        HabitatsCommand::Search { query } => {
            let options = state.habitats.search(&query).await?;
            print!("{}", render::options_list(&options));
            Ok(())
        }

        HabitatsCommand::Add { name, region } => {
            require_owner(state)?;
            nav.push(Route::HabitatForm { habitat: None });

            let mut form =
                HabitatFormScreen::new(state.habitats.clone(), state.regions.clone(), None);
            form.load().await;
            if let Some(error) = form.error.take() {
                bail!("{error}");
            }
            form.draft.name = name;
            form.select_region(region);

            match form.submit(nav).await {
                Some(HabitatSubmit::Created(habitat)) => {
                    print!("{}", render::habitat_detail(&habitat));
                    Ok(())
                }
                _ => bail!(
                    "{}",
                    form.error
                        .unwrap_or_else(|| "submission failed".to_string())
                ),
            }
        }

        HabitatsCommand::Edit { id, name, region } => {
            require_owner(state)?;
            nav.push(Route::HabitatForm { habitat: Some(id) });

            let mut form =
                HabitatFormScreen::new(state.habitats.clone(), state.regions.clone(), Some(id));
            form.load().await;
            if let Some(error) = form.error.take() {
                bail!("{error}");
            }
            if let Some(value) = name {
                form.draft.name = value;
            }
            if let Some(value) = region {
                form.select_region(value);
            }

            match form.submit(nav).await {
                Some(_) => {
                    let habitat = state.habitats.get(id).await?;
                    print!("{}", render::habitat_detail(&habitat));
                    Ok(())
                }
                None => bail!(
                    "{}",
                    form.error
                        .unwrap_or_else(|| "submission failed".to_string())
                ),
            }
        }

        HabitatsCommand::Delete { id } => {
            require_owner(state)?;
            let mut control = DeleteControl::new();
            if !control.delete_habitat(&state.habitats, id, nav).await {
                bail!(
                    "{}",
                    control
                        .error
                        .unwrap_or_else(|| "delete failed".to_string())
                );
            }

            let mut screen = HabitatListScreen::new(state.habitats.clone(), state.session_handle());
            screen.load().await;
            if let Some(data) = &screen.data {
                print!("{}", render::habitats_table(data));
            }
            Ok(())
        }
    }
}

async fn regions(command: RegionsCommand, state: &AppState, nav: &mut Nav) -> Result<()> {
    match command {
        RegionsCommand::List => {
            nav.push(Route::Regions);
            let regions = state.regions.list().await?;
            print!("{}", render::regions_table(&regions));
            Ok(())
        }
    }
}
