//! Plain-text rendering for the terminal. Presentation only; nothing in
//! here talks to the network or mutates screen state.

use crate::api::dto::{Bird, BirdsPage, Habitat, HabitatsPage, Region, SelectOption};
use crate::session::Session;

pub fn birds_table(page: &BirdsPage) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:<28} {:<30} HABITATS\n",
        "ID", "COMMON NAME", "SPECIES"
    ));
    for bird in &page.birds {
        let habitats = bird
            .habitats
            .iter()
            .map(|h| h.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{:<6} {:<28} {:<30} {}\n",
            bird.id, bird.common_name, bird.species, habitats
        ));
    }
    out
}

pub fn bird_detail(bird: &Bird) -> String {
    let mut out = format!(
        "bird #{}\n  common name: {}\n  species:     {}\n",
        bird.id, bird.common_name, bird.species
    );
    if let Some(image) = bird.image_link.as_deref().filter(|s| !s.is_empty()) {
        out.push_str(&format!("  image:       {image}\n"));
    }
    for habitat in &bird.habitats {
        out.push_str(&format!("  habitat:     {} (#{})\n", habitat.name, habitat.id));
    }
    for region in &bird.regions {
        out.push_str(&format!("  region:      {}\n", region.name));
    }
    out
}

pub fn habitats_table(page: &HabitatsPage) -> String {
    let mut out = format!("{:<6} {:<28} REGION\n", "ID", "NAME");
    for habitat in &page.habitats {
        out.push_str(&format!(
            "{:<6} {:<28} #{}\n",
            habitat.id, habitat.name, habitat.region_id
        ));
    }
    out
}

pub fn habitat_detail(habitat: &Habitat) -> String {
    format!(
        "habitat #{}\n  name:   {}\n  region: #{}\n",
        habitat.id, habitat.name, habitat.region_id
    )
}

pub fn regions_table(regions: &[Region]) -> String {
    let mut out = format!("{:<6} NAME\n", "ID");
    for region in regions {
        out.push_str(&format!("{:<6} {}\n", region.id, region.name));
    }
    out
}

pub fn options_list(options: &[SelectOption]) -> String {
    if options.is_empty() {
        return "no matches\n".to_string();
    }
    options
        .iter()
        .map(|o| format!("{:<6} {}\n", o.value, o.label))
        .collect()
}

pub fn pagination(page: u32, pages: u64) -> String {
    format!("page {page} of {pages}\n")
}

pub fn session_summary(session: &Session) -> String {
    match &session.token {
        None => "signed out\n".to_string(),
        Some(_) => {
            let role = if session.owner { "owner" } else { "viewer" };
            match session.expires_at {
                Some(expires_at) => format!("signed in as {role}, token expires {expires_at}\n"),
                None => format!("signed in as {role}\n"),
            }
        }
    }
}
