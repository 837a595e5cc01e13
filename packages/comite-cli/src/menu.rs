//! Main menu for the authenticated shell, drawn from the navigator state.

use anyhow::Result;
use colored::Colorize;
use comite_client::{App, MenuLayout, NavEvent, ProfileEditor, Route};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Select};

use crate::views;

/// What the main loop should do after a menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep the current view on screen.
    Stay,
    /// Draw the active route again.
    Redraw,
    Exit,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Navigate(Route),
    ToggleCommittees,
    ToggleMobileMenu,
    TogglePanel,
    EditProfile,
    Logout,
    Exit,
}

fn route_icon(route: Route) -> &'static str {
    match route {
        Route::Dashboard => "🏠",
        Route::MyCommittee => "👥",
        Route::AllCommittees => "📋",
    }
}

fn entries(app: &App, can_edit: bool) -> Vec<(String, Action)> {
    let nav = app.navigator();
    let mut items = Vec::new();

    let marker = |active: bool| if active { "●" } else { " " };
    let compact = nav.layout() == MenuLayout::SidePanel && nav.panel().collapsed;
    let label = |icon: &str, text: &str| {
        if compact {
            icon.to_string()
        } else {
            format!("{} {}", icon, text)
        }
    };

    let hide_links =
        nav.layout() == MenuLayout::TopBar && nav.is_narrow() && !nav.mobile_menu_open();
    if hide_links {
        items.push(("☰ Menú".to_string(), Action::ToggleMobileMenu));
    } else {
        items.push((
            format!(
                "{} {}",
                marker(nav.is_active(Route::Dashboard)),
                label(route_icon(Route::Dashboard), Route::Dashboard.label())
            ),
            Action::Navigate(Route::Dashboard),
        ));

        let arrow = if nav.committees_open() { "▾" } else { "▸" };
        items.push((
            format!(
                "{} {} {}",
                marker(nav.committees_active()),
                label("🏘", "Comités"),
                arrow
            ),
            Action::ToggleCommittees,
        ));
        if nav.submenu_visible() {
            for route in [Route::MyCommittee, Route::AllCommittees] {
                items.push((
                    format!(
                        "    {} {}",
                        marker(nav.is_active(route)),
                        label(route_icon(route), route.label())
                    ),
                    Action::Navigate(route),
                ));
            }
        }

        match nav.layout() {
            MenuLayout::TopBar if nav.is_narrow() => {
                items.push(("✕ Cerrar menú".to_string(), Action::ToggleMobileMenu));
            }
            MenuLayout::SidePanel => {
                let toggle = if nav.panel().collapsed {
                    "▶ Expandir panel"
                } else {
                    "◀ Contraer panel"
                };
                items.push((toggle.to_string(), Action::TogglePanel));
            }
            MenuLayout::TopBar => {}
        }
    }

    if can_edit && nav.is_active(Route::Dashboard) {
        items.push(("✏️  Editar perfil".to_string(), Action::EditProfile));
    }
    items.push(("🚪 Cerrar sesión".to_string(), Action::Logout));
    items.push(("🛑 Salir".to_string(), Action::Exit));
    items
}

pub async fn main_menu(
    app: &mut App,
    term: &Term,
    profile: Option<&mut ProfileEditor>,
) -> Result<Outcome> {
    let can_edit = profile
        .as_ref()
        .is_some_and(|editor| editor.member().is_some());
    let items = entries(app, can_edit);
    let labels: Vec<&str> = items.iter().map(|(label, _)| label.as_str()).collect();

    if let Some(session) = app.session() {
        println!();
        println!("{}", format!("Sesión: {}", session.nombre).bright_black());
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("¿Qué desea hacer?")
        .items(&labels)
        .default(0)
        .interact_on(term)?;

    let outcome = match items[selection].1 {
        Action::Navigate(route) => {
            app.navigate(route);
            Outcome::Redraw
        }
        Action::ToggleCommittees => {
            app.handle(NavEvent::ToggleCommitteesMenu);
            Outcome::Stay
        }
        Action::ToggleMobileMenu => {
            app.handle(NavEvent::ToggleMobileMenu);
            Outcome::Stay
        }
        Action::TogglePanel => {
            app.handle(NavEvent::TogglePanel);
            Outcome::Stay
        }
        Action::EditProfile => {
            if let Some(editor) = profile {
                views::edit_profile(app, editor, term).await?;
            }
            Outcome::Stay
        }
        Action::Logout => {
            app.logout();
            println!("{}", "Sesión cerrada".bright_blue());
            Outcome::Redraw
        }
        Action::Exit => Outcome::Exit,
    };
    Ok(outcome)
}
