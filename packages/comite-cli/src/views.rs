//! Authenticated route views.

use anyhow::Result;
use colored::Colorize;
use comite_client::committees::filter_committees;
use comite_client::format::{format_cedula, format_telefono};
use comite_client::profile::{initials, role_label, EDITABLE_FIELDS};
use comite_client::{App, FieldChange, Member, ProfileEditor, ProfileState, Route, SubmitError};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

/// Draw a route. The dashboard hands back its profile editor so the menu can
/// offer editing without fetching again.
pub async fn render(app: &App, route: Route, term: &Term) -> Result<Option<ProfileEditor>> {
    term.clear_screen()?;
    println!("{}", route.label().bright_cyan().bold());
    println!("{}", "─".repeat(42).bright_black());

    match route {
        Route::Dashboard => {
            let editor = app.open_profile().await;
            print_profile(&editor);
            return Ok(Some(editor));
        }
        Route::MyCommittee => render_my_committee(app).await,
        Route::AllCommittees => render_all_committees(app, term).await?,
    }
    Ok(None)
}

pub fn print_profile(editor: &ProfileEditor) {
    match editor.state() {
        ProfileState::Loading => println!("{}", "Cargando...".bright_yellow()),
        ProfileState::Failed(msg) => println!("{}", format!("❌ {}", msg).bright_red()),
        ProfileState::Loaded(member) => {
            println!(
                "{}  {} {}  {}",
                format!("[{}]", initials(member)).bright_magenta().bold(),
                member.nombre.bold(),
                member.apellido.bold(),
                role_label(member.rol_id).bright_black()
            );
            println!();
            row("Cédula", &format_cedula(&member.cedula));
            row("Teléfono", &format_telefono(&member.telefono));
            row("Email", &member.email);
            row("Dirección", &member.direccion);
            row("Sector", &member.sector);
            row("Comité", &member.comite_id.to_string());
            row(
                "Miembro desde",
                &member.fecha_ingreso.format("%d/%m/%Y").to_string(),
            );
            row("Estado", if member.activo { "Activo" } else { "Inactivo" });
        }
    }

    if editor.notification().is_visible() {
        println!();
        println!("{}", "✅ Perfil actualizado".bright_green().bold());
    }
}

/// Edit the profile in place until it is saved, left unchanged or cancelled.
pub async fn edit_profile(app: &mut App, editor: &mut ProfileEditor, term: &Term) -> Result<()> {
    let theme = ColorfulTheme::default();
    editor.begin_edit();

    while let Some(draft) = editor.draft() {
        let mut changes = Vec::new();
        for field in EDITABLE_FIELDS {
            if let Some(error) = draft.error(field) {
                println!("  {}", error.bright_red());
            }
            let value: String = Input::with_theme(&theme)
                .with_prompt(field.label())
                .with_initial_text(field.value_of(&draft.member))
                .allow_empty(true)
                .interact_text_on(term)?;
            changes.push(FieldChange::new(field, value));
        }
        for change in changes {
            editor.apply(change);
        }

        if editor.has_changes() {
            let confirm = Confirm::with_theme(&theme)
                .with_prompt("¿Guardar cambios?")
                .default(true)
                .interact_on(term)?;
            if !confirm {
                editor.cancel();
                break;
            }
        }

        match app.save_profile(editor).await {
            Ok(Some(_)) => {}
            Ok(None) => println!("{}", "Sin cambios".bright_black()),
            Err(SubmitError::Validation(_)) => {
                println!("{}", "Corrija los campos marcados".bright_red());
            }
            Err(e) => {
                println!("{}", format!("❌ {}", e).bright_red());
                let retry = Confirm::with_theme(&theme)
                    .with_prompt("¿Reintentar?")
                    .default(true)
                    .interact_on(term)?;
                if !retry {
                    editor.cancel();
                }
            }
        }
    }

    print_profile(editor);
    Ok(())
}

async fn render_my_committee(app: &App) {
    let view = match app.my_committee().await {
        Ok(view) => view,
        Err(e) => {
            println!("{}", format!("❌ {}", e.message()).bright_red());
            if e.requires_relogin() {
                println!("{}", "Use \"Cerrar sesión\" y vuelva a entrar.".bright_yellow());
            }
            return;
        }
    };

    let committee = &view.committee;
    println!("{}", committee.nombre.bold());
    row("Zona", &committee.zona);
    row("Dirección", &committee.direccion);
    row("Teléfono", &format_telefono(&committee.telefono));
    row("Email", &committee.email);
    row(
        "Fundado",
        &committee.fecha_creacion.format("%d/%m/%Y").to_string(),
    );
    row("Estado", if committee.activo { "Activo" } else { "Inactivo" });
    row(
        "Secretario",
        &view
            .secretary
            .as_ref()
            .map(full_name)
            .unwrap_or_else(|| "Sin asignar".to_string()),
    );

    println!();
    println!(
        "{}",
        format!("Miembros ({})", view.member_count()).bright_cyan()
    );
    if view.members.is_empty() {
        println!("  {}", "No hay miembros registrados".bright_black());
    }
    for member in &view.members {
        println!(
            "  • {:<32} {}  {}",
            full_name(member),
            format_cedula(&member.cedula),
            role_label(member.rol_id).bright_black()
        );
    }
}

async fn render_all_committees(app: &App, term: &Term) -> Result<()> {
    let summaries = match app.all_committees().await {
        Ok(summaries) => summaries,
        Err(e) => {
            println!("{}", format!("❌ {}", e.message()).bright_red());
            return Ok(());
        }
    };

    let query: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Buscar por nombre o zona")
        .allow_empty(true)
        .interact_text_on(term)?;

    let rows = filter_committees(&summaries, &query);
    if rows.is_empty() {
        println!("  {}", "No se encontraron comités".bright_black());
    }
    for summary in rows {
        let status = if summary.committee.activo {
            summary.status_label().bright_green()
        } else {
            summary.status_label().bright_red()
        };
        println!(
            "  {:<30} {:<20} {:>4} miembros  {}",
            summary.committee.nombre, summary.committee.zona, summary.member_count, status
        );
    }
    Ok(())
}

fn full_name(member: &Member) -> String {
    format!("{} {}", member.nombre, member.apellido)
        .trim()
        .to_string()
}

fn row(label: &str, value: &str) {
    let label = format!("{:<14}", format!("{}:", label));
    println!("  {} {}", label.bright_black(), value);
}
