//! Unauthenticated screens: sign in and sign up.

use anyhow::Result;
use colored::Colorize;
use comite_client::format::format_cedula;
use comite_client::{App, Field, FieldChange, LoginError, SubmitError};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    SignIn,
    SignUp,
    Exit,
}

fn entry_options() -> [(&'static str, Entry); 3] {
    [
        ("🔑 Iniciar sesión", Entry::SignIn),
        ("📝 Registrarse", Entry::SignUp),
        ("🛑 Salir", Entry::Exit),
    ]
}

/// Returns `false` when the user chose to exit.
pub async fn sign_in(app: &mut App, term: &Term) -> Result<bool> {
    let theme = ColorfulTheme::default();
    let options = entry_options();
    let labels: Vec<&str> = options.iter().map(|(label, _)| *label).collect();

    let selection = Select::with_theme(&theme)
        .with_prompt("Bienvenido")
        .items(&labels)
        .default(0)
        .interact_on(term)?;

    match options[selection].1 {
        Entry::SignIn => {}
        Entry::SignUp => {
            app.show_sign_up().await;
            return Ok(true);
        }
        Entry::Exit => return Ok(false),
    }

    let cedula: String = Input::with_theme(&theme)
        .with_prompt("Cédula")
        .allow_empty(true)
        .interact_text_on(term)?;

    println!("{}", "Buscando...".bright_yellow());
    match app.login(&cedula).await {
        Ok(session) => {
            println!(
                "{}",
                format!("✅ Bienvenido, {}", session.nombre).bright_green().bold()
            );
        }
        Err(LoginError::NotFound) => {
            println!("{}", LoginError::NotFound.to_string().bright_red());
            app.dismiss_login_error();
            let register = Confirm::with_theme(&theme)
                .with_prompt("¿Desea registrarse ahora?")
                .default(true)
                .interact_on(term)?;
            if register {
                app.show_sign_up().await;
            }
        }
        Err(e) => {
            println!("{}", format!("❌ {}", e).bright_red());
            app.dismiss_login_error();
        }
    }

    Ok(true)
}

/// Walk the registration form once. The shell stays on sign up until the
/// submit succeeds or the user goes back.
pub async fn sign_up(app: &mut App, term: &Term) -> Result<bool> {
    let theme = ColorfulTheme::default();
    println!();
    println!("{}", "📝 Registro de nuevo miembro".bright_cyan().bold());

    let options = vec!["Completar formulario", "Volver a iniciar sesión"];
    let selection = Select::with_theme(&theme)
        .items(&options)
        .default(0)
        .interact_on(term)?;
    if selection == 1 {
        app.show_sign_in();
        return Ok(true);
    }

    if app.registration().committees().is_empty() {
        println!(
            "{}",
            "⚠️  No se pudieron cargar los comités".bright_yellow()
        );
        let retry = Confirm::with_theme(&theme)
            .with_prompt("¿Reintentar?")
            .default(true)
            .interact_on(term)?;
        if retry {
            app.show_sign_up().await;
        } else {
            app.show_sign_in();
        }
        return Ok(true);
    }

    for field in Field::FORM_FIELDS {
        if field == Field::ComiteId {
            continue;
        }
        let draft = app.registration().draft();
        if let Some(error) = draft.error(field) {
            println!("  {}", error.bright_red());
        }
        let value: String = Input::with_theme(&theme)
            .with_prompt(field.label())
            .with_initial_text(field.value_of(&draft.member))
            .allow_empty(true)
            .interact_text_on(term)?;
        app.update_registration(FieldChange::new(field, value));
    }

    let committees = app.registration().committees().to_vec();
    let names: Vec<String> = committees
        .iter()
        .map(|c| format!("{} ({})", c.nombre, c.zona))
        .collect();
    let current = app.registration().draft().member.comite_id;
    let index = Select::with_theme(&theme)
        .with_prompt(Field::ComiteId.label())
        .items(&names)
        .default(committees.iter().position(|c| c.id == current).unwrap_or(0))
        .interact_on(term)?;
    app.update_registration(FieldChange::new(
        Field::ComiteId,
        committees[index].id.to_string(),
    ));

    match app.register().await {
        Ok(saved) => {
            println!(
                "{}",
                "✅ ¡Registro exitoso!".bright_green().bold()
            );
            println!(
                "Ya puede iniciar sesión con su cédula {}",
                format_cedula(&saved.cedula).bold()
            );
        }
        Err(SubmitError::Validation(errors)) => {
            println!("{}", "Corrija los siguientes campos:".bright_red());
            for (field, message) in &errors {
                println!("  • {}: {}", field.label(), message);
            }
        }
        Err(e) => {
            println!("{}", format!("❌ {}", e).bright_red());
            let back = Confirm::with_theme(&theme)
                .with_prompt("¿Volver a iniciar sesión?")
                .default(false)
                .interact_on(term)?;
            if back {
                app.show_sign_in();
            }
        }
    }

    Ok(true)
}
