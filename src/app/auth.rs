use anyhow::Result;

use crate::api::client::ApiClient;
use crate::app::{after_auth, Flow, Prompt};
use crate::nav::{Navigator, Route};
use crate::schemas::user::Role;
use crate::session::RegisterProfile;

pub(crate) async fn home(
    client: &ApiClient,
    navigator: &Navigator,
    prompt: &mut Prompt,
) -> Result<Flow> {
    println!();
    println!("EduQuiz");
    match client.session().current_user() {
        Some(user) => {
            // Signed-in visitors on the landing page go straight to their
            // dashboard.
            navigator.replace(Route::landing_for(user.role));
            return Ok(Flow::Continue);
        }
        None => {
            println!("  1) Log in");
            println!("  2) Register");
            println!("  q) Quit");
        }
    }

    match prompt.line("Choose:").await? {
        Some(choice) => match choice.as_str() {
            "1" => navigator.goto(Route::Login),
            "2" => navigator.goto(Route::Register),
            "q" => return Ok(Flow::Quit),
            _ => println!("Unknown choice."),
        },
        None => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

pub(crate) async fn login(
    client: &ApiClient,
    navigator: &Navigator,
    prompt: &mut Prompt,
) -> Result<Flow> {
    println!();
    println!("Log in (empty email to go back)");

    let Some(email) = prompt.line("Email:").await? else {
        return Ok(Flow::Quit);
    };
    if email.is_empty() {
        navigator.replace(Route::Home);
        return Ok(Flow::Continue);
    }
    let Some(password) = prompt.line("Password:").await? else {
        return Ok(Flow::Quit);
    };

    match client.session().login(client, &email, &password).await {
        Ok(user) => {
            println!("Welcome back, {}.", user.name);
            after_auth(navigator, user.role);
        }
        Err(err) => println!("Login failed: {}", err.user_message()),
    }
    Ok(Flow::Continue)
}

pub(crate) async fn register(
    client: &ApiClient,
    navigator: &Navigator,
    prompt: &mut Prompt,
) -> Result<Flow> {
    println!();
    println!("Register (empty name to go back)");

    let Some(name) = prompt.line("Name:").await? else {
        return Ok(Flow::Quit);
    };
    if name.is_empty() {
        navigator.replace(Route::Home);
        return Ok(Flow::Continue);
    }
    let Some(email) = prompt.line("Email:").await? else {
        return Ok(Flow::Quit);
    };
    let Some(password) = prompt.line("Password (at least 6 characters):").await? else {
        return Ok(Flow::Quit);
    };
    let Some(confirm_password) = prompt.line("Confirm password:").await? else {
        return Ok(Flow::Quit);
    };
    let Some(role_choice) = prompt.line("Role (teacher/student):").await? else {
        return Ok(Flow::Quit);
    };
    let role = match role_choice.to_lowercase().as_str() {
        "teacher" | "t" => Role::Teacher,
        "student" | "s" => Role::Student,
        other => {
            println!("Unknown role: {other}");
            return Ok(Flow::Continue);
        }
    };

    let subjects = if role == Role::Teacher {
        let Some(raw) = prompt.line("Subjects (comma separated):").await? else {
            return Ok(Flow::Quit);
        };
        raw.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
    } else {
        Vec::new()
    };

    let profile =
        RegisterProfile { name, email, password, confirm_password, role, subjects };
    match client.session().register(client, profile).await {
        Ok(user) => {
            println!("Account created. Welcome, {}.", user.name);
            after_auth(navigator, user.role);
        }
        Err(err) => println!("Registration failed: {}", err.user_message()),
    }
    Ok(Flow::Continue)
}
