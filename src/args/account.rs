//! Command-line account commands: register, login, logout, whoami and favorites.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::app::{JsonFileStore, Session};
use crate::args::{Args, Context};
use crate::logic::validation::password_strength;
use crate::sources::{AccountError, RestAccount, RestCatalog, fetch_favorites};

/// Session over the shared preference store.
type CliSession = Session<Arc<JsonFileStore>>;

/// Read one trimmed line from stdin after printing `label`.
fn prompt_line(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Read a password without echo; the buffer is wiped on drop.
fn prompt_secret(label: &str) -> io::Result<Zeroizing<String>> {
    rpassword::prompt_password(label).map(Zeroizing::new)
}

/// Use the flag value or ask for it.
fn flag_or_prompt(value: Option<&String>, label: &str) -> io::Result<String> {
    match value {
        Some(v) => Ok(v.trim().to_string()),
        None => prompt_line(label),
    }
}

/// Build the account client, reporting failure on stderr.
fn account_client(ctx: &Context) -> Option<RestAccount> {
    match RestAccount::from_settings(&ctx.settings) {
        Ok(api) => Some(api),
        Err(e) => {
            eprintln!("HTTP client unavailable: {e}");
            None
        }
    }
}

/// What: Print an account error the way the forms show it.
///
/// Details:
/// - Validation failures are listed one per field.
fn report(err: &AccountError) {
    match err {
        AccountError::Validation(errs) => {
            for (field, msg) in errs.iter() {
                eprintln!("  {}: {msg}", field.label());
            }
        }
        other => eprintln!("{other}"),
    }
}

/// What: Handle `--register`.
///
/// Inputs:
/// - `ctx`: Settings and preference store
/// - `args`: `--name` and `--email` (prompted when absent)
///
/// Output:
/// - Exit code: 0 on success, 1 on validation or service failure.
pub async fn handle_register(ctx: &Context, args: &Args) -> i32 {
    let Some(api) = account_client(ctx) else {
        return 1;
    };
    let inputs = (|| -> io::Result<_> {
        let name = flag_or_prompt(args.name.as_ref(), "Name: ")?;
        let email = flag_or_prompt(args.email.as_ref(), "Email: ")?;
        let password = prompt_secret("Password: ")?;
        let strength = password_strength(&password);
        println!("Password strength: {}/5", strength.score);
        let confirm = prompt_secret("Confirm password: ")?;
        Ok((name, email, password, confirm))
    })();
    let (name, email, password, confirm) = match inputs {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Failed to read input: {e}");
            return 1;
        }
    };
    let mut session: CliSession = Session::load(Arc::clone(&ctx.store));
    match session
        .register(&api, &name, &email, &password, &confirm)
        .await
    {
        Ok(user) => {
            println!("Welcome, {}!", user.name);
            0
        }
        Err(e) => {
            report(&e);
            1
        }
    }
}

/// What: Handle `--login`.
///
/// Output:
/// - Exit code: 0 on success, 1 on validation or service failure.
pub async fn handle_login(ctx: &Context, args: &Args) -> i32 {
    let Some(api) = account_client(ctx) else {
        return 1;
    };
    let inputs = flag_or_prompt(args.email.as_ref(), "Email: ")
        .and_then(|email| Ok((email, prompt_secret("Password: ")?)));
    let (email, password) = match inputs {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Failed to read input: {e}");
            return 1;
        }
    };
    let mut session: CliSession = Session::load(Arc::clone(&ctx.store));
    match session.login(&api, &email, &password).await {
        Ok(user) => {
            println!("Signed in as {} <{}>", user.name, user.email);
            0
        }
        Err(e) => {
            report(&e);
            1
        }
    }
}

/// What: Handle `--logout`.
pub fn handle_logout(ctx: &Context) -> i32 {
    let mut session: CliSession = Session::load(Arc::clone(&ctx.store));
    session.logout();
    println!("Signed out");
    0
}

/// Load the session and re-validate it, or explain that a login is needed.
async fn signed_in(ctx: &Context, api: &RestAccount) -> Option<CliSession> {
    let mut session: CliSession = Session::load(Arc::clone(&ctx.store));
    if session.restore(api).await {
        Some(session)
    } else {
        eprintln!("{}", AccountError::NotLoggedIn);
        None
    }
}

/// What: Handle `--whoami`.
pub async fn handle_whoami(ctx: &Context) -> i32 {
    let Some(api) = account_client(ctx) else {
        return 1;
    };
    let Some(session) = signed_in(ctx, &api).await else {
        return 1;
    };
    if let Some(user) = session.user() {
        println!("{} <{}>", user.name, user.email);
        println!("Favorites: {}", user.favorites.len());
    }
    0
}

/// What: Handle `--favorite CODE`: add or remove the favorite.
///
/// Details:
/// - On failure nothing changes locally and a message is printed.
pub async fn handle_toggle_favorite(ctx: &Context, code: &str) -> i32 {
    let Some(api) = account_client(ctx) else {
        return 1;
    };
    let Some(mut session) = signed_in(ctx, &api).await else {
        return 1;
    };
    let code = code.trim().to_ascii_uppercase();
    if session.toggle_favorite(&api, &code).await {
        let now = session.user().is_some_and(|u| u.has_favorite(&code));
        println!(
            "{code} {} favorites",
            if now { "added to" } else { "removed from" }
        );
        0
    } else {
        eprintln!("Could not update favorites for {code}");
        1
    }
}

/// What: Handle `--favorites`: list favorite countries with their names.
pub async fn handle_favorites(ctx: &Context) -> i32 {
    let Some(api) = account_client(ctx) else {
        return 1;
    };
    let Some(session) = signed_in(ctx, &api).await else {
        return 1;
    };
    let codes = session.favorites().to_vec();
    if codes.is_empty() {
        println!("No favorite countries yet");
        return 0;
    }
    let src = match RestCatalog::from_settings(&ctx.settings) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("HTTP client unavailable: {e}");
            return 1;
        }
    };
    let (records, errors) = fetch_favorites(&src, &codes).await;
    for r in &records {
        println!("{}", crate::args::list::format_row(r));
    }
    for e in &errors {
        eprintln!("{e}");
    }
    i32::from(!errors.is_empty())
}
