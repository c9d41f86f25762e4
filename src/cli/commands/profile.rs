use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::errors::AppResult;
use crate::models::user::{ProfileUpdate, User};
use crate::ui::messages::{header, success};
use crate::utils::colors::colorize_optional;

fn print_profile(user: &User) {
    header("Profile");
    println!("Name  : {}", user.full_name);
    println!("Email : {}", user.email);
    println!(
        "Job   : {}",
        colorize_optional(user.job_title.as_deref().unwrap_or(""))
    );
    println!("Role  : {}", user.role.label());
}

pub fn handle(cmd: &Commands, app: &mut App) -> AppResult<()> {
    if let Commands::Profile {
        full_name,
        job_title,
    } = cmd
    {
        if full_name.is_none() && job_title.is_none() {
            print_profile(app.auth.require_user()?);
            return Ok(());
        }

        let update = ProfileUpdate {
            full_name: full_name.clone(),
            job_title: job_title.clone(),
        };
        let user = app.auth.update_profile(&app.pool, &update)?;

        success("Profile updated.");
        print_profile(&user);
    }

    Ok(())
}
