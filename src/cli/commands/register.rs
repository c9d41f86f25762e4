use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::errors::AppResult;
use crate::models::user::NewUser;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, app: &mut App) -> AppResult<()> {
    if let Commands::Register {
        email,
        password,
        full_name,
        job_title,
    } = cmd
    {
        let input = NewUser {
            email: email.clone(),
            password: password.clone(),
            full_name: full_name.clone(),
            job_title: job_title.clone(),
        };

        let user = app.auth.register(&app.pool, &input)?;

        success(format!(
            "Account created for {} ({})",
            user.email,
            user.role.label()
        ));
        info("Sign in with `rtimeclock login`.");
    }

    Ok(())
}
