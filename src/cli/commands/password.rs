use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, app: &mut App, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Password {
        new_password,
        forgot,
        code,
    } = cmd
    {
        if let Some(email) = forgot {
            app.auth.request_password_reset(&app.pool, email, now)?;
            success("Password reset request recorded.");
            info("Ask an administrator for a reset code, then run `rtimeclock password --code <CODE> --new <PASSWORD>`.");
            return Ok(());
        }

        let new_password = new_password.as_deref().ok_or(AppError::MissingField("new password"))?;

        match code {
            Some(code) => {
                app.auth.reset_password(&app.pool, code, new_password, now)?;
                success("Password reset. Sign in with the new password.");
            }
            None => {
                app.auth.update_password(&app.pool, new_password)?;
                success("Password updated.");
            }
        }
    }

    Ok(())
}
