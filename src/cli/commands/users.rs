use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::db::users::list_users;
use crate::errors::AppResult;
use crate::models::role::Access;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, app: &App, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Users {
        set_role,
        role,
        reset_code,
    } = cmd
    {
        if let Some(email) = reset_code {
            let code = app.auth.issue_reset_code(&app.pool, email, now)?;
            success(format!("Reset code for {}: {}", email.trim(), code));
            info("Hand it to the account owner: it is valid for one hour and can be used once.");
            return Ok(());
        }

        if let (Some(email), Some(role)) = (set_role, role) {
            let user = app.auth.assign_role(&app.pool, email, *role)?;
            success(format!("{} is now {}.", user.email, user.role.label()));
            return Ok(());
        }

        app.auth
            .require_role(Access::Supervisor, "only supervisors can list accounts")?;

        header("Accounts");
        let mut table = Table::new(vec![
            Column::new("Email", 30),
            Column::new("Name", 24),
            Column::new("Job", 18),
            Column::new("Role", 10),
        ]);
        for u in list_users(&app.pool.conn)? {
            table.add_row(vec![
                u.email.clone(),
                u.full_name.clone(),
                colorize_optional(u.job_title.as_deref().unwrap_or("")),
                u.role.label().to_string(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
