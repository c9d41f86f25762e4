use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::core::history::HistoryLogic;
use crate::errors::AppResult;
use crate::models::role::Access;
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        // refuse before asking when the role cannot delete anyway
        app.auth
            .require_role(Access::Admin, "only administrators can delete records")?;

        let prompt = format!(
            "Delete session {} and all its breaks? This action is irreversible.",
            id
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let deleted = HistoryLogic::delete(&app.pool, &app.auth, *id)?;
        success(format!(
            "Session {} of {} has been deleted.",
            deleted.id, deleted.work_date
        ));
    }

    Ok(())
}
