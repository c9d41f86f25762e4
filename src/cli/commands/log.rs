use crate::cli::parser::Commands;
use crate::core::app::App;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::models::role::Access;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Log {
        print: true,
        operation,
    } = cmd
    {
        app.auth
            .require_role(Access::Supervisor, "only supervisors can read the log")?;
        LogLogic::print_log(&app.pool, operation.as_deref())?;
    }

    Ok(())
}
