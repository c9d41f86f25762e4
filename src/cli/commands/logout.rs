use crate::core::app::App;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(app: &mut App) -> AppResult<()> {
    app.auth.logout(&app.pool)?;
    success("Signed out.");
    Ok(())
}
