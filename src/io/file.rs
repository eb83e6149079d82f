use std::path::Path;

use tracing::info;

use crate::error::{HubError, Result};
use crate::model::Workspace;
use crate::timeline::CalendarWindow;

/// Save a workspace to a JSON file.
pub fn save_workspace(workspace: &Workspace, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(workspace).map_err(|e| HubError::json(path, e))?;
    std::fs::write(path, json).map_err(|e| HubError::io(path, e))?;
    info!(path = %path.display(), "workspace saved");
    Ok(())
}

/// Load a workspace from a JSON file and repair it against `window`.
pub fn load_workspace(path: &Path, window: &CalendarWindow) -> Result<Workspace> {
    let json = std::fs::read_to_string(path).map_err(|e| HubError::io(path, e))?;
    let mut workspace: Workspace = serde_json::from_str(&json).map_err(|e| HubError::json(path, e))?;
    let fixed = workspace.validate(window)?;
    info!(
        path = %path.display(),
        scenarios = workspace.scenarios.len(),
        fixed,
        "workspace loaded"
    );
    Ok(workspace)
}
