use crate::cli::actions::{check, visit, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Check(args) => check::execute(args).await,
        Action::Visit(args) => visit::execute(args).await,
    }
}
