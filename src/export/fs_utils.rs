use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Whether `path` may be written: a new file always may, an existing one
/// only with `force` or after the user answers yes on stdin.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if force || !path.exists() {
        return Ok(());
    }

    warning(format!("'{}' already exists.", path.display()));
    if confirm("Overwrite? [y/N]: ", &mut io::stdin().lock())? {
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "'{}' kept, nothing written",
            path.display()
        )))
    }
}

fn confirm(prompt: &str, input: &mut impl BufRead) -> AppResult<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "예" | "네"
    ))
}
