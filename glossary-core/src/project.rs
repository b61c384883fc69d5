use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Default glossary location inside the working directory
const LOCAL_GLOSSARY_PATH: &str = "data/terms.json";

/// Determines the glossary file to use.
///
/// Priority: an explicit `--file` option, the GLOSSARY_FILE environment
/// variable, a `data/terms.json` in the current directory (or a `data`
/// directory waiting for its first save), and finally
/// `~/.glossary/terms.json`.
pub fn determine_glossary_path(file_option: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = file_option {
        return Ok(PathBuf::from(path));
    }

    if let Ok(path) = env::var("GLOSSARY_FILE") {
        return Ok(PathBuf::from(path));
    }

    let local = PathBuf::from(LOCAL_GLOSSARY_PATH);
    if local.exists() || local.parent().map(|p| p.exists()).unwrap_or(false) {
        return Ok(local);
    }

    let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home_dir.join(".glossary").join("terms.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_file_option_wins() {
        let path = determine_glossary_path(Some("somewhere/else.json")).unwrap();
        assert_eq!(path, PathBuf::from("somewhere/else.json"));
    }
}
