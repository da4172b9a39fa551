use directories::{ProjectDirs, UserDirs};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

pub fn get_config_location() -> Option<(PathBuf, PathBuf)> {
    let project_dir = ProjectDirs::from("", "", "tagwiki")?;
    let config_dir = project_dir.config_dir();
    let mut config_path = PathBuf::from(config_dir);
    config_path.push("config.toml");
    Some((config_dir.to_owned(), config_path))
}

/// Expands `~` to the home directory and makes sure the location ends with a separator.
pub fn parse_location(location: &str) -> PathBuf {
    let home = UserDirs::new().map(|dirs| dirs.home_dir().to_owned());
    expand_location(location, home.as_deref())
}

fn expand_location(location: &str, home: Option<&Path>) -> PathBuf {
    let mut loc = match home {
        Some(home) if location.contains('~') => {
            location.replace('~', &home.to_string_lossy())
        }
        _ => location.to_owned(),
    };
    if !loc.ends_with(MAIN_SEPARATOR) {
        loc.push(MAIN_SEPARATOR)
    }
    PathBuf::from(loc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_wiki_location() {
        let home = Path::new("test");
        assert_eq!(
            expand_location("./wiki", Some(home)),
            PathBuf::from("./wiki/")
        );
        assert_eq!(
            expand_location("~/wiki", Some(home)),
            PathBuf::from("test/wiki/")
        );
        assert_eq!(
            expand_location("/user/~/wiki", Some(home)),
            PathBuf::from("/user/test/wiki/")
        );
    }

    #[test]
    fn leaves_tilde_without_a_home() {
        assert_eq!(expand_location("~/wiki", None), PathBuf::from("~/wiki/"));
    }
}
