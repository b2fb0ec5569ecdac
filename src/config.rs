use crate::cli::Cli;

/// Whether the all-zero root commit takes part in the time-axis domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootPolicy {
    #[default]
    Exclude,
    Include,
}

/// Resolved view settings handed to the view models
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub url_base: String,
    pub root_policy: RootPolicy,
    pub rescale_x_on_filter: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli, origin_url: Option<&str>) -> Self {
        let url_base = cli
            .url_base
            .clone()
            .or_else(|| origin_url.and_then(github_commit_base))
            .unwrap_or_default();

        Self {
            url_base,
            root_policy: if cli.include_root { RootPolicy::Include } else { RootPolicy::Exclude },
            rescale_x_on_filter: cli.rescale_x,
        }
    }
}

/// Derive `https://github.com/<owner>/<repo>/commit/` from a remote URL
pub fn github_commit_base(remote: &str) -> Option<String> {
    let path = remote
        .strip_prefix("https://github.com/")
        .or_else(|| remote.strip_prefix("git@github.com:"))
        .or_else(|| remote.strip_prefix("ssh://git@github.com/"))?;
    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let mut parts = path.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Some(format!("https://github.com/{}/{}/commit/", owner, repo))
        }
        _ => None,
    }
}
