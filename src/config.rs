use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::feed::{FEED_DESCRIPTION, FEED_TITLE};

pub const DEFAULT_SITE_URL: &str = "https://andrewmonty.website";
pub const DEFAULT_HIGHLIGHT_THEME: &str = "github-dark";

#[derive(Deserialize, Debug, Clone)]
pub struct Site {
    pub url: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "plugin", rename_all = "lowercase")]
pub enum CssPlugin {
    None,
    /// Runs `command -i <input> -o <out_dir>/<output> [--minify]`
    Tailwind {
        #[serde(default = "default_tailwind_command")]
        command: Vec<String>,
        input: PathBuf,
        output: PathBuf,
        #[serde(default)]
        minify: bool,
    },
}

fn default_tailwind_command() -> Vec<String> {
    vec!["npx".to_string(), "@tailwindcss/cli".to_string()]
}

#[derive(Deserialize, Debug, Clone)]
pub struct Markdown {
    #[serde(default = "default_highlight_theme")]
    pub highlight_theme: String,
}

fn default_highlight_theme() -> String {
    DEFAULT_HIGHLIGHT_THEME.to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub public_dir: PathBuf,
    pub out_dir: PathBuf,
    pub template_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Server {
            address: "127.0.0.1".to_string(),
            port: 4321,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RssFeed {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub css: Option<CssPlugin>,
    pub markdown: Option<Markdown>,
    #[serde(default)]
    pub server: Server,
    pub log: Option<Log>,
    pub rss_feed: Option<RssFeed>,
}

/// Global build options, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub site_url: String,
    pub css_plugin: CssPlugin,
    pub highlight_theme: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            site_url: DEFAULT_SITE_URL.to_string(),
            css_plugin: CssPlugin::Tailwind {
                command: default_tailwind_command(),
                input: PathBuf::from("src/styles/global.css"),
                output: PathBuf::from("public/styles.css"),
                minify: true,
            },
            highlight_theme: DEFAULT_HIGHLIGHT_THEME.to_string(),
        }
    }
}

impl Config {
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            site_url: self.site.url.clone(),
            css_plugin: self.css.clone().unwrap_or(CssPlugin::None),
            highlight_theme: self.markdown.as_ref()
                .map(|md| md.highlight_theme.clone())
                .unwrap_or_else(default_highlight_theme),
        }
    }

    pub fn feed_title(&self) -> &str {
        self.rss_feed.as_ref()
            .and_then(|feed| feed.title.as_deref())
            .unwrap_or(FEED_TITLE)
    }

    pub fn feed_description(&self) -> &str {
        self.rss_feed.as_ref()
            .and_then(|feed| feed.description.as_deref())
            .unwrap_or(FEED_DESCRIPTION)
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };

    if str_path.starts_with("${exe_dir}") {
        let cur_exe = env::current_exe()?;
        let exe_dir = cur_exe.parent().unwrap_or(Path::new("."));
        let exe_dir = exe_dir.to_string_lossy();
        Ok(PathBuf::from(str_path.replace("${exe_dir}", &exe_dir)))
    } else {
        Ok(path)
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir)?,
        public_dir: parse_path(cfg.paths.public_dir)?,
        out_dir: parse_path(cfg.paths.out_dir)?,
        template_dir: cfg.paths.template_dir.map(parse_path).transpose()?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
