use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

const CONFIG_SAMPLE: &str = r#"[site]
url = "https://andrewmonty.website"

# Tailwind CLI run on `build`. Use plugin = "none" to disable it.
[css]
plugin = "tailwind"
command = ["npx", "@tailwindcss/cli"]
input = "src/styles/global.css"
output = "public/styles.css"
minify = true

[markdown]
highlight_theme = "github-dark"

# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
content_dir = "src/content"
public_dir = "public"
out_dir = "dist"

[server]
address = "127.0.0.1"
port = 4321
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}

#[cfg(test)]
mod tests {
    use monty_site::config::parse_config;

    use super::*;

    #[test]
    fn test_sample_is_valid() {
        let cfg = parse_config(CONFIG_SAMPLE).unwrap();
        assert_eq!(cfg.build_config(), monty_site::config::BuildConfig::default());
    }
}
