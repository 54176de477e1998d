//! Verbatim concatenation of source files into one banner-separated artifact.
//!
//! The bundler synthesizes only the header, the per-file section banners, and
//! the separating blank lines; every input file's bytes are copied into the
//! artifact untouched, with no re-encoding or re-indentation.

use anyhow::{Context, Result, bail};
use log::{debug, trace};

use crate::config::Config;

/// Assembles the generated artifact from the configured input list.
#[derive(Debug)]
pub struct Bundler<'a> {
    config: &'a Config,
}

impl<'a> Bundler<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Build the complete artifact in memory.
    ///
    /// Assembling before any write means a produced output file is always
    /// complete: a missing or unreadable input aborts the run before the
    /// output target is touched.
    pub fn bundle(&self) -> Result<Vec<u8>> {
        if self.config.files.is_empty() {
            bail!("no input files configured, refusing to emit an empty artifact");
        }

        let mut artifact = Vec::new();
        artifact.extend_from_slice(self.config.header.as_bytes());
        artifact.extend_from_slice(b"\n\n");

        for name in &self.config.files {
            let path = self.config.src.join(name);
            trace!("appending section {}", path.display());

            artifact.extend_from_slice(section_banner(name).as_bytes());
            artifact.extend_from_slice(b"\n\n");

            let body = std::fs::read(&path)
                .with_context(|| format!("failed to read input file: {}", path.display()))?;
            artifact.extend_from_slice(&body);
            artifact.resize(artifact.len() + self.config.section_gap, b'\n');
        }

        debug!(
            "assembled {} sections, {} bytes",
            self.config.files.len(),
            artifact.len()
        );
        Ok(artifact)
    }
}

/// Banner line marking the start of one input file's section.
///
/// The `=` runs match the historical artifact shape byte for byte, so
/// regenerating an unchanged tree produces an identical file.
pub fn section_banner(name: &str) -> String {
    format!("//{} {} {}", "=".repeat(28), name, "=".repeat(29))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config_for(dir: &std::path::Path, files: &[&str]) -> Config {
        Config {
            files: files.iter().map(|name| (*name).to_owned()).collect(),
            src: dir.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn banner_matches_generated_artifact_shape() {
        insta::assert_snapshot!(
            section_banner("math.js"),
            @"//============================ math.js ============================="
        );
    }

    #[test]
    fn bundle_copies_bytes_verbatim_in_order() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("a.js"), "var a = 1;\n").expect("write a.js");
        std::fs::write(dir.path().join("b.js"), "var b = 2;\n").expect("write b.js");

        let config = config_for(dir.path(), &["a.js", "b.js"]);
        let artifact = Bundler::new(&config).bundle().expect("bundle");
        let text = String::from_utf8(artifact).expect("utf8");

        let expected = format!(
            "{}\n\n{}\n\nvar a = 1;\n\n\n\n{}\n\nvar b = 2;\n\n\n\n",
            config.header,
            section_banner("a.js"),
            section_banner("b.js"),
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn bundle_preserves_non_utf8_input() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let body = [0x2f, 0x2f, 0xff, 0xfe, 0x0a];
        std::fs::write(dir.path().join("raw.js"), body).expect("write raw.js");

        let config = config_for(dir.path(), &["raw.js"]);
        let artifact = Bundler::new(&config).bundle().expect("bundle");

        let needle = &body[..];
        assert!(
            artifact.windows(needle.len()).any(|w| w == needle),
            "input bytes must appear in the artifact unchanged"
        );
    }

    #[test]
    fn empty_file_list_is_an_error() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let config = config_for(dir.path(), &[]);
        let err = Bundler::new(&config).bundle().expect_err("must fail");
        assert!(err.to_string().contains("no input files"));
    }

    #[test]
    fn section_gap_controls_trailing_newlines() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("a.js"), "x").expect("write a.js");

        let mut config = config_for(dir.path(), &["a.js"]);
        config.section_gap = 1;
        let artifact = Bundler::new(&config).bundle().expect("bundle");
        let text = String::from_utf8(artifact).expect("utf8");

        assert!(text.ends_with("x\n"));
        assert!(!text.ends_with("x\n\n"));
    }
}
