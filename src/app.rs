//! The end-to-end flow from copied text to an opened URL
//!
//! input -> [`FileReference`] -> [`PathResolver`] -> [`RepoLocator`] ->
//! [`RemoteDescriptor`] -> URL -> browser. Each stage's error stops the run.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::OpenGithubError;
use crate::config::Settings;
use crate::git::{CommandRunner, RepoLocator, SystemRunner};
use crate::output::OutputWriter;
use crate::platform::{ClipboardSource, UrlOpener};
use crate::reference::FileReference;
use crate::resolve::{DirLister, OsLister, PathResolver};
use crate::url::RemoteDescriptor;

type Result<T> = std::result::Result<T, OpenGithubError>;

/// Where the file reference came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// `FILE` argument or `--file`
    Argument,
    /// System clipboard
    Clipboard,
}

/// Wires the stages together
pub struct App<'a, R = SystemRunner, L = OsLister> {
    locator: RepoLocator<R>,
    resolver: PathResolver<L>,
    clipboard: &'a dyn ClipboardSource,
    opener: &'a dyn UrlOpener,
    output: &'a dyn OutputWriter,
}

impl<'a> App<'a> {
    /// App using the real filesystem and `git`
    #[must_use]
    pub fn new(
        clipboard: &'a dyn ClipboardSource,
        opener: &'a dyn UrlOpener,
        output: &'a dyn OutputWriter,
    ) -> Self {
        Self {
            locator: RepoLocator::new(),
            resolver: PathResolver::new(),
            clipboard,
            opener,
            output,
        }
    }
}

impl<'a, R: CommandRunner, L: DirLister> App<'a, R, L> {
    /// Replace the repository locator
    #[must_use]
    pub fn with_locator<R2: CommandRunner>(self, locator: RepoLocator<R2>) -> App<'a, R2, L> {
        App {
            locator,
            resolver: self.resolver,
            clipboard: self.clipboard,
            opener: self.opener,
            output: self.output,
        }
    }

    /// Replace the path resolver
    #[must_use]
    pub fn with_resolver<L2: DirLister>(self, resolver: PathResolver<L2>) -> App<'a, R, L2> {
        App {
            locator: self.locator,
            resolver,
            clipboard: self.clipboard,
            opener: self.opener,
            output: self.output,
        }
    }

    /// The repository locator in use
    #[must_use]
    pub const fn locator(&self) -> &RepoLocator<R> {
        &self.locator
    }

    /// Produce the URL for `input` (or the clipboard) and open it if enabled.
    ///
    /// # Errors
    /// Returns the first stage failure: empty or non-file input, a malformed
    /// `path:line`, an unresolvable path, a failed git query, an unsupported
    /// remote or a browser that would not launch.
    pub fn run(&self, input: Option<&str>, settings: &Settings) -> Result<String> {
        let (raw, source) = self.read_input(input)?;

        let reference = FileReference::parse(&raw)?;
        if source == InputSource::Clipboard && !reference.has_extension() {
            return Err(OpenGithubError::NotAFile(raw));
        }

        let abs = self.resolve(&reference, settings)?;
        debug!(path = %abs.display(), "resolved file");

        let location = self.locator.locate(&abs)?;
        debug!(root = %location.root.display(), "repository located");
        let branch = match &settings.branch {
            Some(branch) => branch.clone(),
            None => {
                self.output
                    .info("Using current branch since --branch or $OPENGITHUB_BRANCH not set");
                self.locator.current_branch(&abs)?
            }
        };

        self.output.info(&format!(
            "Found remote:{}, branch:{}, path:{}, line={}",
            location.remote, branch, location.relative_path, reference.line
        ));

        let descriptor = RemoteDescriptor {
            remote: location.remote,
            relative_path: location.relative_path,
            branch,
            line: reference.line,
        };
        let url = descriptor.url()?;
        self.output.success(&url);

        if settings.open {
            self.opener.open(&url)?;
        }

        Ok(url)
    }

    fn read_input(&self, input: Option<&str>) -> Result<(String, InputSource)> {
        if let Some(text) = input.map(str::trim).filter(|t| !t.is_empty()) {
            return Ok((text.to_string(), InputSource::Argument));
        }

        let text = self.clipboard.read_text()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(OpenGithubError::EmptyInput);
        }

        self.output.info(&format!("Using clipboard text: {text}"));
        Ok((text.to_string(), InputSource::Clipboard))
    }

    fn resolve(&self, reference: &FileReference, settings: &Settings) -> Result<PathBuf> {
        if Path::new(&reference.path).is_absolute() {
            return Ok(self.resolver.resolve(&reference.path, Path::new(""))?);
        }

        let root = match &settings.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => env::current_dir()?.join(root),
            None => {
                let cwd = env::current_dir()?;
                self.output.info(&format!(
                    "Using current directory to resolve relative path since --root or $OPENGITHUB_ROOT not set: {}",
                    cwd.display()
                ));
                cwd
            }
        };

        Ok(self.resolver.resolve(&reference.path, &root)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::ScriptedRunner;
    use crate::output::{BufferedWriter, MessageLevel};
    use crate::platform::{RecordingOpener, StaticClipboard};
    use crate::resolve::MockTree;

    const REMOTE: &str = "git@github.com:acme/widgets.git";

    fn runner(root: &str) -> ScriptedRunner {
        ScriptedRunner::new()
            .respond("git rev-parse --show-toplevel", root)
            .respond("git config --get remote.origin.url", REMOTE)
            .respond("git rev-parse --abbrev-ref HEAD", "main")
    }

    fn settings(root: &str) -> Settings {
        Settings {
            root: Some(PathBuf::from(root)),
            ..Settings::default()
        }
    }

    #[test]
    fn test_run_from_argument() {
        let clipboard = StaticClipboard::unavailable();
        let opener = RecordingOpener::new();
        let output = BufferedWriter::new();
        let app = App::new(&clipboard, &opener, &output)
            .with_locator(RepoLocator::with_runner(runner("/work/widgets")))
            .with_resolver(PathResolver::with_lister(MockTree::new().file("/work/widgets/src/app.go")));

        let url = app.run(Some("src/app.go:42"), &settings("/work/widgets")).unwrap();
        assert_eq!(url, "https://github.com/acme/widgets/blob/main/src/app.go#L42");
        assert_eq!(opener.opened(), vec![url.clone()]);
        assert_eq!(output.messages_at(MessageLevel::Success), vec![url]);
        assert!(
            output
                .messages_at(MessageLevel::Info)
                .iter()
                .any(|m| m == "Found remote:git@github.com:acme/widgets.git, branch:main, path:src/app.go, line=42")
        );
    }

    #[test]
    fn test_run_from_clipboard() {
        let clipboard = StaticClipboard::new("  app.go:7\n");
        let opener = RecordingOpener::new();
        let output = BufferedWriter::new();
        let app = App::new(&clipboard, &opener, &output)
            .with_locator(RepoLocator::with_runner(runner("/work/widgets")))
            .with_resolver(PathResolver::with_lister(MockTree::new().file("/work/widgets/cmd/app.go")));

        let url = app.run(None, &settings("/work/widgets")).unwrap();
        assert_eq!(url, "https://github.com/acme/widgets/blob/main/cmd/app.go#L7");
        assert_eq!(output.messages_at(MessageLevel::Info)[0], "Using clipboard text: app.go:7");
    }

    #[test]
    fn test_branch_setting_skips_query() {
        let clipboard = StaticClipboard::unavailable();
        let opener = RecordingOpener::new();
        let output = BufferedWriter::new();
        let app = App::new(&clipboard, &opener, &output)
            .with_locator(RepoLocator::with_runner(runner("/w")))
            .with_resolver(PathResolver::with_lister(MockTree::new().file("/w/a.rs")));

        let settings = Settings {
            branch: Some("release".to_string()),
            open: false,
            ..settings("/w")
        };
        let url = app.run(Some("a.rs"), &settings).unwrap();
        assert_eq!(url, "https://github.com/acme/widgets/blob/release/a.rs");
        assert!(opener.opened().is_empty());
        assert!(
            app.locator()
                .runner()
                .calls()
                .iter()
                .all(|c| c.command != "git rev-parse --abbrev-ref HEAD")
        );
    }

    #[test]
    fn test_empty_clipboard() {
        let clipboard = StaticClipboard::new("   ");
        let opener = RecordingOpener::new();
        let output = BufferedWriter::new();
        let app = App::new(&clipboard, &opener, &output);
        let err = app.run(None, &Settings::default()).unwrap_err();
        assert!(matches!(err, OpenGithubError::EmptyInput));
    }

    #[test]
    fn test_clipboard_text_without_extension() {
        let clipboard = StaticClipboard::new("hello world");
        let opener = RecordingOpener::new();
        let output = BufferedWriter::new();
        let app = App::new(&clipboard, &opener, &output);
        let err = app.run(None, &Settings::default()).unwrap_err();
        assert!(matches!(err, OpenGithubError::NotAFile(_)));
    }

    #[test]
    fn test_argument_without_extension_is_allowed() {
        let clipboard = StaticClipboard::unavailable();
        let opener = RecordingOpener::new();
        let output = BufferedWriter::new();
        let app = App::new(&clipboard, &opener, &output)
            .with_locator(RepoLocator::with_runner(runner("/w")))
            .with_resolver(PathResolver::with_lister(MockTree::new().file("/w/Makefile")));
        let url = app.run(Some("Makefile"), &settings("/w")).unwrap();
        assert_eq!(url, "https://github.com/acme/widgets/blob/main/Makefile");
    }

    #[test]
    fn test_parse_error_stops_run() {
        let clipboard = StaticClipboard::unavailable();
        let opener = RecordingOpener::new();
        let output = BufferedWriter::new();
        let app = App::new(&clipboard, &opener, &output)
            .with_locator(RepoLocator::with_runner(ScriptedRunner::new()));
        let err = app.run(Some("a.rs:1:2"), &settings("/w")).unwrap_err();
        assert!(matches!(err, OpenGithubError::Parse(_)));
        assert!(app.locator().runner().calls().is_empty());
    }

    #[test]
    fn test_unsupported_remote() {
        let clipboard = StaticClipboard::unavailable();
        let opener = RecordingOpener::new();
        let output = BufferedWriter::new();
        let runner = ScriptedRunner::new()
            .respond("git rev-parse --show-toplevel", "/w")
            .respond("git config --get remote.origin.url", "https://gitlab.com/acme/widgets.git");
        let app = App::new(&clipboard, &opener, &output)
            .with_locator(RepoLocator::with_runner(runner))
            .with_resolver(PathResolver::with_lister(MockTree::new().file("/w/a.rs")));
        let settings = Settings {
            branch: Some("main".to_string()),
            ..settings("/w")
        };
        let err = app.run(Some("a.rs"), &settings).unwrap_err();
        assert!(matches!(err, OpenGithubError::Format(_)));
        assert!(opener.opened().is_empty());
    }

    #[test]
    fn test_open_failure_is_reported() {
        let clipboard = StaticClipboard::unavailable();
        let opener = RecordingOpener::failing();
        let output = BufferedWriter::new();
        let app = App::new(&clipboard, &opener, &output)
            .with_locator(RepoLocator::with_runner(runner("/w")))
            .with_resolver(PathResolver::with_lister(MockTree::new().file("/w/a.rs")));
        let err = app.run(Some("a.rs"), &settings("/w")).unwrap_err();
        assert!(matches!(err, OpenGithubError::Platform(_)));
        // the URL was still printed before opening failed
        assert_eq!(output.messages_at(MessageLevel::Success).len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_input_skips_search() {
        let clipboard = StaticClipboard::unavailable();
        let opener = RecordingOpener::new();
        let output = BufferedWriter::new();
        let app = App::new(&clipboard, &opener, &output)
            .with_locator(RepoLocator::with_runner(runner("/w")))
            .with_resolver(PathResolver::with_lister(MockTree::new()));
        let settings = Settings {
            open: false,
            ..Settings::default()
        };
        let url = app.run(Some("/w/x.rs"), &settings).unwrap();
        assert_eq!(url, "https://github.com/acme/widgets/blob/main/x.rs");
        assert!(
            output
                .messages_at(MessageLevel::Info)
                .iter()
                .all(|m| !m.starts_with("Using current directory"))
        );
    }
}
