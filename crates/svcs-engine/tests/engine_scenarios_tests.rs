#![allow(clippy::unwrap_used, clippy::expect_used)]

// End-to-end command sequences against the filesystem repository

use std::fs;
use std::path::Path;

use svcs_core::{fingerprint, CommitLog, ExErrorKind, MatchMode, Repository};
use svcs_engine::{apply_engine_command, EngineCommand, EngineCommandResult, EngineOptions};
use svcs_store::FsRepository;
use tempfile::TempDir;

struct Fixture {
    temp_dir: TempDir,
    repo: FsRepository,
    options: EngineOptions,
}

impl Fixture {
    fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    fn with_options(options: EngineOptions) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let repo = FsRepository::open_or_init(temp_dir.path().join("vcs"), temp_dir.path())
            .expect("Failed to open repository");
        Self {
            temp_dir,
            repo,
            options,
        }
    }

    fn work(&self) -> &Path {
        self.temp_dir.path()
    }

    fn write(&self, name: &str, content: &str) {
        fs::write(self.work().join(name), content).unwrap();
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.work().join(name)).unwrap()
    }

    fn run(&mut self, args: &[&str]) -> EngineCommandResult {
        let cmd = EngineCommand::from_args(args).expect("known command");
        apply_engine_command(cmd, &mut self.repo, &self.options).expect("command succeeds")
    }

    fn say(&mut self, args: &[&str]) -> String {
        self.run(args).to_string()
    }

    fn log(&self) -> CommitLog {
        CommitLog::parse(&self.repo.read_log().unwrap().unwrap_or_default()).unwrap()
    }
}

#[test]
fn test_first_commit_then_dedup() {
    let mut fx = Fixture::new();
    fx.write("a.txt", "hello");

    assert_eq!(fx.say(&["config", "alice"]), "The username is alice.");
    assert_eq!(fx.say(&["add", "a.txt"]), "The file 'a.txt' is tracked.");
    assert_eq!(fx.say(&["commit", "first"]), "Changes are committed.");

    let expected = fingerprint([b"hello"]);
    let log = fx.log();
    assert_eq!(log.len(), 1);
    assert_eq!(log.records()[0].fingerprint, expected);
    assert_eq!(
        fs::read_to_string(
            fx.work()
                .join("vcs")
                .join("commits")
                .join(expected.as_str())
                .join("a.txt")
        )
        .unwrap(),
        "hello"
    );

    assert_eq!(fx.say(&["commit", "again"]), "Nothing to commit.");
    assert_eq!(fx.log().len(), 1);
}

#[test]
fn test_modify_commit_and_restore() {
    let mut fx = Fixture::new();
    fx.write("a.txt", "hello");
    fx.say(&["config", "alice"]);
    fx.say(&["add", "a.txt"]);
    fx.say(&["commit", "first"]);
    let first = fingerprint([b"hello"]);

    fx.write("a.txt", "hello world");
    assert_eq!(fx.say(&["commit", "second"]), "Changes are committed.");

    let log = fx.log();
    assert_eq!(log.len(), 2);
    assert_eq!(log.records()[0].message, "second");
    assert_eq!(log.records()[1].fingerprint, first);

    assert_eq!(
        fx.say(&["checkout", first.as_str()]),
        format!("Switched to commit {}.", first)
    );
    assert_eq!(fx.read("a.txt"), "hello");
}

#[test]
fn test_preconditions_reported_in_order() {
    let mut fx = Fixture::new();

    let result = fx.run(&["commit"]);
    assert_eq!(result.to_string(), "Message was not passed.");
    assert_eq!(result.kind(), Some(ExErrorKind::UserInputMissing));

    assert_eq!(fx.say(&["commit", "msg"]), "Please configure the user.");
    fx.say(&["config", "alice"]);
    assert_eq!(fx.say(&["commit", "msg"]), "No files staged.");
    assert!(fx.repo.read_log().unwrap().is_none());
}

#[test]
fn test_checkout_refusals() {
    let mut fx = Fixture::new();
    assert_eq!(fx.say(&["checkout"]), "Commit id was not passed.");
    assert_eq!(fx.say(&["checkout", "abc"]), "Commit does not exist.");
}

#[test]
fn test_missing_file_and_listing() {
    let mut fx = Fixture::new();
    assert_eq!(fx.say(&["add"]), "Add a file to the index.");
    assert_eq!(fx.say(&["add", "nope.txt"]), "Can't find 'nope.txt'.");

    fx.write("b.txt", "b");
    fx.write("a.txt", "a");
    fx.say(&["add", "b.txt"]);
    fx.say(&["add", "a.txt"]);
    fx.say(&["add", "b.txt"]);
    assert_eq!(fx.say(&["add"]), "Tracked files:\nb.txt\na.txt");
}

#[test]
fn test_log_rendering() {
    let mut fx = Fixture::new();
    assert_eq!(fx.say(&["log"]), "No commits yet.");

    fx.write("a.txt", "one");
    fx.say(&["config", "alice"]);
    fx.say(&["add", "a.txt"]);
    fx.say(&["commit", "first"]);
    fx.write("a.txt", "two");
    fx.say(&["commit", "second"]);

    let text = fx.say(&["log"]);
    let expected = format!(
        "commit {}\nAuthor: alice\nsecond\n\ncommit {}\nAuthor: alice\nfirst",
        fingerprint([b"two"]),
        fingerprint([b"one"])
    );
    assert_eq!(text, expected);
}

#[test]
fn test_restore_leaves_untracked_files_alone() {
    let mut fx = Fixture::new();
    fx.write("a.txt", "v1");
    fx.say(&["config", "alice"]);
    fx.say(&["add", "a.txt"]);
    fx.say(&["commit", "first"]);
    let first = fingerprint([b"v1"]);

    fx.write("a.txt", "v2");
    fx.write("notes.txt", "scratch");
    fx.say(&["checkout", first.as_str()]);

    assert_eq!(fx.read("a.txt"), "v1");
    assert_eq!(fx.read("notes.txt"), "scratch");
}

#[test]
fn test_returning_to_committed_content_is_nothing_to_commit() {
    let mut fx = Fixture::new();
    fx.write("a.txt", "v1");
    fx.say(&["config", "alice"]);
    fx.say(&["add", "a.txt"]);
    fx.say(&["commit", "first"]);
    fx.write("a.txt", "v2");
    fx.say(&["commit", "second"]);

    fx.write("a.txt", "v1");
    assert_eq!(fx.say(&["commit", "third"]), "Nothing to commit.");
    assert_eq!(fx.log().len(), 2);
}

#[test]
fn test_fragment_checkout_under_both_modes() {
    let mut fx = Fixture::new();
    fx.write("a.txt", "hello");
    fx.say(&["config", "alice"]);
    fx.say(&["add", "a.txt"]);
    fx.say(&["commit", "first"]);
    let full = fingerprint([b"hello"]);
    let fragment = &full.as_str()[..8];

    // Accepted by the log; no snapshot carries the fragment's name, so
    // nothing is restored
    fx.write("a.txt", "changed");
    assert_eq!(
        fx.say(&["checkout", fragment]),
        format!("Switched to commit {}.", fragment)
    );
    assert_eq!(fx.read("a.txt"), "changed");

    fx.options.match_mode = MatchMode::Exact;
    assert_eq!(fx.say(&["checkout", fragment]), "Commit does not exist.");
    assert_eq!(
        fx.say(&["checkout", full.as_str()]),
        format!("Switched to commit {}.", full)
    );
}

#[test]
fn test_multi_paragraph_message_under_both_modes() {
    for mode in [MatchMode::Substring, MatchMode::Exact] {
        let mut fx = Fixture::with_options(EngineOptions { match_mode: mode });
        fx.write("a.txt", "hello");
        fx.say(&["config", "alice"]);
        fx.say(&["add", "a.txt"]);

        assert_eq!(
            fx.say(&["commit", "title\n\nbody"]),
            "Changes are committed.",
            "{:?}",
            mode
        );
        assert_eq!(
            fx.say(&["log"]),
            format!("commit {}\nAuthor: alice\ntitle\n\nbody", fingerprint([b"hello"])),
            "{:?}",
            mode
        );
        assert_eq!(fx.say(&["commit", "again"]), "Nothing to commit.", "{:?}", mode);
        assert_eq!(fx.say(&["commit", "\nleading"]), "Nothing to commit.", "{:?}", mode);
        assert_eq!(fx.log().len(), 1, "{:?}", mode);
    }
}

#[test]
fn test_nested_path_stored_under_flat_name() {
    let mut fx = Fixture::new();
    fs::create_dir_all(fx.work().join("docs")).unwrap();
    fx.write("docs/readme.txt", "read me");
    fx.say(&["config", "alice"]);
    fx.say(&["add", "docs/readme.txt"]);
    fx.say(&["commit", "docs"]);

    let id = fingerprint([b"read me"]);
    let snapshot = fx.repo.read_snapshot(id.as_str()).unwrap().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "readme.txt");
}

#[test]
fn test_deleted_tracked_file_aborts_commit() {
    let mut fx = Fixture::new();
    fx.write("a.txt", "hello");
    fx.say(&["config", "alice"]);
    fx.say(&["add", "a.txt"]);
    fs::remove_file(fx.work().join("a.txt")).unwrap();

    let cmd = EngineCommand::from_args(&["commit", "msg"]).unwrap();
    let err = apply_engine_command(cmd, &mut fx.repo, &fx.options).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert!(fx.repo.read_log().unwrap().is_none());
}
