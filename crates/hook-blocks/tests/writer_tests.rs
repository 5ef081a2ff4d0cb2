//! Integration tests for block upsert and removal.

use hook_blocks::markers::{Location, MarkerPair, locate};
use hook_blocks::Error;
use hook_blocks::writer::{BlockChange, remove_block, upsert_block};
use pretty_assertions::assert_eq;

const START: &str = "# >>> bg-task start >>>";
const END: &str = "# <<< bg-task end <<<";
const BODY: &str = "# bg-task: source function\nif [ -f \"$HOME/.config/bg-task/bg-task.zsh\" ]; then\n  source \"$HOME/.config/bg-task/bg-task.zsh\"\nfi";

fn markers() -> MarkerPair {
    MarkerPair::new(START, END).unwrap()
}

fn block() -> String {
    format!("{START}\n{BODY}\n{END}")
}

#[test]
fn test_concrete_install_scenario() {
    let input = "alias ll='ls -la'\n";

    let installed = upsert_block(input, &markers(), BODY).unwrap();
    assert_eq!(
        installed.content,
        format!("alias ll='ls -la'\n\n{}\n", block())
    );
    assert_eq!(installed.change, BlockChange::Inserted);

    let again = upsert_block(&installed.content, &markers(), BODY).unwrap();
    assert_eq!(again.content, installed.content);
    assert_eq!(again.change, BlockChange::Unchanged);

    let removed = remove_block(&installed.content, &markers());
    assert!(removed.removed);
    assert_eq!(removed.content, input);
}

#[test]
fn test_empty_file_round_trip() {
    let installed = upsert_block("", &markers(), BODY).unwrap();
    assert_eq!(installed.content, format!("{}\n", block()));

    let removed = remove_block(&installed.content, &markers());
    assert_eq!(removed.content, "");
}

#[test]
fn test_upsert_collapses_trailing_newlines() {
    let result = upsert_block("export A=1\n\n\n\n", &markers(), BODY).unwrap();
    assert_eq!(result.content, format!("export A=1\n\n{}\n", block()));
}

#[test]
fn test_upsert_replaces_in_place_and_keeps_surroundings() {
    let content = format!("header\n{START}\nold body\n{END}\nfooter\n");
    let result = upsert_block(&content, &markers(), BODY).unwrap();

    assert_eq!(result.change, BlockChange::Replaced);
    assert_eq!(result.content, format!("header\n{}\nfooter\n", block()));
}

#[test]
fn test_upsert_discards_manual_edits_inside_block() {
    let content = format!("{}\n", block()).replacen("\nfi", "\nfi\necho 'hand edit'", 1);
    let result = upsert_block(&content, &markers(), BODY).unwrap();

    assert!(!result.content.contains("hand edit"));
    assert_eq!(result.content, format!("{}\n", block()));
}

#[test]
fn test_upsert_appends_when_markers_reversed() {
    let content = format!("{END}\nuser line\n{START}\n");
    let result = upsert_block(&content, &markers(), BODY).unwrap();

    assert_eq!(result.change, BlockChange::Inserted);
    assert!(result.content.starts_with(&content));

    // The appended block is the one found on the next run.
    let again = upsert_block(&result.content, &markers(), BODY).unwrap();
    assert_eq!(again.change, BlockChange::Unchanged);
    assert_eq!(again.content, result.content);
}

#[test]
fn test_upsert_with_only_start_marker_keeps_user_text() {
    let content = format!("{START}\nuser line\n");
    let first = upsert_block(&content, &markers(), BODY).unwrap();
    let second = upsert_block(&first.content, &markers(), "changed body").unwrap();

    assert!(second.content.contains("user line"));
    assert!(second.content.contains("changed body"));
}

#[test]
fn test_ordering_invariant_after_upsert() {
    let inputs = [
        String::new(),
        format!("{END}\n"),
        format!("{START}\n"),
        format!("{END}\n{START}\n"),
        format!("{START}\nx\n{END}\n"),
    ];

    for input in inputs {
        let result = upsert_block(&input, &markers(), BODY).unwrap();
        assert!(
            matches!(locate(&result.content, &markers()), Location::Found(_)),
            "no well-formed block after upsert of {:?}",
            input
        );
    }
}

#[test]
fn test_remove_keeps_blank_line_between_neighbours() {
    let content = format!("a\n\n{}\n\nb\n", block());
    let removed = remove_block(&content, &markers());
    assert_eq!(removed.content, "a\n\nb\n");
}

#[test]
fn test_remove_block_at_top_of_file() {
    let content = format!("{}\nexport A=1\n", block());
    let removed = remove_block(&content, &markers());
    assert_eq!(removed.content, "export A=1\n");
}

#[test]
fn test_remove_without_block_is_byte_identical() {
    let content = format!("keep me\n{END}\n{START}\n");
    let removed = remove_block(&content, &markers());
    assert!(!removed.removed);
    assert_eq!(removed.content, content);
}

#[test]
fn test_body_repeating_start_marker_is_rejected() {
    let markers = MarkerPair::new("# acme: source function", "# acme end").unwrap();
    let body = "# acme: source function\nsource ~/x";

    let result = upsert_block("a\n", &markers, body);

    assert!(matches!(
        result,
        Err(Error::BodyContainsMarker { ref marker }) if marker == "# acme: source function"
    ));
}

#[test]
fn test_upsert_twice_on_crlf_content() {
    let once = upsert_block("a\r\n", &markers(), BODY).unwrap();
    let twice = upsert_block(&once.content, &markers(), BODY).unwrap();
    assert_eq!(twice.content, once.content);

    let removed = remove_block(&twice.content, &markers());
    assert!(removed.removed);
    assert!(!removed.content.contains(START));
}
