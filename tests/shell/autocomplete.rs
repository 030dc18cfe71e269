//! Tab completion.

use libshell::shell::config::Config;
use libshell::shell::registry::Binding;
use libshell::shell::Shell;

use super::mock::{send, send_line, Recorder, SharedSink};

const NAMES: [&str; 5] = ["get", "set", "get-new", "reset-first", "reset-second"];

fn setup<'a>(
    arena: &'a mut [u8],
    recorder: &'a Recorder,
) -> (Shell<'a, SharedSink>, SharedSink) {
    let sink = SharedSink::new();
    let mut shell = Shell::new(arena, sink.clone(), Config::default()).unwrap();
    for name in NAMES {
        shell
            .add_binding(Binding {
                name,
                help: None,
                tokenize_args: false,
                handler: Some(recorder),
            })
            .unwrap();
    }
    (shell, sink)
}

#[test]
fn test_single_candidate() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, sink) = setup(&mut arena, &recorder);

    send(&mut shell, "s\t");
    shell.process();

    assert_eq!(sink.raw(), "set ");
}

#[test]
fn test_submit_autocompleted_command() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = setup(&mut arena, &recorder);

    send_line(&mut shell, "s\t");
    shell.process();

    assert_eq!(recorder.last(), ("set".to_string(), String::new()));
    assert!(shell.last_submission_was_autocompleted());
}

#[test]
fn test_submit_common_prefix_completion() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = setup(&mut arena, &recorder);

    send_line(&mut shell, "g\t");
    shell.process();

    assert_eq!(recorder.last(), ("get".to_string(), String::new()));
}

#[test]
fn test_builtin_help_is_a_candidate() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, sink) = setup(&mut arena, &recorder);

    send(&mut shell, "h\t");
    shell.process();

    assert_eq!(sink.raw(), "help ");
}

#[test]
fn test_common_prefix_extension() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, sink) = setup(&mut arena, &recorder);

    send(&mut shell, "g\t");
    shell.process();

    assert_eq!(sink.raw(), "get");
}

#[test]
fn test_common_prefix_extension_with_divergent_suffix() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, sink) = setup(&mut arena, &recorder);

    send(&mut shell, "r\t");
    shell.process();

    assert_eq!(sink.raw(), "reset-");
}

#[test]
fn test_candidate_listing() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, sink) = setup(&mut arena, &recorder);

    send(&mut shell, "get\t");
    shell.process();

    assert_eq!(sink.output(), "get\r\nget-new\r\nget");
}

#[test]
fn test_candidate_listing_includes_builtin_help() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, sink) = setup(&mut arena, &recorder);
    shell
        .add_binding(Binding {
            name: "hello",
            help: None,
            tokenize_args: false,
            handler: Some(&recorder),
        })
        .unwrap();

    send(&mut shell, "hel\t");
    shell.process();

    assert_eq!(sink.output(), "help\r\nhello\r\nhel");
}

#[test]
fn test_no_candidates() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, sink) = setup(&mut arena, &recorder);

    send(&mut shell, "m\t");
    shell.process();

    assert_eq!(sink.raw(), "m");
}

#[test]
fn test_completion_alone_is_not_a_submission() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = setup(&mut arena, &recorder);

    send(&mut shell, "s\t");
    shell.process();

    // The line was completed but never submitted.
    assert!(!shell.last_submission_was_autocompleted());

    send(&mut shell, "\r\n");
    shell.process();
    assert!(shell.last_submission_was_autocompleted());

    // A plain typed submission resets the mark.
    send_line(&mut shell, "get");
    shell.process();
    assert!(!shell.last_submission_was_autocompleted());
}

#[test]
fn test_typing_after_completion_clears_the_mark() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = setup(&mut arena, &recorder);

    send_line(&mut shell, "s\tled");
    shell.process();

    assert_eq!(recorder.last(), ("set".to_string(), "led".to_string()));
    assert!(!shell.last_submission_was_autocompleted());
}

#[test]
fn test_completion_keeps_the_line_editable() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = setup(&mut arena, &recorder);

    // Complete, then erase the trailing space and extend the name.
    send_line(&mut shell, "g\t-new");
    shell.process();

    assert_eq!(recorder.last(), ("get-new".to_string(), String::new()));
}
