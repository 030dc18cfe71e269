//! Line editing and dispatch.

use std::cell::RefCell;

use libshell::shell::config::Config;
use libshell::shell::output::CliOutput;
use libshell::shell::registry::{Binding, CommandHandler, Request};
use libshell::shell::Shell;

use super::mock::{send, send_line, Recorder, SharedSink};

fn new_shell(arena: &mut [u8]) -> (Shell<'_, SharedSink>, SharedSink) {
    let sink = SharedSink::new();
    let shell = Shell::new(arena, sink.clone(), Config::default()).unwrap();
    (shell, sink)
}

#[test]
fn test_single_command_repeated() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    for i in 0..50 {
        send_line(&mut shell, &format!("set led 1 {i}"));
        shell.process();

        assert_eq!(recorder.len(), i + 1);
        assert_eq!(recorder.last(), ("set".to_string(), format!("led 1 {i}")));
    }
}

#[test]
fn test_sending_by_parts() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    send(&mut shell, "set ");
    shell.process();
    assert!(recorder.is_empty());

    send(&mut shell, "led 1");
    shell.process();
    assert!(recorder.is_empty());

    send_line(&mut shell, " 1");
    shell.process();

    assert_eq!(recorder.last(), ("set".to_string(), "led 1 1".to_string()));
}

#[test]
fn test_multiple_commands_in_one_drain() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    for i in 0..3 {
        send_line(&mut shell, &format!("set led 1 {i}"));
    }
    shell.process();

    let commands = recorder.all();
    assert_eq!(commands.len(), 3);
    for (i, (name, args)) in commands.iter().enumerate() {
        assert_eq!(name, "set");
        assert_eq!(args, &format!("led 1 {i}"));
    }
}

#[test]
fn test_removing_some_chars() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    send_line(&mut shell, "s\x08get led\x08\x08\x08jack 1\x0856\x08");
    shell.process();

    assert_eq!(recorder.last(), ("get".to_string(), "jack 5".to_string()));
}

#[test]
fn test_removing_all_chars() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    send_line(&mut shell, "set\x08\x08\x08\x08\x08get led");
    shell.process();

    assert_eq!(recorder.last(), ("get".to_string(), "led".to_string()));
}

#[test]
fn test_delete_behaves_as_backspace() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    send_line(&mut shell, "getx\x7f led");
    shell.process();

    assert_eq!(recorder.last(), ("get".to_string(), "led".to_string()));
}

#[test]
fn test_backspace_echo_sequence() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    send(&mut shell, "ab\x08");
    shell.process();

    assert_eq!(sink.raw(), "ab\x08 \x08");
    assert_eq!(sink.visible(), "a");
}

#[test]
fn test_empty_line_redraws_prompt_only() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    send_line(&mut shell, "");
    shell.process();

    assert!(recorder.is_empty());
    assert_eq!(sink.raw(), "\r\n> ");
}

#[test]
fn test_whitespace_only_line() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    send_line(&mut shell, "   ");
    shell.process();

    assert!(recorder.is_empty());
    assert!(!sink.raw().contains("Unknown command"));
}

#[test]
fn test_line_terminators_dispatch_once() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    for terminator in ["\r", "\n", "\r\n"] {
        recorder.clear();
        send(&mut shell, "get led");
        send(&mut shell, terminator);
        shell.process();

        assert_eq!(recorder.len(), 1, "terminator {:?}", terminator);
        assert_eq!(recorder.last(), ("get".to_string(), "led".to_string()));
    }
}

#[test]
fn test_arrow_keys_are_swallowed() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    // Up arrow, then a multi-byte CSI with parameters, mid-line.
    send_line(&mut shell, "ab\x1b[Ac\x1b[1;5Dd");
    shell.process();

    assert_eq!(recorder.last(), ("abcd".to_string(), String::new()));
}

#[test]
fn test_unfinished_escape_swallows_one_byte() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    send_line(&mut shell, "ab\x1bqc");
    shell.process();

    assert_eq!(recorder.last(), ("abc".to_string(), String::new()));
}

#[test]
fn test_unknown_command_diagnostic() {
    let mut arena = [0u8; 512];
    let (mut shell, sink) = new_shell(&mut arena);

    send_line(&mut shell, "get led");
    shell.process();

    assert!(sink.raw().contains("Unknown command \"get\""));
}

#[test]
fn test_bound_name_without_handler_falls_back() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));
    shell
        .add_binding(Binding {
            name: "get",
            help: None,
            tokenize_args: false,
            handler: None,
        })
        .unwrap();

    send_line(&mut shell, "get led");
    shell.process();

    assert_eq!(recorder.last(), ("get".to_string(), "led".to_string()));
}

#[test]
fn test_bound_handler_wins_over_fallback() {
    let fallback = Recorder::default();
    let known = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&fallback));
    shell
        .add_binding(Binding {
            name: "get",
            help: None,
            tokenize_args: false,
            handler: Some(&known),
        })
        .unwrap();

    send_line(&mut shell, "get led");
    shell.process();

    assert!(fallback.is_empty());
    assert_eq!(known.last(), ("get".to_string(), "led".to_string()));
}

#[test]
fn test_tokenized_arguments() {
    struct Args {
        seen: RefCell<Vec<String>>,
    }

    impl CommandHandler for Args {
        fn execute(&self, _out: &mut dyn CliOutput, request: Request<'_>) {
            let mut seen = self.seen.borrow_mut();
            for i in 0..request.arg_count() {
                seen.push(request.arg(i).unwrap().to_string());
            }
            assert!(request.tokenized());
        }
    }

    let args = Args {
        seen: RefCell::new(Vec::new()),
    };
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell
        .add_binding(Binding {
            name: "sum",
            help: None,
            tokenize_args: true,
            handler: Some(&args),
        })
        .unwrap();

    send_line(&mut shell, "sum 1  2   3");
    shell.process();

    assert_eq!(*args.seen.borrow(), ["1", "2", "3"]);
}

#[test]
fn test_last_submitted_line_is_recorded() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, _sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    send_line(&mut shell, "set led 1 42");
    shell.process();
    assert_eq!(shell.last_submitted(), "set led 1 42");

    // A blank line does not clobber the record.
    send_line(&mut shell, "");
    shell.process();
    assert_eq!(shell.last_submitted(), "set led 1 42");
}

#[test]
fn test_prompt_redrawn_after_each_submission() {
    let recorder = Recorder::default();
    let mut arena = [0u8; 512];
    let (mut shell, sink) = new_shell(&mut arena);
    shell.set_fallback(Some(&recorder));

    send_line(&mut shell, "get led");
    shell.process();

    assert!(sink.raw().ends_with("\r\n> "));
}
