//! Driving the command loop with scripted input

mod common;

use common::{anon_region, FakeMemory, ScriptedSource, PID};
use memscan::console::{self, execute, Command, ConsoleOptions, Flow};
use memscan::process::Session;
use std::io::Cursor;

const OPTIONS: ConsoleOptions = ConsoleOptions {
    print_limit: 10,
    preview_bytes: 4,
};

fn fixture() -> (FakeMemory, ScriptedSource) {
    let memory = FakeMemory::new();
    memory.map_zeroed(0x1000, 64);
    memory.poke(0x1008, &500i32.to_le_bytes());
    memory.poke(0x1020, &500i32.to_le_bytes());
    (memory, ScriptedSource::new(vec![anon_region(0x1000, 64)]))
}

fn run_script(session: &mut Session<&FakeMemory>, script: &str) -> String {
    let mut out = Vec::new();
    console::run(session, Cursor::new(script), &mut out, OPTIONS).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_find_narrow_and_write() {
    let (memory, source) = fixture();
    let mut session = Session::new(PID, &memory, Box::new(source))
        .unwrap()
        .with_name("target");

    memory.poke(0x1020, &501i32.to_le_bytes());
    let output = run_script(&mut session, "f 500\nw 0 1000\np\nq\n");

    assert!(output.starts_with("(target 4242 32) matches: 1\n"));
    assert!(output.contains("0   0x1008             f4 01 00 00\n"));
    assert!(output.contains("write success 4 [232, 3, 0, 0]\n"));
    assert!(output.contains("0   0x1008             e8 03 00 00\n"));
    assert!(output.ends_with("bye\n"));
    assert_eq!(memory.peek(0x1008, 4), 1000i32.to_le_bytes().to_vec());
}

#[test]
fn test_two_phase_find() {
    let (memory, source) = fixture();
    let mut session = Session::new(PID, &memory, Box::new(source)).unwrap();

    let output = run_script(&mut session, "find 500\n");
    assert!(output.contains("matches: 2\n"));

    memory.poke(0x1008, &7i32.to_le_bytes());
    let output = run_script(&mut session, "find 500\n");
    assert!(output.contains("matches: 1\n"));
    assert!(output.contains("0x1020"));
    assert_eq!(session.results().len(), 1);
}

#[test]
fn test_set_width_changes_prompt() {
    let (memory, source) = fixture();
    let mut session = Session::new(PID, &memory, Box::new(source)).unwrap();

    let output = run_script(&mut session, "s 24\ns 16\nset x\n");

    assert_eq!(output, "(4242 4242 32) (4242 4242 32) (4242 4242 16) (4242 4242 16) \n");
}

#[test]
fn test_errors_are_reported_and_loop_continues() {
    let (memory, source) = fixture();
    let mut session = Session::new(PID, &memory, Box::new(source)).unwrap();

    let output = run_script(&mut session, "s 8\nf 3.5f\nw 0 1\nbogus\nc\n");

    assert!(output.contains("scan failed: Value '3.5f' has no encoding at 8 bits\n"));
    assert!(output.contains("write failed: No scan results to write to\n"));
    assert!(output.contains("help,h"));
    assert!(output.contains("success\n"));
}

#[test]
fn test_write_failure_is_reported_and_loop_continues() {
    let (memory, source) = fixture();
    let mut session = Session::new(PID, &memory, Box::new(source)).unwrap();

    memory.fail_writes(true);
    let output = run_script(&mut session, "f 500\nw 0 1\np\n");

    assert!(output.contains(
        "write failed: Failed to write memory at 0x1008: Input/output error\n"
    ));
    assert_eq!(output.matches("matches: 2\n").count(), 2);
    assert!(output.ends_with("(4242 4242 32) \n"));
    assert_eq!(session.results().len(), 2);
    assert_eq!(memory.peek(0x1008, 4), 500i32.to_le_bytes().to_vec());
}

#[test]
fn test_dump_and_regions() {
    let (memory, source) = fixture();
    let mut session = Session::new(PID, &memory, Box::new(source)).unwrap();

    let output = run_script(&mut session, "mem 1008 4\npmap\nreload\n");

    assert!(output.contains("read:4"));
    assert!(output.contains("0x1008              f4 01 00 00\n"));
    assert!(output.contains("[ anon ]\n"));
    assert!(output.contains("1 regions\n"));
}

#[test]
fn test_reload_failure_is_reported() {
    let (memory, source) = fixture();
    let fail = source.fail.clone();
    let mut session = Session::new(PID, &memory, Box::new(source)).unwrap();

    fail.set(true);
    let output = run_script(&mut session, "reload\n");

    assert!(output.contains("reload failed: Region enumeration failed"));
    assert_eq!(session.regions().len(), 1);
}

#[test]
fn test_print_limit_truncates() {
    let memory = FakeMemory::new();
    memory.map_zeroed(0x1000, 16);
    let source = ScriptedSource::new(vec![anon_region(0x1000, 16)]);
    let mut session = Session::new(PID, &memory, Box::new(source)).unwrap();
    session.scan("0").unwrap();

    let mut out = Vec::new();
    let options = ConsoleOptions {
        print_limit: 2,
        preview_bytes: 1,
    };
    let flow = execute(&mut session, Command::Print, &mut out, options).unwrap();

    assert_eq!(flow, Flow::Continue);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "matches: 13\n0   0x1000             00\n1   0x1001             00\n...\n"
    );
}

#[test]
fn test_quit_stops_reading() {
    let (memory, source) = fixture();
    let mut session = Session::new(PID, &memory, Box::new(source)).unwrap();

    let output = run_script(&mut session, "q\nf 500\n");

    assert_eq!(output, "(4242 4242 32) bye\n");
    assert!(session.results().is_empty());
}
