//! End-to-end runs of the `luckydraw` CLI against a temporary state file.

use serial_test::serial;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = dir.path().join("state.json");
        unsafe {
            std::env::remove_var("LUCKYDRAW_CONFIG");
            std::env::remove_var("LUCKYDRAW_AUTO_INTERVAL");
            std::env::set_var("LUCKYDRAW_STATE", &state);
            std::env::set_var("LUCKYDRAW_SEED", "11");
            std::env::set_var("LUCKYDRAW_REVEAL_DELAY_MS", "0");
            std::env::set_var("LUCKYDRAW_POLL_MS", "10");
        }
        Self { dir }
    }

    fn run(&self, args: &[&str]) -> (i32, String, String) {
        let mut argv = vec!["luckydraw"];
        argv.extend_from_slice(args);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = luckydraw_cli::run(argv, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn status(&self) -> serde_json::Value {
        let (code, out, _) = self.run(&["status", "--json"]);
        assert_eq!(code, 0);
        serde_json::from_str(&out).unwrap()
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        for key in [
            "LUCKYDRAW_STATE",
            "LUCKYDRAW_SEED",
            "LUCKYDRAW_REVEAL_DELAY_MS",
            "LUCKYDRAW_POLL_MS",
        ] {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }
}

#[test]
#[serial]
fn draw_undo_reset_cycle() {
    let ws = Workspace::new();
    assert_eq!(ws.run(&["apply", "--names", "Ada,Miles,Jo,Lin"]).0, 0);

    let (code, out, _) = ws.run(&["draw"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Round 1: "));
    let (code, out, _) = ws.run(&["draw"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Round 2: "));

    let state = ws.status();
    assert_eq!(state["round_counter"], 2);
    assert_eq!(state["pool"].as_array().unwrap().len(), 2);

    let (code, out, _) = ws.run(&["undo"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Undid Round 2: "));
    assert_eq!(ws.status()["round_counter"], 1);

    assert_eq!(ws.run(&["reset"]).0, 0);
    let state = ws.status();
    assert_eq!(state["round_counter"], 0);
    assert_eq!(state["pool"].as_array().unwrap().len(), 4);
    assert!(state["history"].as_array().unwrap().is_empty());
}

#[test]
#[serial]
fn exhausted_pool_exits_with_error() {
    let ws = Workspace::new();
    ws.run(&["apply", "--names", "Solo"]);
    assert_eq!(ws.run(&["draw"]).0, 0);
    let (code, out, err) = ws.run(&["draw"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert_eq!(err, "Error: No names left!\n");
}

#[test]
#[serial]
fn insufficient_pool_for_group_is_refused_without_change() {
    let ws = Workspace::new();
    ws.run(&["apply", "--names", "A,B"]);
    ws.run(&["group", "--enable", "--size", "3"]);
    let (code, _, err) = ws.run(&["draw"]);
    assert_eq!(code, 2);
    assert!(err.contains("need 3, have 2"));
    let state = ws.status();
    assert_eq!(state["round_counter"], 0);
    assert_eq!(state["pool"].as_array().unwrap().len(), 2);
}

#[test]
#[serial]
fn rig_rule_applies_through_the_cli() {
    let ws = Workspace::new();
    ws.run(&["apply", "--names", "A,B,C,D,E"]);
    let (code, out, _) = ws.run(&["rig", "add", "--name", "E", "--round", "1"]);
    assert_eq!(code, 0);
    assert!(out.contains("Rigging is off"));
    ws.run(&["rig", "on"]);
    let (_, out, _) = ws.run(&["draw"]);
    assert_eq!(out, "Round 1: E\n");

    let (_, out, _) = ws.run(&["rig", "list"]);
    assert!(out.contains("(enabled, used)"));

    ws.run(&["undo"]);
    let (_, out, _) = ws.run(&["rig", "list"]);
    assert!(out.trim_end().ends_with("(enabled)"));
}

#[test]
#[serial]
fn corrupt_state_is_ignored_with_warning() {
    let ws = Workspace::new();
    std::fs::write(ws.dir.path().join("state.json"), "][").unwrap();
    let (code, out, err) = ws.run(&["status"]);
    assert_eq!(code, 0);
    assert!(out.contains("Round: 0"));
    assert!(err.contains("WARNING: Ignoring saved state"));
}

#[test]
#[serial]
fn legacy_browser_state_loads() {
    let ws = Workspace::new();
    std::fs::write(
        ws.dir.path().join("state.json"),
        r#"{"originalNames":["A","B"],"remainingNames":["B"],
            "history":[{"round":1,"name":"A","timestamp":0}],"roundCounter":1}"#,
    )
    .unwrap();
    let (code, out, err) = ws.run(&["status"]);
    assert_eq!(code, 0, "stderr: {}", err);
    assert!(out.contains("Winner: Round 1: A"));
    assert!(out.contains("[1970-01-01 00:00:00] Round 1: A"));
}

#[test]
#[serial]
fn auto_runs_in_foreground_until_exhausted() {
    let ws = Workspace::new();
    ws.run(&["apply", "--names", "A,B"]);
    let (code, out, _) = ws.run(&["auto", "--interval", "1"]);
    assert_eq!(code, 0);
    assert!(out.contains("Round 2: "));
    assert!(out.ends_with("Auto-draw stopped after 2 rounds\n"));
    assert_eq!(ws.status()["auto_draw"]["enabled"], false);
}

#[test]
#[serial]
fn clear_then_status_starts_fresh() {
    let ws = Workspace::new();
    ws.run(&["apply", "--names", "A,B"]);
    ws.run(&["sound", "on"]);
    assert_eq!(ws.status()["sound_enabled"], true);
    let (code, out, _) = ws.run(&["clear"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Removed "));
    let state = ws.status();
    assert_eq!(state["sound_enabled"], false);
    assert!(state["original_names"].as_array().unwrap().is_empty());
}
