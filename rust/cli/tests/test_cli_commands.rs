use pokerlab_cli::run;

use once_cell::sync::Lazy;
use std::sync::Mutex;

static ENV_GUARD: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const CONFIG_VARS: [&str; 5] = [
    "POKERLAB_CONFIG",
    "POKERLAB_ITERATIONS",
    "POKERLAB_SEED",
    "POKERLAB_THREADS",
    "POKERLAB_TIE_POLICY",
];

struct TempEnvVar {
    key: &'static str,
    previous: Option<String>,
}

impl TempEnvVar {
    fn unset(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe { std::env::remove_var(key) };
        Self { key, previous }
    }
}

impl Drop for TempEnvVar {
    fn drop(&mut self) {
        match &self.previous {
            Some(prev) => unsafe { std::env::set_var(self.key, prev) },
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}

fn clean_env() -> Vec<TempEnvVar> {
    CONFIG_VARS.iter().map(|k| TempEnvVar::unset(k)).collect()
}

fn run_cmd(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn help_lists_expected_commands() {
    let (code, stdout, _) = run_cmd(&["pokerlab", "--help"]);
    assert_eq!(code, 0);
    for cmd in ["equity", "multiway", "range", "eval", "ev", "bench", "cfg"] {
        assert!(
            stdout.contains(cmd),
            "help should list subcommand `{}`",
            cmd
        );
    }
}

#[test]
fn unknown_command_prints_usage() {
    let (code, _, stderr) = run_cmd(&["pokerlab", "shuffle"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Usage: pokerlab"));
    assert!(stderr.contains("multiway"));
}

#[test]
fn equity_json_is_consistent() {
    let _env = ENV_GUARD.lock().unwrap();
    let _cleared = clean_env();

    let (code, stdout, stderr) = run_cmd(&[
        "pokerlab",
        "equity",
        "--hero",
        "A♠A♥",
        "--range",
        "22-99",
        "--iterations",
        "20000",
        "--seed",
        "7",
        "--threads",
        "2",
        "--json",
    ]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let hero = json["hero_equity"].as_f64().unwrap();
    let villain = json["villain_equity"].as_f64().unwrap();
    assert!((80.0..=85.0).contains(&hero), "hero equity {}", hero);
    assert!((hero + villain - 100.0).abs() <= 0.1);
    let sum = json["hero_wins"].as_u64().unwrap()
        + json["villain_wins"].as_u64().unwrap()
        + json["ties"].as_u64().unwrap();
    assert_eq!(Some(sum), json["total_iterations"].as_u64());
}

#[test]
fn equity_with_board_and_ev() {
    let _env = ENV_GUARD.lock().unwrap();
    let _cleared = clean_env();

    let (code, stdout, stderr) = run_cmd(&[
        "pokerlab",
        "equity",
        "--hero",
        "AhKh",
        "--range",
        "QQ",
        "--board",
        "2h5h9hJc3d",
        "--iterations",
        "200",
        "--seed",
        "1",
        "--pot",
        "100",
        "--invest",
        "40",
    ]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("Hero equity:    100.0%"), "{}", stdout);
    assert!(stdout.contains("EV: hero +60.00 / villain -40.00"), "{}", stdout);
}

#[test]
fn equity_rejects_bad_input_with_exit_2() {
    let _env = ENV_GUARD.lock().unwrap();
    let _cleared = clean_env();

    let cases: [&[&str]; 4] = [
        &["pokerlab", "equity", "--hero", "AsXx", "--range", "KK"],
        &["pokerlab", "equity", "--hero", "AsKs", "--range", "QKs+"],
        &["pokerlab", "equity", "--hero", "AsKs", "--range", "KK", "--iterations", "5"],
        &["pokerlab", "equity", "--hero", "AsAh", "--range", "AA", "--board", "AdAc2s"],
    ];
    for args in cases {
        let (code, stdout, stderr) = run_cmd(args);
        assert_eq!(code, 2, "{:?}", args);
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("Error: "), "{}", stderr);
    }
}

#[test]
fn expired_deadline_exits_130() {
    let _env = ENV_GUARD.lock().unwrap();
    let _cleared = clean_env();

    let (code, _, stderr) = run_cmd(&[
        "pokerlab",
        "equity",
        "--hero",
        "AsKs",
        "--range",
        "22+",
        "--timeout-ms",
        "0",
    ]);
    assert_eq!(code, 130);
    assert!(stderr.contains("Interrupted"));
}

#[test]
fn multiway_reports_each_player() {
    let _env = ENV_GUARD.lock().unwrap();
    let _cleared = clean_env();

    let (code, stdout, stderr) = run_cmd(&[
        "pokerlab",
        "multiway",
        "--hero",
        "JhTh",
        "--opponent",
        "tight=QQ+, AKs",
        "--opponent",
        "loose=22+, A2s+",
        "--iterations",
        "1000",
        "--seed",
        "4",
        "--tie-policy",
        "split",
        "--json",
    ]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let players = json["players"].as_object().unwrap();
    assert_eq!(players.len(), 3);
    let total: f64 = players
        .values()
        .map(|p| p["equity"].as_f64().unwrap())
        .sum();
    assert!((total - 100.0).abs() <= 0.3);
    assert_eq!(json["tie_policy"], "split");
}

#[test]
fn multiway_rejects_duplicate_names() {
    let _env = ENV_GUARD.lock().unwrap();
    let _cleared = clean_env();

    let (code, _, stderr) = run_cmd(&[
        "pokerlab",
        "multiway",
        "--hero",
        "JhTh",
        "--opponent",
        "bob=QQ+",
        "--opponent",
        "Bob=22+",
    ]);
    assert_eq!(code, 2);
    assert!(stderr.contains("unique"), "{}", stderr);
}

#[test]
fn range_and_eval_commands() {
    let (code, stdout, _) = run_cmd(&["pokerlab", "range", "--range", "ATs+, 99-77"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Hands: AKs, AQs, AJs, ATs, 99, 88, 77"));
    assert!(stdout.contains("Combos: 34"));

    let (code, stdout, _) = run_cmd(&["pokerlab", "range", "--presets"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Premium"));

    let (code, stdout, _) = run_cmd(&["pokerlab", "eval", "--cards", "KsKdKc7h7s2d3c", "--json"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["category"], "Full House");
    assert_eq!(json["description"], "Full House, Ks over 7s");
}

#[test]
fn ev_command() {
    let (code, stdout, _) = run_cmd(&[
        "pokerlab", "ev", "--equity", "75", "--pot", "100", "--invest", "25",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("EV: +50.00"));
}
