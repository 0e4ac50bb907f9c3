use pokerlab_cli::run;

use once_cell::sync::Lazy;
use std::io::Write;
use std::sync::Mutex;

static ENV_GUARD: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct TempEnvVar {
    key: &'static str,
    previous: Option<String>,
}

impl TempEnvVar {
    fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe { std::env::set_var(key, value) };
        Self { key, previous }
    }

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

fn cfg_json() -> (i32, serde_json::Value, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["pokerlab", "cfg"], &mut out, &mut err);
    let stderr = String::from_utf8_lossy(&err).into_owned();
    let json = serde_json::from_slice(&out).unwrap_or(serde_json::Value::Null);
    (code, json, stderr)
}

#[test]
fn cfg_shows_defaults() {
    let _env = ENV_GUARD.lock().unwrap();
    let _config = TempEnvVar::unset("POKERLAB_CONFIG");
    let _iterations = TempEnvVar::unset("POKERLAB_ITERATIONS");
    let _seed = TempEnvVar::unset("POKERLAB_SEED");
    let _threads = TempEnvVar::unset("POKERLAB_THREADS");
    let _policy = TempEnvVar::unset("POKERLAB_TIE_POLICY");

    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["iterations"]["value"], 10000);
    assert_eq!(json["iterations"]["source"], "default");
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["threads"]["value"], 1);
    assert_eq!(json["tie_policy"]["value"], "legacy");
}

#[test]
fn env_overrides_file() {
    let _env = ENV_GUARD.lock().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "iterations = 5000\nseed = 42\nthreads = 2\ntie_policy = \"split\""
    )
    .unwrap();
    let path = file.path().to_string_lossy().into_owned();

    let _config = TempEnvVar::set("POKERLAB_CONFIG", &path);
    let _iterations = TempEnvVar::set("POKERLAB_ITERATIONS", "2500");
    let _seed = TempEnvVar::unset("POKERLAB_SEED");
    let _threads = TempEnvVar::unset("POKERLAB_THREADS");
    let _policy = TempEnvVar::unset("POKERLAB_TIE_POLICY");

    let (code, json, stderr) = cfg_json();
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(json["iterations"]["value"], 2500);
    assert_eq!(json["iterations"]["source"], "env");
    assert_eq!(json["seed"]["value"], 42);
    assert_eq!(json["seed"]["source"], "file");
    assert_eq!(json["threads"]["value"], 2);
    assert_eq!(json["tie_policy"]["value"], "split");
    assert_eq!(json["tie_policy"]["source"], "file");
}

#[test]
fn invalid_values_are_reported() {
    let _env = ENV_GUARD.lock().unwrap();
    let _config = TempEnvVar::unset("POKERLAB_CONFIG");
    let _seed = TempEnvVar::unset("POKERLAB_SEED");
    let _threads = TempEnvVar::unset("POKERLAB_THREADS");
    let _policy = TempEnvVar::unset("POKERLAB_TIE_POLICY");

    {
        let _iterations = TempEnvVar::set("POKERLAB_ITERATIONS", "5");
        let (code, _, stderr) = cfg_json();
        assert_eq!(code, 2);
        assert!(stderr.contains("Configuration error"), "{}", stderr);
        assert!(stderr.contains("iterations must be between"), "{}", stderr);
    }
    {
        let _iterations = TempEnvVar::set("POKERLAB_ITERATIONS", "lots");
        let (code, _, stderr) = cfg_json();
        assert_eq!(code, 2);
        assert!(stderr.contains("Invalid iterations"), "{}", stderr);
    }
    {
        let _iterations = TempEnvVar::unset("POKERLAB_ITERATIONS");
        let _policy = TempEnvVar::set("POKERLAB_TIE_POLICY", "winner-takes-all");
        let (code, _, _) = cfg_json();
        assert_eq!(code, 2);
    }
}

#[test]
fn config_feeds_equity_command() {
    let _env = ENV_GUARD.lock().unwrap();
    let _config = TempEnvVar::unset("POKERLAB_CONFIG");
    let _iterations = TempEnvVar::set("POKERLAB_ITERATIONS", "300");
    let _seed = TempEnvVar::set("POKERLAB_SEED", "9");
    let _threads = TempEnvVar::unset("POKERLAB_THREADS");
    let _policy = TempEnvVar::unset("POKERLAB_TIE_POLICY");

    let args = ["pokerlab", "equity", "--hero", "KsKh", "--range", "AKo", "--json"];
    let mut first = Vec::new();
    let mut second = Vec::new();
    let mut err = Vec::new();
    assert_eq!(run(args, &mut first, &mut err), 0);
    assert_eq!(run(args, &mut second, &mut err), 0);

    let a: serde_json::Value = serde_json::from_slice(&first).unwrap();
    let b: serde_json::Value = serde_json::from_slice(&second).unwrap();
    assert_eq!(a["total_iterations"], 300);
    assert_eq!(a["hero_wins"], b["hero_wins"]);
    assert_eq!(a["ties"], b["ties"]);
}
