use std::process::Command;

fn run_headless(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_coffee_truck"))
        .args(args)
        .env("RUST_LOG", "warn,coffee_truck=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_headless(&["--ticks", "200", "--seed", "7"]);

    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== Final State ==="), "stdout: {}", stdout);
    assert!(stdout.contains("Money: $"), "stdout: {}", stdout);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
}

/// Test that run statistics are logged
#[test]
fn test_simulation_statistics_logged() {
    let output = run_headless(&["--ticks", "300", "--seed", "3", "--policy", "generous"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    for statistic in [
        "Total customers spawned:",
        "Total customers lured:",
        "Orders resolved:",
        "Endings:",
        "Service rate:",
    ] {
        assert!(stderr.contains(statistic), "Missing '{}' statistic", statistic);
    }
}

/// Test that the same seed gives the same run
#[test]
fn test_seeded_runs_are_reproducible() {
    let first = run_headless(&["--ticks", "150", "--seed", "11"]);
    let second = run_headless(&["--ticks", "150", "--seed", "11"]);
    assert!(first.status.success() && second.status.success());
    assert_eq!(first.stdout, second.stdout);
}

/// Test that a bad config file is reported instead of ignored
#[test]
fn test_missing_config_fails() {
    let output = run_headless(&["--ticks", "10", "--config", "/definitely/not/here.toml"]);
    assert!(!output.status.success());
}
