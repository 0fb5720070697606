use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_user-dynamics"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to invoke the user-dynamics binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

#[test]
fn simulate_prints_the_dashboard() {
    let output = run(&["simulate", "--color", "never", "--explain"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.starts_with("Maqueta Virtual"));
    assert!(text.contains("5.0 usuarios/seg"));
    assert!(text.contains("10.0%"));
    assert!(text.contains("Usuarios que Abandonan"));
    assert!(text.contains("dU/dt"));
    assert!(text.contains("Escenario: flow:v1:"));
}

#[test]
fn scenario_codes_reproduce_runs() {
    let first = run(&[
        "simulate",
        "--color",
        "never",
        "--initial-users",
        "80",
        "--arrival-rate",
        "12.5",
        "--duration",
        "30",
    ]);
    assert!(first.status.success());
    let text = stdout(&first);
    let code = text
        .lines()
        .find_map(|line| line.strip_prefix("Escenario: "))
        .expect("scenario footer");

    let original = run(&[
        "simulate",
        "--format",
        "csv",
        "--initial-users",
        "80",
        "--arrival-rate",
        "12.5",
        "--duration",
        "30",
    ]);
    let replayed = run(&["simulate", "--format", "csv", "--scenario", code]);
    assert!(replayed.status.success());
    assert_eq!(stdout(&original), stdout(&replayed));
    assert_eq!(stdout(&replayed).lines().count(), 32);
}

#[test]
fn patterns_print_both_reports() {
    let output = run(&["patterns"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Conectado a la base de datos\nGenerando reporte en PDF\n\
         Conectado a la base de datos\nGenerando reporte en HTML\n"
    );
}

#[test]
fn unknown_report_type_fails() {
    let output = run(&["patterns", "--kind", "XML"]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "Conectado a la base de datos\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Tipo de reporte desconocido"));
}

#[test]
fn reports_before_an_unknown_type_are_kept() {
    let output = run(&["patterns", "--kind", "PDF", "--kind", "pdf"]);
    assert!(!output.status.success());
    assert_eq!(
        stdout(&output),
        "Conectado a la base de datos\nGenerando reporte en PDF\n\
         Conectado a la base de datos\n"
    );
}

#[test]
fn invalid_config_file_fails_with_context() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    std::io::Write::write_all(&mut file, b"duration_secs = 5\n").expect("write temp file");
    let path = file.path().to_str().expect("utf-8 path").to_owned();

    let output = run(&["simulate", "--config", &path]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid simulation parameters"));
}

#[test]
fn oversized_charts_are_rejected_without_panicking() {
    for args in [
        ["simulate", "--width", "18446744073709551615"],
        ["simulate", "--height", "100000"],
    ] {
        let output = run(&args);
        assert_eq!(output.status.code(), Some(2), "{args:?}");
        assert!(stdout(&output).is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("panicked"), "{stderr}");
    }
}
