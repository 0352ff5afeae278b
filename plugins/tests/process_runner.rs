#![cfg(unix)]

use gelf_tee_core::api::{
    run_tee, LogRecord, MemorySink, OutputMode, RunOutcome, RunTeeArgs, RunnerError,
    RunnerPlugin, RunnerSession, RunnerStartArgs,
};
use gelf_tee_plugins::runner::ProcessRunnerPlugin;
use pretty_assertions::assert_eq;

async fn tee(
    cmd: &str,
    args: &[&str],
    mode: OutputMode,
) -> (Result<RunOutcome, RunnerError>, Vec<LogRecord>) {
    let plugin = ProcessRunnerPlugin::new();
    let sink = MemorySink::new();
    let start = RunnerStartArgs::new(cmd, args.iter().map(|s| s.to_string()).collect());
    let result = run_tee(RunTeeArgs {
        plugin: &plugin,
        start: &start,
        sink: &sink,
        host: "test-host",
        mode,
        line_channel_capacity: 8,
        silent: true,
    })
    .await;
    (result, sink.records())
}

#[tokio::test]
async fn batch_mode_joins_stdout_lines() {
    let (result, records) = tee("sh", &["-c", "echo a; echo b"], OutputMode::Batch).await;
    assert_eq!(result.unwrap(), RunOutcome::from_success(true));

    let content: Vec<_> = records.iter().filter(|r| r.failed.is_none()).collect();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0].full_message.as_deref(), Some("a\nb"));
    assert_eq!(records[0].short_message, "Started command: sh -c echo a; echo b");
}

#[tokio::test]
async fn nonzero_exit_collapses_to_one() {
    let (result, records) = tee("sh", &["-c", "echo x >&2; exit 3"], OutputMode::Split).await;
    let outcome = result.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.exit_code, 1);

    let messages: Vec<_> = records.iter().map(|r| r.short_message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["Started command: sh -c echo x >&2; exit 3", "x", "Command failed"]
    );
    assert_eq!(records[2].failed, Some(1));
}

#[tokio::test]
async fn missing_binary_fails_to_start() {
    let (result, records) = tee("/nonexistent/gelf-tee-test-binary", &[], OutputMode::Batch).await;
    assert!(matches!(result, Err(RunnerError::Spawn(_))));
    assert_eq!(records.len(), 1);
    assert!(records[0].short_message.starts_with("Failed to start command:"));
    assert_eq!(records[0].failed, Some(1));
}

#[tokio::test]
async fn large_output_on_both_streams_completes() {
    let script = "i=0; while [ $i -lt 2000 ]; do echo out$i; echo err$i >&2; i=$((i+1)); done";
    let (result, records) = tee("sh", &["-c", script], OutputMode::Batch).await;
    result.unwrap();

    let stdout = records
        .iter()
        .find(|r| r.short_message == "Standard Output")
        .and_then(|r| r.full_message.clone())
        .unwrap();
    let stderr = records
        .iter()
        .find(|r| r.short_message == "Standard Error Output")
        .and_then(|r| r.full_message.clone())
        .unwrap();
    let expected_out: Vec<String> = (0..2000).map(|i| format!("out{i}")).collect();
    let expected_err: Vec<String> = (0..2000).map(|i| format!("err{i}")).collect();
    assert_eq!(stdout.lines().collect::<Vec<_>>(), expected_out);
    assert_eq!(stderr.lines().collect::<Vec<_>>(), expected_err);
}

#[tokio::test]
async fn kill_terminates_a_running_child() {
    let plugin = ProcessRunnerPlugin::new();
    let start = RunnerStartArgs::new("sleep", vec!["30".into()]);
    let mut session = plugin.start_session(&start).await.unwrap();

    tokio::time::timeout(std::time::Duration::from_secs(5), session.kill())
        .await
        .expect("kill should not hang")
        .unwrap();
    let exit = session.wait().await.unwrap();
    assert!(!exit.success);
}
