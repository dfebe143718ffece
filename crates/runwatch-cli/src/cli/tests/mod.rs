use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_wait_single_job() {
    let cli = parse(&["runwatch", "wait", "run-1"]);
    assert!(cli.config.is_none());
    assert!(!cli.log_stderr);
    match cli.command {
        CliCommand::Wait {
            job_ids,
            delay,
            max_attempts,
        } => {
            assert_eq!(job_ids, vec!["run-1".to_string()]);
            assert!(delay.is_none());
            assert!(max_attempts.is_none());
        }
        _ => panic!("expected Wait"),
    }
}

#[test]
fn cli_parse_wait_many_jobs_with_flags() {
    let cli = parse(&[
        "runwatch",
        "wait",
        "1",
        "2",
        "3",
        "--delay",
        "2.5",
        "--max-attempts",
        "50",
    ]);
    match cli.command {
        CliCommand::Wait {
            job_ids,
            delay,
            max_attempts,
        } => {
            assert_eq!(job_ids, vec!["1", "2", "3"]);
            assert_eq!(delay, Some(2.5));
            assert_eq!(max_attempts, Some(50));
        }
        _ => panic!("expected Wait"),
    }
}

#[test]
fn cli_parse_wait_requires_job_id() {
    assert!(Cli::try_parse_from(["runwatch", "wait"]).is_err());
}

#[test]
fn cli_parse_status() {
    match parse(&["runwatch", "status", "42"]).command {
        CliCommand::Status { job_id } => assert_eq!(job_id, "42"),
        _ => panic!("expected Status"),
    }
}

#[test]
fn cli_parse_check() {
    match parse(&["runwatch", "check", "42"]).command {
        CliCommand::Check { job_id } => assert_eq!(job_id, "42"),
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = parse(&[
        "runwatch",
        "check",
        "7",
        "--config",
        "/tmp/runwatch.toml",
        "--log-stderr",
    ]);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/runwatch.toml")));
    assert!(cli.log_stderr);
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["runwatch", "submit", "x"]).is_err());
}
