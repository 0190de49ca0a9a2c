//! CLI argument parsing and end-to-end tests.
//!
//! Parsing is tested through `try_parse_from` on a mirror of the CLI
//! structs; behaviour is tested by running the built `hhl` binary.

// ============================================================================
// Clap argument parsing
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "hhl")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Run {
            #[arg(short, long)]
            scenarios: Option<String>,
            #[arg(short, long)]
            config: Option<String>,
            #[arg(short, long, default_value = "table")]
            format: String,
            #[arg(long)]
            skip_self_check: bool,
        },
        List {
            #[arg(short, long)]
            scenarios: Option<String>,
        },
        SelfCheck {
            #[arg(short, long, default_value = "1.2", allow_negative_numbers = true)]
            theta: f64,
        },
        Version,
    }

    #[test]
    fn test_run_defaults() {
        let cli = TestCli::try_parse_from(["hhl", "run"]).unwrap();
        assert_eq!(cli.verbose, 0);
        match cli.command {
            TestCommands::Run {
                scenarios,
                config,
                format,
                skip_self_check,
            } => {
                assert!(scenarios.is_none());
                assert!(config.is_none());
                assert_eq!(format, "table");
                assert!(!skip_self_check);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_all_options() {
        let cli = TestCli::try_parse_from([
            "hhl",
            "-vv",
            "run",
            "-s",
            "s.yaml",
            "--config",
            "c.yaml",
            "--format",
            "json",
            "--skip-self-check",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            TestCommands::Run {
                scenarios,
                config,
                format,
                skip_self_check,
            } => {
                assert_eq!(scenarios.as_deref(), Some("s.yaml"));
                assert_eq!(config.as_deref(), Some("c.yaml"));
                assert_eq!(format, "json");
                assert!(skip_self_check);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = TestCli::try_parse_from(["hhl", "list", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3);
        assert!(matches!(cli.command, TestCommands::List { scenarios: None }));
    }

    #[test]
    fn test_self_check_negative_theta() {
        let cli = TestCli::try_parse_from(["hhl", "self-check", "--theta", "-0.5"]).unwrap();
        match cli.command {
            TestCommands::SelfCheck { theta } => assert!((theta + 0.5).abs() < 1e-15),
            _ => panic!("expected self-check"),
        }
    }

    #[test]
    fn test_self_check_rejects_non_number() {
        assert!(TestCli::try_parse_from(["hhl", "self-check", "--theta", "abc"]).is_err());
    }

    #[test]
    fn test_version_and_unknown() {
        let cli = TestCli::try_parse_from(["hhl", "version"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Version));
        assert!(TestCli::try_parse_from(["hhl", "solve"]).is_err());
        assert!(TestCli::try_parse_from(["hhl"]).is_err());
    }
}

// ============================================================================
// Binary end-to-end
// ============================================================================

mod binary {
    use std::io::Write;
    use std::process::{Command, Output};

    fn hhl(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_hhl"))
            .args(args)
            .env_remove("RUST_LOG")
            .env_remove("HHL_CLOCK_BITS")
            .env_remove("HHL_AMPLITUDE_THRESHOLD")
            .env_remove("HHL_VERIFY_TOLERANCE")
            .output()
            .unwrap()
    }

    fn stdout(out: &Output) -> String {
        String::from_utf8_lossy(&out.stdout).into_owned()
    }

    #[test]
    fn test_run_reference_scenarios() {
        let out = hhl(&["run"]);
        assert!(out.status.success());
        let text = stdout(&out);
        assert!(text.contains("lam-1-2/b=|1>"));
        assert!(text.contains("9.000"));
        assert!(text.contains("overlap corrected"));
    }

    #[test]
    fn test_run_json() {
        let out = hhl(&["run", "--format", "json", "--skip-self-check"]);
        assert!(out.status.success());
        let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
        assert_eq!(json["passed"], serde_json::Value::Bool(true));
        let entries = json["scenarios"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 4);
        let quantum = entries[0]["result"]["Ok"]["quantum"][0].as_f64().unwrap();
        assert!((quantum - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_failing_scenario_sets_exit_code() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "- name: good\n  a: [[1.0, -0.3333333333333333], [-0.3333333333333333, 1.0]]\n  b: [0.0, 1.0]\n  verify: true\n\
             - name: skew\n  a: [[1.0, 2.0], [0.0, 1.0]]\n  b: [0.0, 1.0]\n  verify: true"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();
        let out = hhl(&["run", "--scenarios", path]);
        assert_eq!(out.status.code(), Some(1));
        assert!(stdout(&out).contains("good"));
        assert!(String::from_utf8_lossy(&out.stderr).contains("1 of 2"));
    }

    #[test]
    fn test_verbose_run_logs_batch_summary() {
        let out = hhl(&["-v", "run", "--skip-self-check"]);
        assert!(out.status.success());
        assert!(stdout(&out).contains("batch finished"));

        let quiet = hhl(&["run", "--skip-self-check"]);
        assert!(!stdout(&quiet).contains("batch finished"));
    }

    #[test]
    fn test_unknown_format() {
        let out = hhl(&["run", "--format", "xml"]);
        assert_eq!(out.status.code(), Some(1));
    }

    #[test]
    fn test_missing_scenario_file() {
        let out = hhl(&["list", "--scenarios", "/nonexistent/s.yaml"]);
        assert_eq!(out.status.code(), Some(1));
    }

    #[test]
    fn test_list() {
        let out = hhl(&["list"]);
        assert!(out.status.success());
        let text = stdout(&out);
        assert!(text.contains("lam-1-3/b=|0>"));
        assert!(text.contains("[[1.000, -0.500], [-0.500, 1.000]]"));
    }

    #[test]
    fn test_self_check() {
        let out = hhl(&["self-check", "--theta", "-0.5"]);
        assert!(out.status.success());
        assert!(stdout(&out).contains("Ry(-0.5)"));
    }
}
