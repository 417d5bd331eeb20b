//! read-guard - keep Claude Code Read calls to a sensible size
//!
//! # Usage
//!
//! ```bash
//! # As a Claude Code hook (reads JSON from stdin, reports on stderr, exit code decides)
//! echo '{"tool_name":"Read","tool_input":{"limit":700}}' | read-guard
//!
//! # With an explicit config file
//! read-guard --config ~/.claude/hooks/hooks-config.json
//!
//! # Dry-run mode (blocks are reported as warnings)
//! read-guard --dry-run
//! ```

use std::env;

use read_guard::{
    audit::AuditLogger, config::Config, dispatch, engine::ReadGuard, output::HookOutput,
};
use tracing_subscriber::EnvFilter;

/// Tracing filter variable; tracing stays off when unset
const LOG_FILTER_ENV: &str = "READ_GUARD_LOG";

/// Print version information
fn print_version() {
    println!("read-guard {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"read-guard - warn on or block oversized Read requests

USAGE:
    read-guard [OPTIONS] < hook-input.json

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -c, --config PATH       Path to config file (default: hooks-config.json next to the binary)
    -d, --dry-run           Dry-run mode (report blocks as warnings)

EXIT CODES:
    0   allow (also for other tools, whole-file reads and internal errors)
    1   warn  (thresholds.warn.exit_code)
    2   block (thresholds.block.exit_code)

ENVIRONMENT:
    CLAUDE_PROJECT_DIR       Root for logs/tools/Read.jsonl (default: current directory)
    READ_GUARD_DISABLED=1    Disable all checks
    READ_GUARD_WARN_ONLY=1   Warn but don't block
    READ_GUARD_LOG=debug     Internal tracing to stderr

USAGE AS HOOK:
    Configure in .claude/settings.json:
    {{
      "hooks": {{
        "PreToolUse": [{{
          "matcher": "Read",
          "hooks": [{{ "type": "command", "command": ".claude/hooks/read-guard" }}]
        }}]
      }}
    }}
"#
    );
}

/// Parse command line arguments
struct Args {
    help: bool,
    version: bool,
    dry_run: bool,
    config_path: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            dry_run: false,
            config_path: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-d" | "--dry-run" => result.dry_run = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                arg if arg.starts_with("--config=") => {
                    let path = arg.trim_start_matches("--config=");
                    result.config_path = Some(path.to_string());
                }
                _ => {}
            }
            i += 1;
        }

        result
    }
}

fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_env(LOG_FILTER_ENV) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Drive one evaluation on a single-threaded runtime
fn run(guard: ReadGuard, logger: AuditLogger) -> HookOutput {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return HookOutput::diagnostic(format_args!("Error: {}", e)),
    };

    runtime.block_on(dispatch::run_isolated(async move {
        let mut stdin = tokio::io::stdin();
        dispatch::handle_stream(&guard, &logger, &mut stdin).await
    }))
}

fn main() {
    let args = Args::parse();

    // Handle help and version
    if args.help {
        print_help();
        return;
    }

    if args.version {
        print_version();
        return;
    }

    init_tracing();

    // Load configuration
    let config = if let Some(ref path) = args.config_path {
        let path = Config::expand_path(path);
        Config::load_from(&path).unwrap_or_else(|e| {
            eprintln!("[read-guard] Warning: {}", e);
            Config::default()
        })
    } else {
        Config::load()
    };

    let mut guard = ReadGuard::from_env(config);
    if args.dry_run {
        guard = guard.with_warn_only(true);
    }

    let logger = AuditLogger::from_env();

    let output = run(guard, logger);
    output.emit();
    std::process::exit(output.exit_code);
}
