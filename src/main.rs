use clap::Parser;
use env_logger::Env;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use vfsh::commands::ConfirmFn;
use vfsh::emulator::{Emulator, EmulatorOptions};
use vfsh::interpreter::ProcessOutcome;

#[derive(Parser)]
#[command(name = "vfsh")]
#[command(about = "A small shell emulator over the host or an in-memory filesystem")]
#[command(version)]
struct Cli {
    /// CSV record file describing an in-memory filesystem
    #[arg(long = "vfs")]
    vfs: Option<PathBuf>,

    /// Starting directory
    #[arg(long = "cwd")]
    cwd: Option<String>,

    /// Run a single command line and exit
    #[arg(short = 'c')]
    command: Option<String>,

    /// Replay a file of command lines
    #[arg(long = "script")]
    script: Option<PathBuf>,

    /// Pause after each replayed line, in milliseconds
    #[arg(long = "delay-ms", default_value_t = 0)]
    delay_ms: u64,

    /// Confirm `exit` without asking
    #[arg(long = "yes")]
    yes: bool,

    /// With -c, print the result as JSON (output, cwd, exit)
    #[arg(long = "json")]
    json: bool,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let confirm: ConfirmFn = if cli.yes {
        Arc::new(|_: &str| true)
    } else {
        Arc::new(|question: &str| ask(question))
    };

    let mut emulator = Emulator::new(EmulatorOptions {
        vfs: cli.vfs.clone(),
        cwd: cli.cwd.clone(),
        ..Default::default()
    })
    .await
    .with_confirm(confirm);

    for notice in emulator.notices() {
        println!("{}", notice);
    }

    if let Some(line) = cli.command.as_deref() {
        let outcome = emulator.exec(line).await;
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "output": outcome.output,
                    "cwd": emulator.cwd(),
                    "exit": outcome.exit_requested(),
                })
            );
        } else {
            print_outcome(&outcome);
        }
        std::process::exit(outcome.exit_code);
    }

    if let Some(path) = cli.script.as_ref() {
        let script = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error: Cannot read script file: {}: {}", path.display(), e);
                std::process::exit(1);
            }
        };
        replay(&mut emulator, &script, Duration::from_millis(cli.delay_ms)).await;
        return;
    }

    repl(&mut emulator).await;
}

/// Echo each line after the prompt, run it, then pause.
async fn replay(emulator: &mut Emulator, script: &str, delay: Duration) {
    println!("Available commands: {}", emulator.command_names().join(", "));
    for line in script.lines() {
        println!("{}{}", prompt(emulator), line);
        let outcome = emulator.exec(line).await;
        print_outcome(&outcome);
        if emulator.is_finished() {
            break;
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

async fn repl(emulator: &mut Emulator) {
    println!("Available commands: {}", emulator.command_names().join(", "));
    let stdin = std::io::stdin();
    loop {
        print!("{}", prompt(emulator));
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error: Cannot read input: {}", e);
                std::process::exit(1);
            }
        }

        let outcome = emulator.exec(line.trim_end_matches(['\n', '\r'])).await;
        print_outcome(&outcome);
        if emulator.is_finished() {
            break;
        }
    }
}

fn print_outcome(outcome: &ProcessOutcome) {
    for line in &outcome.output {
        println!("{}", line);
    }
}

/// `user@host:cwd$ ` with the home prefix shown as `~`.
fn prompt(emulator: &Emulator) -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "user".to_string());
    format!("{}@{}:{}$ ", user, hostname(), abbreviate_home(emulator.cwd(), emulator.home()))
}

fn abbreviate_home(cwd: &str, home: &str) -> String {
    if home == "/" {
        return cwd.to_string();
    }
    match cwd.strip_prefix(home) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{}", rest),
        _ => cwd.to_string(),
    }
}

#[cfg(unix)]
fn hostname() -> String {
    let mut buf = [0u8; 256];
    // SAFETY: the buffer is valid for its full length and gethostname writes at most that many bytes.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
    if rc != 0 {
        return "localhost".to_string();
    }
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

#[cfg(not(unix))]
fn hostname() -> String {
    std::env::var("COMPUTERNAME").unwrap_or_else(|_| "localhost".to_string())
}

fn ask(question: &str) -> bool {
    print!("{} [y/N] ", question);
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes" | "Yes")
}
