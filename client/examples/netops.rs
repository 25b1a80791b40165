//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! # Network Equipment Administration Example
//!
//! Connects to a Telnet-managed device, optionally logs in, runs a batch of
//! commands and prints every response line.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example netops -- -H 192.0.2.1 -u admin -p secret \
//!     --prompt '[>#]' -c 'show version' -c 'show ip interface brief'
//! ```

use telops_client::{ClientConfig, TelnetClient};

/// Parsed command line flags
struct Args {
    host: String,
    port: u16,
    user: Option<String>,
    pass: Option<String>,
    commands: Vec<String>,
    prompt: String,
    login_prompt: Option<String>,
    password_prompt: Option<String>,
    prune_ctrl_seq: bool,
    debug: bool,
    verbosity: u8,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            host: "localhost".to_string(),
            port: 23,
            user: None,
            pass: None,
            commands: Vec::new(),
            prompt: r"\$".to_string(),
            login_prompt: None,
            password_prompt: None,
            prune_ctrl_seq: false,
            debug: false,
            verbosity: 0,
        }
    }
}

fn usage() {
    eprintln!("Usage: netops [options]");
    eprintln!("  -H, --host <host>             target host (default: localhost)");
    eprintln!("  -P, --port <port>             target port (default: 23)");
    eprintln!("  -u, --user <name>             login username");
    eprintln!("  -p, --pass <password>         login password");
    eprintln!("  -c, --cmd <command>           command to run (repeatable)");
    eprintln!("      --prompt <regex>          shell prompt pattern (default: \\$)");
    eprintln!("      --login-prompt <text>     username prompt (default: login:)");
    eprintln!("      --password-prompt <text>  password prompt (default: Password:)");
    eprintln!("      --prune-ctrl-seq          strip ANSI sequences from output");
    eprintln!("  -d, --debug                   log protocol events");
    eprintln!("  -v, --verbosity               increase log verbosity (repeatable)");
    eprintln!("  -h, --help                    show this help");
}

/// Parse command line arguments
fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(flag) = iter.next() {
        let mut value_for = |name: &str| {
            iter.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "-H" | "--host" => args.host = value_for(&flag)?,
            "-P" | "--port" => {
                args.port = value_for(&flag)?
                    .parse()
                    .map_err(|_| format!("invalid port for {flag}"))?;
            }
            "-u" | "--user" => args.user = Some(value_for(&flag)?),
            "-p" | "--pass" => args.pass = Some(value_for(&flag)?),
            "-c" | "--cmd" => args.commands.push(value_for(&flag)?),
            "--prompt" => args.prompt = value_for(&flag)?,
            "--login-prompt" => args.login_prompt = Some(value_for(&flag)?),
            "--password-prompt" => args.password_prompt = Some(value_for(&flag)?),
            "--prune-ctrl-seq" => args.prune_ctrl_seq = true,
            "-d" | "--debug" => args.debug = true,
            "-v" | "--verbosity" => args.verbosity += 1,
            "-h" | "--help" => {
                usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown flag: {other}")),
        }
    }

    Ok(args)
}

#[tokio::main]
async fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {message}");
            usage();
            std::process::exit(1);
        }
    };

    let level = match args.verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(error) = run(args).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::new(args.host.clone(), args.port)
        .with_prompt(&args.prompt)
        .with_prune_control_sequences(args.prune_ctrl_seq)
        .with_debug(args.debug);

    println!("Connecting to {}:{}...", args.host, args.port);
    let mut client = TelnetClient::connect(config).await?;

    if let (Some(user), Some(pass)) = (args.user.as_deref(), args.pass.as_deref()) {
        let login_prompt = args.login_prompt.as_deref().unwrap_or("login:");
        let password_prompt = args.password_prompt.as_deref().unwrap_or("Password:");
        client
            .login(user, pass, Some(login_prompt), Some(password_prompt))
            .await?;
        println!("Logged in as {user}");
    }

    for command in &args.commands {
        println!("> {command}");
        for line in client.exec(command).await? {
            println!("{line}");
        }
    }

    client.disconnect().await?;
    Ok(())
}
