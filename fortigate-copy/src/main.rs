use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::{Input, Password};
use fortigate_api::{ClientOptions, Credentials, FortiGateConnector};
use fortigate_copy::driver::{run, RunOptions};
use fortigate_copy::report::render_summary;
use fortigate_copy::rewrite::{default_policy_rewrite, load_policy_rewrite, PolicyRewrite};

mod cli;
mod host_guard;
mod logging;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    host_guard::ensure_distinct_hosts(&cli.source, &cli.destination)?;
    let rewrite = resolve_rewrite(&cli)?;
    let credentials = prompt_credentials()?;

    let options = ClientOptions {
        timeout: (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout)),
        verify_tls: cli.verify_tls,
    };
    let source = FortiGateConnector::new(&cli.source, credentials.clone(), options);
    let destination = FortiGateConnector::new(&cli.destination, credentials, options);

    let summary = run(&source, &destination, &RunOptions { rewrite })
        .with_context(|| format!("copy from {} to {} aborted", cli.source, cli.destination))?;

    println!();
    println!("{}", render_summary(&summary));
    Ok(())
}

fn resolve_rewrite(cli: &Cli) -> Result<PolicyRewrite> {
    let mut rewrite = match &cli.rewrite_file {
        Some(path) => load_policy_rewrite(path)?,
        None => default_policy_rewrite(),
    };
    rewrite.log_all_traffic |= cli.log_all_traffic;
    rewrite.strip_comments |= cli.strip_comments;
    Ok(rewrite)
}

fn prompt_credentials() -> Result<Credentials> {
    let username: String = Input::new()
        .with_prompt("Username")
        .interact_text()
        .context("failed to read username")?;
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .context("failed to read password")?;
    Ok(Credentials { username, password })
}
