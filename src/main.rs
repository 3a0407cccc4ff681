use std::{env, io, process};

use coin_vend::csv::{read_commands, write_events};
use coin_vend::{ChangeStrategy, Recorder, VendingMachine};
use tokio_stream::wrappers::ReceiverStream;
use tracing::level_filters::LevelFilter;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the change-making strategy.
const CHANGE_STRATEGY_VAR: &str = "COIN_VEND_CHANGE";

fn change_strategy() -> ChangeStrategy {
    match env::var(CHANGE_STRATEGY_VAR) {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            warn!("{e}, falling back to greedy");
            ChangeStrategy::Greedy
        }),
        Err(_) => ChangeStrategy::default(),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = env::args().nth(1) else {
        error!("usage: coin-vend <commands.csv>");
        process::exit(2);
    };

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let commands = match read_commands(path.clone()) {
        Ok(commands) => commands,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let mut machine = VendingMachine::with_strategy(Recorder::new(), change_strategy());
    let (command_sender, command_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in commands {
            match result {
                Ok(command) => {
                    if command_sender.send(command).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    machine.run(ReceiverStream::new(command_receiver)).await;

    let credit = machine.credit();
    let recorder = machine.into_hardware();
    if let Err(e) = write_events(io::stdout().lock(), recorder.events(), credit) {
        error!("failed to write events: {e}");
        process::exit(1);
    }
}
