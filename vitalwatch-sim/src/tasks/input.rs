//! Operator input task
//!
//! Reads commands from stdin, one per line. Bad lines are logged and
//! skipped; end of input just ends the task.

use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::channels::COMMAND_CHANNEL;
use crate::command::parse_command;

/// Input task - forwards parsed stdin commands to the controller
pub async fn input_task() {
    info!("Input task started");

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(command) => COMMAND_CHANNEL.send(command).await,
                    Err(e) => warn!(line = %line.trim(), "Ignoring command: {}", e),
                }
            }
            Ok(None) => {
                debug!("stdin closed");
                return;
            }
            Err(e) => {
                warn!("stdin read failed: {}", e);
                return;
            }
        }
    }
}
