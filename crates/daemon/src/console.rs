//! Console transport adapter.
//!
//! Stands in for the real chat transport: one inbound event per stdin
//! line, responses printed to stdout. Each line is handled in its own
//! task, so concurrent users are genuinely concurrent here too; the
//! session store serializes per user.
//!
//! Line formats:
//!   `<user_id> <display_name>: <text>`  plain message
//!   `<user_id> callback <data>`         callback acknowledgement

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::warn;

use waitline_core::application::{
    Dispatcher, InboundCallback, InboundMessage, OutboundResponse, UserRef,
};

pub fn print_usage() {
    println!("waitline console: '<user_id> <name>: <text>' or '<user_id> callback <data>'");
}

pub async fn run(dispatcher: Arc<Dispatcher>) -> Result<()> {
    serve(dispatcher, BufReader::new(tokio::io::stdin())).await
}

async fn serve<R>(dispatcher: Arc<Dispatcher>, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut handlers = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        let Some(event) = parse_line(&line) else {
            warn!(%line, "unparseable console line");
            continue;
        };

        let dispatcher = Arc::clone(&dispatcher);
        handlers.spawn(async move {
            match event {
                ConsoleEvent::Message(msg) => {
                    let response = dispatcher.handle_message(msg).await;
                    print_response(&response);
                }
                ConsoleEvent::Callback(cb) => {
                    let ack = dispatcher.handle_callback(cb).await;
                    println!("[ack {}] {}", ack.callback_id, ack.ack);
                    if let Some(response) = ack.response {
                        print_response(&response);
                    }
                }
            }
        });
    }

    // EOF: drain in-flight handlers so no response is dropped.
    while let Some(result) = handlers.join_next().await {
        if let Err(err) = result {
            warn!(error = %err, "console handler task failed");
        }
    }

    Ok(())
}

enum ConsoleEvent {
    Message(InboundMessage),
    Callback(InboundCallback),
}

fn parse_line(line: &str) -> Option<ConsoleEvent> {
    let (head, rest) = line.split_once(' ')?;
    let user_id: i64 = head.parse().ok()?;

    if let Some(data) = rest.strip_prefix("callback ") {
        return Some(ConsoleEvent::Callback(InboundCallback {
            user_id,
            callback_id: format!("console-{user_id}"),
            data: data.trim().to_string(),
        }));
    }

    let (name, text) = rest.split_once(':')?;
    Some(ConsoleEvent::Message(InboundMessage {
        user: UserRef {
            id: user_id,
            display_name: name.trim().to_string(),
        },
        text: text.trim().to_string(),
    }))
}

fn print_response(response: &OutboundResponse) {
    println!("[to {}] {}", response.user_id, response.text);
    if let Some(menu) = &response.menu {
        for label in menu {
            println!("  [{label}]");
        }
    }
}
