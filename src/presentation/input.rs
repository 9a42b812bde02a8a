// Terminal input - lines read as a stream of parsed commands, and the loop that drives them
use crate::application::orchestrator::{DashboardController, DashboardEvent};
use crate::application::view::DashboardView;
use crate::presentation::commands::{Command, CommandError, Flow, dispatch};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_stream::{Stream, StreamExt};

enum Input {
    Command(Option<Result<Command, CommandError>>),
    Event(DashboardEvent),
}

/// Parse each non-blank line of `reader` into a command. Ends at EOF or on
/// a read error.
pub fn command_stream<R>(reader: R) -> impl Stream<Item = Result<Command, CommandError>>
where
    R: AsyncRead + Unpin,
{
    async_stream::stream! {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    yield line.parse::<Command>();
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    }
}

/// Interleave user commands with fetch results until `quit` or the end of
/// input. At end of input, fetches still in flight are applied before
/// returning; `quit` returns at once.
pub async fn run_commands<V, S>(controller: &mut DashboardController<V>, commands: S)
where
    V: DashboardView,
    S: Stream<Item = Result<Command, CommandError>>,
{
    tokio::pin!(commands);

    loop {
        let input = tokio::select! {
            command = commands.next() => Input::Command(command),
            Some(event) = controller.next_event() => Input::Event(event),
        };

        match input {
            Input::Event(event) => controller.apply(event),
            Input::Command(Some(Ok(command))) => {
                if dispatch(controller, command) == Flow::Quit {
                    break;
                }
            }
            Input::Command(Some(Err(e))) => controller
                .view_mut()
                .notice(&format!("{e} (type `help` for commands)")),
            Input::Command(None) => {
                tracing::debug!("End of input, waiting for outstanding fetches");
                controller.settle().await;
                break;
            }
        }
    }
}
