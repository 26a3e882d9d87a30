use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::error;

use super::command::Command;
use crate::application::{ChatSession, QaService};

/// Interactive chat until `exit`/`quit` or end of input. A failed turn is
/// reported and the loop carries on.
pub async fn run_chat<R, W>(session: &mut ChatSession, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Chat with Claude (type 'exit' to quit):")?;
    let mut lines = input.lines();

    loop {
        write!(out, "\nYou: ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match Command::parse(&line) {
            Command::Exit => break,
            Command::Empty => continue,
            Command::Clear => {
                session.clear();
                writeln!(out, "Conversation history cleared.")?;
            }
            Command::Input(text) => match session.send(text).await {
                Ok(reply) => writeln!(out, "\nClaude: {reply}")?,
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    error!(error = %e, "chat turn failed");
                    writeln!(out, "\nError: {e}")?;
                }
            },
        }
    }

    session.end();
    writeln!(out, "Ending chat session.")?;
    Ok(())
}

/// Question loop over an indexed document.
pub async fn run_qa<R, W>(qa: &QaService, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "\nEnter your question (or 'quit' to exit): ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let question = match Command::parse(&line) {
            Command::Exit => break,
            Command::Empty | Command::Clear => continue,
            Command::Input(text) => text,
        };

        writeln!(out, "Question: {question}")?;
        match qa.answer(question, qa.default_top_k()).await {
            Ok(answer) => {
                writeln!(out, "Answer: {}", answer.text)?;
                for (i, source) in answer.sources.iter().enumerate() {
                    let page = source
                        .chunk
                        .metadata
                        .page
                        .map(|p| format!("page {p}"))
                        .unwrap_or_else(|| "no page".to_string());
                    writeln!(
                        out,
                        "  [{}] chunk {} ({page}, distance {:.4})",
                        i + 1,
                        source.chunk.chunk_index,
                        source.distance
                    )?;
                }
            }
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                error!(error = %e, "question failed");
                writeln!(out, "Error: {e}")?;
            }
        }
    }

    Ok(())
}
