//! Interactive terminal front end.
//!
//! A plain line sets the query and submits it (Enter is the submit key). An
//! empty line submits the current form. Commands start with `:` and only
//! change the form, they never search on their own.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::api::SearchBackend;
use crate::category::{CategoryFilter, UnknownCategory};
use crate::render::{render_examples, render_state};
use crate::session::{EXAMPLE_QUERIES, SearchSession, SubmitOutcome};

pub const HELP: &str = "\
Sorgunuzu yazıp Enter'a basın. Boş satır mevcut sorguyu tekrar arar.
  :sorgu <metin>      sorguyu ayarla (aramaz)
  :kategori <ad>      kategori filtresi (Tümü, Fitness, Finance, ...)
  :ornek <n>          n. örnek sorguyu seç (aramaz)
  :ornekler           örnek sorguları listele
  :yardim             bu yardım
  :cikis              çık";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Optionally replace the query, then submit.
    Submit(Option<String>),
    SetQuery(String),
    Category(CategoryFilter),
    /// 1-based index into the example queries.
    Example(usize),
    Examples,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    #[error("bilinmeyen komut: {0} (:yardim)")]
    UnknownCommand(String),
    #[error("{0} komutu bir değer bekliyor")]
    MissingArgument(&'static str),
    #[error("geçersiz örnek numarası: {0}")]
    BadExample(String),
    #[error(transparent)]
    Category(#[from] UnknownCategory),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<ShellCommand, ShellError> {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            if line.is_empty() {
                return Ok(ShellCommand::Submit(None));
            }
            return Ok(ShellCommand::Submit(Some(line.to_string())));
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "sorgu" | "query" if arg.is_empty() => Err(ShellError::MissingArgument(":sorgu")),
            "sorgu" | "query" => Ok(ShellCommand::SetQuery(arg.to_string())),
            "kategori" | "category" => Ok(ShellCommand::Category(arg.parse()?)),
            "ornek" | "example" => {
                if arg.is_empty() {
                    return Err(ShellError::MissingArgument(":ornek"));
                }
                match arg.parse::<usize>() {
                    Ok(n) if (1..=EXAMPLE_QUERIES.len()).contains(&n) => {
                        Ok(ShellCommand::Example(n))
                    }
                    _ => Err(ShellError::BadExample(arg.to_string())),
                }
            }
            "ornekler" | "examples" => Ok(ShellCommand::Examples),
            "yardim" | "help" | "h" => Ok(ShellCommand::Help),
            "cikis" | "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            other => Err(ShellError::UnknownCommand(format!(":{other}"))),
        }
    }
}

/// Runs the shell until `:cikis`, end of input, or session teardown. The
/// session is torn down on return.
pub async fn run<B, R, W>(session: &SearchSession<B>, input: R, output: &mut W) -> Result<()>
where
    B: SearchBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "{HELP}\n")?;
    writeln!(output, "{}\n", render_examples())?;

    let mut lines = input.lines();
    loop {
        write!(output, "> ")?;
        output.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => writeln!(output, "{HELP}")?,
            ShellCommand::Examples => writeln!(output, "{}", render_examples())?,
            ShellCommand::SetQuery(query) => {
                writeln!(output, "Sorgu: {query}")?;
                session.set_query(query);
            }
            ShellCommand::Category(category) => {
                session.set_category(category);
                writeln!(output, "Kategori: {category}")?;
            }
            ShellCommand::Example(n) => {
                let example = EXAMPLE_QUERIES[n - 1];
                session.choose_example(example);
                writeln!(output, "Sorgu: {example}")?;
            }
            ShellCommand::Submit(query) => {
                if let Some(query) = query {
                    session.set_query(query);
                }
                if session.can_submit() {
                    writeln!(output, "Aranıyor...")?;
                }
                match session.submit().await {
                    SubmitOutcome::Rejected => {}
                    SubmitOutcome::Cancelled => break,
                    SubmitOutcome::Populated | SubmitOutcome::Failed | SubmitOutcome::Superseded => {
                        writeln!(output, "{}\n", render_state(&session.state()))?;
                    }
                }
            }
        }
    }

    session.teardown();
    Ok(())
}
