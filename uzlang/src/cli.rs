use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Status lines printed around a script run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Running,
    Finished,
    Failed,
    Warning,
}

impl Status {
    fn label(&self) -> &'static str {
        match self {
            Status::Running => "Running",
            Status::Finished => "Finished",
            Status::Failed => "Failed",
            Status::Warning => "Warning",
        }
    }

    fn color(&self) -> Color {
        match self {
            Status::Running | Status::Finished => Color::Green,
            Status::Failed => Color::Red,
            Status::Warning => Color::Yellow,
        }
    }
}

pub(crate) fn print_running(path: &str) {
    print_status(Status::Running, path)
}

pub(crate) fn print_finished(duration: Duration) {
    print_status(Status::Finished, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_failed(duration: Duration) {
    print_status(Status::Failed, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_warning(text: &str) {
    print_status(Status::Warning, text)
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub(crate) fn print_status(status: Status, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    write_status(&mut buffer, status, text).expect("write status line");
    buffer_writer.print(&buffer).expect("print status line");
}

/// Writes `status` right-aligned in a bold column, followed by `text`.
fn write_status(buffer: &mut Buffer, status: Status, text: &str) -> std::io::Result<()> {
    buffer.set_color(
        ColorSpec::new()
            .set_intense(true)
            .set_bold(true)
            .set_fg(Some(status.color())),
    )?;
    write!(buffer, "{: >11}", status.label())?;

    buffer.reset()?;
    writeln!(buffer, " {text}")
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn color_choice() -> ColorChoice {
    let forced = std::env::var("FORCE_COLOR")
        .map(|force| !force.is_empty())
        .unwrap_or(false);

    if forced {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use termcolor::Buffer;

    use super::{seconds, write_status, Status};

    #[test]
    fn test_seconds() {
        assert_eq!(seconds(Duration::from_millis(0)), "0.00s");
        assert_eq!(seconds(Duration::from_millis(1234)), "1.23s");
        assert_eq!(seconds(Duration::from_secs(2)), "2.00s");
    }

    #[test]
    fn test_status_lines() -> std::io::Result<()> {
        let mut buffer = Buffer::no_color();

        write_status(&mut buffer, Status::Running, "main.uzlang")?;
        write_status(&mut buffer, Status::Failed, "in 0.01s")?;

        let text = String::from_utf8(buffer.into_inner()).expect("status lines are utf8");

        assert_eq!(text, "    Running main.uzlang\n     Failed in 0.01s\n");

        Ok(())
    }
}
