//! The worker owns the authoritative line buffer for one editor session and
//! re-assembles it on a debounce. One synchronous pass at a time; later
//! input supersedes the buffer rather than cancelling anything.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use qsasm::assemble;

use crate::protocol::{ClientMessage, EditRange, ServerMessage};

/// Quiet window after a burst of messages before the next assembly pass.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Synchronous core of the worker: the line buffer plus one `process` step.
#[derive(Debug, Default)]
pub struct AsmWorker {
    lines: Vec<String>,
    manual_stack: bool,
}

impl AsmWorker {
    pub fn new(manual_stack: bool) -> Self {
        AsmWorker {
            lines: Vec::new(),
            manual_stack,
        }
    }

    pub fn receive(&mut self, message: ClientMessage) {
        match message {
            ClientMessage::NewAssemblyInput { assembly } => self.lines = assembly,
            ClientMessage::AssemblyChangeInput { changes } => {
                for change in &changes {
                    self.apply_change(change);
                }
            }
        }
    }

    /// Runs one assembly pass over the current buffer.
    pub fn process(&self) -> ServerMessage {
        let assembly = assemble(&self.lines, self.manual_stack);

        ServerMessage::NewObjectCodeOutput {
            object_code: assembly.object_code.segments,
            errors: assembly.diagnostics,
        }
    }

    fn apply_change(&mut self, change: &EditRange) {
        let start_line = change.start_line as usize;
        let end_line = change.end_line as usize;

        if start_line == 0
            || start_line > end_line
            || end_line > self.lines.len()
        {
            return;
        }

        let new_lines: Vec<&str> = change.text.split('\n').collect();
        let lines_changed = end_line - start_line + 1;

        if lines_changed == 1 {
            self.replace_line_part(start_line, change.start_col, change.end_col, &new_lines);
        } else if new_lines.len() == 1 {
            self.replace_lines_and_merge_line_parts(
                start_line,
                end_line,
                change.start_col,
                change.end_col,
                new_lines[0],
            );
        } else {
            // Keep the left part of the first changed line.
            self.replace_line_part_right(start_line, change.start_col, new_lines[0]);

            // Keep the right part of the last changed line.
            self.replace_line_part_left(end_line, change.end_col, new_lines[new_lines.len() - 1]);

            // Replace all the lines in between. This has to happen last.
            self.replace_lines(
                start_line + 1,
                end_line - 1,
                &new_lines[1..new_lines.len() - 1],
            );
        }
    }

    fn replace_line_part(
        &mut self,
        line_no: usize,
        start_col: u32,
        end_col: u32,
        new_line_parts: &[&str],
    ) {
        let line = &self.lines[line_no - 1];
        // Keep the parts of the line that weren't affected by the edit.
        let line_start = prefix(line, start_col);
        let line_end = suffix(line, end_col);

        if new_line_parts.len() == 1 {
            self.lines[line_no - 1] = format!("{line_start}{}{line_end}", new_line_parts[0]);
        } else {
            let mut replacement = vec![format!("{line_start}{}", new_line_parts[0])];
            replacement.extend(
                new_line_parts[1..new_line_parts.len() - 1]
                    .iter()
                    .map(|s| s.to_string()),
            );
            replacement.push(format!(
                "{}{line_end}",
                new_line_parts[new_line_parts.len() - 1]
            ));

            self.lines.splice(line_no - 1..line_no, replacement);
        }
    }

    fn replace_line_part_left(&mut self, line_no: usize, end_col: u32, new_line_part: &str) {
        let line_end = suffix(&self.lines[line_no - 1], end_col);
        self.lines[line_no - 1] = format!("{new_line_part}{line_end}");
    }

    fn replace_line_part_right(&mut self, line_no: usize, start_col: u32, new_line_part: &str) {
        let line_start = prefix(&self.lines[line_no - 1], start_col);
        self.lines[line_no - 1] = format!("{line_start}{new_line_part}");
    }

    fn replace_lines(&mut self, start_line: usize, end_line: usize, new_lines: &[&str]) {
        self.lines.splice(
            start_line - 1..end_line,
            new_lines.iter().map(|s| s.to_string()),
        );
    }

    fn replace_lines_and_merge_line_parts(
        &mut self,
        start_line: usize,
        end_line: usize,
        start_col: u32,
        end_col: u32,
        new_line_part: &str,
    ) {
        // Keep the parts of the boundary lines that weren't affected by the
        // edit.
        let line_start = prefix(&self.lines[start_line - 1], start_col);
        let line_end = suffix(&self.lines[end_line - 1], end_col);

        self.lines.splice(
            start_line - 1..end_line,
            [format!("{line_start}{new_line_part}{line_end}")],
        );
    }
}

/// Characters before the 1-based column.
fn prefix(line: &str, col: u32) -> String {
    line.chars().take(col.saturating_sub(1) as usize).collect()
}

/// Characters from the 1-based column on.
fn suffix(line: &str, col: u32) -> String {
    line.chars().skip(col.saturating_sub(1) as usize).collect()
}

/// Handle to a background worker. Dropping it shuts the worker down.
pub struct WorkerHandle {
    sender: Option<Sender<ClientMessage>>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Queues a message. Returns false when the worker is gone.
    pub fn send(&self, message: ClientMessage) -> bool {
        self.sender
            .as_ref()
            .map_or(false, |sender| sender.send(message).is_ok())
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.sender.take();

        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Spawns the worker thread for one editor session. The first message after
/// idle is processed immediately; bursts are coalesced by re-assembling
/// again after each quiet window until the queue stays empty.
pub fn spawn<F>(manual_stack: bool, mut on_output: F) -> WorkerHandle
where
    F: FnMut(ServerMessage) + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();

    let thread = thread::spawn(move || {
        let mut worker = AsmWorker::new(manual_stack);

        while let Ok(first) = receiver.recv() {
            worker.receive(first);

            while let Ok(message) = receiver.try_recv() {
                worker.receive(message);
            }

            on_output(worker.process());

            loop {
                let deadline = Instant::now() + DEBOUNCE;
                let mut received = false;

                loop {
                    let timeout = deadline.saturating_duration_since(Instant::now());

                    match receiver.recv_timeout(timeout) {
                        Ok(message) => {
                            worker.receive(message);
                            received = true;
                        }
                        Err(RecvTimeoutError::Timeout) => break,
                        Err(RecvTimeoutError::Disconnected) => return,
                    }
                }

                if !received {
                    break;
                }

                on_output(worker.process());
            }
        }
    });

    WorkerHandle {
        sender: Some(sender),
        thread: Some(thread),
    }
}
